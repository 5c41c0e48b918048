use axum::{extract::State, response::Html, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::Payload;
use crate::api::handlers::required;
use crate::api::state::AppState;
use crate::auth::jwt::{create_token, Claims};
use crate::auth::password::{hash_password_async, verify_password_async};
use crate::domain::repositories::user_repository::{NewUser, UserProfile};
use crate::domain::user::{Email, Role};
use crate::domain::ShortText;

/// Request body for self-registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub nom_utilisateur: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register a new member
///
/// POST /inscription
pub async fn register(
    State(state): State<AppState>,
    Payload(req): Payload<RegisterRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let nom = required("nom", req.nom, ShortText::new)?;
    let prenom = required("prenom", req.prenom, ShortText::new)?;
    let nom_utilisateur = required("nom_utilisateur", req.nom_utilisateur, ShortText::new)?;
    let email = required("email", req.email, Email::new)?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("password is required"))?;

    let password_hash = hash_password_async(password, state.bcrypt_cost)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))?;

    let profile = state
        .users
        .create(NewUser {
            nom,
            prenom,
            nom_utilisateur,
            email,
            password_hash,
            role: Role::DEFAULT,
        })
        .await?;

    tracing::info!(id = profile.id_utilisateur, "User registered");
    Ok(Json(profile))
}

/// Login with email and password, returning the bearer token as plain text
///
/// Unknown email and wrong password are both a bare 401.
///
/// POST /connexion
pub async fn login(
    State(state): State<AppState>,
    Payload(req): Payload<LoginRequest>,
) -> Result<String, ApiError> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::bad_request("email and password are required"));
    };

    let email = Email::new(email).map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let credentials = state
        .users
        .find_credentials(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = verify_password_async(password, credentials.mot_de_passe.clone())
        .await
        .map_err(|e| {
            ApiError::internal_server_error(format!("Password verification failed: {}", e))
        })?;

    if !valid {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let role = credentials
        .nom_role
        .parse::<Role>()
        .map_err(ApiError::internal_server_error)?;

    let claims = Claims {
        sub: credentials.email,
        role,
        id: credentials.id_utilisateur,
    };
    let token = create_token(&claims, &state.jwt_secret)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    tracing::info!(id = claims.id, role = %claims.role, "User logged in");
    Ok(token)
}

/// Banner for anyone browsing to the API root
///
/// GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>C'est une API, il n'y a rien à voir ici</h1>")
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
