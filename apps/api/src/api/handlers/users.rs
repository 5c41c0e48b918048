use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::{Payload, ResourceId};
use crate::api::handlers::required;
use crate::api::middleware::{Identity, JwtAuth};
use crate::api::state::AppState;
use crate::auth::password::hash_password_async;
use crate::domain::repositories::user_repository::{NewUser, UserChanges, UserProfile, UserRow};
use crate::domain::user::{Email, Role};
use crate::domain::ShortText;

/// Request body for creating or updating an account
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub nom_utilisateur: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

fn ensure_user_manager(identity: &Identity, requested_role: Option<Role>) -> Result<(), ApiError> {
    if !identity.role.can_manage_users() {
        return Err(ApiError::forbidden(format!(
            "Role {} cannot manage users (user {})",
            identity.role, identity.id
        )));
    }
    if requested_role == Some(Role::Admin) && identity.role != Role::Admin {
        return Err(ApiError::forbidden(format!(
            "Only admins may grant the admin role (user {})",
            identity.id
        )));
    }
    Ok(())
}

async fn hash(state: &AppState, password: String) -> Result<String, ApiError> {
    hash_password_async(password, state.bcrypt_cost)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))
}

/// List every account, raw rows
///
/// GET /utilisateurs/liste
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Get an account by ID
///
/// GET /utilisateur/:id
pub async fn get_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", id)))?;

    Ok(Json(user))
}

/// Create an account (coach or admin)
///
/// POST /utilisateur
pub async fn create_user(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    Payload(req): Payload<UserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    ensure_user_manager(&identity, req.role)?;

    let nom = required("nom", req.nom, ShortText::new)?;
    let prenom = required("prenom", req.prenom, ShortText::new)?;
    let nom_utilisateur = required("nom_utilisateur", req.nom_utilisateur, ShortText::new)?;
    let email = required("email", req.email, Email::new)?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("password is required"))?;

    let profile = state
        .users
        .create(NewUser {
            nom,
            prenom,
            nom_utilisateur,
            email,
            password_hash: hash(&state, password).await?,
            role: req.role.unwrap_or(Role::DEFAULT),
        })
        .await?;

    tracing::info!(id = profile.id_utilisateur, by = identity.id, "User created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update an account (coach or admin)
///
/// An omitted password or role keeps the stored one. Only an admin may
/// update an admin account.
///
/// PUT /utilisateur/:id
pub async fn update_user(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    ResourceId(id): ResourceId,
    Payload(req): Payload<UserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    ensure_user_manager(&identity, req.role)?;

    let target = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", id)))?;
    if target.nom_role == Role::Admin.as_str() && identity.role != Role::Admin {
        return Err(ApiError::forbidden(format!(
            "Only admins may update admin account {} (user {})",
            id, identity.id
        )));
    }

    let nom = required("nom", req.nom, ShortText::new)?;
    let prenom = required("prenom", req.prenom, ShortText::new)?;
    let nom_utilisateur = required("nom_utilisateur", req.nom_utilisateur, ShortText::new)?;
    let email = required("email", req.email, Email::new)?;
    let password_hash = match req.password.filter(|p| !p.is_empty()) {
        Some(password) => Some(hash(&state, password).await?),
        None => None,
    };

    let profile = state
        .users
        .update(
            id,
            UserChanges {
                nom,
                prenom,
                nom_utilisateur,
                email,
                password_hash,
                role: req.role,
            },
        )
        .await?;

    tracing::info!(id, by = identity.id, "User updated");
    Ok(Json(profile))
}

/// Delete an account (admin, or a coach deleting their own account)
///
/// DELETE /utilisateur/:id
pub async fn delete_user(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    if !identity.role.can_delete_user(identity.id, id) {
        return Err(ApiError::forbidden(format!(
            "User {} ({}) cannot delete user {}",
            identity.id, identity.role, id
        )));
    }

    state.users.delete(id).await?;

    tracing::info!(id, by = identity.id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
