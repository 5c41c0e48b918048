// JWT token creation and verification
// Tokens carry no expiry: they stay valid until the signing secret changes

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::Role;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (account email)
/// * `role` - Club role at login time
/// * `id` - Account ID
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub id: i64,
}

/// Signs `claims` into a token with HS256
///
/// # Example
/// ```
/// use club_canin_api::auth::jwt::{create_token, Claims};
/// use club_canin_api::domain::user::Role;
///
/// let claims = Claims { sub: "coach@club.fr".into(), role: Role::Coach, id: 2 };
/// let token = create_token(&claims, "your-secret-key").expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies the signature and shape of a token and returns its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &validation)
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
}
