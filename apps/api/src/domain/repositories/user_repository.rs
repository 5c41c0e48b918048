use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::repositories::RepositoryResult;
use crate::domain::user::{Email, Role};
use crate::domain::ShortText;

/// Raw `utilisateur` row, as returned by the member listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    pub id_utilisateur: i64,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub nom_utilisateur: Option<String>,
    pub email: String,
    pub mot_de_passe: String,
    pub id_role: i64,
    pub date_inscription: Option<NaiveDateTime>,
}

/// Public view of an account, joined with its role name
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id_utilisateur: i64,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub nom_utilisateur: Option<String>,
    pub email: String,
    pub nom_role: String,
    pub date_inscription: Option<NaiveDateTime>,
}

/// What login needs to check a password and issue a token
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id_utilisateur: i64,
    pub email: String,
    pub mot_de_passe: String,
    pub nom_role: String,
}

/// Validated data for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nom: ShortText,
    pub prenom: ShortText,
    pub nom_utilisateur: ShortText,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

/// Validated changes to an existing account
///
/// A `None` password or role leaves the stored value untouched.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub nom: ShortText,
    pub prenom: ShortText,
    pub nom_utilisateur: ShortText,
    pub email: Email,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

/// Repository for club accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All accounts, raw
    async fn list(&self) -> RepositoryResult<Vec<UserRow>>;

    /// Find an account by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<UserProfile>>;

    /// Find login credentials by email address
    async fn find_credentials(&self, email: &Email) -> RepositoryResult<Option<Credentials>>;

    /// Create an account
    ///
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, user: NewUser) -> RepositoryResult<UserProfile>;

    /// Update an account
    ///
    /// Fails with `Conflict` when another account owns the new email and
    /// with `NotFound` when the account does not exist.
    async fn update(&self, id: i64, changes: UserChanges) -> RepositoryResult<UserProfile>;

    /// Delete an account, `NotFound` if absent
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
