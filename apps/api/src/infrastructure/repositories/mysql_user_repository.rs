use async_trait::async_trait;
use sqlx::{MySqlConnection, MySqlPool};

use crate::domain::repositories::user_repository::{
    Credentials, NewUser, UserChanges, UserProfile, UserRepository, UserRow,
};
use crate::domain::repositories::{RepositoryError, RepositoryResult};
use crate::domain::user::{Email, Role};

const PROFILE_SELECT: &str = r#"
    SELECT u.id_utilisateur, u.nom, u.prenom, u.nom_utilisateur, u.email,
           r.nom_role, u.date_inscription
    FROM utilisateur u
    JOIN role r ON r.id_role = u.id_role
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Creates a new MySqlUserRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn fetch_profile(
    conn: &mut MySqlConnection,
    id: i64,
) -> RepositoryResult<Option<UserProfile>> {
    let sql = format!("{} WHERE u.id_utilisateur = ?", PROFILE_SELECT);
    let profile = sqlx::query_as::<_, UserProfile>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(profile)
}

async fn role_id(conn: &mut MySqlConnection, role: Role) -> RepositoryResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT id_role FROM role WHERE nom_role = ?")
        .bind(role.as_str())
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| RepositoryError::Query(format!("Role missing from schema: {}", role)))
}

async fn email_taken(
    conn: &mut MySqlConnection,
    email: &Email,
    excluding: Option<i64>,
) -> RepositoryResult<bool> {
    let row = sqlx::query(
        "SELECT 1 FROM utilisateur WHERE email = ? AND (? IS NULL OR id_utilisateur <> ?)",
    )
    .bind(email.as_str())
    .bind(excluding)
    .bind(excluding)
    .fetch_optional(conn)
    .await?;
    Ok(row.is_some())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn list(&self) -> RepositoryResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id_utilisateur, nom, prenom, nom_utilisateur, email,
                   mot_de_passe, id_role, date_inscription
            FROM utilisateur
            ORDER BY id_utilisateur
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<UserProfile>> {
        let mut conn = self.pool.acquire().await?;
        fetch_profile(&mut conn, id).await
    }

    async fn find_credentials(&self, email: &Email) -> RepositoryResult<Option<Credentials>> {
        let credentials = sqlx::query_as::<_, Credentials>(
            r#"
            SELECT u.id_utilisateur, u.email, u.mot_de_passe, r.nom_role
            FROM utilisateur u
            JOIN role r ON r.id_role = u.id_role
            WHERE u.email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<UserProfile> {
        let mut tx = self.pool.begin().await?;

        if email_taken(&mut tx, &user.email, None).await? {
            return Err(RepositoryError::Conflict(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        let id_role = role_id(&mut tx, user.role).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO utilisateur
                (nom, prenom, nom_utilisateur, email, mot_de_passe, id_role, date_inscription)
            VALUES (?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(user.nom.as_str())
        .bind(user.prenom.as_str())
        .bind(user.nom_utilisateur.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(id_role)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;
        let profile = fetch_profile(&mut tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", id)))?;

        tx.commit().await?;
        Ok(profile)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> RepositoryResult<UserProfile> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT 1 FROM utilisateur WHERE id_utilisateur = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }

        if email_taken(&mut tx, &changes.email, Some(id)).await? {
            return Err(RepositoryError::Conflict(format!(
                "Email already registered: {}",
                changes.email
            )));
        }

        let id_role = match changes.role {
            Some(role) => Some(role_id(&mut tx, role).await?),
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE utilisateur
            SET nom = ?, prenom = ?, nom_utilisateur = ?, email = ?,
                mot_de_passe = COALESCE(?, mot_de_passe),
                id_role = COALESCE(?, id_role)
            WHERE id_utilisateur = ?
            "#,
        )
        .bind(changes.nom.as_str())
        .bind(changes.prenom.as_str())
        .bind(changes.nom_utilisateur.as_str())
        .bind(changes.email.as_str())
        .bind(changes.password_hash)
        .bind(id_role)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let profile = fetch_profile(&mut tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", id)))?;

        tx.commit().await?;
        Ok(profile)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM utilisateur WHERE id_utilisateur = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }

        Ok(())
    }
}
