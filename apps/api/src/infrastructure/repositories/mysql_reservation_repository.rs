use async_trait::async_trait;
use sqlx::{MySqlConnection, MySqlPool};

use crate::domain::repositories::{RepositoryError, RepositoryResult, ReservationRepository};
use crate::domain::reservation::{Reservation, DEFAULT_DOG_NAME};

/// MySQL implementation of ReservationRepository
pub struct MySqlReservationRepository {
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    /// Creates a new MySqlReservationRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// First dog owned by the user, inserting the default one if they own none
async fn ensure_dog(conn: &mut MySqlConnection, user_id: i64) -> RepositoryResult<i64> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id_chien FROM chien WHERE id_utilisateur = ? ORDER BY id_chien LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(id_chien) = existing {
        return Ok(id_chien);
    }

    let result = sqlx::query("INSERT INTO chien (id_utilisateur, nom_chien) VALUES (?, ?)")
        .bind(user_id)
        .bind(DEFAULT_DOG_NAME)
        .execute(&mut *conn)
        .await?;

    let id_chien = result.last_insert_id() as i64;
    tracing::info!(user_id, id_chien, "Created default dog");
    Ok(id_chien)
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn ensure_default_dog(&self, user_id: i64) -> RepositoryResult<i64> {
        let mut tx = self.pool.begin().await?;
        let id_chien = ensure_dog(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(id_chien)
    }

    async fn reserve(&self, user_id: i64, course_id: i64) -> RepositoryResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let course = sqlx::query("SELECT 1 FROM cours WHERE id_cours = ?")
            .bind(course_id)
            .fetch_optional(&mut *tx)
            .await?;
        if course.is_none() {
            return Err(RepositoryError::NotFound(format!("Course {}", course_id)));
        }

        let id_chien = ensure_dog(&mut tx, user_id).await?;

        let already = sqlx::query("SELECT 1 FROM reservation WHERE id_chien = ? AND id_cours = ?")
            .bind(id_chien)
            .bind(course_id)
            .fetch_optional(&mut *tx)
            .await?;
        if already.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "Dog {} already booked on course {}",
                id_chien, course_id
            )));
        }

        sqlx::query(
            "INSERT INTO reservation (id_chien, id_cours, date_reservation) VALUES (?, ?, NOW())",
        )
        .bind(id_chien)
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Reservation {
            id_chien,
            id_cours: course_id,
        })
    }
}
