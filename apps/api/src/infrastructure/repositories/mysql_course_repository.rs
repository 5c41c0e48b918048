use async_trait::async_trait;
use sqlx::{MySqlConnection, MySqlPool};

use crate::domain::repositories::course_repository::{
    CourseChanges, CourseDetail, CourseListing, CourseRepository, NewCourse,
};
use crate::domain::repositories::{RepositoryError, RepositoryResult};
use crate::domain::{LongText, ShortText};

/// MySQL implementation of CourseRepository
///
/// Writes run in a transaction: name check, type resolution, write and
/// re-read either all happen or none do. The unique index on
/// `cours.nom_cours` still settles races between concurrent writers.
pub struct MySqlCourseRepository {
    pool: MySqlPool,
}

impl MySqlCourseRepository {
    /// Creates a new MySqlCourseRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn fetch_detail(
    conn: &mut MySqlConnection,
    id: i64,
) -> RepositoryResult<Option<CourseDetail>> {
    let detail = sqlx::query_as::<_, CourseDetail>(
        r#"
        SELECT c.id_cours, c.nom_cours AS nom, c.duree_cours, c.date_creation_cours,
               c.id_type, t.nom_type
        FROM cours c
        JOIN `type` t ON c.id_type = t.id_type
        WHERE c.id_cours = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(detail)
}

async fn name_taken(
    conn: &mut MySqlConnection,
    nom: &ShortText,
    excluding: Option<i64>,
) -> RepositoryResult<bool> {
    let row = sqlx::query(
        "SELECT 1 FROM cours WHERE nom_cours = ? AND (? IS NULL OR id_cours <> ?)",
    )
    .bind(nom.as_str())
    .bind(excluding)
    .bind(excluding)
    .fetch_optional(conn)
    .await?;
    Ok(row.is_some())
}

/// Upsert-and-fetch-id on `type.nom_type`
///
/// On a duplicate key, `LAST_INSERT_ID(id_type)` makes the server report the
/// existing row's ID as the insert ID.
async fn upsert_type(conn: &mut MySqlConnection, nom_type: &LongText) -> RepositoryResult<i64> {
    let result = sqlx::query(
        "INSERT INTO `type` (nom_type) VALUES (?) \
         ON DUPLICATE KEY UPDATE id_type = LAST_INSERT_ID(id_type)",
    )
    .bind(nom_type.as_str())
    .execute(conn)
    .await?;

    Ok(result.last_insert_id() as i64)
}

fn name_conflict(nom: &ShortText) -> RepositoryError {
    RepositoryError::Conflict(format!("Course name already taken: {}", nom))
}

#[async_trait]
impl CourseRepository for MySqlCourseRepository {
    async fn list(&self) -> RepositoryResult<Vec<CourseListing>> {
        let rows = sqlx::query_as::<_, CourseListing>(
            r#"
            SELECT c.id_cours, c.nom_cours, c.duree_cours, c.date_creation_cours,
                   c.id_utilisateur, c.id_type, t.nom_type
            FROM cours c
            JOIN `type` t ON c.id_type = t.id_type
            ORDER BY c.id_cours
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<CourseDetail>> {
        let mut conn = self.pool.acquire().await?;
        fetch_detail(&mut conn, id).await
    }

    async fn resolve_type(&self, nom_type: &LongText) -> RepositoryResult<i64> {
        let mut conn = self.pool.acquire().await?;
        upsert_type(&mut conn, nom_type).await
    }

    async fn create(&self, course: NewCourse) -> RepositoryResult<CourseDetail> {
        let mut tx = self.pool.begin().await?;

        if name_taken(&mut tx, &course.nom, None).await? {
            return Err(name_conflict(&course.nom));
        }

        let id_type = upsert_type(&mut tx, &course.nom_type).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO cours (nom_cours, duree_cours, id_utilisateur, id_type, date_creation_cours)
            VALUES (?, ?, ?, ?, NOW())
            "#,
        )
        .bind(course.nom.as_str())
        .bind(course.duree.minutes())
        .bind(course.owner_id)
        .bind(id_type)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;
        let detail = fetch_detail(&mut tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Course {}", id)))?;

        tx.commit().await?;
        Ok(detail)
    }

    async fn update(&self, id: i64, changes: CourseChanges) -> RepositoryResult<CourseDetail> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(i64, Option<i32>)> =
            sqlx::query_as("SELECT id_type, duree_cours FROM cours WHERE id_cours = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (current_type, current_duree) =
            current.ok_or_else(|| RepositoryError::NotFound(format!("Course {}", id)))?;

        if name_taken(&mut tx, &changes.nom, Some(id)).await? {
            return Err(name_conflict(&changes.nom));
        }

        let id_type = match &changes.nom_type {
            Some(nom_type) => upsert_type(&mut tx, nom_type).await?,
            None => current_type,
        };
        let duree = changes.duree.map(|d| d.minutes()).or(current_duree);

        sqlx::query(
            r#"
            UPDATE cours
            SET nom_cours = ?, duree_cours = ?, id_type = ?
            WHERE id_cours = ?
            "#,
        )
        .bind(changes.nom.as_str())
        .bind(duree)
        .bind(id_type)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let detail = fetch_detail(&mut tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Course {}", id)))?;

        tx.commit().await?;
        Ok(detail)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM cours WHERE id_cours = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Course {}", id)));
        }

        Ok(())
    }
}
