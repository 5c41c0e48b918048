use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::course::CourseDuration;
use crate::domain::repositories::RepositoryResult;
use crate::domain::{LongText, ShortText};

/// Catalog entry: every `cours` column plus its type name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CourseListing {
    pub id_cours: i64,
    pub nom_cours: String,
    pub duree_cours: Option<i32>,
    pub date_creation_cours: Option<NaiveDateTime>,
    pub id_utilisateur: Option<i64>,
    pub id_type: i64,
    pub nom_type: String,
}

/// Single course representation returned by reads and writes
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CourseDetail {
    pub id_cours: i64,
    pub nom: String,
    pub duree_cours: Option<i32>,
    pub date_creation_cours: Option<NaiveDateTime>,
    pub id_type: i64,
    pub nom_type: String,
}

/// Validated data for a new course
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub nom: ShortText,
    pub duree: CourseDuration,
    pub nom_type: LongText,
    /// Creator of the course
    pub owner_id: i64,
}

/// Validated changes to a course
///
/// Omitted duration or type keep their current value.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub nom: ShortText,
    pub duree: Option<CourseDuration>,
    pub nom_type: Option<LongText>,
}

/// Repository for the course catalog and course types
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses with their type name
    async fn list(&self) -> RepositoryResult<Vec<CourseListing>>;

    /// Find a course by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<CourseDetail>>;

    /// Find the course type named `nom_type`, creating it if absent
    ///
    /// Returns the type's ID. Never creates two types with the same name.
    async fn resolve_type(&self, nom_type: &LongText) -> RepositoryResult<i64>;

    /// Create a course, resolving its type by name
    ///
    /// Fails with `Conflict` when the name is already taken.
    async fn create(&self, course: NewCourse) -> RepositoryResult<CourseDetail>;

    /// Update a course
    ///
    /// Fails with `Conflict` when another course has the new name and with
    /// `NotFound` when the course does not exist.
    async fn update(&self, id: i64, changes: CourseChanges) -> RepositoryResult<CourseDetail>;

    /// Delete a course, `NotFound` if absent
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
