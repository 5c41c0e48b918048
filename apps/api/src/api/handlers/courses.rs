use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::{Payload, ResourceId};
use crate::api::handlers::{optional, required};
use crate::api::middleware::{Identity, JwtAuth};
use crate::api::state::AppState;
use crate::domain::course::CourseDuration;
use crate::domain::repositories::course_repository::{
    CourseChanges, CourseDetail, CourseListing, NewCourse,
};
use crate::domain::{LongText, ShortText};

/// Request body for creating or updating a course
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub nom: Option<String>,
    pub duree_cours: Option<i32>,
    pub nom_type: Option<String>,
}

fn ensure_course_manager(identity: &Identity) -> Result<(), ApiError> {
    if identity.role.can_manage_courses() {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "Role {} cannot manage courses (user {})",
            identity.role, identity.id
        )))
    }
}

fn duration(minutes: i32) -> Result<CourseDuration, ApiError> {
    CourseDuration::new(minutes).map_err(|e| ApiError::bad_request(format!("duree_cours: {}", e)))
}

/// List every course with its type name
///
/// GET /cours/liste
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseListing>>, ApiError> {
    let courses = state.courses.list().await?;
    Ok(Json(courses))
}

/// Get a course by ID
///
/// GET /cours/:id
pub async fn get_course(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<CourseDetail>, ApiError> {
    let course = state
        .courses
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course not found: {}", id)))?;

    Ok(Json(course))
}

/// Create a course (coach or admin)
///
/// POST /cours
pub async fn create_course(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    Payload(req): Payload<CourseRequest>,
) -> Result<(StatusCode, Json<CourseDetail>), ApiError> {
    ensure_course_manager(&identity)?;

    let nom = required("nom", req.nom, ShortText::new)?;
    let nom_type = required("nom_type", req.nom_type, LongText::new)?;
    let duree = req
        .duree_cours
        .ok_or_else(|| ApiError::bad_request("duree_cours is required"))
        .and_then(duration)?;

    let course = state
        .courses
        .create(NewCourse {
            nom,
            duree,
            nom_type,
            owner_id: identity.id,
        })
        .await?;

    tracing::info!(id = course.id_cours, by = identity.id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course (coach or admin)
///
/// PUT /cours/:id
pub async fn update_course(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    ResourceId(id): ResourceId,
    Payload(req): Payload<CourseRequest>,
) -> Result<Json<CourseDetail>, ApiError> {
    ensure_course_manager(&identity)?;

    let nom = required("nom", req.nom, ShortText::new)?;
    let nom_type = optional("nom_type", req.nom_type, LongText::new)?;
    let duree = req.duree_cours.map(duration).transpose()?;

    let course = state
        .courses
        .update(id, CourseChanges { nom, duree, nom_type })
        .await?;

    tracing::info!(id, by = identity.id, "Course updated");
    Ok(Json(course))
}

/// Delete a course (coach or admin)
///
/// DELETE /cours/:id
pub async fn delete_course(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    ensure_course_manager(&identity)?;

    state.courses.delete(id).await?;

    tracing::info!(id, by = identity.id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
