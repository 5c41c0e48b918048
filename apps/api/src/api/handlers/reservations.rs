use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::Payload;
use crate::api::middleware::JwtAuth;
use crate::api::state::AppState;
use crate::domain::reservation::Reservation;

/// Request body for booking a course
#[derive(Debug, Deserialize)]
pub struct ReservationRequest {
    pub id_cours: Option<i64>,
}

/// Book a course for the caller's dog
///
/// A caller without any dog gets a default one first.
///
/// POST /reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    JwtAuth(identity): JwtAuth,
    Payload(req): Payload<ReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let id_cours = req
        .id_cours
        .ok_or_else(|| ApiError::bad_request("id_cours is required"))?;

    let reservation = state.reservations.reserve(identity.id, id_cours).await?;

    tracing::info!(
        user = identity.id,
        id_chien = reservation.id_chien,
        id_cours = reservation.id_cours,
        "Reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}
