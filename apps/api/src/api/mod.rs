// API layer module (HTTP adapter)

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{auth, courses, reservations, users};
pub use state::AppState;

/// Builds the router with every route, CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(auth::index))
        .route("/health", get(auth::health_check))
        // Accounts
        .route("/inscription", post(auth::register))
        .route("/connexion", post(auth::login))
        .route("/utilisateurs/liste", get(users::list_users))
        .route("/utilisateur", post(users::create_user))
        .route(
            "/utilisateur/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Courses
        .route("/cours/liste", get(courses::list_courses))
        .route("/cours", post(courses::create_course))
        .route(
            "/cours/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        // Reservations
        .route("/reservations", post(reservations::create_reservation))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
