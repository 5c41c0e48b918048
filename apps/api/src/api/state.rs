use std::sync::Arc;

use sqlx::MySqlPool;

use crate::config::Config;
use crate::domain::repositories::{CourseRepository, ReservationRepository, UserRepository};
use crate::infrastructure::repositories::{
    MySqlCourseRepository, MySqlReservationRepository, MySqlUserRepository,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub jwt_secret: Arc<str>,
    pub bcrypt_cost: u32,
}

impl AppState {
    /// State backed by the MySQL repositories
    pub fn mysql(pool: MySqlPool, config: &Config) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            courses: Arc::new(MySqlCourseRepository::new(pool.clone())),
            reservations: Arc::new(MySqlReservationRepository::new(pool)),
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
