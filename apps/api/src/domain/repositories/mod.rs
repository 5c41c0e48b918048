// Repository interfaces (ports)
// Infrastructure provides the MySQL adapters, `testing` the in-memory ones

pub mod course_repository;
pub mod error;
pub mod reservation_repository;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use reservation_repository::ReservationRepository;
pub use user_repository::UserRepository;
