// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod mysql_course_repository;
pub mod mysql_reservation_repository;
pub mod mysql_user_repository;

pub use mysql_course_repository::MySqlCourseRepository;
pub use mysql_reservation_repository::MySqlReservationRepository;
pub use mysql_user_repository::MySqlUserRepository;
