use serde::Serialize;

/// Name given to the dog created for a member's first reservation
pub const DEFAULT_DOG_NAME: &str = "Mon premier chien";

/// A dog booked on a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub id_chien: i64,
    pub id_cours: i64,
}
