use async_trait::async_trait;

use crate::domain::repositories::RepositoryResult;
use crate::domain::reservation::Reservation;

/// Repository for dogs and their course reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Return one of the user's dogs, creating a default one if they own none
    ///
    /// Callable on its own; [`reserve`](Self::reserve) composes the same step
    /// inside its own unit of work, which is how the HTTP layer reaches it.
    async fn ensure_default_dog(&self, user_id: i64) -> RepositoryResult<i64>;

    /// Book a course for one of the user's dogs
    ///
    /// Runs the [`ensure_default_dog`](Self::ensure_default_dog) step and the
    /// booking as one unit of work. Fails with `NotFound` when the course does
    /// not exist (no dog is created) and with `Conflict` when the dog already
    /// holds a reservation for it.
    async fn reserve(&self, user_id: i64, course_id: i64) -> RepositoryResult<Reservation>;
}
