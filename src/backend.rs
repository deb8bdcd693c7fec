use crate::error::ApiError;
use crate::types::{Draft, Reservation, ReservationId};
use async_trait::async_trait;

/// The four operations offered by the reservation service. Each call is a
/// single round trip without retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationApi: Send + Sync {
    /// All reservations in the order the service returns them.
    async fn list(&self) -> Result<Vec<Reservation>, ApiError>;
    async fn create(&self, draft: &Draft) -> Result<(), ApiError>;
    async fn update(&self, id: &ReservationId, draft: &Draft) -> Result<(), ApiError>;
    async fn delete(&self, id: &ReservationId) -> Result<(), ApiError>;
}
