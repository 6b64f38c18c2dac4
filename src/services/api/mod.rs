pub mod http;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::models::{
    Booking, BookingStatus, CaregiverStats, Earnings, OwnerStats, Pet, Role, ServiceListing,
};

// Full payload of the details endpoint: the booking, which side of it the
// current user is on, and the chat thread id (chat is rendered elsewhere;
// the id is carried through opaquely).
#[derive(Debug, Clone, Deserialize)]
pub struct BookingDetails {
    pub booking: Booking,
    pub viewer_role: Role,
    #[serde(default)]
    pub thread_id: Option<String>,
}

// The backend REST surface this client consumes, one method per endpoint.
#[async_trait]
pub trait PetCareApi: Send + Sync {
    async fn upcoming_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn today_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn booking_history(&self, limit: u32) -> Result<Vec<Booking>, ApiError>;

    async fn booking_details(&self, id: &str) -> Result<BookingDetails, ApiError>;

    // The backend arbitrates the transition and returns the updated
    // booking, which callers use instead of mutating local state.
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Booking, ApiError>;

    async fn owner_stats(&self) -> Result<OwnerStats, ApiError>;

    async fn caregiver_stats(&self) -> Result<CaregiverStats, ApiError>;

    async fn caregiver_earnings(&self) -> Result<Earnings, ApiError>;

    async fn pets(&self) -> Result<Vec<Pet>, ApiError>;

    async fn caregiver_services(&self) -> Result<Vec<ServiceListing>, ApiError>;
}
