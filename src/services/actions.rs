// Role-scoped booking actions. Every action checks the state machine
// locally first, so an invalid attempt fails fast with zero network calls,
// then asks the backend to perform the real transition. The returned
// booking is the backend's word; callers re-fetch the dashboard instead of
// patching local state, since the other party may have raced us.

use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus, Role};
use crate::services::api::PetCareApi;
use crate::services::lifecycle::{transition, BookingAction};

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("cannot {action} a {status} booking as {role}")]
    Precondition {
        status: BookingStatus,
        role: Role,
        action: BookingAction,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Precondition { .. } => {
                "This action is no longer available for this booking.".to_string()
            }
            ActionError::Api(e) => e.user_message(),
        }
    }
}

pub struct BookingActions {
    api: Arc<dyn PetCareApi>,
}

impl BookingActions {
    pub fn new(api: Arc<dyn PetCareApi>) -> Self {
        Self { api }
    }

    pub async fn accept(&self, booking: &Booking, role: Role) -> Result<Booking, ActionError> {
        self.apply(booking, role, BookingAction::Accept, None).await
    }

    pub async fn decline(
        &self,
        booking: &Booking,
        role: Role,
        reason: Option<&str>,
    ) -> Result<Booking, ActionError> {
        self.apply(booking, role, BookingAction::Decline, reason).await
    }

    pub async fn start(&self, booking: &Booking, role: Role) -> Result<Booking, ActionError> {
        self.apply(booking, role, BookingAction::Start, None).await
    }

    pub async fn complete(&self, booking: &Booking, role: Role) -> Result<Booking, ActionError> {
        self.apply(booking, role, BookingAction::Complete, None).await
    }

    pub async fn cancel(
        &self,
        booking: &Booking,
        role: Role,
        reason: Option<&str>,
    ) -> Result<Booking, ActionError> {
        self.apply(booking, role, BookingAction::Cancel, reason).await
    }

    async fn apply(
        &self,
        booking: &Booking,
        role: Role,
        action: BookingAction,
        reason: Option<&str>,
    ) -> Result<Booking, ActionError> {
        let Some(target) = transition(booking.status, role, action) else {
            tracing::debug!(
                booking_id = %booking.id,
                status = booking.status.as_str(),
                role = role.as_str(),
                action = action.as_str(),
                "action rejected by local precondition"
            );
            return Err(ActionError::Precondition {
                status: booking.status,
                role,
                action,
            });
        };

        let updated = self
            .api
            .update_booking_status(&booking.id, target, reason)
            .await?;

        tracing::info!(
            booking_id = %updated.id,
            status = updated.status.as_str(),
            "booking status updated"
        );
        Ok(updated)
    }
}
