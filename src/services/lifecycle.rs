// The booking status state machine. Advisory on the client: the backend
// arbitrates the real transition. These rules mirror it so the UI only
// offers actions the backend would accept, and invalid attempts are
// rejected before any network round-trip.

use serde::{Deserialize, Serialize};

use crate::models::{BookingStatus, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    Accept,
    Decline,
    Start,
    Complete,
    Cancel,
}

pub const ALL_ACTIONS: [BookingAction; 5] = [
    BookingAction::Accept,
    BookingAction::Decline,
    BookingAction::Start,
    BookingAction::Complete,
    BookingAction::Cancel,
];

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Accept => "accept",
            BookingAction::Decline => "decline",
            BookingAction::Start => "start",
            BookingAction::Complete => "complete",
            BookingAction::Cancel => "cancel",
        }
    }

    // The status this action asks the backend to move the booking to.
    pub fn target_status(&self) -> BookingStatus {
        match self {
            BookingAction::Accept => BookingStatus::Confirmed,
            BookingAction::Decline => BookingStatus::Rejected,
            BookingAction::Start => BookingStatus::InProgress,
            BookingAction::Complete => BookingStatus::Completed,
            BookingAction::Cancel => BookingStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// The resulting status if `role` performs `action` on a booking currently
// in `status`, or None if the triple is not allowed.
pub fn transition(status: BookingStatus, role: Role, action: BookingAction) -> Option<BookingStatus> {
    use BookingAction::*;
    use BookingStatus::*;
    use Role::*;

    match (status, role, action) {
        (Pending, Caregiver, Accept) => Some(Confirmed),
        (Pending, Caregiver, Decline) => Some(Rejected),
        (Pending, PetOwner, Cancel) => Some(Cancelled),
        (Confirmed, Caregiver, Start) => Some(InProgress),
        (InProgress, Caregiver, Complete) => Some(Completed),
        _ => None,
    }
}

// The actions `role` may currently take on a booking in `status`, in
// declaration order. Drives which affordances the UI shows.
pub fn allowed_actions(status: BookingStatus, role: Role) -> Vec<BookingAction> {
    ALL_ACTIONS
        .iter()
        .copied()
        .filter(|action| transition(status, role, *action).is_some())
        .collect()
}
