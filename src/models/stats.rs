use serde::{Deserialize, Serialize};

// Every stats struct is zero-defaultable: a failed stats fetch renders as a
// zeroed section, never a missing one.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerStats {
    #[serde(default)]
    pub total_bookings: u32,
    #[serde(default)]
    pub upcoming_bookings: u32,
    #[serde(default)]
    pub completed_bookings: u32,
    #[serde(default)]
    pub pets: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaregiverStats {
    #[serde(default)]
    pub total_bookings: u32,
    #[serde(default)]
    pub today_bookings: u32,
    #[serde(default)]
    pub completed_bookings: u32,
    #[serde(default)]
    pub average_rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Earnings {
    #[serde(default)]
    pub week: f64,
    #[serde(default)]
    pub month: f64,
    #[serde(default)]
    pub total: f64,
}
