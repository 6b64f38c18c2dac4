use serde::{Deserialize, Serialize};

// The service a booking was made for, as embedded in a booking payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRef {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

// One of a caregiver's own service listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub active: bool,
}
