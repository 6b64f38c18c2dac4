// Role-based dashboard aggregation: several independent backend calls fanned
// out concurrently, folded into one always-complete display model. A failed
// slice degrades to its zero value; it never takes the dashboard down.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ApiError;
use crate::models::{Booking, CaregiverStats, Earnings, OwnerStats, Pet, Role, ServiceListing};
use crate::services::api::PetCareApi;
use crate::services::format::{booking_view, BookingView};

// How many past bookings the recent bucket asks for.
const HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Owner(OwnerStats),
    Caregiver(CaregiverStats),
}

impl DashboardStats {
    pub fn zeroed(role: Role) -> Self {
        match role {
            Role::PetOwner => DashboardStats::Owner(OwnerStats::default()),
            Role::Caregiver => DashboardStats::Caregiver(CaregiverStats::default()),
        }
    }
}

// One dashboard fetch, rebuilt from scratch on every refresh and discarded
// when the screen goes away. Structurally complete even under total failure.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub role: Role,
    pub stats: DashboardStats,
    // Populated (possibly zeroed) for caregivers, None for owners.
    pub earnings: Option<Earnings>,
    pub today: Vec<BookingView>,
    pub upcoming: Vec<BookingView>,
    pub recent: Vec<BookingView>,
    pub pets: Vec<Pet>,
    pub services: Vec<ServiceListing>,
    // First failed slice's message; does not block whatever data did load.
    pub error: Option<String>,
}

impl DashboardModel {
    fn empty(role: Role) -> Self {
        Self {
            role,
            stats: DashboardStats::zeroed(role),
            earnings: (role == Role::Caregiver).then(Earnings::default),
            today: Vec::new(),
            upcoming: Vec::new(),
            recent: Vec::new(),
            pets: Vec::new(),
            services: Vec::new(),
            error: None,
        }
    }
}

// Stateless per call; holds only the gateway it fans out through.
pub struct DashboardService {
    api: Arc<dyn PetCareApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn PetCareApi>) -> Self {
        Self { api }
    }

    pub async fn dashboard(&self, user_id: &str, role: Role) -> DashboardModel {
        match role {
            Role::PetOwner => self.owner_dashboard(user_id).await,
            Role::Caregiver => self.caregiver_dashboard(user_id).await,
        }
    }

    pub async fn owner_dashboard(&self, user_id: &str) -> DashboardModel {
        if user_id.trim().is_empty() {
            tracing::warn!("dashboard requested without a user id");
            let mut model = DashboardModel::empty(Role::PetOwner);
            model.error = Some("No user is signed in.".to_string());
            return model;
        }

        tracing::debug!(user_id, "fetching pet owner dashboard");
        let now = Utc::now();

        // Wait for every slice to settle; an error in one arm cannot cancel
        // the others, and the slice-to-bucket mapping is fixed by position.
        let (stats, upcoming, history, pets) = tokio::join!(
            self.api.owner_stats(),
            self.api.upcoming_bookings(),
            self.api.booking_history(HISTORY_LIMIT),
            self.api.pets(),
        );

        let mut error = None;
        let stats = settle(stats, "stats", &mut error).unwrap_or_default();
        let upcoming = settle(upcoming, "upcoming", &mut error).unwrap_or_default();
        let history = settle(history, "history", &mut error).unwrap_or_default();
        let pets = settle(pets, "pets", &mut error).unwrap_or_default();

        // The today endpoint is caregiver-scoped; owners get the bucket by
        // filtering upcoming bookings to the current date.
        let today: Vec<&Booking> = upcoming.iter().filter(|b| is_today(b, now)).collect();

        DashboardModel {
            role: Role::PetOwner,
            stats: DashboardStats::Owner(stats),
            earnings: None,
            today: today
                .into_iter()
                .map(|b| booking_view(b, Role::PetOwner, now))
                .collect(),
            upcoming: views(&upcoming, Role::PetOwner, now),
            recent: views(&history, Role::PetOwner, now),
            pets,
            services: Vec::new(),
            error,
        }
    }

    pub async fn caregiver_dashboard(&self, user_id: &str) -> DashboardModel {
        if user_id.trim().is_empty() {
            tracing::warn!("dashboard requested without a user id");
            let mut model = DashboardModel::empty(Role::Caregiver);
            model.error = Some("No user is signed in.".to_string());
            return model;
        }

        tracing::debug!(user_id, "fetching caregiver dashboard");
        let now = Utc::now();

        let (stats, earnings, today, upcoming, history, services) = tokio::join!(
            self.api.caregiver_stats(),
            self.api.caregiver_earnings(),
            self.api.today_bookings(),
            self.api.upcoming_bookings(),
            self.api.booking_history(HISTORY_LIMIT),
            self.api.caregiver_services(),
        );

        let mut error = None;
        let stats = settle(stats, "stats", &mut error).unwrap_or_default();
        let earnings = settle(earnings, "earnings", &mut error).unwrap_or_default();
        let today = settle(today, "today", &mut error).unwrap_or_default();
        let upcoming = settle(upcoming, "upcoming", &mut error).unwrap_or_default();
        let history = settle(history, "history", &mut error).unwrap_or_default();
        let services = settle(services, "services", &mut error).unwrap_or_default();

        DashboardModel {
            role: Role::Caregiver,
            stats: DashboardStats::Caregiver(stats),
            earnings: Some(earnings),
            today: views(&today, Role::Caregiver, now),
            upcoming: views(&upcoming, Role::Caregiver, now),
            recent: views(&history, Role::Caregiver, now),
            pets: Vec::new(),
            services,
            error,
        }
    }
}

// Downgrade a failed slice to None, recording the first failure's
// user-facing message.
fn settle<T>(
    result: Result<T, ApiError>,
    slice: &'static str,
    error: &mut Option<String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(slice, error = %e, "dashboard slice failed");
            error.get_or_insert_with(|| e.user_message());
            None
        }
    }
}

fn is_today(booking: &Booking, now: DateTime<Utc>) -> bool {
    booking.start_time.date_naive() == now.date_naive()
}

fn views(bookings: &[Booking], role: Role, now: DateTime<Utc>) -> Vec<BookingView> {
    bookings.iter().map(|b| booking_view(b, role, now)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::models::{BookingStatus, Party, PaymentStatus, ServiceRef};
    use crate::services::api::BookingDetails;

    fn make_booking(id: &str, start: DateTime<Utc>) -> Booking {
        Booking {
            id: id.to_string(),
            status: BookingStatus::Confirmed,
            service: ServiceRef {
                title: "Cat Sitting".to_string(),
                description: None,
                price: 30.0,
            },
            owner: Party {
                id: "u-owner".to_string(),
                name: "Alice".to_string(),
                photo_url: None,
                phone: None,
            },
            caregiver: Party {
                id: "u-caregiver".to_string(),
                name: "Bob".to_string(),
                photo_url: None,
                phone: None,
            },
            pets: vec![],
            start_time: start,
            end_time: start + Duration::hours(2),
            total_amount: 60.0,
            payment_status: PaymentStatus::Pending,
            special_requirements: None,
        }
    }

    // Backend stub: every slice succeeds unless its name is listed in
    // `fail`, and every call is counted.
    struct MockApi {
        fail: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl MockApi {
        fn new(fail: Vec<&'static str>) -> Self {
            Self {
                fail,
                calls: AtomicUsize::new(0),
            }
        }

        fn slice<T>(&self, name: &'static str, value: T) -> Result<T, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.contains(&name) {
                Err(ApiError::Server(500))
            } else {
                Ok(value)
            }
        }
    }

    #[async_trait]
    impl PetCareApi for MockApi {
        async fn upcoming_bookings(&self) -> Result<Vec<Booking>, ApiError> {
            self.slice(
                "upcoming",
                vec![make_booking("bk-up", Utc::now() + Duration::days(3))],
            )
        }

        async fn today_bookings(&self) -> Result<Vec<Booking>, ApiError> {
            self.slice("today", vec![make_booking("bk-today", Utc::now())])
        }

        async fn booking_history(&self, limit: u32) -> Result<Vec<Booking>, ApiError> {
            assert_eq!(limit, 10);
            self.slice(
                "history",
                vec![make_booking("bk-old", Utc::now() - Duration::days(7))],
            )
        }

        async fn booking_details(&self, _id: &str) -> Result<BookingDetails, ApiError> {
            unreachable!("not used by the dashboard")
        }

        async fn update_booking_status(
            &self,
            _id: &str,
            _status: BookingStatus,
            _reason: Option<&str>,
        ) -> Result<Booking, ApiError> {
            unreachable!("not used by the dashboard")
        }

        async fn owner_stats(&self) -> Result<OwnerStats, ApiError> {
            self.slice(
                "stats",
                OwnerStats {
                    total_bookings: 8,
                    upcoming_bookings: 2,
                    completed_bookings: 5,
                    pets: 3,
                },
            )
        }

        async fn caregiver_stats(&self) -> Result<CaregiverStats, ApiError> {
            self.slice(
                "stats",
                CaregiverStats {
                    total_bookings: 12,
                    today_bookings: 1,
                    completed_bookings: 9,
                    average_rating: 4.8,
                },
            )
        }

        async fn caregiver_earnings(&self) -> Result<Earnings, ApiError> {
            self.slice(
                "earnings",
                Earnings {
                    week: 120.0,
                    month: 480.0,
                    total: 2600.0,
                },
            )
        }

        async fn pets(&self) -> Result<Vec<Pet>, ApiError> {
            self.slice(
                "pets",
                vec![Pet {
                    id: "p-1".to_string(),
                    name: "Rex".to_string(),
                    species: None,
                    breed: None,
                    photo_url: None,
                }],
            )
        }

        async fn caregiver_services(&self) -> Result<Vec<ServiceListing>, ApiError> {
            self.slice(
                "services",
                vec![ServiceListing {
                    id: "s-1".to_string(),
                    title: "Dog Walking".to_string(),
                    description: None,
                    price: 25.0,
                    active: true,
                }],
            )
        }
    }

    #[tokio::test]
    async fn test_owner_dashboard_all_success() {
        let service = DashboardService::new(Arc::new(MockApi::new(vec![])));
        let model = service.owner_dashboard("u-owner").await;

        assert!(model.error.is_none());
        assert!(model.earnings.is_none());
        assert_eq!(model.upcoming.len(), 1);
        assert_eq!(model.recent.len(), 1);
        assert_eq!(model.pets.len(), 1);
        assert!(model.services.is_empty());
        match model.stats {
            DashboardStats::Owner(ref stats) => assert_eq!(stats.total_bookings, 8),
            DashboardStats::Caregiver(_) => panic!("owner dashboard carries owner stats"),
        }
    }

    #[tokio::test]
    async fn test_caregiver_dashboard_all_success() {
        let service = DashboardService::new(Arc::new(MockApi::new(vec![])));
        let model = service.caregiver_dashboard("u-caregiver").await;

        assert!(model.error.is_none());
        assert_eq!(model.earnings.as_ref().unwrap().month, 480.0);
        assert_eq!(model.today.len(), 1);
        assert_eq!(model.upcoming.len(), 1);
        assert_eq!(model.recent.len(), 1);
        assert_eq!(model.services.len(), 1);
        assert!(model.pets.is_empty());
        // Caregiver buckets carry the owner party, never the caregiver.
        assert!(model.today[0].owner.is_some());
        assert!(model.today[0].caregiver.is_none());
    }

    #[tokio::test]
    async fn test_single_failed_slice_degrades_alone() {
        let service = DashboardService::new(Arc::new(MockApi::new(vec!["earnings"])));
        let model = service.caregiver_dashboard("u-caregiver").await;

        // The failed slice is zeroed, everything else is populated.
        let earnings = model.earnings.as_ref().unwrap();
        assert_eq!(earnings.total, 0.0);
        assert_eq!(model.today.len(), 1);
        assert_eq!(model.upcoming.len(), 1);
        assert_eq!(model.services.len(), 1);
        match model.stats {
            DashboardStats::Caregiver(ref stats) => assert_eq!(stats.total_bookings, 12),
            DashboardStats::Owner(_) => panic!("caregiver dashboard carries caregiver stats"),
        }
        assert!(model.error.is_some());
    }

    #[tokio::test]
    async fn test_total_failure_still_structurally_complete() {
        let service = DashboardService::new(Arc::new(MockApi::new(vec![
            "stats", "earnings", "today", "upcoming", "history", "services",
        ])));
        let model = service.caregiver_dashboard("u-caregiver").await;

        assert!(model.error.is_some());
        match model.stats {
            DashboardStats::Caregiver(ref stats) => assert_eq!(stats.total_bookings, 0),
            DashboardStats::Owner(_) => panic!("caregiver dashboard carries caregiver stats"),
        }
        assert_eq!(model.earnings.as_ref().unwrap().total, 0.0);
        assert!(model.today.is_empty());
        assert!(model.upcoming.is_empty());
        assert!(model.recent.is_empty());
        assert!(model.services.is_empty());
    }

    #[tokio::test]
    async fn test_error_message_comes_from_taxonomy() {
        let service = DashboardService::new(Arc::new(MockApi::new(vec!["stats"])));
        let model = service.owner_dashboard("u-owner").await;
        assert_eq!(
            model.error.as_deref(),
            Some("Something went wrong on our end. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_empty_user_id_makes_no_calls() {
        let api = Arc::new(MockApi::new(vec![]));
        let service = DashboardService::new(api.clone());
        let model = service.owner_dashboard("  ").await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(model.error.is_some());
        assert!(model.upcoming.is_empty());
    }

    #[test]
    fn test_is_today_compares_dates() {
        let now = chrono::NaiveDateTime::parse_from_str("2026-08-06 23:00", "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc();
        let same_day = make_booking("a", now - Duration::hours(20));
        let next_day = make_booking("b", now + Duration::hours(2));
        assert!(is_today(&same_day, now));
        assert!(!is_today(&next_day, now));
    }
}
