// Display formatting for bookings: date/duration labels and the role-aware
// view model the dashboard buckets are built from.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::models::{Booking, BookingStatus, Party, Role};
use crate::services::lifecycle::{allowed_actions, BookingAction};

// A booking formatted for one viewer. Exactly one of owner/caregiver is
// populated: each side sees the other party, never itself.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: String,
    pub status: BookingStatus,
    pub service_title: String,
    pub date_label: String,
    pub time_range: String,
    pub duration: String,
    pub pets: Vec<String>,
    pub owner: Option<PartyView>,
    pub caregiver: Option<PartyView>,
    pub total_amount: f64,
    pub special_requirements: Option<String>,
    // What the viewer may do with this booking right now.
    pub actions: Vec<BookingAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartyView {
    pub id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub phone: Option<String>,
}

impl From<&Party> for PartyView {
    fn from(party: &Party) -> Self {
        Self {
            id: party.id.clone(),
            name: party.name.clone(),
            photo_url: party.photo_url.clone(),
            phone: party.phone.clone(),
        }
    }
}

pub fn booking_view(booking: &Booking, viewer: Role, now: DateTime<Utc>) -> BookingView {
    let (owner, caregiver) = match viewer {
        Role::PetOwner => (None, Some(PartyView::from(&booking.caregiver))),
        Role::Caregiver => (Some(PartyView::from(&booking.owner)), None),
    };

    BookingView {
        id: booking.id.clone(),
        status: booking.status,
        service_title: booking.service.title.clone(),
        date_label: format_date(booking.start_time, now),
        time_range: format_time_range(booking.start_time, booking.end_time),
        duration: format_duration(booking.start_time, booking.end_time),
        pets: booking.pets.iter().map(|p| p.name.clone()).collect(),
        owner,
        caregiver,
        total_amount: booking.total_amount,
        special_requirements: booking.special_requirements.clone(),
        actions: allowed_actions(booking.status, viewer),
    }
}

// "Today", "Tomorrow", or a short date ("Oct 6", with the year appended
// only when it differs from the current one).
pub fn format_date(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let date = ts.date_naive();
    let today = now.date_naive();

    if date == today {
        return "Today".to_string();
    }
    if date == today + Duration::days(1) {
        return "Tomorrow".to_string();
    }
    if date.year() == today.year() {
        ts.format("%b %-d").to_string()
    } else {
        ts.format("%b %-d, %Y").to_string()
    }
}

pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} - {}", start.format("%-I:%M %p"), end.format("%-I:%M %p"))
}

// Bucketed by the raw span: minutes under an hour, hours under a day,
// otherwise whole days. Hours and days round to nearest.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let minutes = (end - start).num_minutes().max(0);
    if minutes < 60 {
        plural(minutes, "minute")
    } else if minutes < 24 * 60 {
        plural((minutes + 30) / 60, "hour")
    } else {
        plural((minutes + 720) / 1440, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
