use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{BookingDetails, PetCareApi};
use crate::errors::ApiError;
use crate::models::{
    Booking, BookingStatus, CaregiverStats, Earnings, OwnerStats, Pet, ServiceListing,
};

// Thin HTTP client over the backend API: attaches the bearer token to every
// request and maps transport/status failures to ApiError. Holds no other
// state; all data lives on the backend.
pub struct HttpGateway {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        tracing::debug!(path, "GET");
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn decode(resp: reqwest::Response) -> Result<Value, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return resp.json().await.map_err(|e| ApiError::Unknown {
                status: status.as_u16(),
                message: format!("undecodable response body: {e}"),
            });
        }

        // Error bodies are loosely specified; accept {"message": ...} or
        // {"error": ...} and fall back to the bare status.
        let message = resp
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        tracing::warn!(status = status.as_u16(), body = %message, "backend returned an error");

        Err(match status.as_u16() {
            401 => ApiError::Auth,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            422 => ApiError::Validation(if message.is_empty() {
                "The request was rejected as invalid.".to_string()
            } else {
                message
            }),
            s if s >= 500 => ApiError::Server(s),
            s => ApiError::Unknown { status: s, message },
        })
    }

    // List endpoints return either a bare array or an object wrapping one
    // under a known key. Null entries are dropped rather than failing the
    // whole list.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<Vec<T>, ApiError> {
        let value = self.get_value(path).await?;
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove(key) {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => {
                    tracing::warn!(path, key, "list payload missing expected key");
                    Vec::new()
                }
                Some(other) => {
                    return Err(unexpected_shape(path, &other));
                }
            },
            Value::Null => Vec::new(),
            other => return Err(unexpected_shape(path, &other)),
        };

        items
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| serde_json::from_value(v).map_err(|e| decode_failure(path, &e)))
            .collect()
    }

    // Single-object endpoints may wrap their payload the same way.
    async fn get_object<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<T, ApiError> {
        let mut value = self.get_value(path).await?;
        if let Value::Object(map) = &mut value {
            if let Some(inner @ Value::Object(_)) = map.remove(key) {
                value = inner;
            }
        }
        serde_json::from_value(value).map_err(|e| decode_failure(path, &e))
    }
}

fn unexpected_shape(path: &str, value: &Value) -> ApiError {
    tracing::warn!(path, "unexpected payload shape");
    ApiError::Unknown {
        status: 200,
        message: format!("unexpected payload shape at {path}: {value}"),
    }
}

fn decode_failure(path: &str, err: &serde_json::Error) -> ApiError {
    tracing::warn!(path, error = %err, "failed to decode payload");
    ApiError::Unknown {
        status: 200,
        message: format!("failed to decode payload at {path}: {err}"),
    }
}

#[async_trait]
impl PetCareApi for HttpGateway {
    async fn upcoming_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_list("/api/bookings/upcoming", "bookings").await
    }

    async fn today_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_list("/api/bookings/today", "bookings").await
    }

    async fn booking_history(&self, limit: u32) -> Result<Vec<Booking>, ApiError> {
        self.get_list(&format!("/api/bookings/history?limit={limit}"), "bookings")
            .await
    }

    async fn booking_details(&self, id: &str) -> Result<BookingDetails, ApiError> {
        let path = format!("/api/bookings/{id}/details");
        let value = self.get_value(&path).await?;
        serde_json::from_value(value).map_err(|e| decode_failure(&path, &e))
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Booking, ApiError> {
        let mut body = serde_json::json!({ "status": status.as_str() });
        if let Some(reason) = reason {
            body["reason"] = reason.into();
        }

        let path = format!("/api/bookings/{id}/status");
        tracing::debug!(path, status = status.as_str(), "PUT");
        let resp = self
            .client
            .put(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut value = Self::decode(resp).await?;
        // The update response may wrap the booking like the list endpoints do.
        if let Value::Object(map) = &mut value {
            if let Some(inner @ Value::Object(_)) = map.remove("booking") {
                value = inner;
            }
        }
        serde_json::from_value(value).map_err(|e| decode_failure(&path, &e))
    }

    async fn owner_stats(&self) -> Result<OwnerStats, ApiError> {
        self.get_object("/api/stats/user", "stats").await
    }

    async fn caregiver_stats(&self) -> Result<CaregiverStats, ApiError> {
        self.get_object("/api/stats/caregiver", "stats").await
    }

    async fn caregiver_earnings(&self) -> Result<Earnings, ApiError> {
        self.get_object("/api/stats/caregiver/earnings", "earnings")
            .await
    }

    async fn pets(&self) -> Result<Vec<Pet>, ApiError> {
        self.get_list("/api/pets", "pets").await
    }

    async fn caregiver_services(&self) -> Result<Vec<ServiceListing>, ApiError> {
        self.get_list("/api/caregiver/services", "services").await
    }
}
