// Everything the backend (or the network between us and it) can do wrong,
// collapsed to the classes the UI distinguishes. A 401 is the caller's
// signal to invalidate the session.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("session expired")]
    Auth,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("server error ({0})")]
    Server(u16),

    #[error("unexpected response ({status}): {message}")]
    Unknown { status: u16, message: String },
}

impl ApiError {
    // Short human-readable message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ApiError::Auth => "Session expired. Please login again.".to_string(),
            ApiError::Forbidden => "You don't have permission to do that.".to_string(),
            ApiError::NotFound => "That item could not be found.".to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Server(_) => {
                "Something went wrong on our end. Please try again later.".to_string()
            }
            ApiError::Unknown { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}
