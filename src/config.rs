use std::env;

use crate::models::Role;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: String,
    pub role: Role,
    pub user_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("PAWSIT_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            api_token: env::var("PAWSIT_API_TOKEN").unwrap_or_default(),
            role: Role::from_str(&env::var("PAWSIT_ROLE").unwrap_or_default()),
            user_id: env::var("PAWSIT_USER_ID").unwrap_or_default(),
        }
    }
}
