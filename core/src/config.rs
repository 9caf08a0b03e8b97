//! Client configuration read from the environment.
//!
//! Variables (all optional):
//! - `TODO_API_URL`: base url of the todo API, default `http://127.0.0.1:8000`
//! - `TODO_LOGIN_PATH`: where a 401 navigates to, default `/login`
//! - `TODO_COOKIE_NAME`: cookie holding the token, default `access_token`
//!
//! Loading a `.env` file is left to the binary.

use std::env;

use crate::api::LOGIN_PATH;
use crate::credential::ACCESS_TOKEN_COOKIE;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub login_path: String,
    pub cookie_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            login_path: LOGIN_PATH.to_string(),
            cookie_name: ACCESS_TOKEN_COOKIE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary lookup; empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };
        Self {
            base_url: get("TODO_API_URL", defaults.base_url),
            login_path: get("TODO_LOGIN_PATH", defaults.login_path),
            cookie_name: get("TODO_COOKIE_NAME", defaults.cookie_name),
        }
    }
}
