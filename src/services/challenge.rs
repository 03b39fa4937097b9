//! 21-day challenge endpoints for `active_user` accounts.

#[cfg(test)]
#[path = "challenge_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::ApiClient;

#[derive(Clone, Debug, Serialize)]
pub struct DailyLog<'a> {
    pub stayed_clean: bool,
    pub actions_completed: Vec<&'a str>,
    pub habits_completed: Vec<&'a str>,
    pub mood: u8,
    pub cravings_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

impl DailyLog<'_> {
    /// Log with neutral mood and craving scores.
    #[must_use]
    pub fn new(stayed_clean: bool) -> Self {
        Self {
            stayed_clean,
            actions_completed: Vec::new(),
            habits_completed: Vec::new(),
            mood: 5,
            cravings_level: 5,
            notes: None,
        }
    }
}

/// # Errors
///
/// Returns gateway errors.
pub async fn start(api: &ApiClient, goal: Option<&str>) -> Result<Value, ApiError> {
    api.post_json("/api/challenge/start", &json!({ "goal": goal })).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn current(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/challenge/current").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn log_day(api: &ApiClient, log: &DailyLog<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/challenge/log", log).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn restart(api: &ApiClient) -> Result<Value, ApiError> {
    api.post_empty("/api/challenge/restart").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn complete(api: &ApiClient) -> Result<Value, ApiError> {
    api.post_empty("/api/challenge/complete").await
}
