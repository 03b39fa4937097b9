//! Habit tracking endpoints.

#[cfg(test)]
#[path = "habits_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};
use crate::net::types::AnalysisPeriod;

pub const DEFAULT_HABIT_COLOR: &str = "#10B981";

#[derive(Clone, Debug, Serialize)]
pub struct NewHabit<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub frequency: &'a str,
}

impl<'a> NewHabit<'a> {
    /// Daily habit in the default colour.
    #[must_use]
    pub fn daily(name: &'a str) -> Self {
        Self { name, color: DEFAULT_HABIT_COLOR, frequency: "daily" }
    }
}

/// # Errors
///
/// Returns gateway errors.
pub async fn list_habits(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/habits").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_habit(api: &ApiClient, habit: &NewHabit<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/habits", habit).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn update_habit(api: &ApiClient, habit_id: &str, fields: &Value) -> Result<Value, ApiError> {
    api.put_json(&format!("/api/habits/{}", segment(habit_id)), fields).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn delete_habit(api: &ApiClient, habit_id: &str) -> Result<Value, ApiError> {
    api.delete_json(&format!("/api/habits/{}", segment(habit_id))).await
}

/// Mark today's completion for a habit on or off.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn log_habit(api: &ApiClient, habit_id: &str, completed: bool) -> Result<Value, ApiError> {
    api.post_json(&format!("/api/habits/{}/log", segment(habit_id)), &json!({ "completed": completed }))
        .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn habit_logs(api: &ApiClient, habit_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/habits/{}/logs", segment(habit_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn habit_history(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/habits/history").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn habits_analysis(api: &ApiClient, period: AnalysisPeriod) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/habits/analysis/{period}")).await
}
