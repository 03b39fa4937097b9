//! Life-purpose areas, test results, goals, and weekly check-ins.

#[cfg(test)]
#[path = "purpose_test.rs"]
mod tests;

use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};

/// # Errors
///
/// Returns gateway errors.
pub async fn areas(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/purpose/areas").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn save_areas(api: &ApiClient, areas: &Value) -> Result<Value, ApiError> {
    api.post_json("/api/purpose/areas", areas).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn test_result(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/purpose/test").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn submit_test(api: &ApiClient, answers: &Value) -> Result<Value, ApiError> {
    api.post_json("/api/purpose/test", answers).await
}

/// Discard the stored result so the test can be retaken.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn reset_test(api: &ApiClient) -> Result<Value, ApiError> {
    api.delete_json("/api/purpose/test").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn goals(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/purpose/goals").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_goal(api: &ApiClient, goal: &Value) -> Result<Value, ApiError> {
    api.post_json("/api/purpose/goals", goal).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn update_goal(api: &ApiClient, goal_id: &str, fields: &Value) -> Result<Value, ApiError> {
    api.put_json(&format!("/api/purpose/goals/{}", segment(goal_id)), fields).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn delete_goal(api: &ApiClient, goal_id: &str) -> Result<Value, ApiError> {
    api.delete_json(&format!("/api/purpose/goals/{}", segment(goal_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn checkins(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/purpose/checkins").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_checkin(api: &ApiClient, checkin: &Value) -> Result<Value, ApiError> {
    api.post_json("/api/purpose/checkins", checkin).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn stats(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/purpose/stats").await
}
