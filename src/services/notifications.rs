//! Push-token registration and the in-app notification inbox.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};

/// # Errors
///
/// Returns gateway errors.
pub async fn register_token(
    api: &ApiClient,
    user_id: &str,
    push_token: &str,
    platform: &str,
) -> Result<Value, ApiError> {
    api.post_json(
        "/api/notifications/register-token",
        &json!({ "user_id": user_id, "push_token": push_token, "platform": platform }),
    )
    .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn unregister_token(api: &ApiClient) -> Result<Value, ApiError> {
    api.post_empty("/api/notifications/unregister-token").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn unread(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/notifications/unread").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn all(api: &ApiClient, limit: u32) -> Result<Value, ApiError> {
    api.get_query("/api/notifications/all", &[("limit", limit.to_string())]).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn mark_read(api: &ApiClient, notification_id: &str) -> Result<Value, ApiError> {
    api.post_empty(&format!("/api/notifications/{}/read", segment(notification_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn mark_all_read(api: &ApiClient) -> Result<Value, ApiError> {
    api.post_empty("/api/notifications/mark-all-read").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn settings(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/notifications/settings").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn update_settings(api: &ApiClient, settings: &Value) -> Result<Value, ApiError> {
    api.put_json("/api/notifications/settings", settings).await
}

/// Reminders scheduled for today.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn today(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/notifications/today").await
}
