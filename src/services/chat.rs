//! Conversations: the AI companion and direct messages between users.

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};

/// Send one message to the assistant and return its reply payload.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn send_to_assistant(api: &ApiClient, message: &str) -> Result<Value, ApiError> {
    api.post_json("/api/nelson/chat", &json!({ "message": message })).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn assistant_conversation(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/nelson/conversation").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn clear_assistant_conversation(api: &ApiClient) -> Result<Value, ApiError> {
    api.delete_json("/api/nelson/conversation").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn assistant_summary(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/nelson/summary").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn send_message(api: &ApiClient, to_user_id: &str, content: &str) -> Result<Value, ApiError> {
    api.post_json("/api/messages/send", &json!({ "to_user_id": to_user_id, "content": content }))
        .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn conversation_with(api: &ApiClient, other_user_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/messages/conversation/{}", segment(other_user_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn unread_messages(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/messages/unread-count").await
}
