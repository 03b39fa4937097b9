//! Emotional log endpoints and the combined wellness analysis.

#[cfg(test)]
#[path = "emotional_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::AnalysisPeriod;

/// One mood check-in. `mood_scale` runs 1-10; the server enforces the range.
#[derive(Clone, Debug, Serialize)]
pub struct EmotionalEntry<'a> {
    pub mood_scale: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
    pub tags: Vec<&'a str>,
    /// `YYYY-MM-DD`.
    pub date: &'a str,
}

/// # Errors
///
/// Returns gateway errors.
pub async fn list_logs(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/emotional-logs").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_log(api: &ApiClient, entry: &EmotionalEntry<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/emotional-logs", entry).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn stats(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/emotional-logs/stats").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn emotional_analysis(api: &ApiClient, period: AnalysisPeriod) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/emotional/analysis/{period}")).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn wellness_analysis(api: &ApiClient, period: AnalysisPeriod) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/wellness/analysis/{period}")).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn wellness_stats(api: &ApiClient, period: AnalysisPeriod) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/wellness/stats/{period}")).await
}
