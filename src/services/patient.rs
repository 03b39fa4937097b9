//! Patient-side endpoints: assigned tasks, therapist link, relapses, and
//! family link requests.

#[cfg(test)]
#[path = "patient_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};

#[derive(Clone, Debug, Serialize)]
pub struct RelapseReport<'a> {
    /// `YYYY-MM-DD`.
    pub date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// Task progress as the patient reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Completed,
}

/// # Errors
///
/// Returns gateway errors.
pub async fn tasks(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/patient/tasks").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn update_task_status(
    api: &ApiClient,
    task_id: &str,
    status: TaskStatus,
    patient_notes: Option<&str>,
) -> Result<Value, ApiError> {
    api.put_json(
        &format!("/api/patient/tasks/{}", segment(task_id)),
        &json!({ "status": status, "patient_notes": patient_notes }),
    )
    .await
}

/// Complete a task and notify the therapist.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn complete_task(api: &ApiClient, task_id: &str, notes: Option<&str>) -> Result<Value, ApiError> {
    api.post_json("/api/patient/tasks/complete", &json!({ "task_id": task_id, "notes": notes }))
        .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn link_therapist(api: &ApiClient, therapist_id: &str) -> Result<Value, ApiError> {
    api.post_json("/api/patient/link-therapist", &json!({ "therapist_id": therapist_id }))
        .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn unlink_therapist(api: &ApiClient) -> Result<Value, ApiError> {
    api.post_empty("/api/patient/unlink-therapist").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn report_relapse(api: &ApiClient, report: &RelapseReport<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/patient/report-relapse", report).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn relapses(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/patient/relapses").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn my_progress(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/patient/my-progress").await
}

/// Notes the therapist chose to share.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn session_notes(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/patient/session-notes").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn link_requests(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/patient/link-requests").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn respond_link_request(api: &ApiClient, request_id: &str, approve: bool) -> Result<Value, ApiError> {
    api.post_json(
        "/api/patient/respond-link-request",
        &json!({ "request_id": request_id, "approve": approve }),
    )
    .await
}
