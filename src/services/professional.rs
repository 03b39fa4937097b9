//! Therapist-side endpoints: patient roster, tasks, session notes, alerts.

#[cfg(test)]
#[path = "professional_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::{ApiClient, segment};

#[derive(Clone, Debug, Serialize)]
pub struct NewTask<'a> {
    pub patient_id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<&'a str>,
    pub priority: &'a str,
}

impl<'a> NewTask<'a> {
    /// General, medium-priority task with no due date.
    #[must_use]
    pub fn new(patient_id: &'a str, title: &'a str) -> Self {
        Self { patient_id, title, description: None, category: "general", due_date: None, priority: "medium" }
    }
}

/// Session note. `private_notes` stays with the therapist; the summary and
/// goals are shown to the patient.
#[derive(Clone, Debug, Serialize)]
pub struct SessionNote<'a> {
    pub patient_id: &'a str,
    pub session_date: &'a str,
    pub private_notes: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_summary: Option<&'a str>,
    pub goals_discussed: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session_focus: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_rating: Option<u8>,
}

/// `GET /api/therapists/search?query=`. An empty query lists everyone
/// accepting patients.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn search_therapists(api: &ApiClient, query: &str) -> Result<Value, ApiError> {
    api.get_query("/api/therapists/search", &[("query", query.to_owned())]).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn patients(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/professional/patients").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn patient_detail(api: &ApiClient, patient_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/professional/patient/{}", segment(patient_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn link_patient(api: &ApiClient, patient_id: &str) -> Result<Value, ApiError> {
    api.post_json("/api/professional/link-patient", &json!({ "patient_id": patient_id })).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_task(api: &ApiClient, task: &NewTask<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/professional/tasks", task).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn tasks_for(api: &ApiClient, patient_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/professional/tasks/{}", segment(patient_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn delete_task(api: &ApiClient, task_id: &str) -> Result<Value, ApiError> {
    api.delete_json(&format!("/api/professional/tasks/{}", segment(task_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn create_note(api: &ApiClient, note: &SessionNote<'_>) -> Result<Value, ApiError> {
    api.post_json("/api/professional/notes", note).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn notes_for(api: &ApiClient, patient_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/professional/notes/{}", segment(patient_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn report(api: &ApiClient, patient_id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("/api/professional/report/{}", segment(patient_id))).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn alerts(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/professional/alerts").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn alerts_summary(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/professional/alerts/summary").await
}
