//! Profile reads, role selection, and the per-role onboarding submissions.

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::{Profile, Role, SetRoleRequest};

/// `GET /api/profile`.
///
/// # Errors
///
/// Returns gateway errors, or `Decode` for an unknown role string.
pub async fn get_profile(api: &ApiClient) -> Result<Profile, ApiError> {
    api.get_json("/api/profile").await
}

/// `PUT /api/profile`. Also the submission step of patient onboarding.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn update_profile(api: &ApiClient, fields: &Value) -> Result<Value, ApiError> {
    api.put_json("/api/profile", fields).await
}

/// `POST /api/profile/set-role`.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn set_role(
    api: &ApiClient,
    role: Role,
    country: Option<&str>,
    identification: Option<&str>,
) -> Result<Value, ApiError> {
    let identification = identification.filter(|s| !s.trim().is_empty());
    api.post_json("/api/profile/set-role", &SetRoleRequest { role, country, identification })
        .await
}

/// Submit the onboarding form for `role`.
///
/// Patients finish onboarding by updating their profile; the other roles
/// each have a dedicated endpoint.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn submit_onboarding(api: &ApiClient, role: Role, form: &Value) -> Result<Value, ApiError> {
    match onboarding_endpoint(role) {
        Some(url) => api.post_json(url, form).await,
        None => update_profile(api, &with_completed_flag(form)).await,
    }
}

pub(crate) fn onboarding_endpoint(role: Role) -> Option<&'static str> {
    match role {
        Role::Patient => None,
        Role::ActiveUser => Some("/api/profile/active-onboarding"),
        Role::Professional => Some("/api/profile/professional-onboarding"),
        Role::Family => Some("/api/profile/family-onboarding"),
    }
}

fn with_completed_flag(form: &Value) -> Value {
    let mut body = form.clone();
    if let Some(map) = body.as_object_mut() {
        map.insert("profile_completed".into(), Value::Bool(true));
    }
    body
}

/// `POST /api/profile/photo` with a base64 data URI.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn upload_photo(api: &ApiClient, photo_data_uri: &str) -> Result<Value, ApiError> {
    api.post_json("/api/profile/photo", &json!({ "photo": photo_data_uri })).await
}
