//! Axum route handlers for the Profile API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::profile::{
    BinaryAttachment, CertificateFile, ProfileForm, UiProfileBundle,
};
use crate::models::wire::WireProfile;
use crate::profile::completeness::MissingFieldsReport;
use crate::profile::inbound::transform_wire_profile_to_ui;
use crate::profile::submission::{build_profile_submission, SubmissionPreview};
use crate::state::AppState;

/// Multipart text field holding the JSON-encoded `ProfileForm`.
const PROFILE_FIELD: &str = "profile";
const DEFAULT_MIME: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub bundle: UiProfileBundle,
    pub missing_fields: MissingFieldsReport,
}

/// Extracts the caller's bearer token, forwarded unchanged to the profile API.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let wire = state.profile_api.fetch_profile(token).await?;
    Ok(Json(ProfileResponse {
        bundle: transform_wire_profile_to_ui(&wire),
        missing_fields: MissingFieldsReport::for_profile(&wire),
    }))
}

/// PUT /api/v1/profile
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let token = bearer_token(&headers)?.to_string();
    let form = read_profile_form(multipart).await?;
    let submission = build_profile_submission(form);
    info!(
        fields = submission.fields().len(),
        files = submission.files().len(),
        "Submitting profile"
    );
    let reply = state.profile_api.submit_profile(&token, submission).await?;
    Ok(Json(reply))
}

/// POST /api/v1/profile/inbound
pub async fn handle_inbound(Json(wire): Json<WireProfile>) -> Json<UiProfileBundle> {
    Json(transform_wire_profile_to_ui(&wire))
}

/// POST /api/v1/profile/outbound
pub async fn handle_outbound_preview(Json(form): Json<ProfileForm>) -> Json<SubmissionPreview> {
    Json(build_profile_submission(form).preview())
}

/// POST /api/v1/profile/missing-fields
pub async fn handle_missing_fields(Json(wire): Json<WireProfile>) -> Json<MissingFieldsReport> {
    Json(MissingFieldsReport::for_profile(&wire))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart intake
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `profile` JSON field and attaches each `certificateFile[<index>]`
/// part to the certification at that index.
async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileForm, AppError> {
    let mut form: Option<ProfileForm> = None;
    let mut files: Vec<(usize, BinaryAttachment)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PROFILE_FIELD {
            let text = field.text().await.map_err(multipart_error)?;
            let parsed = serde_json::from_str(&text)
                .map_err(|e| AppError::Validation(format!("Invalid profile JSON: {e}")))?;
            form = Some(parsed);
        } else if let Some(index) = certificate_index(&name) {
            let file_name = field.file_name().unwrap_or("certificate").to_string();
            let mime_type = field.content_type().unwrap_or(DEFAULT_MIME).to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            // Browsers send an empty part for an untouched file input.
            if data.is_empty() {
                continue;
            }
            files.push((
                index,
                BinaryAttachment {
                    file_name,
                    mime_type,
                    data,
                },
            ));
        } else {
            debug!(field = %name, "Ignoring unknown multipart field");
        }
    }

    let mut form =
        form.ok_or_else(|| AppError::Validation(format!("Missing '{PROFILE_FIELD}' field")))?;

    for (index, attachment) in files {
        let entry = form.certifications.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!(
                "certificateFile[{index}] has no matching certification"
            ))
        })?;
        entry.file = Some(CertificateFile::Pending(attachment));
    }
    Ok(form)
}

fn certificate_index(field_name: &str) -> Option<usize> {
    field_name
        .strip_prefix("certificateFile[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_certificate_index_parsing() {
        assert_eq!(certificate_index("certificateFile[0]"), Some(0));
        assert_eq!(certificate_index("certificateFile[12]"), Some(12));
        assert_eq!(certificate_index("certificateFile[]"), None);
        assert_eq!(certificate_index("certificateFile[x]"), None);
        assert_eq!(certificate_index("avatar"), None);
    }

    #[test]
    fn test_bearer_token_required() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(AppError::Unauthorized)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  "));
        assert!(matches!(bearer_token(&headers), Err(AppError::Unauthorized)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
