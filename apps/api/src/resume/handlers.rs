//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::{ResumeData, ResumeIdentity};
use crate::profile::handlers::bearer_token;
use crate::profile::inbound::transform_wire_profile_to_ui;
use crate::resume::font_metrics::PageConfig;
use crate::resume::render::render_text;
use crate::resume::{build_document, paginate, PaginatedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume: ResumeData,
    /// Footer date override, shown verbatim. Defaults to today (dd/mm/yyyy).
    #[serde(default)]
    pub generated_on: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromProfileRequest {
    pub identity: ResumeIdentity,
    #[serde(default)]
    pub generated_on: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/layout
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<PaginatedDocument>, AppError> {
    let paged = layout_blocking(req.resume, req.generated_on, state.page_config).await?;
    Ok(Json(paged))
}

/// POST /api/v1/resume/export
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let file_name = export_file_name(&req.resume.name);
    let paged = layout_blocking(req.resume, req.generated_on, state.page_config).await?;
    Ok(text_attachment(render_text(&paged), &file_name))
}

/// POST /api/v1/resume/from-profile
///
/// Builds the resume from the caller's stored profile and returns the layout.
pub async fn handle_from_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FromProfileRequest>,
) -> Result<Json<PaginatedDocument>, AppError> {
    let token = bearer_token(&headers)?;
    let wire = state.profile_api.fetch_profile(token).await?;
    let bundle = transform_wire_profile_to_ui(&wire);
    let resume = ResumeData::from_profile(req.identity, &bundle);
    let paged = layout_blocking(resume, req.generated_on, state.page_config).await?;
    Ok(Json(paged))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Layout is CPU-bound; keep it off the async executor.
async fn layout_blocking(
    resume: ResumeData,
    generated_on: Option<String>,
    config: PageConfig,
) -> Result<PaginatedDocument, AppError> {
    tokio::task::spawn_blocking(move || {
        let document = build_document(&resume, generated_on.as_deref());
        let paged = paginate(&document, &config);
        debug!(
            sections = document.sections.len(),
            pages = paged.page_count(),
            "Laid out resume"
        );
        paged
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in resume layout: {e}")))
}

fn export_file_name(name: &str) -> String {
    let slug: String = name
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "resume.txt".to_string()
    } else {
        format!("resume-{slug}.txt")
    }
}

fn text_attachment(body: String, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name_slug() {
        assert_eq!(export_file_name("Jane  Doe"), "resume-jane-doe.txt");
        assert_eq!(export_file_name("Zoë O'Neil"), "resume-zo-oneil.txt");
        assert_eq!(export_file_name("  "), "resume.txt");
    }

    #[test]
    fn test_render_request_defaults_date() {
        let req: RenderRequest = serde_json::from_str(r#"{"resume": {"name": "Jane"}}"#).unwrap();
        assert!(req.generated_on.is_none());
        assert_eq!(req.resume.name, "Jane");
    }
}
