//! Profile API client, the only module that talks to the external profile service.
//!
//! Requests carry the caller's bearer token unchanged. There is no retry
//! policy here: a failed call is reported to the caller as-is.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::wire::WireProfile;
use crate::profile::submission::{Submission, CERTIFICATE_FILES_FIELD};

const PROFILE_PATH: &str = "/profile";

#[derive(Debug, Error)]
pub enum ProfileApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error body shapes the profile API is known to return.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// The external profile API. Carried in `AppState` as `Arc<dyn ProfileApi>`.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, token: &str) -> Result<WireProfile, ProfileApiError>;

    /// Sends a multipart profile patch; returns the API's JSON reply.
    async fn submit_profile(
        &self,
        token: &str,
        submission: Submission,
    ) -> Result<Value, ProfileApiError>;
}

#[derive(Clone)]
pub struct HttpProfileApi {
    client: Client,
    base_url: String,
}

impl HttpProfileApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ProfileApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self, token: &str) -> Result<WireProfile, ProfileApiError> {
        let response = self
            .client
            .get(self.url(PROFILE_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        // Some deployments wrap the document as `{ "profile": { ... } }`.
        let value: Value = serde_json::from_str(&body)?;
        let document = match value {
            Value::Object(mut map) if map.get("profile").is_some_and(Value::is_object) => {
                map.remove("profile").unwrap_or_default()
            }
            other => other,
        };
        Ok(serde_json::from_value(document)?)
    }

    async fn submit_profile(
        &self,
        token: &str,
        submission: Submission,
    ) -> Result<Value, ProfileApiError> {
        let form = to_form(submission)?;
        let response = self
            .client
            .put(self.url(PROFILE_PATH))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Returns the body of a 2xx response, or a `Status` error carrying the API's message.
async fn read_success_body(response: Response) -> Result<String, ProfileApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Profile API returned {}: {}", status, body);
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(ProfileApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    debug!("Profile API call succeeded: status={}, bytes={}", status, body.len());
    Ok(body)
}

/// Converts a submission into a reqwest multipart form, file parts last.
pub fn to_form(submission: Submission) -> Result<Form, ProfileApiError> {
    let (fields, files) = submission.into_parts();
    let mut form = Form::new();
    for field in fields {
        form = form.text(field.name, field.value);
    }
    for upload in files {
        let attachment = upload.attachment;
        let part = Part::bytes(attachment.data.to_vec())
            .file_name(attachment.file_name)
            .mime_str(&attachment.mime_type)?;
        form = form.part(CERTIFICATE_FILES_FIELD, part);
    }
    Ok(form)
}
