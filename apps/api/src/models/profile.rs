//! UI-facing profile shapes, as held by the profile edit form.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    #[serde(default, deserialize_with = "lenient::number")]
    pub lat: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub lng: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
}

/// A window during which the user is not available for work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    #[serde(default, alias = "startDate", deserialize_with = "lenient::string")]
    pub start: String,
    #[serde(default, alias = "endDate", deserialize_with = "lenient::string")]
    pub end: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub bio: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub availability: Vec<AvailabilityWindow>,
    pub location: Option<String>,
    pub location_data: Option<LocationData>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub id: u32,
    pub institution: String,
    #[serde(rename = "type", alias = "degreeType")]
    pub degree_type: String,
    pub period: String,
    pub description: String,
    /// Present when the entry is already wire-shaped.
    #[serde(rename = "GPA", skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletPoint {
    #[serde(default)]
    pub point: String,
}

impl BulletPoint {
    pub fn new(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub id: u32,
    pub company: String,
    pub title: String,
    pub period: String,
    pub points: Vec<BulletPoint>,
    pub description: String,
}

/// A file chosen in the form but not yet sent to the profile API.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CertificateFile {
    /// Fresh upload; moved into the submission exactly once.
    Pending(BinaryAttachment),
    /// Reference to an artifact the server already stores.
    Uploaded(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub id: u32,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    /// JSON can only carry a reference to an uploaded file; pending files are
    /// attached from multipart parts.
    #[serde(skip_serializing, deserialize_with = "file_reference")]
    pub file: Option<CertificateFile>,
    pub file_url: String,
    pub file_name: String,
    pub mime_type: String,
}

fn file_reference<'de, D>(deserializer: D) -> Result<Option<CertificateFile>, D::Error>
where
    D: Deserializer<'de>,
{
    let reference = match Value::deserialize(deserializer)? {
        Value::String(url) => url,
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("fileUrl"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };
    Ok((!reference.trim().is_empty()).then_some(CertificateFile::Uploaded(reference)))
}

/// Inbound transform output: everything the profile screens need, with
/// every optional field filled in.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiProfileBundle {
    pub profile: ProfileDraft,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub schedule: Vec<AvailabilityWindow>,
}

/// Everything the profile edit form submits in one go.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub draft: ProfileDraft,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
}
