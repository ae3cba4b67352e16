//! Shapes exchanged with the external profile API.
//!
//! Inbound types decode leniently; outbound records are what the profile
//! submission serializes. Key spellings (`institure`, `Degree`,
//! `WorkExperience`) are the API's own and must not be corrected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lenient;
use crate::models::profile::{AvailabilityWindow, BulletPoint, LocationData};

// ────────────────────────────────────────────────────────────────────────────
// Inbound
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub bio: String,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub unavailability: Vec<AvailabilityWindow>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub location_data: Option<LocationData>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub education: Vec<WireEducation>,
    #[serde(rename = "WorkExperience", default, deserialize_with = "lenient::seq")]
    pub work_experience: Vec<WireExperience>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub certificates: Vec<WireCertificate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireEducation {
    #[serde(rename = "Degree", default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub period: String,
    #[serde(rename = "Graduation", default, deserialize_with = "lenient::string")]
    pub graduation: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub institure: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub institute: String,
    #[serde(rename = "GPA", default, deserialize_with = "lenient::string")]
    pub gpa: String,
}

impl WireEducation {
    /// Older records use the correct `institute` spelling.
    pub fn institution(&self) -> &str {
        first_filled(&self.institure, &self.institute)
    }

    pub fn period(&self) -> &str {
        first_filled(&self.period, &self.graduation)
    }
}

fn first_filled<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    }
}

/// The API has stored bullet points both as bare strings and as `{ point }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WirePoint {
    Text(String),
    Object {
        #[serde(default, deserialize_with = "lenient::string")]
        point: String,
    },
}

impl WirePoint {
    pub fn text(&self) -> &str {
        match self {
            WirePoint::Text(s) => s,
            WirePoint::Object { point } => point,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireExperience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub period: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub points: Vec<WirePoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCertificate {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub file_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mime_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Outbound
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationRecord {
    pub institure: String,
    #[serde(rename = "Degree")]
    pub degree: String,
    #[serde(rename = "Graduation")]
    pub graduation: String,
    #[serde(rename = "GPA")]
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceRecord {
    pub company: String,
    pub title: String,
    pub period: String,
    pub points: Vec<BulletPoint>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub file_url: String,
    pub file_name: String,
    pub mime_type: String,
    /// Handle of the file part uploaded alongside this record, if any.
    #[serde(serialize_with = "upload_id_or_empty")]
    pub upload_id: Option<Uuid>,
}

fn upload_id_or_empty<S>(id: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match id {
        Some(id) => serializer.collect_str(id),
        None => serializer.serialize_str(""),
    }
}
