//! UI → wire transforms used when submitting a profile.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::profile::{
    BinaryAttachment, CertificateFile, CertificationEntry, EducationEntry, ExperienceEntry,
};
use crate::models::wire::{CertificateRecord, EducationRecord, ExperienceRecord};
use crate::profile::validity::has_text;

const GPA_MARKER: &str = "GPA:";

/// Pulls a GPA out of free text ("GPA: 3.9"), falling back to an explicit
/// wire-shaped value. Returns `""` when neither is present.
pub fn extract_gpa(description: &str, explicit: Option<&str>) -> String {
    match description.find(GPA_MARKER) {
        Some(at) => description[at + GPA_MARKER.len()..].trim().to_string(),
        None => explicit.unwrap_or_default().to_string(),
    }
}

/// Drops entries without an institution and renames fields to the API's keys.
pub fn process_education_entries(entries: &[EducationEntry]) -> Vec<EducationRecord> {
    let records: Vec<EducationRecord> = entries
        .iter()
        .filter(|e| has_text(&e.institution))
        .map(|e| EducationRecord {
            institure: e.institution.clone(),
            degree: e.degree_type.clone(),
            // TODO: parse "2015 - 2019" style periods once the API accepts a date range
            graduation: e.period.clone(),
            gpa: extract_gpa(&e.description, e.gpa.as_deref()),
        })
        .collect();

    debug!(
        kept = records.len(),
        dropped = entries.len() - records.len(),
        "Processed education entries"
    );
    records
}

/// Drops entries without a company. Structured points, when present, are the
/// source of truth and overwrite the free-text description.
pub fn process_experience_entries(entries: &[ExperienceEntry]) -> Vec<ExperienceRecord> {
    let records: Vec<ExperienceRecord> = entries
        .iter()
        .filter(|x| has_text(&x.company))
        .map(|x| {
            let description = if x.points.is_empty() {
                x.description.clone()
            } else {
                x.points
                    .iter()
                    .map(|p| p.point.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            ExperienceRecord {
                company: x.company.clone(),
                title: x.title.clone(),
                period: x.period.clone(),
                points: x.points.clone(),
                description,
            }
        })
        .collect();

    debug!(
        kept = records.len(),
        dropped = entries.len() - records.len(),
        "Processed experience entries"
    );
    records
}

/// A file queued for upload, tied to its record by `upload_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub upload_id: Uuid,
    /// Index of the owning record in `CertificationBatch::records`.
    pub record_index: usize,
    pub attachment: BinaryAttachment,
}

/// Metadata-only view of a [`PendingUpload`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDescriptor {
    pub upload_id: Uuid,
    pub record_index: usize,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

impl From<&PendingUpload> for UploadDescriptor {
    fn from(upload: &PendingUpload) -> Self {
        Self {
            upload_id: upload.upload_id,
            record_index: upload.record_index,
            file_name: upload.attachment.file_name.clone(),
            mime_type: upload.attachment.mime_type.clone(),
            size_bytes: upload.attachment.data.len(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CertificationBatch {
    pub records: Vec<CertificateRecord>,
    /// At most one per record, in record order. May be shorter than `records`.
    pub new_files: Vec<PendingUpload>,
}

/// Normalizes every certification and moves each pending attachment out of
/// its entry into the upload list. Consuming the entries means a file can
/// only ever be queued once per submission.
pub fn process_certification_entries(entries: Vec<CertificationEntry>) -> CertificationBatch {
    let mut batch = CertificationBatch::default();

    for (record_index, entry) in entries.into_iter().enumerate() {
        let upload_id = match entry.file {
            Some(CertificateFile::Pending(attachment)) => {
                let upload_id = Uuid::new_v4();
                batch.new_files.push(PendingUpload {
                    upload_id,
                    record_index,
                    attachment,
                });
                Some(upload_id)
            }
            Some(CertificateFile::Uploaded(_)) | None => None,
        };

        batch.records.push(CertificateRecord {
            name: entry.name,
            issuer: entry.issuer,
            date: entry.date,
            description: entry.description,
            file_url: entry.file_url,
            file_name: entry.file_name,
            mime_type: entry.mime_type,
            upload_id,
        });
    }

    debug!(
        records = batch.records.len(),
        uploads = batch.new_files.len(),
        "Processed certification entries"
    );
    batch
}
