//! Multipart submission assembly for the profile API.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::profile::ProfileForm;
use crate::profile::outbound::{
    process_certification_entries, process_education_entries, process_experience_entries,
    PendingUpload, UploadDescriptor,
};
use crate::profile::validity::is_valid;

/// Repeated file part carrying new certificate files.
pub const CERTIFICATE_FILES_FIELD: &str = "certificateFiles";
/// JSON array of upload handles, in the same order as the file parts.
pub const CERTIFICATE_UPLOAD_IDS_FIELD: &str = "certificateUploadIds";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextField {
    pub name: String,
    pub value: String,
}

/// An ordered multipart payload: text fields that passed the validity gate,
/// followed by file parts.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    fields: Vec<TextField>,
    files: Vec<PendingUpload>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `key` unless it fails [`is_valid`].
    /// Objects and arrays are encoded as compact JSON, scalars as plain text.
    /// Returns whether the field was appended.
    pub fn append(&mut self, key: &str, value: &Value) -> bool {
        if !is_valid(value) {
            return false;
        }
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.fields.push(TextField {
            name: key.to_string(),
            value: text,
        });
        true
    }

    /// [`append`](Self::append) for any serializable value.
    pub fn append_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(v) => self.append(key, &v),
            Err(e) => {
                warn!(field = key, "Skipping unserializable submission field: {e}");
                false
            }
        }
    }

    pub fn attach(&mut self, upload: PendingUpload) {
        self.files.push(upload);
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn files(&self) -> &[PendingUpload] {
        &self.files
    }

    pub fn into_parts(self) -> (Vec<TextField>, Vec<PendingUpload>) {
        (self.fields, self.files)
    }

    /// File-free summary, safe to return to the browser.
    pub fn preview(&self) -> SubmissionPreview {
        SubmissionPreview {
            fields: self.fields.clone(),
            uploads: self.files.iter().map(UploadDescriptor::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPreview {
    pub fields: Vec<TextField>,
    pub uploads: Vec<UploadDescriptor>,
}

/// Runs the outbound transforms over a submitted form and assembles the
/// multipart payload. Pending certificate files move into the submission.
pub fn build_profile_submission(form: ProfileForm) -> Submission {
    let ProfileForm {
        draft,
        education,
        experience,
        certifications,
    } = form;

    let mut submission = Submission::new();
    submission.append("bio", &Value::String(draft.bio));
    submission.append_serialized("skills", &draft.skills);
    submission.append_serialized("languages", &draft.languages);
    submission.append_serialized("unavailability", &draft.availability);
    submission.append_serialized("location", &draft.location);
    submission.append_serialized("locationData", &draft.location_data);
    submission.append_serialized("phoneNumber", &draft.phone_number);
    submission.append_serialized("education", &process_education_entries(&education));
    submission.append_serialized("WorkExperience", &process_experience_entries(&experience));

    let batch = process_certification_entries(certifications);
    submission.append_serialized("certificates", &batch.records);
    let upload_ids: Vec<String> = batch
        .new_files
        .iter()
        .map(|u| u.upload_id.to_string())
        .collect();
    submission.append_serialized(CERTIFICATE_UPLOAD_IDS_FIELD, &upload_ids);
    for upload in batch.new_files {
        submission.attach(upload);
    }

    debug!(
        fields = submission.fields.len(),
        files = submission.files.len(),
        "Assembled profile submission"
    );
    submission
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{
        BinaryAttachment, CertificateFile, CertificationEntry, EducationEntry, LocationData,
        ProfileDraft,
    };
    use bytes::Bytes;
    use serde_json::json;

    impl Submission {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.value.as_str())
        }
    }

    #[test]
    fn test_append_skips_invalid_values() {
        let mut s = Submission::new();
        assert!(!s.append("bio", &json!("   ")));
        assert!(!s.append("skills", &json!([])));
        assert!(!s.append("locationData", &json!({})));
        assert!(!s.append("phoneNumber", &Value::Null));
        assert!(s.fields().is_empty());
    }

    #[test]
    fn test_append_encodes_by_type() {
        let mut s = Submission::new();
        s.append("bio", &json!("Hello"));
        s.append("skills", &json!(["Rust", "Go"]));
        s.append("rating", &json!(0));
        s.append("remote", &json!(false));
        assert_eq!(s.field("bio"), Some("Hello"));
        assert_eq!(s.field("skills"), Some(r#"["Rust","Go"]"#));
        assert_eq!(s.field("rating"), Some("0"));
        assert_eq!(s.field("remote"), Some("false"));
    }

    #[test]
    fn test_append_serialized_option_none_is_skipped() {
        let mut s = Submission::new();
        assert!(!s.append_serialized("location", &Option::<String>::None));
    }

    #[test]
    fn test_build_submission_includes_only_populated_fields() {
        let form = ProfileForm {
            draft: ProfileDraft {
                bio: "Backend engineer".into(),
                skills: vec!["Rust".into()],
                location_data: Some(LocationData {
                    lat: 6.5,
                    lng: 3.4,
                    address: "Lagos".into(),
                }),
                ..Default::default()
            },
            education: vec![EducationEntry::default()],
            ..Default::default()
        };

        let s = build_profile_submission(form);
        let names: Vec<&str> = s.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["bio", "skills", "locationData"]);
        assert!(s.files().is_empty());
    }

    #[test]
    fn test_build_submission_moves_pending_files() {
        let form = ProfileForm {
            certifications: vec![
                CertificationEntry {
                    name: "PMP".into(),
                    ..Default::default()
                },
                CertificationEntry {
                    name: "CKA".into(),
                    file: Some(CertificateFile::Pending(BinaryAttachment {
                        file_name: "cka.pdf".into(),
                        mime_type: "application/pdf".into(),
                        data: Bytes::from_static(b"%PDF"),
                    })),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let s = build_profile_submission(form);
        assert_eq!(s.files().len(), 1);
        let id = s.files()[0].upload_id.to_string();

        let ids: Vec<String> =
            serde_json::from_str(s.field(CERTIFICATE_UPLOAD_IDS_FIELD).unwrap()).unwrap();
        assert_eq!(ids, vec![id.clone()]);

        let certs: Value = serde_json::from_str(s.field("certificates").unwrap()).unwrap();
        assert_eq!(certs[0]["uploadId"], "");
        assert_eq!(certs[1]["uploadId"], id.as_str());
    }

    #[test]
    fn test_preview_omits_file_bytes() {
        let mut s = Submission::new();
        s.append("bio", &json!("x"));
        let preview = serde_json::to_value(s.preview()).unwrap();
        assert_eq!(preview["fields"][0]["name"], "bio");
        assert!(preview["uploads"].as_array().unwrap().is_empty());
    }
}
