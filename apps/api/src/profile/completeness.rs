use serde::Serialize;

use crate::models::wire::WireProfile;

const MIN_PHONE_CHARS: usize = 5;

/// Checklist shown to users whose profile is incomplete.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MissingFieldsReport {
    pub missing: Vec<String>,
    pub complete: bool,
}

impl MissingFieldsReport {
    pub fn for_profile(profile: &WireProfile) -> Self {
        let missing = compute_missing_fields(profile);
        Self {
            complete: missing.is_empty(),
            missing,
        }
    }
}

/// Labels for the required profile fields that are absent.
///
/// The order (skills, phone number, location, work experience) is what the
/// checklist displays and must stay fixed.
pub fn compute_missing_fields(profile: &WireProfile) -> Vec<String> {
    let checks = [
        ("skills", !profile.skills.is_empty()),
        (
            "phone number",
            profile.phone_number.trim().chars().count() >= MIN_PHONE_CHARS,
        ),
        ("location", profile.location_data.is_some()),
        ("Work Experience", !profile.work_experience.is_empty()),
    ];

    checks
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(label, _)| label.to_string())
        .collect()
}
