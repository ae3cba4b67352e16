//! Wire → UI transform used when loading a profile for display or editing.

use crate::models::profile::{
    BulletPoint, CertificateFile, CertificationEntry, EducationEntry, ExperienceEntry,
    ProfileDraft, UiProfileBundle,
};
use crate::models::wire::{WireCertificate, WireEducation, WireExperience, WirePoint, WireProfile};
use crate::profile::points::split_description_into_points;
use crate::profile::validity::has_text;

/// Converts a decoded wire profile into the shapes the profile screens use.
///
/// List entries get 1-based positional ids. These are list keys only: they
/// change when the source list is reordered and must not be persisted.
pub fn transform_wire_profile_to_ui(wire: &WireProfile) -> UiProfileBundle {
    let profile = ProfileDraft {
        bio: wire.bio.clone(),
        skills: wire.skills.clone(),
        languages: wire.languages.clone(),
        availability: wire.unavailability.clone(),
        location: Some(
            wire.location_data
                .as_ref()
                .map(|d| d.address.clone())
                .unwrap_or_default(),
        ),
        location_data: wire.location_data.clone(),
        phone_number: Some(wire.phone_number.clone()),
    };

    UiProfileBundle {
        profile,
        education: wire
            .education
            .iter()
            .enumerate()
            .map(|(i, e)| education_to_ui(position_id(i), e))
            .collect(),
        experience: wire
            .work_experience
            .iter()
            .enumerate()
            .map(|(i, x)| experience_to_ui(position_id(i), x))
            .collect(),
        certifications: wire
            .certificates
            .iter()
            .enumerate()
            .map(|(i, c)| certificate_to_ui(position_id(i), c))
            .collect(),
        schedule: wire.unavailability.clone(),
    }
}

fn position_id(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn education_to_ui(id: u32, e: &WireEducation) -> EducationEntry {
    // The edit form keeps GPA inside the description; the outbound transform
    // extracts it again.
    let description = if has_text(&e.gpa) {
        format!("GPA: {}", e.gpa.trim())
    } else {
        String::new()
    };
    EducationEntry {
        id,
        institution: e.institution().to_string(),
        degree_type: e.degree.clone(),
        period: e.period().to_string(),
        description,
        gpa: None,
    }
}

fn experience_to_ui(id: u32, x: &WireExperience) -> ExperienceEntry {
    let structured: Vec<BulletPoint> = x
        .points
        .iter()
        .map(WirePoint::text)
        .filter(|p| has_text(p))
        .map(BulletPoint::new)
        .collect();

    let points = if !structured.is_empty() {
        structured
    } else {
        split_description_into_points(&x.description)
            .into_iter()
            .map(BulletPoint::new)
            .collect()
    };

    ExperienceEntry {
        id,
        company: x.company.clone(),
        title: x.title.clone(),
        period: x.period.clone(),
        points,
        description: x.description.clone(),
    }
}

fn certificate_to_ui(id: u32, c: &WireCertificate) -> CertificationEntry {
    CertificationEntry {
        id,
        name: c.name.clone(),
        issuer: c.issuer.clone(),
        date: c.date.clone(),
        description: c.description.clone(),
        file: has_text(&c.file_url).then(|| CertificateFile::Uploaded(c.file_url.clone())),
        file_url: c.file_url.clone(),
        file_name: c.file_name.clone(),
        mime_type: c.mime_type.clone(),
    }
}
