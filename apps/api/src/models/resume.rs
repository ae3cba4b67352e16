use serde::{Deserialize, Serialize};

use crate::models::profile::UiProfileBundle;
use crate::profile::outbound::extract_gpa;
use crate::profile::validity::has_text;

/// Identity fields that live outside the profile document (account data).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeIdentity {
    pub name: String,
    pub title: String,
    pub organization: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    /// Pre-formatted badge text, e.g. "5+ years".
    pub experience_duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeCertification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeExperience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub points: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAcademic {
    pub institution: String,
    pub degree: String,
    pub period: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Read-only view model consumed by the resume document builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub name: String,
    pub title: String,
    pub organization: Option<String>,
    pub image: Option<String>,
    pub location: String,
    pub experience_duration: Option<String>,
    pub bio: String,
    pub skills: Vec<String>,
    pub certifications: Vec<ResumeCertification>,
    pub experience: Vec<ResumeExperience>,
    pub academics: Vec<ResumeAcademic>,
    pub languages: Vec<String>,
    pub contact: ContactInfo,
}

impl ResumeData {
    /// Assembles the view model from account identity and an inbound profile bundle.
    pub fn from_profile(identity: ResumeIdentity, bundle: &UiProfileBundle) -> Self {
        let profile = &bundle.profile;

        let location = profile
            .location
            .clone()
            .filter(|l| has_text(l))
            .or_else(|| profile.location_data.as_ref().map(|d| d.address.clone()))
            .unwrap_or_default();

        let certifications = bundle
            .certifications
            .iter()
            .filter(|c| has_text(&c.name))
            .map(|c| ResumeCertification {
                name: c.name.clone(),
                issuer: c.issuer.clone(),
                date: c.date.clone(),
                description: c.description.clone(),
            })
            .collect();

        let experience = bundle
            .experience
            .iter()
            .filter(|x| has_text(&x.company) || has_text(&x.title))
            .map(|x| ResumeExperience {
                title: x.title.clone(),
                company: x.company.clone(),
                period: x.period.clone(),
                points: x
                    .points
                    .iter()
                    .map(|p| p.point.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect(),
                description: x.description.clone(),
            })
            .collect();

        let academics = bundle
            .education
            .iter()
            .filter(|e| has_text(&e.institution))
            .map(|e| ResumeAcademic {
                institution: e.institution.clone(),
                degree: e.degree_type.clone(),
                period: e.period.clone(),
                gpa: extract_gpa(&e.description, e.gpa.as_deref()),
            })
            .collect();

        ResumeData {
            name: identity.name,
            title: identity.title,
            organization: identity.organization.filter(|o| has_text(o)),
            image: identity.image.filter(|i| has_text(i)),
            location,
            experience_duration: identity.experience_duration.filter(|d| has_text(d)),
            bio: profile.bio.clone(),
            skills: profile.skills.iter().filter(|s| has_text(s)).cloned().collect(),
            certifications,
            experience,
            academics,
            languages: profile
                .languages
                .iter()
                .filter(|l| has_text(l))
                .cloned()
                .collect(),
            contact: ContactInfo {
                phone: profile.phone_number.clone().filter(|p| has_text(p)),
                email: identity.email.filter(|e| has_text(e)),
            },
        }
    }
}
