//! Resume document tree: which sections exist, in which order, with what content.
//!
//! Section order is fixed: header, divider, bio, skills, certifications, work
//! experience, academics/languages row, contact. A section without content is
//! left out entirely.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::resume::{ResumeAcademic, ResumeData, ResumeExperience};
use crate::profile::validity::has_text;

pub const FOOTER_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Avatar {
    Image(String),
    Initials(String),
}

/// Pinned to the top of every page, divider included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    pub title: String,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub experience_badge: Option<String>,
    pub avatar: Avatar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Bio,
    Skills,
    Certifications,
    Experience,
    AcademicsAndLanguages,
    Contact,
}

impl SectionKind {
    pub fn title(self) -> Option<&'static str> {
        match self {
            SectionKind::Bio => Some("About"),
            SectionKind::Skills => Some("Skills"),
            SectionKind::Certifications => Some("Certifications"),
            SectionKind::Experience => Some("Work Experience"),
            // Each column carries its own heading.
            SectionKind::AcademicsAndLanguages => None,
            SectionKind::Contact => Some("Contact"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardBody {
    Points { points: Vec<String> },
    Description { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnItem {
    pub primary: String,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub title: String,
    pub items: Vec<ColumnItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Badges {
        items: Vec<String>,
    },
    Certification {
        name: String,
        issuer: Option<String>,
        date: Option<String>,
        description: Option<String>,
    },
    /// Bordered card; `body` is `None` when the entry has neither points nor text.
    ExperienceCard {
        title: String,
        company: String,
        period: Option<String>,
        body: Option<CardBody>,
    },
    Columns {
        left: Option<Column>,
        right: Option<Column>,
    },
    Contact {
        phone: Option<String>,
        email: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

/// Pinned to the bottom of every page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub generated_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub header: Header,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

impl ResumeDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// First letter of each whitespace-separated token, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// The explicit date when given, otherwise `today` as dd/mm/yyyy.
pub fn footer_date(explicit: Option<&str>, today: NaiveDate) -> String {
    match explicit.filter(|d| has_text(d)) {
        Some(date) => date.trim().to_string(),
        None => today.format(FOOTER_DATE_FORMAT).to_string(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    has_text(s).then(|| s.trim().to_string())
}

/// Builds the document tree, defaulting the footer date to the local "today".
pub fn build_document(data: &ResumeData, generated_on: Option<&str>) -> ResumeDocument {
    build_document_on(data, generated_on, chrono::Local::now().date_naive())
}

pub fn build_document_on(
    data: &ResumeData,
    generated_on: Option<&str>,
    today: NaiveDate,
) -> ResumeDocument {
    let avatar = match data.image.as_deref().and_then(non_empty) {
        Some(url) => Avatar::Image(url),
        None => Avatar::Initials(initials(&data.name)),
    };

    let header = Header {
        name: data.name.trim().to_string(),
        title: data.title.trim().to_string(),
        organization: data.organization.as_deref().and_then(non_empty),
        location: non_empty(&data.location),
        experience_badge: data.experience_duration.as_deref().and_then(non_empty),
        avatar,
    };

    let candidates = [
        (SectionKind::Bio, bio_blocks(data)),
        (SectionKind::Skills, skill_blocks(data)),
        (SectionKind::Certifications, certification_blocks(data)),
        (SectionKind::Experience, experience_blocks(&data.experience)),
        (
            SectionKind::AcademicsAndLanguages,
            column_blocks(&data.academics, &data.languages),
        ),
        (SectionKind::Contact, contact_blocks(data)),
    ];

    let sections = candidates
        .into_iter()
        .filter(|(_, blocks)| !blocks.is_empty())
        .map(|(kind, blocks)| Section { kind, blocks })
        .collect();

    ResumeDocument {
        header,
        sections,
        footer: Footer {
            generated_on: footer_date(generated_on, today),
        },
    }
}

fn bio_blocks(data: &ResumeData) -> Vec<Block> {
    non_empty(&data.bio)
        .map(|text| Block::Paragraph { text })
        .into_iter()
        .collect()
}

fn skill_blocks(data: &ResumeData) -> Vec<Block> {
    let items: Vec<String> = data.skills.iter().filter_map(|s| non_empty(s)).collect();
    if items.is_empty() {
        Vec::new()
    } else {
        vec![Block::Badges { items }]
    }
}

fn certification_blocks(data: &ResumeData) -> Vec<Block> {
    data.certifications
        .iter()
        .filter(|c| has_text(&c.name))
        .map(|c| Block::Certification {
            name: c.name.trim().to_string(),
            issuer: non_empty(&c.issuer),
            date: non_empty(&c.date),
            description: non_empty(&c.description),
        })
        .collect()
}

fn experience_blocks(entries: &[ResumeExperience]) -> Vec<Block> {
    entries
        .iter()
        .filter(|x| has_text(&x.title) || has_text(&x.company))
        .map(|x| {
            let points: Vec<String> = x.points.iter().filter_map(|p| non_empty(p)).collect();
            let body = if !points.is_empty() {
                Some(CardBody::Points { points })
            } else {
                non_empty(&x.description).map(|text| CardBody::Description { text })
            };
            Block::ExperienceCard {
                title: x.title.trim().to_string(),
                company: x.company.trim().to_string(),
                period: non_empty(&x.period),
                body,
            }
        })
        .collect()
}

fn academic_item(a: &ResumeAcademic) -> ColumnItem {
    let mut details = Vec::new();
    if let Some(degree) = non_empty(&a.degree) {
        details.push(degree);
    }
    if let Some(period) = non_empty(&a.period) {
        details.push(period);
    }
    if let Some(gpa) = non_empty(&a.gpa) {
        details.push(format!("GPA {gpa}"));
    }
    ColumnItem {
        primary: a.institution.trim().to_string(),
        secondary: (!details.is_empty()).then(|| details.join(" · ")),
    }
}

fn column_blocks(academics: &[ResumeAcademic], languages: &[String]) -> Vec<Block> {
    let academic_items: Vec<ColumnItem> = academics
        .iter()
        .filter(|a| has_text(&a.institution))
        .map(academic_item)
        .collect();
    let language_items: Vec<ColumnItem> = languages
        .iter()
        .filter_map(|l| non_empty(l))
        .map(|primary| ColumnItem {
            primary,
            secondary: None,
        })
        .collect();

    if academic_items.is_empty() && language_items.is_empty() {
        return Vec::new();
    }

    let column = |title: &str, items: Vec<ColumnItem>| {
        (!items.is_empty()).then(|| Column {
            title: title.to_string(),
            items,
        })
    };
    vec![Block::Columns {
        left: column("Academics", academic_items),
        right: column("Languages", language_items),
    }]
}

fn contact_blocks(data: &ResumeData) -> Vec<Block> {
    let phone = data.contact.phone.as_deref().and_then(non_empty);
    let email = data.contact.email.as_deref().and_then(non_empty);
    if phone.is_none() && email.is_none() {
        Vec::new()
    } else {
        vec![Block::Contact { phone, email }]
    }
}
