//! Flows a [`ResumeDocument`] onto fixed-size pages.
//!
//! Every block is lowered to typeset lines with a known height, then lines
//! are placed top to bottom in the flow area between the pinned header and
//! the footer. Sections may break across pages at any line, except that a
//! section or card title is never left as the last line of a page.

use serde::Serialize;

use crate::resume::document::{
    Block, CardBody, Column, Header, ResumeDocument, SectionKind,
};
use crate::resume::font_metrics::{PageConfig, Weight, HELVETICA};

/// Horizontal padding inside a skill badge plus the gap after it, in em.
const BADGE_CHROME_EM: f32 = 1.4;
const BULLET_INDENT_EM: f32 = 1.2;
/// Space between the two columns, in em.
const COLUMN_GUTTER_EM: f32 = 2.0;
/// Tolerance for float accumulation when testing fit.
const FIT_EPSILON_PT: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineContent {
    SectionTitle { text: String },
    Text { text: String },
    /// `continuation` lines belong to the bullet started above them.
    Bullet { text: String, continuation: bool },
    Badges { items: Vec<String> },
    CardTitle { title: String, aside: Option<String> },
    CardSubtitle { text: String },
    Columns {
        left: Option<String>,
        right: Option<String>,
        heading: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedLine {
    pub section: SectionKind,
    pub y_pt: f32,
    pub height_pt: f32,
    pub content: LineContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub number: u32,
    pub header: Header,
    pub lines: Vec<PlacedLine>,
    pub footer: String,
    pub footer_y_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocument {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone)]
enum FlowItem {
    Line {
        section: SectionKind,
        content: LineContent,
        height: f32,
        keep_with_next: bool,
    },
    /// Vertical space; dropped at the top of a page.
    Gap(f32),
}

/// Lays out the document on pages. Always yields at least one page.
pub fn paginate(document: &ResumeDocument, config: &PageConfig) -> PaginatedDocument {
    let items = lower_document(document, config);
    let top = config.flow_top_pt();
    let bottom = config.flow_bottom_pt();

    let mut pages: Vec<Vec<PlacedLine>> = Vec::new();
    let mut current: Vec<PlacedLine> = Vec::new();
    let mut y = top;

    for (i, item) in items.iter().enumerate() {
        match item {
            FlowItem::Gap(gap) => {
                if !current.is_empty() {
                    y += gap;
                }
            }
            FlowItem::Line {
                section,
                content,
                height,
                keep_with_next,
            } => {
                let needed = if *keep_with_next {
                    kept_run_height(&items[i..])
                } else {
                    *height
                };
                if y + needed > bottom + FIT_EPSILON_PT && !current.is_empty() {
                    pages.push(std::mem::take(&mut current));
                    y = top;
                }
                current.push(PlacedLine {
                    section: *section,
                    y_pt: y,
                    height_pt: *height,
                    content: content.clone(),
                });
                y += height;
            }
        }
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }

    let total = pages.len();
    let footer_y = config.footer_top_pt();
    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(i, lines)| Page {
            number: (i + 1) as u32,
            header: document.header.clone(),
            lines,
            footer: format!(
                "Generated on {} · Page {} of {}",
                document.footer.generated_on,
                i + 1,
                total
            ),
            footer_y_pt: footer_y,
        })
        .collect();

    PaginatedDocument {
        page_width_pt: config.page_width_pt,
        page_height_pt: config.page_height_pt,
        pages,
    }
}

/// Height of a run of keep-with-next lines through the first line that
/// ends it, gaps between them included. The run must land on one page.
fn kept_run_height(run: &[FlowItem]) -> f32 {
    let mut total = 0.0;
    for item in run {
        match item {
            FlowItem::Gap(gap) => total += gap,
            FlowItem::Line {
                height,
                keep_with_next,
                ..
            } => {
                total += height;
                if !keep_with_next {
                    break;
                }
            }
        }
    }
    total
}

// ────────────────────────────────────────────────────────────────────────────
// Lowering blocks to lines
// ────────────────────────────────────────────────────────────────────────────

struct Lowering<'a> {
    config: &'a PageConfig,
    section: SectionKind,
    items: Vec<FlowItem>,
}

impl Lowering<'_> {
    fn line(&mut self, content: LineContent) {
        self.push(content, self.config.body_line_pt(), false);
    }

    fn push(&mut self, content: LineContent, height: f32, keep_with_next: bool) {
        self.items.push(FlowItem::Line {
            section: self.section,
            content,
            height,
            keep_with_next,
        });
    }

    fn gap(&mut self, gap: f32) {
        self.items.push(FlowItem::Gap(gap));
    }

    fn wrapped_text(&mut self, text: &str, width_em: f32) {
        for paragraph in text.lines() {
            for line in HELVETICA.wrap(paragraph, width_em, Weight::Regular) {
                self.line(LineContent::Text { text: line });
            }
        }
    }

    fn bullet(&mut self, text: &str, width_em: f32) {
        let lines = HELVETICA.wrap(text, width_em - BULLET_INDENT_EM, Weight::Regular);
        for (i, line) in lines.into_iter().enumerate() {
            self.line(LineContent::Bullet {
                text: line,
                continuation: i > 0,
            });
        }
    }
}

fn lower_document(document: &ResumeDocument, config: &PageConfig) -> Vec<FlowItem> {
    let width = config.content_width_em();
    let mut lowering = Lowering {
        config,
        section: SectionKind::Bio,
        items: Vec::new(),
    };

    for (s, section) in document.sections.iter().enumerate() {
        lowering.section = section.kind;
        if s > 0 {
            lowering.gap(config.section_gap_pt);
        }
        if let Some(title) = section.kind.title() {
            lowering.push(
                LineContent::SectionTitle {
                    text: title.to_string(),
                },
                config.heading_line_pt(),
                true,
            );
        }
        for (b, block) in section.blocks.iter().enumerate() {
            if b > 0 {
                lowering.gap(config.block_gap_pt);
            }
            lower_block(&mut lowering, block, width);
        }
    }
    lowering.items
}

fn lower_block(lowering: &mut Lowering<'_>, block: &Block, width: f32) {
    match block {
        Block::Paragraph { text } => lowering.wrapped_text(text, width),

        Block::Badges { items } => {
            for row in pack_badges(items, width) {
                lowering.line(LineContent::Badges { items: row });
            }
        }

        Block::Certification {
            name,
            issuer,
            date,
            description,
        } => {
            let keep = issuer.is_some() || description.is_some();
            lowering.push(
                LineContent::CardTitle {
                    title: name.clone(),
                    aside: date.clone(),
                },
                lowering.config.body_line_pt(),
                keep,
            );
            if let Some(issuer) = issuer {
                lowering.line(LineContent::CardSubtitle {
                    text: issuer.clone(),
                });
            }
            if let Some(description) = description {
                lowering.wrapped_text(description, width);
            }
        }

        Block::ExperienceCard {
            title,
            company,
            period,
            body,
        } => {
            let heading = if title.is_empty() { company } else { title };
            lowering.push(
                LineContent::CardTitle {
                    title: heading.clone(),
                    aside: period.clone(),
                },
                lowering.config.body_line_pt(),
                true,
            );
            if !title.is_empty() && !company.is_empty() {
                lowering.line(LineContent::CardSubtitle {
                    text: company.clone(),
                });
            }
            match body {
                Some(CardBody::Points { points }) => {
                    for point in points {
                        lowering.bullet(point, width);
                    }
                }
                Some(CardBody::Description { text }) => lowering.wrapped_text(text, width),
                None => {}
            }
        }

        Block::Columns { left, right } => {
            let column_width = (width - COLUMN_GUTTER_EM) / 2.0;
            let left_lines = column_lines(left.as_ref(), column_width);
            let right_lines = column_lines(right.as_ref(), column_width);
            let rows = left_lines.len().max(right_lines.len());
            for row in 0..rows {
                let l = left_lines.get(row).cloned();
                let r = right_lines.get(row).cloned();
                let heading = row == 0;
                let height = if heading {
                    lowering.config.heading_line_pt()
                } else {
                    lowering.config.body_line_pt()
                };
                lowering.push(
                    LineContent::Columns {
                        left: l,
                        right: r,
                        heading,
                    },
                    height,
                    heading,
                );
            }
        }

        Block::Contact { phone, email } => {
            if let Some(phone) = phone {
                lowering.line(LineContent::Text {
                    text: format!("Phone: {phone}"),
                });
            }
            if let Some(email) = email {
                lowering.line(LineContent::Text {
                    text: format!("Email: {email}"),
                });
            }
        }
    }
}

/// Greedy row packing of skill badges. A badge wider than the line gets a row of its own.
fn pack_badges(items: &[String], width_em: f32) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut used = 0.0_f32;

    for item in items {
        let w = HELVETICA.measure_str(item, Weight::Regular) + BADGE_CHROME_EM;
        if !row.is_empty() && used + w > width_em {
            rows.push(std::mem::take(&mut row));
            used = 0.0;
        }
        row.push(item.clone());
        used += w;
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Title first, then each item's primary and wrapped secondary text.
fn column_lines(column: Option<&Column>, width_em: f32) -> Vec<String> {
    let Some(column) = column else {
        return Vec::new();
    };
    let mut lines = vec![column.title.clone()];
    for item in &column.items {
        lines.extend(HELVETICA.wrap(&item.primary, width_em, Weight::Bold));
        if let Some(secondary) = &item.secondary {
            lines.extend(HELVETICA.wrap(secondary, width_em, Weight::Regular));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ResumeAcademic, ResumeData, ResumeExperience};
    use crate::resume::document::build_document_on;
    use crate::resume::font_metrics::default_page_config;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    fn long_resume(jobs: usize) -> ResumeData {
        let experience = (0..jobs)
            .map(|i| ResumeExperience {
                title: format!("Engineer {i}"),
                company: format!("Company {i}"),
                period: "2019 - 2021".into(),
                points: (0..4)
                    .map(|p| {
                        format!(
                            "Delivered project {p} for team {i}, migrating the service fleet \
                             to a new deployment pipeline and cutting release time in half"
                        )
                    })
                    .collect(),
                description: String::new(),
            })
            .collect();
        ResumeData {
            name: "Jane Doe".into(),
            title: "Staff Engineer".into(),
            bio: "Engineer.".into(),
            skills: vec!["Rust".into(), "Go".into()],
            experience,
            languages: vec!["English".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_short_resume_fits_one_page() {
        let config = default_page_config();
        let doc = build_document_on(&long_resume(1), None, today());
        let paged = paginate(&doc, &config);
        assert_eq!(paged.page_count(), 1);
        assert_eq!(paged.pages[0].footer, "Generated on 07/03/2026 · Page 1 of 1");
    }

    #[test]
    fn test_empty_document_still_has_a_page() {
        let config = default_page_config();
        let doc = build_document_on(&ResumeData::default(), None, today());
        let paged = paginate(&doc, &config);
        assert_eq!(paged.page_count(), 1);
        assert!(paged.pages[0].lines.is_empty());
    }

    #[test]
    fn test_long_resume_flows_across_pages_within_bounds() {
        let config = default_page_config();
        let doc = build_document_on(&long_resume(12), None, today());
        let paged = paginate(&doc, &config);
        assert!(paged.page_count() > 1);

        for page in &paged.pages {
            assert_eq!(page.header, doc.header);
            assert!(page.footer.ends_with(&format!("of {}", paged.page_count())));
            for line in &page.lines {
                assert!(line.y_pt >= config.flow_top_pt() - FIT_EPSILON_PT);
                assert!(line.y_pt + line.height_pt <= config.flow_bottom_pt() + FIT_EPSILON_PT);
            }
        }
    }

    #[test]
    fn test_titles_never_end_a_page() {
        let config = default_page_config();
        let doc = build_document_on(&long_resume(12), None, today());
        let paged = paginate(&doc, &config);
        for page in &paged.pages[..paged.pages.len() - 1] {
            let last = &page.lines.last().unwrap().content;
            assert!(
                !matches!(
                    last,
                    LineContent::SectionTitle { .. } | LineContent::CardTitle { .. }
                ),
                "page {} ends with {last:?}",
                page.number
            );
        }
    }

    fn ends_with_title(page: &Page) -> bool {
        matches!(
            page.lines.last().map(|l| &l.content),
            Some(LineContent::SectionTitle { .. } | LineContent::CardTitle { .. })
        )
    }

    #[test]
    fn test_section_title_stays_with_first_card_across_boundary() {
        let config = default_page_config();
        for n in 1..80 {
            let bio = (0..n)
                .map(|i| format!("Bio line {i}"))
                .collect::<Vec<_>>()
                .join("\n");
            let data = ResumeData {
                name: "Jane Doe".into(),
                bio,
                experience: vec![ResumeExperience {
                    title: "Engineer".into(),
                    company: "Acme".into(),
                    period: "2020".into(),
                    points: vec!["Shipped billing".into()],
                    description: String::new(),
                }],
                ..Default::default()
            };
            let doc = build_document_on(&data, None, today());
            let paged = paginate(&doc, &config);
            let last = paged.pages.len() - 1;
            for page in &paged.pages[..last] {
                assert!(
                    !ends_with_title(page),
                    "bio of {n} lines: page {} ends with {:?}",
                    page.number,
                    page.lines.last().map(|l| &l.content)
                );
            }
        }
    }

    #[test]
    fn test_footer_sits_below_flow_area() {
        let config = default_page_config();
        let doc = build_document_on(&long_resume(12), None, today());
        let paged = paginate(&doc, &config);
        for page in &paged.pages {
            assert_eq!(page.footer_y_pt, config.footer_top_pt());
            assert!(page.footer_y_pt >= config.flow_bottom_pt());
        }
    }

    #[test]
    fn test_lines_keep_section_order() {
        let config = default_page_config();
        let doc = build_document_on(&long_resume(12), None, today());
        let paged = paginate(&doc, &config);
        let order: Vec<SectionKind> = paged
            .pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.section))
            .collect();
        let mut seen: Vec<SectionKind> = order.clone();
        seen.dedup();
        assert_eq!(
            seen,
            vec![
                SectionKind::Bio,
                SectionKind::Skills,
                SectionKind::Experience,
                SectionKind::AcademicsAndLanguages,
            ]
        );
    }

    #[test]
    fn test_badges_pack_into_rows() {
        let skills: Vec<String> = (0..40).map(|i| format!("Skill number {i}")).collect();
        let rows = pack_badges(&skills, 50.0);
        assert!(rows.len() > 1);
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), 40);
    }

    #[test]
    fn test_columns_pad_shorter_side() {
        let config = default_page_config();
        let data = ResumeData {
            academics: vec![
                ResumeAcademic {
                    institution: "MIT".into(),
                    degree: "BS".into(),
                    ..Default::default()
                },
                ResumeAcademic {
                    institution: "ETH".into(),
                    ..Default::default()
                },
            ],
            languages: vec!["English".into()],
            ..Default::default()
        };
        let doc = build_document_on(&data, None, today());
        let paged = paginate(&doc, &config);
        let rows: Vec<&LineContent> = paged.pages[0].lines.iter().map(|l| &l.content).collect();
        // Academics: title, MIT, BS, ETH. Languages: title, English.
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[3],
            &LineContent::Columns {
                left: Some("ETH".into()),
                right: None,
                heading: false
            }
        );
    }
}
