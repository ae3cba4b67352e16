//! Plain-text rendering of a paginated resume, used for the export artifact.

use crate::resume::document::{Avatar, Header};
use crate::resume::paginate::{LineContent, Page, PaginatedDocument};

/// Character width of the text canvas.
const CANVAS_COLS: usize = 80;
const PAGE_BREAK: char = '\u{000C}';

/// Renders every page as header, flowed lines, then footer. Pages are
/// separated by a form feed.
pub fn render_text(document: &PaginatedDocument) -> String {
    let separator = format!("{PAGE_BREAK}\n");
    document
        .pages
        .iter()
        .map(render_page)
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

fn render_page(page: &Page) -> String {
    let mut out = String::new();
    render_header(&mut out, &page.header);

    for line in &page.lines {
        match &line.content {
            LineContent::SectionTitle { text } => {
                out.push_str(&format!("\n{}\n", text.to_uppercase()));
            }
            LineContent::Text { text } => {
                out.push_str(&format!("{text}\n"));
            }
            LineContent::Bullet { text, continuation } => {
                let mark = if *continuation { " " } else { "•" };
                out.push_str(&format!("  {mark} {text}\n"));
            }
            LineContent::Badges { items } => {
                let badges: Vec<String> = items.iter().map(|s| format!("[{s}]")).collect();
                out.push_str(&format!("{}\n", badges.join(" ")));
            }
            LineContent::CardTitle { title, aside } => {
                out.push_str(&format!("{}\n", spread(title, aside.as_deref().unwrap_or(""))));
            }
            LineContent::CardSubtitle { text } => {
                out.push_str(&format!("{text}\n"));
            }
            LineContent::Columns {
                left,
                right,
                heading,
            } => {
                let (l, r) = (left.as_deref().unwrap_or(""), right.as_deref().unwrap_or(""));
                let (l, r) = if *heading {
                    (l.to_uppercase(), r.to_uppercase())
                } else {
                    (l.to_string(), r.to_string())
                };
                let row = format!("{:<width$}{}", l, r, width = CANVAS_COLS / 2);
                out.push_str(&format!("{}\n", row.trim_end()));
            }
        }
    }

    out.push_str(&format!("\n{}\n", page.footer));
    out
}

fn render_header(out: &mut String, header: &Header) {
    let avatar = match &header.avatar {
        Avatar::Image(url) => format!("[image: {url}]"),
        Avatar::Initials(initials) => format!("({initials})"),
    };
    out.push_str(&format!("{avatar} {}\n", header.name));
    if !header.title.is_empty() {
        out.push_str(&format!("{}\n", header.title));
    }

    let details: Vec<&str> = [
        header.organization.as_deref(),
        header.location.as_deref(),
        header.experience_badge.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        out.push_str(&format!("{}\n", details.join(" | ")));
    }
    out.push_str(&format!("{}\n", "-".repeat(CANVAS_COLS)));
}

/// Left text and right-aligned aside on one canvas row.
fn spread(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    if right.is_empty() {
        left.to_string()
    } else if used + 1 >= CANVAS_COLS {
        format!("{left} {right}")
    } else {
        format!("{left}{}{right}", " ".repeat(CANVAS_COLS - used))
    }
}
