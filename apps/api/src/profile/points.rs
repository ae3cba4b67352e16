/// Candidates this short are punctuation noise, not bullets.
const MIN_POINT_CHARS: usize = 6;

fn is_bullet_mark(c: char) -> bool {
    matches!(c, '\n' | '•' | '-' | '*')
}

/// Heuristically splits a free-text description into bullet points.
///
/// Never returns an empty list: an empty description yields `[""]` (one
/// editable row), and a description with no usable candidates comes back
/// whole as a single point.
pub fn split_description_into_points(description: &str) -> Vec<String> {
    if description.is_empty() {
        return vec![String::new()];
    }

    let points: Vec<String> = description
        .split(is_bullet_mark)
        .map(str::trim)
        .filter(|candidate| candidate.chars().count() >= MIN_POINT_CHARS)
        .map(|candidate| {
            candidate
                .trim_start_matches(|c: char| matches!(c, '•' | '-' | '*'))
                .trim_start()
                .to_string()
        })
        .collect();

    if points.is_empty() {
        vec![description.to_string()]
    } else {
        points
    }
}
