//! Static Helvetica width table and page geometry for resume layout.
//!
//! Widths are in em units (relative to font size), taken from the standard
//! Helvetica AFM (units / 1000). Bold text is approximated by scaling regular
//! widths; the error is well under one character per line at resume sizes.
//! The table covers ASCII 0x20..=0x7E. Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry in PostScript points (1/72 inch).
///
/// The flow area of every page sits between the pinned header
/// (`margin_top_pt + header_height_pt`) and the bottom margin, which also
/// holds the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
    pub margin_side_pt: f32,
    /// Part of the bottom margin occupied by the footer line.
    pub footer_height_pt: f32,
    /// Name block, title lines and the divider under them.
    pub header_height_pt: f32,
    pub font_size_pt: f32,
    pub heading_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    pub section_gap_pt: f32,
    pub block_gap_pt: f32,
}

/// A4 portrait, 10pt body text, 40pt side margins.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 595.28,
        page_height_pt: 841.89,
        margin_top_pt: 36.0,
        margin_bottom_pt: 56.0,
        margin_side_pt: 40.0,
        footer_height_pt: 24.0,
        header_height_pt: 84.0,
        font_size_pt: 10.0,
        heading_size_pt: 12.0,
        line_spacing: 1.45,
        section_gap_pt: 14.0,
        block_gap_pt: 8.0,
    }
}

impl PageConfig {
    pub fn content_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_side_pt
    }

    /// Usable text width in em units at body size.
    pub fn content_width_em(&self) -> f32 {
        self.content_width_pt() / self.font_size_pt
    }

    pub fn body_line_pt(&self) -> f32 {
        self.font_size_pt * self.line_spacing
    }

    pub fn heading_line_pt(&self) -> f32 {
        self.heading_size_pt * self.line_spacing
    }

    /// First y coordinate available to flowed content (from the page top).
    pub fn flow_top_pt(&self) -> f32 {
        self.margin_top_pt + self.header_height_pt
    }

    /// Flowed content must end at or above this y coordinate.
    pub fn flow_bottom_pt(&self) -> f32 {
        self.page_height_pt - self.margin_bottom_pt
    }

    /// Baseline region of the footer, inside the bottom margin.
    pub fn footer_top_pt(&self) -> f32 {
        self.page_height_pt - self.footer_height_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

const BOLD_FACTOR: f32 = 1.07;

/// Static character-width table.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str, weight: Weight) -> f32 {
        let regular: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum();
        match weight {
            Weight::Regular => regular,
            Weight::Bold => regular * BOLD_FACTOR,
        }
    }

    /// Greedy word wrap at `max_width_em`. Returns the text of each line.
    ///
    /// A single word wider than the line gets a line of its own rather than
    /// being hyphenated. Whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, max_width_em: f32, weight: Weight) -> Vec<String> {
        let space = match weight {
            Weight::Regular => self.space_width,
            Weight::Bold => self.space_width * BOLD_FACTOR,
        };
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure_str(word, weight);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica (regular).
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.55,
    space_width: 0.278,
};
