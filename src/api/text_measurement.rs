use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Font used for tick labels and axis titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontProperties {
    pub family: String,
    pub size_px: f64,
}

impl Default for FontProperties {
    fn default() -> Self {
        Self {
            family: "Segoe UI".to_owned(),
            size_px: 11.0,
        }
    }
}

/// Lines produced by word-breaking one label; most labels fit in a few.
pub type LabelLines = SmallVec<[String; 4]>;

/// Text measurement capability supplied by the host.
///
/// Implementations must be pure: the negotiator calls them repeatedly with
/// the same input during one layout pass.
pub trait TextMeasurer {
    /// Rendered width of `text` in pixels.
    fn measure_width(&self, text: &str, font: &FontProperties) -> f64;

    /// Height of one line of text in pixels.
    fn estimate_height(&self, font: &FontProperties) -> f64;

    /// Greedy word wrap of `text` into at most `max_lines` lines no wider than `max_width`.
    ///
    /// Overflowing words are kept on their own line; text beyond `max_lines`
    /// is appended to the last line.
    fn split_by_width(
        &self,
        text: &str,
        font: &FontProperties,
        max_width: f64,
        max_lines: usize,
    ) -> LabelLines {
        let mut lines = LabelLines::new();
        let max_lines = max_lines.max(1);
        for word in text.split_whitespace() {
            let line_count = lines.len();
            if let Some(current) = lines.last_mut() {
                let candidate = format!("{current} {word}");
                if line_count >= max_lines || self.measure_width(&candidate, font) <= max_width {
                    *current = candidate;
                    continue;
                }
            }
            lines.push(word.to_owned());
        }
        lines
    }
}

/// Backend-independent width estimate based on per-glyph advance ratios.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_width(&self, text: &str, font: &FontProperties) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'l' | 'j' | 't' | 'f' | 'I' => 0.30,
                'm' | 'w' | 'M' | 'W' => 0.86,
                _ => 0.58,
            }
        });
        units * font.size_px
    }

    fn estimate_height(&self, font: &FontProperties) -> f64 {
        (font.size_px * 1.3).ceil()
    }
}
