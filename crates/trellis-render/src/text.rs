use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: every display column is `char_width_factor * font_size` wide.
///
/// Display columns come from Unicode East Asian Width, so CJK labels measure twice as wide as
/// Latin ones. Zero factors fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn factors(&self) -> (f64, f64) {
        let cw = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let lh = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        (cw, lh)
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (char_width_factor, line_height_factor) = self.factors();
        let font_size = style.font_size.max(1.0);

        let mut line_count = 0usize;
        let mut max_cols = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_cols = max_cols.max(line.width());
        }

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

/// Greedy word wrap at whitespace. Words wider than `max_width` get a line of their own and are
/// never split.
pub fn wrap_label(
    text: &str,
    max_width: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if max_width > 0.0 && measurer.measure(&candidate, style).width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    if lines.iter().all(String::is_empty) {
        return vec![String::new()];
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_measurer_counts_display_columns() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        let latin = m.measure("abcd", &style);
        assert_eq!(latin.width, 4.0 * 10.0 * 0.6);
        assert_eq!(latin.line_count, 1);

        let cjk = m.measure("图表", &style);
        assert_eq!(cjk.width, latin.width);

        let two = m.measure("ab\nabcdef", &style);
        assert_eq!(two.line_count, 2);
        assert_eq!(two.width, 6.0 * 10.0 * 0.6);
        assert_eq!(two.height, 2.0 * 10.0 * 1.2);
    }

    #[test]
    fn wrap_label_breaks_at_whitespace_only() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        // 6px per column: 100px fits 16 columns.
        let lines = wrap_label("Orders service primary database", 100.0, &style, &m);
        assert_eq!(lines, vec!["Orders service", "primary database"]);

        let long = wrap_label("averyveryverylongidentifier", 30.0, &style, &m);
        assert_eq!(long, vec!["averyveryverylongidentifier"]);

        assert_eq!(wrap_label("   ", 100.0, &style, &m), vec![String::new()]);
    }
}
