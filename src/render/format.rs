//! Width-aware text helpers used to lay out message lines.
//!
//! All widths are terminal display columns, not bytes or chars.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marks truncated text.
pub const ELLIPSIS: &str = "…";

/// Display width of `text`.
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Stopwatch text: blank under a second, capped at "> 999 s".
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn elapsed_text(seconds: f64) -> String {
    if seconds < 1.0 {
        String::new()
    } else if seconds >= 999.0 {
        "> 999 s".to_string()
    } else {
        format!("{:>3} s", seconds as u64)
    }
}

/// Replace every whitespace character (newlines, tabs, ...) with a space.
pub fn normalize_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

/// Truncate `text` with an ellipsis or pad it with spaces to exactly `width`.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let text_width = display_width(text);
    if text_width <= width {
        let mut out = String::with_capacity(text.len() + width - text_width);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - text_width));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - display_width(ELLIPSIS);
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ELLIPSIS);
    // A wide grapheme that did not fit leaves a gap.
    out.extend(std::iter::repeat(' ').take(budget - used));
    out
}

/// Split `line` into chunks of at most `width` columns, breaking anywhere.
fn break_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut used = 0;
    for grapheme in line.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push_str(grapheme);
        used += w;
    }
    out.push(current);
}

/// Wrap preformatted text: keep its line breaks and cut longer lines at
/// exactly `width` columns.
pub fn wrap_hard(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in text.split('\n') {
        break_line(line.trim_end_matches('\r'), width, &mut lines);
    }
    lines
}

/// Wrap prose at word boundaries. Words longer than `width` are cut.
pub fn wrap_soft(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let w = display_width(word);
        if used > 0 && used + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if w > width {
            if used > 0 {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = Vec::new();
            break_line(word, width, &mut pieces);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                used = display_width(&last);
                current = last;
            }
            continue;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        current.push_str(word);
        used += w;
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_text() {
        assert_eq!(elapsed_text(0.0), "");
        assert_eq!(elapsed_text(0.999), "");
        assert_eq!(elapsed_text(1.0), "  1 s");
        assert_eq!(elapsed_text(42.7), " 42 s");
        assert_eq!(elapsed_text(998.9), "998 s");
        assert_eq!(elapsed_text(999.0), "> 999 s");
        assert_eq!(elapsed_text(5000.0), "> 999 s");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a\tb\nc  d"), "a b c  d");
    }

    #[test]
    fn test_fit_pads_short_text() {
        assert_eq!(fit_to_width("abc", 6), "abc   ");
        assert_eq!(fit_to_width("abc", 3), "abc");
        assert_eq!(fit_to_width("", 0), "");
    }

    #[test]
    fn test_fit_truncates_with_single_ellipsis() {
        let fitted = fit_to_width("Lorem ipsum dolor sit amet", 10);
        assert_eq!(fitted, "Lorem ips…");
        assert_eq!(display_width(&fitted), 10);
        assert_eq!(fitted.matches(ELLIPSIS).count(), 1);
        assert_eq!(fit_to_width("ab", 1), ELLIPSIS);
        assert_eq!(fit_to_width("ab", 0), "");
    }

    #[test]
    fn test_fit_counts_wide_characters() {
        // Each CJK character is two columns wide.
        let fitted = fit_to_width("日本語テキスト", 6);
        assert_eq!(fitted, "日本… ");
        assert_eq!(display_width(&fitted), 6);
    }

    #[test]
    fn test_wrap_hard_keeps_line_breaks() {
        assert_eq!(
            wrap_hard("line one\nabcdefghij", 4),
            ["line", " one", "abcd", "efgh", "ij"]
        );
        assert_eq!(wrap_hard("a\n\nb", 10), ["a", "", "b"]);
    }

    #[test]
    fn test_wrap_soft_breaks_at_words() {
        assert_eq!(
            wrap_soft("the quick brown fox jumps", 10),
            ["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_soft("a verylongword b", 5), ["a", "veryl", "ongwo", "rd b"]);
        assert_eq!(wrap_soft("", 5), [""]);
    }
}
