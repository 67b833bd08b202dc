//! Text helpers for fixed-width rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to at most `max_width` display columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let keep = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut out_width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if out_width + w > keep {
            break;
        }
        out.push(ch);
        out_width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn zero_width_is_empty() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }
}
