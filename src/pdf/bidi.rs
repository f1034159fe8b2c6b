//! Right-to-left text handling on top of `unicode-bidi`.
//!
//! Text is stored in logical order; PDF text is drawn left to right, so any
//! string containing RTL characters is reordered into visual order before it is
//! measured or shown. No contextual shaping is applied.

use unicode_bidi::{BidiInfo, Direction, get_base_direction};

/// True when the first strong character of `text` is right-to-left.
pub(crate) fn is_rtl(text: &str) -> bool {
    matches!(get_base_direction(text), Direction::Rtl)
}

pub(crate) fn has_rtl(text: &str) -> bool {
    !text.is_empty() && BidiInfo::new(text, None).has_rtl()
}

/// Reorder a single-line string from logical to visual order.
pub(crate) fn visual(text: &str) -> String {
    if !has_rtl(text) {
        return text.to_string();
    }
    let info = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());
    for para in &info.paragraphs {
        out.push_str(&info.reorder_line(para, para.range.clone()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_text_is_unchanged() {
        assert!(!is_rtl("Policy 2024"));
        assert_eq!(visual("Policy 2024"), "Policy 2024");
    }

    #[test]
    fn arabic_is_reversed_into_visual_order() {
        let logical = "\u{0628}\u{0631}\u{064A}";
        assert!(is_rtl(logical));
        assert_eq!(visual(logical), "\u{064A}\u{0631}\u{0628}");
    }
}
