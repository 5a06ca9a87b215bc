//! Byte-window helpers that respect UTF-8 char boundaries.

/// Slice `radius` bytes around `offset`, clamped to char boundaries.
pub(crate) fn window_around(text: &str, offset: usize, radius: usize) -> &str {
    let start = floor_boundary(text, offset.saturating_sub(radius));
    let end = ceil_boundary(text, offset.saturating_add(radius).min(text.len()));
    &text[start..end]
}

/// The sentence enclosing `[start, end)`, bounded by `.?!;` and newlines,
/// falling back to `window` bytes on each side when no boundary is found.
pub(crate) fn sentence_span(text: &str, start: usize, end: usize, window: usize) -> &str {
    const BOUNDARIES: &[char] = &['.', '?', '!', ';', '\n'];

    let lo = floor_boundary(text, start.saturating_sub(window));
    let hi = ceil_boundary(text, end.saturating_add(window).min(text.len()));

    // Boundary chars are ASCII, so index arithmetic stays on char boundaries.
    let span_start = match text[lo..start].rfind(BOUNDARIES) {
        Some(i) => lo + i + 1,
        None => lo,
    };
    let span_end = match text[end..hi].find(BOUNDARIES) {
        Some(i) => end + i,
        None => hi,
    };
    &text[span_start..span_end]
}

pub(crate) fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

pub(crate) fn ceil_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_clamps_to_text_edges() {
        assert_eq!(window_around("hello world", 0, 5), "hello");
        assert_eq!(window_around("hello world", 8, 100), "hello world");
    }

    #[test]
    fn window_never_splits_multibyte_chars() {
        let text = "caf\u{e9} r\u{e9}sum\u{e9} notes";
        for offset in 0..=text.len() {
            let window = window_around(text, offset, 4);
            assert!(text.contains(window));
        }
    }

    #[test]
    fn sentence_span_stops_at_punctuation() {
        let text = "First thought. Alice uses Redis here. Last thought.";
        let start = text.find("uses").unwrap();
        let span = sentence_span(text, start, start + 4, 160);
        assert_eq!(span.trim(), "Alice uses Redis here");
    }

    #[test]
    fn sentence_span_falls_back_to_window() {
        let text = "a".repeat(500);
        let span = sentence_span(&text, 250, 254, 100);
        assert_eq!(span.len(), 204);
    }
}
