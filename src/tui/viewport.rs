//! Viewport math and styled line rendering.
//!
//! The stripped, placeholder-substituted text is wrapped to the viewport
//! width once per document or resize. All line numbers the navigator works
//! with refer to this wrapped layout, which is why wrap decisions must happen
//! before styling: placeholders share their token's column width, so swapping
//! in the styled display text later cannot move a wrap point.

use crate::parser::{ParsedDocument, TokenRegistry, display_width};
use crate::tui::theme::Theme;
use ratatui::text::{Line, Span};

/// The wrapped stripped text for one document at one viewport width.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    lines: Vec<String>,
}

impl Layout {
    pub fn new(doc: &ParsedDocument, width: u16) -> Self {
        Self {
            lines: wrap_text(doc.stripped(), width as usize),
        }
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Largest valid scroll offset for the given viewport height.
    pub fn max_scroll(&self, height: u16) -> usize {
        self.lines.len().saturating_sub(height as usize)
    }

    pub fn clamp_scroll(&self, scroll: usize, height: u16) -> usize {
        scroll.min(self.max_scroll(height))
    }

    /// Line number of the first line containing `placeholder`.
    ///
    /// Placeholders contain no whitespace, so wrapping keeps them on a single
    /// line and a per-line containment check is sufficient.
    pub fn line_of(&self, placeholder: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| find_placeholder(l, placeholder).is_some())
    }

    /// Whether `placeholder` falls inside `[scroll, scroll + height)`.
    pub fn is_in_view(&self, placeholder: &str, scroll: usize, height: u16) -> bool {
        match self.line_of(placeholder) {
            Some(line) => line >= scroll && line < scroll + height as usize,
            None => false,
        }
    }

    /// The visible slice of wrapped lines, clamped against the document.
    pub fn visible(&self, scroll: usize, height: u16) -> &[String] {
        let start = scroll.min(self.lines.len());
        let end = (scroll + height as usize).min(self.lines.len());
        &self.lines[start..end]
    }
}

/// Greedy word wrap. Words longer than the width (rare; a placeholder wider
/// than the terminal) are hard-broken at column boundaries.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw.split_whitespace() {
            let word_width = display_width(word);

            if !current.is_empty() && current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                let mut rest = word;
                loop {
                    let (head, tail) = split_at_width(rest, width);
                    if tail.is_empty() {
                        current.push_str(head);
                        current_width = display_width(head);
                        break;
                    }
                    lines.push(head.to_string());
                    rest = tail;
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Locate `placeholder` in `line`, rejecting prefix collisions.
///
/// An exact-fit marker carries no `_` padding, so `$1` is a substring of
/// `$10___`. A real occurrence is never followed by a digit: the id digits
/// are part of the marker, and padding is always `_`.
fn find_placeholder(line: &str, placeholder: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(offset) = line[start..].find(placeholder) {
        let pos = start + offset;
        let end = pos + placeholder.len();
        if !line[end..].starts_with(|c: char| c.is_ascii_digit()) {
            return Some(pos);
        }
        start = pos + 1;
    }
    None
}

/// Split `word` at the last char boundary whose prefix fits in `width` columns.
fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut columns = 0usize;
    for (idx, ch) in word.char_indices() {
        let ch_width = display_width(ch.encode_utf8(&mut [0u8; 4]));
        if columns + ch_width > width {
            return (&word[..idx], &word[idx..]);
        }
        columns += ch_width;
    }
    (word, "")
}

/// Render the visible slice as styled lines.
///
/// Tokens are walked in increasing id order; each placeholder occurrence is
/// replaced exactly once with the styled display content (uniqueness is
/// guaranteed by construction). The selected link additionally gets the
/// selection highlight.
pub fn render_lines(
    layout: &Layout,
    registry: &TokenRegistry,
    scroll: usize,
    height: u16,
    selected: Option<u32>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    layout
        .visible(scroll, height)
        .iter()
        .map(|line| render_line(line, registry, selected, theme))
        .collect()
}

fn render_line(
    line: &str,
    registry: &TokenRegistry,
    selected: Option<u32>,
    theme: &Theme,
) -> Line<'static> {
    // Collect placeholder occurrences in this line, ordered by token id,
    // then emit spans ordered by byte position.
    let mut replacements: Vec<(usize, usize, &crate::parser::Token)> = Vec::new();
    for token in registry.visible() {
        if let Some(placeholder) = token.placeholder() {
            if let Some(pos) = find_placeholder(line, placeholder) {
                replacements.push((pos, placeholder.len(), token));
            }
        }
    }
    replacements.sort_by_key(|(pos, _, _)| *pos);

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut cursor = 0usize;
    for (pos, len, token) in replacements {
        if pos < cursor {
            // Placeholders are unique, so replacement ranges never overlap
            continue;
        }
        if pos > cursor {
            spans.push(Span::styled(line[cursor..pos].to_string(), theme.text));
        }
        let mut style = theme.style_for(token.kind).unwrap_or(theme.text);
        if token.id() == selected {
            style = style.patch(theme.selected);
        }
        spans.push(Span::styled(token.display.clone(), style));
        cursor = pos + len;
    }
    if cursor < line.len() {
        spans.push(Span::styled(line[cursor..].to_string(), theme.text));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_wikitext;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("one two three four five six seven", 10);
        for line in &lines {
            assert!(display_width(line) <= 10, "line too wide: {:?}", line);
        }
        assert_eq!(lines[0], "one two");
    }

    #[test]
    fn test_wrap_preserves_blank_lines() {
        let lines = wrap_text("alpha\n\nbravo", 20);
        assert_eq!(lines, vec!["alpha", "", "bravo"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_placeholder_never_splits_across_lines() {
        let doc = parse_wikitext("filler words here [[Grand Exchange|the grand exchange]] end");
        let layout = Layout::new(&doc, 24);
        let token = doc.tokens().links().next().unwrap();
        assert!(layout.line_of(token.placeholder().unwrap()).is_some());
    }

    #[test]
    fn test_max_scroll_clamps_small_document() {
        let doc = parse_wikitext("one\ntwo\nthree\nfour\nfive");
        let layout = Layout::new(&doc, 80);
        assert_eq!(layout.total_lines(), 5);
        assert_eq!(layout.max_scroll(10), 0);
        assert_eq!(layout.clamp_scroll(42, 10), 0);
    }

    #[test]
    fn test_visible_slice_clamped() {
        let doc = parse_wikitext("a\nb\nc\nd");
        let layout = Layout::new(&doc, 80);
        assert_eq!(layout.visible(2, 10), &["c".to_string(), "d".to_string()]);
        assert!(layout.visible(9, 10).is_empty());
    }

    #[test]
    fn test_render_replaces_placeholder_with_display() {
        let doc = parse_wikitext("'''Varrock''' stands near [[Grand Exchange|GE]]");
        let layout = Layout::new(&doc, 80);
        let theme = Theme::default();
        let lines = render_lines(&layout, doc.tokens(), 0, 10, None, &theme);

        let flat: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect();
        assert!(flat.contains("Varrock"));
        assert!(flat.contains("GE"));
        assert!(!flat.contains('$'));
    }

    /// Eleven visible tokens so id 10 exists; the 2-column bold span gets the
    /// unpadded marker `$1`, a prefix of id 10's `$10...` marker. Line lookup
    /// and substitution must not confuse the two.
    #[test]
    fn test_exact_fit_marker_not_confused_with_longer_ids() {
        let mut text = String::new();
        for i in 0..9 {
            text.push_str(&format!("[[Page {i}|item {i} row]]\n"));
        }
        text.push_str("'''ab'''\n==Closing notes==");

        let doc = parse_wikitext(&text);
        assert_eq!(doc.tokens().visible().count(), 11);

        let bold = doc.tokens().by_id(1).unwrap();
        assert_eq!(bold.placeholder(), Some("$1"));

        // The ninth link (id 10) sits on line 8; the bold span is on line 9
        let layout = Layout::new(&doc, 80);
        assert_eq!(layout.line_of("$1"), Some(9));

        let theme = Theme::default();
        let lines = render_lines(&layout, doc.tokens(), 0, 20, None, &theme);
        let flat: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect();
        assert!(flat.contains("item 8 row"));
        assert_eq!(flat.matches("ab").count(), 1);
        assert!(!flat.contains('$'));
        assert!(!flat.contains('_'));
    }

    #[test]
    fn test_render_highlights_selected_link() {
        let doc = parse_wikitext("go to [[Grand Exchange|the exchange]] now");
        let layout = Layout::new(&doc, 80);
        let theme = Theme::default();
        let link_id = doc.tokens().links().next().unwrap().id();

        let lines = render_lines(&layout, doc.tokens(), 0, 10, link_id, &theme);
        let selected_span = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content.as_ref() == "the exchange")
            .unwrap();
        assert_eq!(selected_span.style.bg, theme.selected.bg);
    }
}
