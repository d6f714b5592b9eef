//! Modal keystroke navigator for the article viewport.
//!
//! There is no separate mode enum: the key buffer itself is the state. Keys
//! are prepended (most-recently-typed first), joined, and resolved against a
//! fixed command table. Numeric prefixes therefore end up after the letter in
//! the joined buffer, and the typed count is recovered by taking the trailing
//! digit run and reversing it.

use crate::parser::ParsedDocument;
use crate::tui::viewport::Layout;

/// A navigation command bound to a keystroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    ScrollUp,
    ScrollDown,
    GotoTop,
    GotoBottom,
    NextLink,
    PrevLink,
    Activate,
}

/// Command table, ordered by specificity (longest patterns first).
const COMMANDS: &[(&str, Motion)] = &[
    ("enter", Motion::Activate),
    ("gg", Motion::GotoTop),
    ("k", Motion::ScrollUp),
    ("j", Motion::ScrollDown),
    ("G", Motion::GotoBottom),
    ("l", Motion::NextLink),
    ("h", Motion::PrevLink),
];

/// Emitted when a selected link is activated. The sole point where control
/// crosses to the page-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
    pub target: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Resolution {
    /// Buffer could still grow into a command
    Pending,
    /// Buffer can never match; drop it without firing
    Clear,
    Fire(Motion, Option<usize>),
}

/// Scroll and selection state for the article viewport, mutated one keystroke
/// at a time.
#[derive(Debug)]
pub struct Navigator {
    /// Raw key names, most-recently-typed first
    buffer: Vec<String>,
    pub scroll: usize,
    pub selected: Option<u32>,
    height: u16,
    /// Lines of context kept around a link scrolled into view
    context: usize,
}

impl Navigator {
    pub fn new(height: u16, context: usize) -> Self {
        Self {
            buffer: Vec::new(),
            scroll: 0,
            selected: None,
            height,
            context,
        }
    }

    /// Reset for a freshly installed document.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.scroll = 0;
        self.selected = None;
    }

    pub fn resize(&mut self, height: u16, layout: &Layout) {
        self.height = height;
        self.scroll = layout.clamp_scroll(self.scroll, self.height);
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pending keys in typed order, for the status line.
    pub fn pending_keys(&self) -> String {
        self.buffer.iter().rev().map(String::as_str).collect()
    }

    /// Feed one raw key name into the buffer and apply whatever command it
    /// completes. Returns a request when the key activated a selected link.
    pub fn push_key(
        &mut self,
        key: &str,
        doc: &ParsedDocument,
        layout: &Layout,
    ) -> Option<NavRequest> {
        self.buffer.insert(0, key.to_string());
        let joined: String = self.buffer.concat();

        match resolve(&joined) {
            Resolution::Pending => None,
            Resolution::Clear => {
                self.buffer.clear();
                None
            }
            Resolution::Fire(motion, count) => {
                self.buffer.clear();
                self.apply(motion, count, doc, layout)
            }
        }
    }

    fn apply(
        &mut self,
        motion: Motion,
        count: Option<usize>,
        doc: &ParsedDocument,
        layout: &Layout,
    ) -> Option<NavRequest> {
        match motion {
            Motion::ScrollUp => {
                let n = count.unwrap_or(1).max(1);
                self.scroll = self.scroll.saturating_sub(n);
            }
            Motion::ScrollDown => {
                let n = count.unwrap_or(1).max(1);
                self.scroll = layout.clamp_scroll(self.scroll.saturating_add(n), self.height);
            }
            Motion::GotoTop => self.scroll = 0,
            Motion::GotoBottom => {
                self.scroll = match count {
                    Some(line) => layout.clamp_scroll(line, self.height),
                    None => layout.max_scroll(self.height),
                };
            }
            Motion::NextLink => self.next_link(doc, layout),
            Motion::PrevLink => self.prev_link(doc, layout),
            Motion::Activate => {
                return self
                    .selected
                    .and_then(|id| doc.tokens().by_id(id))
                    .filter(|t| t.is_link())
                    .map(|t| NavRequest {
                        target: t.target.clone(),
                    });
            }
        }
        None
    }

    /// Whether the current selection's placeholder is inside the viewport.
    fn selection_in_view(&self, doc: &ParsedDocument, layout: &Layout) -> bool {
        self.selected
            .and_then(|id| doc.tokens().by_id(id))
            .and_then(|t| t.placeholder())
            .map(|ph| layout.is_in_view(ph, self.scroll, self.height))
            .unwrap_or(false)
    }

    fn next_link(&mut self, doc: &ParsedDocument, layout: &Layout) {
        if !self.selection_in_view(doc, layout) {
            // No usable selection: take the first link visible in the viewport
            let candidate = doc.tokens().links().find(|t| {
                t.placeholder()
                    .is_some_and(|ph| layout.is_in_view(ph, self.scroll, self.height))
            });
            if let Some(token) = candidate {
                self.select(token.id(), doc, layout);
            }
            return;
        }

        let current = match self.selected {
            Some(id) => id,
            None => return,
        };
        if let Some(token) = doc.tokens().next_link(current) {
            self.select(token.id(), doc, layout);
        }
    }

    fn prev_link(&mut self, doc: &ParsedDocument, layout: &Layout) {
        if !self.selection_in_view(doc, layout) {
            // Scan from the end: the last link visible in the viewport
            let candidate = doc
                .tokens()
                .links()
                .filter(|t| {
                    t.placeholder()
                        .is_some_and(|ph| layout.is_in_view(ph, self.scroll, self.height))
                })
                .last();
            if let Some(token) = candidate {
                self.select(token.id(), doc, layout);
            }
            return;
        }

        let current = match self.selected {
            Some(id) => id,
            None => return,
        };
        if let Some(token) = doc.tokens().prev_link(current) {
            self.select(token.id(), doc, layout);
        }
    }

    fn select(&mut self, id: Option<u32>, doc: &ParsedDocument, layout: &Layout) {
        let Some(id) = id else { return };
        self.selected = Some(id);
        self.scroll_into_view(id, doc, layout);
    }

    /// Bring the selected token's line into the viewport, leaving a few lines
    /// of context instead of placing it exactly at the boundary.
    fn scroll_into_view(&mut self, id: u32, doc: &ParsedDocument, layout: &Layout) {
        let line = doc
            .tokens()
            .by_id(id)
            .and_then(|t| t.placeholder())
            .and_then(|ph| layout.line_of(ph));
        let Some(line) = line else { return };

        let height = self.height as usize;
        let context = self.context.min(height.saturating_sub(1));

        if line < self.scroll {
            self.scroll = line.saturating_sub(context);
        } else if line >= self.scroll + height {
            let bottom_margin = line.saturating_add(context + 1);
            self.scroll = layout.clamp_scroll(bottom_margin.saturating_sub(height), self.height);
        }
    }
}

/// Resolve the joined buffer against the command table.
///
/// The trailing digit run is the (reversed) numeric prefix; the rest is the
/// command head. An empty head with digits pending waits for the letter.
fn resolve(joined: &str) -> Resolution {
    let digits: String = joined
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let head = &joined[..joined.len() - digits.len()];
    let count = if digits.is_empty() {
        None
    } else {
        digits.parse::<usize>().ok()
    };

    if head.is_empty() {
        if joined.is_empty() {
            return Resolution::Clear;
        }
        return Resolution::Pending;
    }

    if let Some((_, motion)) = COMMANDS.iter().find(|(pattern, _)| *pattern == head) {
        return Resolution::Fire(*motion, count);
    }

    if COMMANDS.iter().any(|(pattern, _)| pattern.starts_with(head)) {
        return Resolution::Pending;
    }

    Resolution::Clear
}
