//! Wikitext tokenization and document structure extraction.
//!
//! The tokenizer scans raw wikitext in a fixed sequence of pattern passes,
//! replacing each recognized span with a width-preserving placeholder and
//! recording a token for it. Each pass operates on the output of the previous
//! pass, so a later pass never re-matches an already-substituted placeholder
//! and the categories cannot overlap.
//!
//! Parsing is best-effort: unmatched or unterminated markup (an unclosed
//! `[[`, a stray `'''`) is left as literal text, never an error.

mod registry;
mod token;

pub use registry::TokenRegistry;
pub use token::{Token, TokenKind, Visibility, build_placeholder, display_width};

use regex::{Captures, Regex};

/// A parsed page: the placeholder-substituted text plus the token registry.
///
/// Created once per page load and replaced wholesale on the next load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    stripped: String,
    tokens: TokenRegistry,
}

impl ParsedDocument {
    pub fn stripped(&self) -> &str {
        &self.stripped
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }
}

struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

/// Pattern-based wikitext tokenizer.
///
/// Pass order is fixed: redirect notices, file embeds, headings, bold spans,
/// links. Hidden categories (redirect, file) are removed from the text
/// entirely; visible categories are substituted with placeholders whose ids
/// come from one monotonic counter shared across all visible passes.
pub struct Tokenizer {
    rules: Vec<Rule>,
}

impl Tokenizer {
    pub fn new() -> Self {
        let rules = vec![
            Rule {
                kind: TokenKind::Redirect,
                pattern: Regex::new(r"\{\{[Rr]edirect\|[^{}]*\}\}").expect("redirect pattern"),
            },
            Rule {
                kind: TokenKind::File,
                pattern: Regex::new(r"\(?\[\[File:[^\[\]]+\]\]\)?").expect("file pattern"),
            },
            Rule {
                kind: TokenKind::Heading,
                pattern: Regex::new(r"==+([^=\n]+)==+").expect("heading pattern"),
            },
            Rule {
                kind: TokenKind::Bold,
                pattern: Regex::new(r"'''([^'\n]+)'''").expect("bold pattern"),
            },
            Rule {
                kind: TokenKind::Link,
                pattern: Regex::new(r"\[\[(?:([^\[\]|\n]+)\|)?([^\[\]|\n]+)\]\]")
                    .expect("link pattern"),
            },
        ];
        Self { rules }
    }

    /// Tokenize raw wikitext into a [`ParsedDocument`].
    pub fn tokenize(&self, text: &str) -> ParsedDocument {
        let mut stripped = text.to_string();
        let mut tokens = TokenRegistry::new();
        let mut next_id: u32 = 0;

        for rule in &self.rules {
            stripped = rule
                .pattern
                .replace_all(&stripped, |caps: &Captures| {
                    substitute(rule.kind, caps, &mut tokens, &mut next_id)
                })
                .into_owned();
        }

        ParsedDocument { stripped, tokens }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper constructing a one-shot [`Tokenizer`].
pub fn parse_wikitext(text: &str) -> ParsedDocument {
    Tokenizer::new().tokenize(text)
}

/// Produce the replacement text for one match, recording its token.
fn substitute(
    kind: TokenKind,
    caps: &Captures,
    tokens: &mut TokenRegistry,
    next_id: &mut u32,
) -> String {
    let original = caps[0].to_string();

    match kind {
        TokenKind::Redirect | TokenKind::File => {
            tokens.push(Token {
                kind,
                original,
                display: String::new(),
                target: String::new(),
                visibility: Visibility::Hidden,
            });
            String::new()
        }
        TokenKind::Link => {
            let display = caps[2].to_string();
            let target = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| display.clone());
            visible(kind, original, display, target, tokens, next_id)
        }
        TokenKind::Heading | TokenKind::Bold => {
            let display = caps[1].to_string();
            visible(kind, original, display, String::new(), tokens, next_id)
        }
    }
}

/// Substitute a visible match with its placeholder, or leave it literal when
/// the display text is too narrow to hold the id marker.
fn visible(
    kind: TokenKind,
    original: String,
    display: String,
    target: String,
    tokens: &mut TokenRegistry,
    next_id: &mut u32,
) -> String {
    let width = display_width(&display);
    match build_placeholder(*next_id, width) {
        Some(placeholder) => {
            tokens.push(Token {
                kind,
                original,
                display,
                target,
                visibility: Visibility::Visible {
                    id: *next_id,
                    placeholder: placeholder.clone(),
                },
            });
            *next_id += 1;
            placeholder
        }
        None => original,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_link_extraction() {
        let doc = parse_wikitext("'''Varrock'''  [[Grand Exchange|GE]]");

        let bold: Vec<_> = doc
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::Bold)
            .collect();
        assert_eq!(bold.len(), 1);
        assert_eq!(bold[0].display, "Varrock");

        let links: Vec<_> = doc.tokens().links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].display, "GE");
        assert_eq!(links[0].target, "Grand Exchange");
    }

    #[test]
    fn test_link_target_defaults_to_label() {
        let doc = parse_wikitext("see [[Lumbridge]] for details");
        let links: Vec<_> = doc.tokens().links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].display, "Lumbridge");
        assert_eq!(links[0].target, "Lumbridge");
    }

    #[test]
    fn test_placeholder_width_matches_display() {
        let doc = parse_wikitext(
            "==Quest guide==\n'''Important note'''\n[[Grand Exchange|the exchange]] and [[Varrock]]",
        );
        assert!(doc.tokens().visible().count() >= 4);
        for token in doc.tokens().visible() {
            let ph = token.placeholder().unwrap();
            assert_eq!(
                display_width(ph),
                display_width(&token.display),
                "placeholder width mismatch for {:?}",
                token.display
            );
        }
    }

    #[test]
    fn test_stripped_text_contains_no_recognized_markup() {
        let doc = parse_wikitext(
            "{{redirect|Old page}}\n==History==\n'''Bold text''' and [[Some Page|a link]]\n[[File:map.png|thumb]]",
        );
        let stripped = doc.stripped();
        assert!(!stripped.contains("=="));
        assert!(!stripped.contains("'''"));
        assert!(!stripped.contains("[["));
        assert!(!stripped.contains("{{redirect"));
        assert!(!stripped.contains("File:"));
    }

    #[test]
    fn test_hidden_tokens_removed_and_unselectable() {
        let doc = parse_wikitext("{{redirect|Foo|Bar}}intro [[File:scene.png]] outro");
        let hidden: Vec<_> = doc.tokens().iter().filter(|t| t.is_hidden()).collect();
        assert_eq!(hidden.len(), 2);
        for token in &hidden {
            assert_eq!(token.id(), None);
        }
        assert_eq!(doc.stripped(), "intro  outro");
    }

    #[test]
    fn test_retokenize_stripped_text_is_empty() {
        let doc = parse_wikitext(
            "==Overview==\n'''Varrock''' is linked from [[Grand Exchange|GE market]].",
        );
        let again = parse_wikitext(doc.stripped());
        assert_eq!(again.tokens().len(), 0);
        assert_eq!(again.stripped(), doc.stripped());
    }

    #[test]
    fn test_unterminated_markup_stays_literal() {
        let doc = parse_wikitext("an [[unclosed link and a stray ''' marker");
        assert_eq!(doc.tokens().len(), 0);
        assert_eq!(doc.stripped(), "an [[unclosed link and a stray ''' marker");
    }

    #[test]
    fn test_ids_are_monotonic_across_categories() {
        let doc = parse_wikitext("==Heading one==\n'''bold span''' then [[Linked Page]]");
        let ids: Vec<u32> = doc.tokens().visible().map(|t| t.id().unwrap()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_too_narrow_label_left_literal() {
        // A one-column label cannot hold the `$N` marker, so it is not tokenized.
        let doc = parse_wikitext("tiny [[x]] link");
        assert_eq!(doc.tokens().links().count(), 0);
        assert!(doc.stripped().contains("[[x]]"));
    }

    #[test]
    fn test_heading_delimiters_stripped() {
        let doc = parse_wikitext("===Getting there===");
        let headings: Vec<_> = doc
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::Heading)
            .collect();
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].display, "Getting there");
        assert_eq!(headings[0].original, "===Getting there===");
    }
}
