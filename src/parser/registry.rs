//! Ordered collection of extracted tokens with id and placeholder lookup.

use crate::parser::token::{Token, TokenKind};

/// Tokens in extraction order. Visible tokens carry ids allocated from a
/// single monotonic counter, so id order matches scan order within each
/// category and placeholder uniqueness holds across the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Visible tokens in increasing id order.
    pub fn visible(&self) -> impl Iterator<Item = &Token> {
        let mut tokens: Vec<&Token> = self.tokens.iter().filter(|t| t.id().is_some()).collect();
        tokens.sort_by_key(|t| t.id());
        tokens.into_iter()
    }

    /// Link tokens in increasing id order.
    pub fn links(&self) -> impl Iterator<Item = &Token> {
        self.visible().filter(|t| t.kind == TokenKind::Link)
    }

    pub fn by_id(&self, id: u32) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id() == Some(id))
    }

    /// Linear scan for the token whose placeholder equals `text`. Used to
    /// locate a token's line by searching the stripped text for its
    /// placeholder; unambiguous because placeholders are unique.
    pub fn by_placeholder(&self, text: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.placeholder() == Some(text))
    }

    /// First link with id strictly greater than `id`. Does not wrap.
    pub fn next_link(&self, id: u32) -> Option<&Token> {
        self.links()
            .find(|t| matches!(t.id(), Some(candidate) if candidate > id))
    }

    /// Nearest link with id strictly smaller than `id`, found by scanning
    /// backward from the end of the registry. Does not wrap.
    pub fn prev_link(&self, id: u32) -> Option<&Token> {
        let links: Vec<&Token> = self.links().collect();
        links.into_iter().rev().find(|t| {
            matches!(t.id(), Some(candidate) if candidate < id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::{Visibility, build_placeholder};

    fn link(id: u32, label: &str) -> Token {
        Token {
            kind: TokenKind::Link,
            original: format!("[[{}]]", label),
            display: label.to_string(),
            target: label.to_string(),
            visibility: Visibility::Visible {
                id,
                placeholder: build_placeholder(id, label.len()).unwrap(),
            },
        }
    }

    fn registry_with_links(ids: &[(u32, &str)]) -> TokenRegistry {
        let mut registry = TokenRegistry::new();
        for (id, label) in ids {
            registry.push(link(*id, label));
        }
        registry
    }

    #[test]
    fn test_by_id_lookup() {
        let registry = registry_with_links(&[(0, "alpha"), (1, "bravo")]);
        assert_eq!(registry.by_id(1).unwrap().display, "bravo");
        assert!(registry.by_id(7).is_none());
    }

    #[test]
    fn test_by_placeholder_lookup() {
        let registry = registry_with_links(&[(0, "alpha")]);
        let ph = registry.by_id(0).unwrap().placeholder().unwrap().to_string();
        assert_eq!(registry.by_placeholder(&ph).unwrap().display, "alpha");
        assert!(registry.by_placeholder("$99").is_none());
    }

    #[test]
    fn test_next_link_stops_at_bounds() {
        let registry = registry_with_links(&[(2, "alpha"), (5, "bravo"), (9, "charlie")]);
        assert_eq!(registry.next_link(2).unwrap().id(), Some(5));
        assert_eq!(registry.next_link(5).unwrap().id(), Some(9));
        assert!(registry.next_link(9).is_none());
    }

    #[test]
    fn test_prev_link_scans_strictly_backward() {
        let registry = registry_with_links(&[(2, "alpha"), (5, "bravo"), (9, "charlie")]);
        assert_eq!(registry.prev_link(9).unwrap().id(), Some(5));
        assert_eq!(registry.prev_link(5).unwrap().id(), Some(2));
        assert!(registry.prev_link(2).is_none());
    }
}
