//! Token types extracted from raw wikitext.

use unicode_width::UnicodeWidthStr;

/// The categories of markup the tokenizer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Section heading delimited by repeated `=`
    Heading,
    /// Bold span delimited by `'''`
    Bold,
    /// Internal link `[[target|label]]` or `[[label]]`
    Link,
    /// Embedded file or image reference (not displayed)
    File,
    /// Redirect notice (not displayed)
    Redirect,
}

/// Whether a token occupies visible space in the stripped text.
///
/// Visible tokens own a unique id and a placeholder that stands in for the
/// matched markup until styling happens. Hidden tokens (files, redirects)
/// are removed from the text entirely and kept only for provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Visible { id: u32, placeholder: String },
    Hidden,
}

/// A structured unit extracted from raw wikitext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched substring from the source markup
    pub original: String,
    /// The text shown to the user, markup delimiters stripped
    pub display: String,
    /// Navigation destination; for links this defaults to the label when no
    /// explicit target is given. Empty for non-link tokens.
    pub target: String,
    pub visibility: Visibility,
}

impl Token {
    pub fn id(&self) -> Option<u32> {
        match self.visibility {
            Visibility::Visible { id, .. } => Some(id),
            Visibility::Hidden => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.visibility {
            Visibility::Visible { placeholder, .. } => Some(placeholder),
            Visibility::Hidden => None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.kind == TokenKind::Link
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }
}

/// Build the placeholder for a visible token: a `$` sigil, the decimal id,
/// then `_` padding so the placeholder's column width equals `width`.
///
/// Returns `None` when the marker does not fit, in which case the caller
/// leaves the matched text literal. Line-wrap decisions are made on the
/// placeholder-substituted text, so the width equality is what keeps later
/// styling from shifting wrap points.
pub fn build_placeholder(id: u32, width: usize) -> Option<String> {
    let digits = id.to_string();
    let used = 1 + digits.len();
    if width < used {
        return None;
    }
    let mut marker = String::with_capacity(width);
    marker.push('$');
    marker.push_str(&digits);
    for _ in used..width {
        marker.push('_');
    }
    Some(marker)
}

/// Column width of display text, as used for placeholder sizing.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_pads_to_width() {
        let ph = build_placeholder(0, 7).unwrap();
        assert_eq!(ph, "$0_____");
        assert_eq!(display_width(&ph), 7);
    }

    #[test]
    fn test_placeholder_exact_fit() {
        assert_eq!(build_placeholder(12, 3).unwrap(), "$12");
    }

    #[test]
    fn test_placeholder_too_narrow() {
        assert_eq!(build_placeholder(12, 2), None);
        assert_eq!(build_placeholder(0, 1), None);
    }

    #[test]
    fn test_hidden_token_has_no_id() {
        let token = Token {
            kind: TokenKind::Redirect,
            original: "{{redirect|Foo}}".to_string(),
            display: String::new(),
            target: String::new(),
            visibility: Visibility::Hidden,
        };
        assert_eq!(token.id(), None);
        assert_eq!(token.placeholder(), None);
        assert!(token.is_hidden());
    }
}
