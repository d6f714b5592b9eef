//! Per-token-type styling for the article view.
//!
//! A `Theme` is built once at startup (base palette plus config overrides)
//! and passed into rendering as an immutable value.

use crate::config::ThemeConfig;
use crate::parser::TokenKind;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Style,
    pub dimmed: Style,
    pub heading: Style,
    pub bold: Style,
    pub link: Style,
    /// Highlight patched over the selected link's style
    pub selected: Style,
    pub line_number: Style,
    pub border: Style,
    pub accent: Style,
    pub status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let foreground = Color::Rgb(0xf4, 0xea, 0xea);
        let dimmed = Color::Rgb(0xa4, 0xa1, 0xa1);
        let accent = Color::Rgb(0xea, 0x47, 0x27);
        let link = Color::Rgb(0xb7, 0x9d, 0x7e);

        Self {
            text: Style::default().fg(foreground),
            dimmed: Style::default().fg(dimmed),
            heading: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            bold: Style::default().fg(foreground).add_modifier(Modifier::BOLD),
            link: Style::default().fg(link),
            selected: Style::default().bg(Color::Rgb(0x4a, 0x3b, 0x2a)),
            line_number: Style::default().fg(dimmed),
            border: Style::default().fg(link),
            accent: Style::default().fg(accent),
            status: Style::default().fg(dimmed),
        }
    }
}

impl Theme {
    /// Base palette with user color overrides from the config file applied.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        if let Some(color) = config.foreground.as_ref().and_then(|v| v.to_color()) {
            theme.text = theme.text.fg(color);
            theme.bold = theme.bold.fg(color);
        }
        if let Some(color) = config.dimmed.as_ref().and_then(|v| v.to_color()) {
            theme.dimmed = theme.dimmed.fg(color);
            theme.line_number = theme.line_number.fg(color);
            theme.status = theme.status.fg(color);
        }
        if let Some(color) = config.accent.as_ref().and_then(|v| v.to_color()) {
            theme.heading = theme.heading.fg(color);
            theme.accent = theme.accent.fg(color);
        }
        if let Some(color) = config.link.as_ref().and_then(|v| v.to_color()) {
            theme.link = theme.link.fg(color);
            theme.border = theme.border.fg(color);
        }
        if let Some(color) = config.selection_bg.as_ref().and_then(|v| v.to_color()) {
            theme.selected = theme.selected.bg(color);
        }

        theme
    }

    /// Style for a token kind; hidden kinds have no style.
    pub fn style_for(&self, kind: TokenKind) -> Option<Style> {
        match kind {
            TokenKind::Heading => Some(self.heading),
            TokenKind::Bold => Some(self.bold),
            TokenKind::Link => Some(self.link),
            TokenKind::File | TokenKind::Redirect => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorValue;

    #[test]
    fn test_style_per_token_kind() {
        let theme = Theme::default();
        assert_eq!(theme.style_for(TokenKind::Link), Some(theme.link));
        assert_eq!(theme.style_for(TokenKind::File), None);
    }

    #[test]
    fn test_config_override_applies() {
        let config = ThemeConfig {
            link: Some(ColorValue::Named("cyan".to_string())),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.link.fg, Some(Color::Cyan));
    }
}
