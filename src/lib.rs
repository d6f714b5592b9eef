//! # wikivi
//!
//! A wiki browser library with wikitext tokenization and vi-style modal navigation.
//!
//! This library turns raw MediaWiki wikitext into a plain-text document plus a
//! registry of styled, addressable tokens, and drives an interactive TUI over
//! the result. It's designed to power both the `wikivi` terminal browser and
//! programmatic wikitext processing.
//!
//! ## Features
//!
//! - Tokenize wikitext markup (links, bold, headings, files, redirects)
//! - Width-preserving placeholder substitution, so wrapping never shifts
//! - Vi-style keystroke navigation with numeric counts (`3j`, `gg`, `12G`)
//! - Link traversal and selection over the wrapped viewport
//! - Blocking MediaWiki API client for search and page fetch
//!
//! ## Example
//!
//! ```rust
//! use wikivi::parse_wikitext;
//!
//! let doc = parse_wikitext("'''Varrock''' is near the [[Grand Exchange|GE]].");
//! assert!(!doc.stripped().contains("'''"));
//! assert_eq!(doc.tokens().links().count(), 1);
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides configuration management for the API endpoint, UI settings, and
/// theme color overrides.
pub mod config;

/// Parser module for wikitext documents.
///
/// Provides the tokenizer that rewrites wikitext markup into placeholder text
/// plus a registry of display tokens.
pub mod parser;

/// TUI module for the interactive terminal interface.
///
/// Provides the App, navigator, and rendering functionality for browsing
/// wiki pages.
pub mod tui;

/// Wiki module for the MediaWiki API boundary.
///
/// Provides a blocking client for full-text search and wikitext page fetch.
pub mod wiki;

// Re-export commonly used types for convenience
pub use config::Config;
pub use parser::{ParsedDocument, Token, TokenKind, TokenRegistry, Tokenizer, parse_wikitext};
pub use tui::App;
pub use wiki::{Page, PageRef, SearchHit, WikiClient};
