//! # wikivi
//!
//! A vi-style terminal browser for MediaWiki wikis.
//!
//! ## Features
//!
//! - Full-text search with a results picker
//! - Article view with styled wikitext and a line-number gutter
//! - Vi-style navigation: j/k scrolling with counts, gg/G, l/h link traversal
//! - CLI mode for scripting (--plain prints a page's stripped text)
//!
//! ## Usage
//!
//! Launch the interactive browser:
//! ```sh
//! wikivi
//! ```
//!
//! Search on startup:
//! ```sh
//! wikivi varrock
//! ```
//!
//! Print a page's plain text:
//! ```sh
//! wikivi --plain "Grand Exchange"
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use color_eyre::Result;
use crossbeam_channel::unbounded;
use std::sync::Arc;
use std::time::Duration;
use wikivi::parser::parse_wikitext;
use wikivi::wiki::{PageRef, WikiClient};
use wikivi::{App, Config, tui};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let config = {
        let mut config = Config::load();
        if let Some(ref url) = args.api_url {
            config.api.base_url = url.clone();
        }
        config
    };

    let client = Arc::new(WikiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);

    // Non-interactive mode: fetch, strip, print, done
    if let Some(ref title) = args.plain {
        let page = client.fetch(&PageRef::Title(title.clone()))?;
        let doc = parse_wikitext(&page.wikitext);
        println!("{}", doc.stripped());
        return Ok(());
    }

    let (tx, rx) = unbounded();
    let size = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config, client, tx.clone(), size);

    // Startup actions from the command line
    if let Some(ref title) = args.page {
        app.open_page(PageRef::Title(title.clone()));
    } else if let Some(ref query) = args.query {
        app.start_search(query);
    }

    let mut terminal = ratatui::init();
    tui::spawn_input_thread(tx);
    let result = tui::run(&mut terminal, app, &rx);
    ratatui::restore();

    result
}
