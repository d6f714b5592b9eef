use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wikivi")]
#[command(version)]
#[command(about = "A vi-style terminal browser for MediaWiki wikis")]
#[command(
    long_about = "wikivi - Browse a MediaWiki wiki from the terminal with vi-style navigation.\n\n\
    Launch without flags for interactive mode: search, open pages, and follow\n\
    links with j/k/l/h and numeric counts. Use --plain for CLI mode to print a\n\
    page's stripped text for scripting.\n\n\
    Examples:\n  \
    wikivi                        # Interactive mode\n  \
    wikivi varrock                # Search on startup\n  \
    wikivi --page \"Grand Exchange\"  # Open a page directly\n  \
    wikivi --plain Varrock | less # Print stripped page text"
)]
pub struct Cli {
    /// Search query to run on startup
    ///
    /// Opens the interactive browser with this search already issued.
    ///
    /// Example: wikivi "grand exchange"
    pub query: Option<String>,

    /// Open a page by title instead of searching
    ///
    /// Fetches the page (following redirects) and opens it in the article view.
    #[arg(long = "page", value_name = "TITLE")]
    pub page: Option<String>,

    /// Print a page's stripped text to stdout and exit (non-interactive)
    ///
    /// Fetches the page, strips all wikitext markup, and writes the plain
    /// text to stdout. No TUI is started.
    #[arg(long = "plain", value_name = "TITLE")]
    pub plain: Option<String>,

    /// Override the MediaWiki api.php endpoint
    ///
    /// Takes precedence over the config file for this run.
    ///
    /// Example: --api-url https://en.wikipedia.org/w/api.php
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,
}
