use crate::config::Config;
use crate::parser::{ParsedDocument, Tokenizer};
use crate::tui::navigator::Navigator;
use crate::tui::theme::Theme;
use crate::tui::viewport::Layout;
use crate::wiki::{Page, PageRef, SearchHit, WikiClient};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::thread;

/// Everything the event loop can hand the app: terminal input, plus the
/// completion messages posted back by one-shot fetch threads.
#[derive(Debug)]
pub enum AppEvent {
    Input(crossterm::event::Event),
    SearchDone {
        request: u64,
        result: Result<Vec<SearchHit>, String>,
    },
    PageLoaded {
        request: u64,
        result: Result<Page, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Results,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The installed page: parsed document plus its wrapped layout.
pub struct ArticleView {
    pub title: String,
    pub doc: ParsedDocument,
    pub layout: Layout,
}

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,

    pub search_open: bool,
    pub search_input: String,

    pub results: Vec<SearchHit>,
    pub results_state: ListState,

    pub article: Option<ArticleView>,
    pub nav: Navigator,

    pub status_message: Option<String>,
    pub loading: Option<String>,

    tokenizer: Tokenizer,
    client: Arc<WikiClient>,
    tx: Sender<AppEvent>,

    // Monotonic request ids; completions not matching the most recently
    // issued id for their kind are stale and dropped.
    next_request: u64,
    search_seq: u64,
    page_seq: u64,

    width: u16,
    height: u16,
}

impl App {
    pub fn new(
        config: Config,
        client: Arc<WikiClient>,
        tx: Sender<AppEvent>,
        size: (u16, u16),
    ) -> Self {
        let theme = Theme::from_config(&config.theme);
        let (width, height) = size;
        let nav = Navigator::new(
            content_height(height),
            config.ui.context_lines,
        );

        Self {
            config,
            theme,
            mode: Mode::Home,
            search_open: false,
            search_input: String::new(),
            results: Vec::new(),
            results_state: ListState::default(),
            article: None,
            nav,
            status_message: None,
            loading: None,
            tokenizer: Tokenizer::new(),
            client,
            tx,
            next_request: 0,
            search_seq: 0,
            page_seq: 0,
            width,
            height,
        }
    }

    /// Column width the article text is wrapped to: the bordered content
    /// area minus the line-number gutter.
    pub fn article_width(&self) -> u16 {
        self.width
            .saturating_sub(2)
            .saturating_sub(self.config.ui.number_width)
            .max(1)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let columns = self.article_width();
        if let Some(article) = &mut self.article {
            article.layout = Layout::new(&article.doc, columns);
        }
        let rows = content_height(self.height);
        match &self.article {
            Some(article) => self.nav.resize(rows, &article.layout),
            None => self.nav.resize(rows, &Layout::default()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.search_open {
            self.handle_search_key(key);
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('s') => {
                self.search_open = true;
                self.search_input.clear();
            }
            KeyCode::Esc => {
                self.status_message = None;
            }
            _ => match self.mode {
                Mode::Home => {}
                Mode::Results => self.handle_results_key(key),
                Mode::Article => self.handle_article_key(key),
            },
        }
        Flow::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_open = false;
                self.search_input.clear();
            }
            KeyCode::Enter => {
                let query = self.search_input.trim().to_string();
                if !query.is_empty() {
                    self.search_open = false;
                    self.start_search(&query);
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = match self.results_state.selected() {
                    Some(i) if i + 1 < self.results.len() => i + 1,
                    Some(i) => i,
                    None => 0,
                };
                self.results_state.select(Some(next));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = self
                    .results_state
                    .selected()
                    .map(|i| i.saturating_sub(1))
                    .unwrap_or(0);
                self.results_state.select(Some(prev));
            }
            KeyCode::Enter => {
                if let Some(hit) = self
                    .results_state
                    .selected()
                    .and_then(|i| self.results.get(i))
                {
                    let page = PageRef::Id(hit.page_id);
                    self.open_page(page);
                }
            }
            _ => {}
        }
    }

    /// Article keys go through the navigator as raw key names.
    fn handle_article_key(&mut self, key: KeyEvent) {
        let Some(name) = key_name(key) else { return };

        let request = match &self.article {
            Some(article) => self.nav.push_key(&name, &article.doc, &article.layout),
            None => None,
        };
        if let Some(request) = request {
            self.open_page(PageRef::Title(request.target));
        }
    }

    pub fn start_search(&mut self, query: &str) {
        let request = self.issue_search();
        self.loading = Some(format!("Searching for \"{}\"", query));

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let query = query.to_string();
        thread::spawn(move || {
            let result = client.search(&query).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SearchDone { request, result });
        });
    }

    pub fn open_page(&mut self, page: PageRef) {
        let request = self.issue_page();
        self.loading = Some(match &page {
            PageRef::Title(title) => format!("Loading {}", title),
            PageRef::Id(_) => "Loading page".to_string(),
        });

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.fetch(&page).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::PageLoaded { request, result });
        });
    }

    fn issue_search(&mut self) -> u64 {
        self.next_request += 1;
        self.search_seq = self.next_request;
        self.search_seq
    }

    fn issue_page(&mut self) -> u64 {
        self.next_request += 1;
        self.page_seq = self.next_request;
        self.page_seq
    }

    pub fn on_search_done(&mut self, request: u64, result: Result<Vec<SearchHit>, String>) {
        if request != self.search_seq {
            // Superseded by a newer search
            return;
        }
        self.loading = None;
        match result {
            Ok(hits) if hits.is_empty() => {
                self.status_message = Some("No results".to_string());
            }
            Ok(hits) => {
                self.status_message = Some(format!("✓ {} results", hits.len()));
                self.results = hits;
                self.results_state.select(Some(0));
                self.mode = Mode::Results;
            }
            Err(e) => {
                self.status_message = Some(format!("✗ Search failed: {}", e));
            }
        }
    }

    pub fn on_page_loaded(&mut self, request: u64, result: Result<Page, String>) {
        if request != self.page_seq {
            // Superseded by a newer page request
            return;
        }
        self.loading = None;
        match result {
            Ok(page) => self.install_page(page),
            Err(e) => {
                self.status_message = Some(format!("✗ Load failed: {}", e));
            }
        }
    }

    /// Parse and install a fetched page, replacing any previous document.
    /// Scroll and selection always start fresh.
    pub fn install_page(&mut self, page: Page) {
        let doc = self.tokenizer.tokenize(&page.wikitext);
        let layout = Layout::new(&doc, self.article_width());
        self.nav.reset();
        self.article = Some(ArticleView {
            title: page.title,
            doc,
            layout,
        });
        self.mode = Mode::Article;
        self.status_message = None;
    }

    /// Text for the status line: pending fetch, transient message, or hints.
    pub fn status_line(&self) -> String {
        if let Some(loading) = &self.loading {
            return format!("{}…", loading);
        }
        if let Some(message) = &self.status_message {
            return message.clone();
        }
        match self.mode {
            Mode::Home => "s search · q quit".to_string(),
            Mode::Results => "j/k move · enter open · s search · q quit".to_string(),
            Mode::Article => {
                "j/k scroll · gg/G top/bottom · l/h links · enter follow · s search · q quit"
                    .to_string()
            }
        }
    }
}

fn content_height(height: u16) -> u16 {
    // Title line, status line, and the content frame borders
    height.saturating_sub(4).max(1)
}

/// Raw key name for the navigator. Keys with no name are ignored.
fn key_name(key: KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        _ => None,
    }
}
