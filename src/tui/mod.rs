//! Terminal interface: application state, rendering, and the event loop.

mod app;
mod navigator;
mod theme;
mod ui;
mod viewport;

pub use app::{App, AppEvent, ArticleView, Flow, Mode};
pub use navigator::{Motion, NavRequest, Navigator};
pub use theme::Theme;
pub use viewport::{Layout, render_lines, wrap_text};

use color_eyre::Result;
use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::thread;

/// Forward terminal events into the app channel. The thread exits when the
/// receiving side is dropped or the terminal stream closes.
pub fn spawn_input_thread(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(event) => {
                    if tx.send(AppEvent::Input(event)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

/// Draw-then-wait loop. A single consumer owns all application state; input
/// and fetch completions arrive interleaved on one channel.
pub fn run(terminal: &mut DefaultTerminal, mut app: App, events: &Receiver<AppEvent>) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match events.recv()? {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
            AppEvent::Input(Event::Resize(width, height)) => app.resize(width, height),
            AppEvent::Input(_) => {}
            AppEvent::SearchDone { request, result } => app.on_search_done(request, result),
            AppEvent::PageLoaded { request, result } => app.on_page_loaded(request, result),
        }
    }
}
