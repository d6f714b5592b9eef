//! Frame composition: title bar, content pane, status line.

use crate::tui::app::{App, Mode};
use crate::tui::viewport::render_lines;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_title_bar(frame, app, chunks[0]);

    match app.mode {
        Mode::Home => render_home(frame, app, chunks[1]),
        Mode::Results => render_results(frame, app, chunks[1]),
        Mode::Article => render_article(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.search_open {
        Line::from(vec![
            Span::styled(" Search: ", app.theme.accent),
            Span::styled(app.search_input.clone(), app.theme.text),
            Span::styled("▏", app.theme.dimmed),
        ])
    } else {
        let title = match (&app.mode, &app.article) {
            (Mode::Article, Some(article)) => format!(" wikivi — {}", article.title),
            _ => " wikivi".to_string(),
        };
        Line::from(Span::styled(title, app.theme.accent))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let welcome = Text::from(vec![
        Line::default(),
        Line::styled("Welcome to wikivi", app.theme.accent),
        Line::default(),
        Line::styled("Press s to search the wiki.", app.theme.text),
    ]);
    frame.render_widget(Paragraph::new(welcome).centered(), inner);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .title(" results ");

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|hit| {
            ListItem::new(vec![
                Line::styled(hit.title.clone(), app.theme.text),
                Line::styled(format!("  {}", hit.snippet), app.theme.dimmed),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn render_article(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([
        Constraint::Length(app.config.ui.number_width),
        Constraint::Min(0),
    ])
    .split(inner);

    let Some(article) = &app.article else { return };

    let scroll = app.nav.scroll;
    let height = inner.height;

    let shown = article.layout.visible(scroll, height).len();
    let gutter: Vec<Line> = (scroll..scroll + shown)
        .map(|n| {
            let width = app.config.ui.number_width as usize;
            Line::styled(format!("{:<width$}", n + 1), app.theme.line_number)
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(gutter)), columns[0]);

    let lines = render_lines(
        &article.layout,
        article.doc.tokens(),
        scroll,
        height,
        app.nav.selected,
        &app.theme,
    );
    frame.render_widget(Paragraph::new(Text::from(lines)), columns[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(format!(" {}", app.status_line()), app.theme.status)];

    let pending = app.nav.pending_keys();
    if app.mode == Mode::Article && !pending.is_empty() {
        spans.push(Span::styled(format!("  [{}]", pending), app.theme.accent));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
