// UI module for rendering the TUI.
// Intro header, breadcrumb, the active screen, and a status bar.

mod breadcrumb;
mod list;
pub mod post;
pub mod posts;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen};
use crate::queries;

const INTRO: &str = "As you visit the posts below, you will notice them in a loading state \
the first time you load them. However, after you return to this list and open any posts you \
have already visited again, you will see them load instantly and background refresh right \
before your eyes!";

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Intro
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_intro(frame, chunks[0]);

    let view = app.view();
    let updated_at = match view.selection() {
        Some(id) => app.cache().updated_at(&queries::post_key(Some(id))),
        None => app.cache().updated_at(&queries::posts_key()),
    };
    breadcrumb::draw_breadcrumb(frame, &view.breadcrumbs(), chunks[1], updated_at);

    let cache = app.cache().clone();
    match app.screen_mut() {
        Screen::Posts(screen) => posts::render_posts(frame, screen, &cache, chunks[2]),
        Screen::Post(screen) => post::render_post(frame, screen, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);
}

/// Draw the explanatory header.
fn draw_intro(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new(INTRO)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(text, area);
}

/// Draw key hints and cache size.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(Color::DarkGray));

    let mut spans = match app.screen() {
        Screen::Posts(_) => vec![key(" ↑↓"), hint(" move  "), key("Enter"), hint(" open  ")],
        Screen::Post(_) => vec![key(" Esc"), hint(" back  "), key("↑↓"), hint(" scroll  ")],
    };
    spans.extend([
        key("r"),
        hint(" refresh  "),
        key("q"),
        hint(" quit  "),
        Span::styled(
            format!("│ {} cached queries", app.cache().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Position};

    use crate::app::App;

    /// Draw the app into an off-screen buffer.
    pub fn render(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| super::draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Buffer contents, one string per row.
    pub fn rows(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width;
        (0..buffer.area.height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn contains(buffer: &Buffer, text: &str) -> bool {
        rows(buffer).iter().any(|row| row.contains(text))
    }

    /// Position of `word` standing alone (surrounded by spaces or borders).
    pub fn find_word(buffer: &Buffer, word: &str) -> Option<Position> {
        let len = word.chars().count() as u16;
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width.saturating_sub(len - 1) {
                let matches = word
                    .chars()
                    .enumerate()
                    .all(|(i, c)| buffer[(x + i as u16, y)].symbol() == c.to_string());
                if !matches {
                    continue;
                }
                let standalone = |sym: &str| !sym.chars().any(char::is_alphanumeric);
                let before = x == 0 || standalone(buffer[(x - 1, y)].symbol());
                let after = x + len >= buffer.area.width || standalone(buffer[(x + len, y)].symbol());
                if before && after {
                    return Some(Position::new(x, y));
                }
            }
        }
        None
    }
}
