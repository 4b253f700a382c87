// Shared rendering helpers for query states.

use ratatui::{prelude::*, widgets::*};

/// Text shown while a query has no data yet.
pub const LOADING_TEXT: &str = "Loading...";

/// Text shown while a cached value is being refreshed.
pub const UPDATING_TEXT: &str = "Background Updating...";

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, block: Block) {
    let text = Paragraph::new(LOADING_TEXT)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, block: Block, error: &str) {
    let text = Paragraph::new(format!("Error: {}", error))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

/// Render the background refresh indicator (blank when idle).
pub fn render_updating(frame: &mut Frame, area: Rect, revalidating: bool) {
    let text = if revalidating { UPDATING_TEXT } else { "" };
    let line = Paragraph::new(text).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    );
    frame.render_widget(line, area);
}
