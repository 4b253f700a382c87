// Post detail view.
// The back control is drawn in every state so the list is always reachable.

use ratatui::{prelude::*, widgets::*};

use crate::cache::QueryStatus;
use crate::state::PostScreen;

use super::list::{render_error, render_loading, render_updating};

/// Label of the back control.
pub const BACK_LABEL: &str = "< Back";

/// Render the post detail.
pub fn render_post(frame: &mut Frame, screen: &PostScreen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Back control
            Constraint::Min(1),    // Post
            Constraint::Length(1), // Background indicator
        ])
        .split(area);

    let back = Line::from(vec![
        Span::styled(BACK_LABEL, Style::default().fg(Color::Cyan)),
        Span::styled("  (Esc)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(back), chunks[0]);

    let block = Block::default().borders(Borders::ALL);
    let state = screen.query.state();

    match (&screen.id, &state.status) {
        (None, _) | (_, QueryStatus::Pending) => render_loading(frame, chunks[1], block),
        (_, QueryStatus::Error(e)) => render_error(frame, chunks[1], block, e),
        (Some(_), QueryStatus::Success(post)) => {
            let title = Span::styled(
                format!(" {} ", post.title),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            let body = Paragraph::new(post.body.as_str())
                .wrap(Wrap { trim: true })
                .scroll((screen.scroll, 0))
                .block(block.title(title));
            frame.render_widget(body, chunks[1]);
            render_updating(frame, chunks[2], state.is_revalidating());
        }
    }
}
