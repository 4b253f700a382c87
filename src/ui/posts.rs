// Posts list view.
// Cached posts are drawn bold green so the reader knows they open instantly.

use ratatui::{prelude::*, widgets::*};

use crate::cache::{QueryCache, QueryStatus};
use crate::graphql::{PostDetail, PostSummary};
use crate::queries;
use crate::state::PostsScreen;

use super::list::{render_empty, render_error, render_loading, render_updating};

/// One rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub title: String,
    /// A detail entry for this post is already cached.
    pub cached: bool,
}

/// Build links for `posts`, peeking the cache for each detail.
pub fn post_links(posts: &[PostSummary], cache: &QueryCache) -> Vec<PostLink> {
    posts
        .iter()
        .map(|post| PostLink {
            title: post.title.clone(),
            cached: cache
                .peek::<PostDetail>(&queries::post_key(Some(post.id)))
                .is_some(),
        })
        .collect()
}

/// Style of a link.
pub fn link_style(cached: bool) -> Style {
    if cached {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Render the posts list.
pub fn render_posts(frame: &mut Frame, screen: &mut PostsScreen, cache: &QueryCache, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Posts ");
    let state = screen.query.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match &state.status {
        QueryStatus::Pending => render_loading(frame, area, block),
        QueryStatus::Error(e) => render_error(frame, area, block, e),
        QueryStatus::Success(posts) if posts.is_empty() => {
            render_empty(frame, chunks[0], block, "No posts");
            render_updating(frame, chunks[1], state.is_revalidating());
        }
        QueryStatus::Success(posts) => {
            screen.sync_selection(posts);

            let items: Vec<ListItem> = post_links(posts, cache)
                .into_iter()
                .map(|link| ListItem::new(Span::styled(link.title, link_style(link.cached))))
                .collect();

            let list_widget = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, chunks[0], &mut screen.list_state);
            render_updating(frame, chunks[1], state.is_revalidating());
        }
    }
}
