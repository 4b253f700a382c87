// Posts list screen state.
// Owns the list subscription while mounted and the keyboard highlight.

use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::cache::{QueryCache, Subscription};
use crate::graphql::{PostSummary, PostsApi};
use crate::queries;

pub struct PostsScreen {
    /// Subscription to `["posts"]`, released when the screen unmounts.
    pub query: Subscription<Vec<PostSummary>>,
    /// Highlighted row.
    pub list_state: ListState,
    /// Post to highlight once data arrives (the one we came back from).
    focus: Option<u64>,
}

impl PostsScreen {
    pub fn mount(cache: &QueryCache, api: &Arc<dyn PostsApi>, focus: Option<u64>) -> Self {
        Self {
            query: queries::posts(cache, api),
            list_state: ListState::default(),
            focus,
        }
    }

    fn posts(&self) -> Option<Arc<Vec<PostSummary>>> {
        self.query.state().data().cloned()
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let Some(posts) = self.posts() else { return };
        if posts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < posts.len() => i + 1,
            Some(i) => i, // Stay at end
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        let Some(posts) = self.posts() else { return };
        if posts.is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    /// Id of the highlighted post.
    pub fn selected_id(&self) -> Option<u64> {
        let index = self.list_state.selected()?;
        self.posts()?.get(index).map(|post| post.id)
    }

    /// Keep the highlight inside `posts`, preferring the focused post.
    pub fn sync_selection(&mut self, posts: &[PostSummary]) {
        if posts.is_empty() {
            self.list_state.select(None);
            return;
        }

        match self.list_state.selected() {
            Some(i) if i < posts.len() => {}
            Some(_) => self.list_state.select(Some(posts.len() - 1)),
            None => {
                let index = self
                    .focus
                    .and_then(|id| posts.iter().position(|post| post.id == id))
                    .unwrap_or(0);
                self.list_state.select(Some(index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::cache::testing::wait_until;
    use crate::graphql::mock::MockApi;

    async fn loaded(focus: Option<u64>) -> (QueryCache, PostsScreen) {
        let cache = QueryCache::new(CacheConfig {
            retry: 0,
            ..CacheConfig::default()
        });
        let api: Arc<dyn PostsApi> = Arc::new(MockApi::with_posts(&[(1, "A"), (2, "B"), (3, "C")]));
        let screen = PostsScreen::mount(&cache, &api, focus);
        wait_until(&cache, || screen.query.state().is_success()).await;
        (cache, screen)
    }

    #[tokio::test]
    async fn test_keyboard_navigation() {
        let (_cache, mut screen) = loaded(None).await;
        assert_eq!(screen.selected_id(), None);

        screen.select_next();
        assert_eq!(screen.selected_id(), Some(1));
        screen.select_next();
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_id(), Some(3));

        screen.select_prev();
        assert_eq!(screen.selected_id(), Some(2));
        screen.select_prev();
        screen.select_prev();
        assert_eq!(screen.selected_id(), Some(1));
    }

    #[tokio::test]
    async fn test_sync_selection_prefers_focus() {
        let (_cache, mut screen) = loaded(Some(2)).await;
        let posts = screen.posts().unwrap();

        screen.sync_selection(&posts);
        assert_eq!(screen.selected_id(), Some(2));

        // Out-of-range highlight is clamped
        screen.list_state.select(Some(10));
        screen.sync_selection(&posts);
        assert_eq!(screen.selected_id(), Some(3));

        screen.sync_selection(&[]);
        assert_eq!(screen.list_state.selected(), None);
    }

    #[tokio::test]
    async fn test_navigation_ignored_while_pending() {
        let cache = QueryCache::default();
        let api: Arc<dyn PostsApi> = Arc::new(MockApi::with_posts(&[(1, "A")]));
        let mut screen = PostsScreen::mount(&cache, &api, None);

        screen.select_next();
        assert_eq!(screen.list_state.selected(), None);
        assert_eq!(screen.selected_id(), None);
    }
}
