// Post detail screen state.

use std::sync::Arc;

use crate::cache::{QueryCache, Subscription};
use crate::graphql::{PostDetail, PostsApi};
use crate::queries;

pub struct PostScreen {
    /// Post being shown.
    pub id: Option<u64>,
    /// Subscription to `["post", id]`, released when the screen unmounts.
    pub query: Subscription<PostDetail>,
    /// Vertical scroll offset of the body.
    pub scroll: u16,
}

impl PostScreen {
    pub fn mount(cache: &QueryCache, api: &Arc<dyn PostsApi>, id: Option<u64>) -> Self {
        Self {
            id,
            query: queries::post(cache, api, id),
            scroll: 0,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}
