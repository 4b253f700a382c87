// Navigation state.
// The root view is derived from the current selection.

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
}

/// Which screen the root component shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// List of post titles.
    #[default]
    Posts,
    /// One post.
    Post(u64),
}

impl View {
    /// View for a selection; no selection shows the list.
    pub fn from_selection(selection: Option<u64>) -> Self {
        selection.map_or(View::Posts, View::Post)
    }

    pub fn selection(&self) -> Option<u64> {
        match self {
            View::Posts => None,
            View::Post(id) => Some(*id),
        }
    }

    /// Breadcrumb trail from the list down to this view.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        let mut trail = vec![BreadcrumbNode {
            label: "Posts".to_string(),
        }];
        if let View::Post(id) = self {
            trail.push(BreadcrumbNode {
                label: format!("Post #{}", id),
            });
        }
        trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_selection() {
        assert_eq!(View::from_selection(None), View::Posts);
        assert_eq!(View::from_selection(Some(0)), View::Post(0));
        assert_eq!(View::from_selection(Some(4)).selection(), Some(4));
        assert_eq!(View::default().selection(), None);
    }

    #[test]
    fn test_breadcrumbs() {
        let trail = View::Post(3).breadcrumbs();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].label, "Posts");
        assert_eq!(trail[1].label, "Post #3");

        assert_eq!(View::Posts.breadcrumbs().len(), 1);
    }
}
