// Screen state.
// Navigation plus the per-screen state that lives while a screen is mounted.

pub mod navigation;
pub mod post;
pub mod posts;

pub use navigation::{BreadcrumbNode, View};
pub use post::PostScreen;
pub use posts::PostsScreen;
