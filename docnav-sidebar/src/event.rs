use serde::Serialize;

/// Effect events produced by the sidebar reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SidebarEffect {
    /// Ask the host router to move to `href`.
    Navigate {
        href: String,
        /// Replace the current history entry instead of pushing.
        replace: bool,
        /// Let the router scroll to the target.
        scroll: bool,
    },
    /// Desktop sidebar visibility changed and should be persisted.
    DesktopVisibilityChanged { open: bool },
}
