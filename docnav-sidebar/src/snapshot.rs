use serde::Serialize;

use crate::matching::{FindOptions, find_item_with_history};
use crate::model::SidebarItem;
use crate::state::SidebarState;

/// Derived navigation state handed to readers after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarSnapshot {
    pub active_path: Option<String>,
    /// Root sidebar containing the active path.
    pub active_sidebar_id: Option<String>,
    /// Link at the active path inside the active sidebar.
    pub active_item: Option<SidebarItem>,
    /// Active root sidebar followed by every nested sidebar crossed to
    /// reach the active item. Empty without an active path.
    pub sidebar_history: Vec<String>,
    /// Sidebar currently on screen.
    pub shown_sidebar_id: Option<String>,
    pub mobile_open: bool,
    pub desktop_open: bool,
}

/// Derive active sidebar, active item, history and shown sidebar.
pub(crate) fn derive(state: &SidebarState) -> SidebarSnapshot {
    let mut snapshot = SidebarSnapshot {
        active_path: state.active_path().map(str::to_string),
        mobile_open: state.is_mobile_open(),
        desktop_open: state.is_desktop_open(),
        ..SidebarSnapshot::default()
    };

    let Some(active) = state.active_sidebar() else {
        return snapshot;
    };
    snapshot.active_sidebar_id = Some(active.sidebar_id.clone());

    if let Some(path) = state.active_path() {
        let lookup = SidebarItem::link(path, "");
        let found = find_item_with_history(
            &active.items,
            &lookup,
            FindOptions::by_identity(),
        );

        snapshot.sidebar_history.push(active.sidebar_id.clone());
        if let Some(found) = found {
            snapshot.active_item = Some(found.item.clone());
            snapshot.sidebar_history.extend(found.sidebar_history);
        }
    }

    snapshot.shown_sidebar_id = snapshot
        .sidebar_history
        .last()
        .and_then(|sidebar_id| state.get_sidebar(sidebar_id))
        .map(|view| view.sidebar_id.to_string())
        .or_else(|| Some(active.sidebar_id.clone()));

    snapshot
}
