use serde::{Deserialize, Serialize};

use crate::model::{Sidebar, SidebarItem};

/// Browser location snapshot delivered on mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    /// Raw hash including the leading `#`, or empty.
    #[serde(default)]
    pub hash: String,
}

/// Parent item that receives inserted children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentTarget {
    /// Compared against the root items, titles included.
    pub item: SidebarItem,
    /// Force the parent's `loaded` flag on, links included.
    #[serde(default)]
    pub change_loaded: bool,
}

/// Where and how [`SidebarCommand::AddItems`] inserts items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemsOptions {
    pub sidebar_id: String,
    #[serde(default)]
    pub parent: Option<ParentTarget>,
    /// Insert position; appends when absent.
    #[serde(default)]
    pub index_position: Option<usize>,
    /// Keep items that already exist in the target tree.
    #[serde(default)]
    pub ignore_existing: bool,
}

impl AddItemsOptions {
    /// Append to the root list of `sidebar_id`.
    pub fn new(sidebar_id: impl Into<String>) -> Self {
        Self {
            sidebar_id: sidebar_id.into(),
            parent: None,
            index_position: None,
            ignore_existing: false,
        }
    }

    /// Insert under every root item matching `parent`.
    pub fn with_parent(mut self, parent: SidebarItem) -> Self {
        self.parent = Some(ParentTarget {
            item: parent,
            change_loaded: false,
        });
        self
    }

    /// Insert under `parent` and mark it loaded.
    pub fn with_loaded_parent(mut self, parent: SidebarItem) -> Self {
        self.parent = Some(ParentTarget {
            item: parent,
            change_loaded: true,
        });
        self
    }

    /// Insert at `index` instead of appending.
    pub fn at(mut self, index: usize) -> Self {
        self.index_position = Some(index);
        self
    }

    /// Skip the duplicate filter.
    pub fn ignoring_existing(mut self) -> Self {
        self.ignore_existing = true;
        self
    }
}

/// Commands accepted by the sidebar reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SidebarCommand {
    /// Provider mounted in the page.
    Mounted { location: Location },
    /// Route pathname changed.
    PathChanged { pathname: String },
    /// Location hash changed.
    HashChanged { hash: String },
    /// Scrollable element moved; `top` is the scrolled distance.
    Scrolled { top: f64 },
    SetActivePath { path: Option<String> },
    AddItems {
        items: Vec<SidebarItem>,
        options: AddItemsOptions,
    },
    /// Remove items from the root list, or from the children of the root
    /// items equal to `parent`.
    RemoveItems {
        items: Vec<SidebarItem>,
        sidebar_id: String,
        #[serde(default)]
        parent: Option<SidebarItem>,
    },
    /// Discard runtime mutations and restore the seed.
    ResetItems,
    /// New seed delivered by the host page.
    ReplaceSeed { sidebars: Vec<Sidebar> },
    GoBack,
    SetMobileOpen { open: bool },
    SetDesktopOpen { open: bool },
}
