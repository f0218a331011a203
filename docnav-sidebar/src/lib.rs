//! Navigation state for documentation sidebars.
//!
//! The crate keeps one or more sidebar trees, tracks which page is active,
//! derives the breadcrumb of nested sidebars leading to it, and lets
//! components add or remove items at runtime.
//!
//! The main entry points are:
//! - [`SidebarStore`], which owns the trees plus durable storage and applies
//!   [`SidebarCommand`]s, returning [`SidebarEffect`]s for the host router.
//! - [`SidebarProvider`], which owns a store and serializes commands sent
//!   through cloneable [`SidebarProxy`] handles.
//!
//! Hosts usually:
//! 1. Load the seed with [`load_sidebars_from_path`] and the options with
//!    [`load_options_from_path`].
//! 2. Wrap a [`SidebarStore`] in a [`SidebarProvider`] and hand proxies to
//!    components.
//! 3. Call [`SidebarProvider::pump`] after input and carry out the returned
//!    navigation effects.

mod command;
mod errors;
mod event;
mod matching;
mod model;
mod options;
mod provider;
mod reducer;
mod seed;
mod snapshot;
mod state;
mod storage;
mod store;

pub use command::{AddItemsOptions, Location, ParentTarget, SidebarCommand};
pub use errors::{Result, SidebarError};
pub use event::SidebarEffect;
pub use matching::{
    FindOptions, ItemWithHistory, find_item, find_item_with_history,
    first_link_child, items_equal,
};
pub use model::{ItemKind, Sidebar, SidebarItem};
pub use options::{
    OptionsLoad, OptionsLoadStatus, SidebarOptions, load_options_from_path,
};
pub use provider::{ItemRegistration, SidebarProvider, SidebarProxy};
pub use reducer::{SidebarCtx, reduce};
pub use seed::{load_sidebars_from_path, sidebars_from_str};
pub use snapshot::SidebarSnapshot;
pub use state::{SidebarState, SidebarView};
pub use storage::{
    HIDE_SIDEBAR_KEY, JsonFileStore, KeyValueStore, MemoryStore,
    categories_key, load_category_state, load_desktop_open,
    save_category_state, save_desktop_open,
};
pub use store::SidebarStore;
