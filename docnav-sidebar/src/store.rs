use crate::command::SidebarCommand;
use crate::errors::Result;
use crate::event::SidebarEffect;
use crate::model::{Sidebar, SidebarItem};
use crate::options::SidebarOptions;
use crate::reducer::{SidebarCtx, reduce};
use crate::snapshot::SidebarSnapshot;
use crate::state::{SidebarState, SidebarView};
use crate::storage::{
    KeyValueStore, load_category_state, load_desktop_open,
    save_category_state, save_desktop_open,
};

/// Sidebar state paired with its durable storage.
///
/// All mutations go through [`SidebarStore::dispatch`]; effects touching
/// storage are applied here, the rest are returned to the caller.
pub struct SidebarStore {
    state: SidebarState,
    storage: Box<dyn KeyValueStore>,
}

impl SidebarStore {
    pub fn new(
        seed: Vec<Sidebar>,
        options: SidebarOptions,
        storage: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            state: SidebarState::new(seed, options),
            storage,
        }
    }

    /// Apply one command and return the effects the host must carry out.
    pub fn dispatch(&mut self, command: SidebarCommand) -> Vec<SidebarEffect> {
        let ctx = match &command {
            SidebarCommand::Mounted { .. } => SidebarCtx {
                persisted_desktop_open: self.read_desktop_open(),
            },
            _ => SidebarCtx::default(),
        };

        let effects = reduce(&mut self.state, command, &ctx);
        for effect in &effects {
            self.route_effect(effect);
        }
        effects
    }

    pub fn state(&self) -> &SidebarState {
        &self.state
    }

    pub fn snapshot(&self) -> &SidebarSnapshot {
        self.state.snapshot()
    }

    pub fn options(&self) -> &SidebarOptions {
        self.state.options()
    }

    pub fn get_sidebar(&self, sidebar_id: &str) -> Option<SidebarView<'_>> {
        self.state.get_sidebar(sidebar_id)
    }

    pub fn shown_sidebar(&self) -> Option<SidebarView<'_>> {
        self.state.shown_sidebar()
    }

    /// First link reachable in the given sidebar's items.
    pub fn sidebar_first_link_child(
        &self,
        sidebar_id: &str,
    ) -> Option<&SidebarItem> {
        self.state
            .get_sidebar(sidebar_id)
            .and_then(|view| view.first_link_child())
    }

    pub fn is_item_active(
        &self,
        item: &SidebarItem,
        check_link_children: bool,
    ) -> bool {
        self.state.is_item_active(item, check_link_children)
    }

    /// Remember whether the category titled `title` is open.
    ///
    /// No-op when category persistence is disabled.
    pub fn update_persisted_category_state(
        &mut self,
        title: &str,
        opened: bool,
    ) -> Result<()> {
        let options = self.state.options();
        if !options.persist_category_state {
            return Ok(());
        }

        save_category_state(
            self.storage.as_mut(),
            &options.project,
            title,
            opened,
        )
    }

    /// Read the remembered open state of a category.
    pub fn persisted_category_state(&self, title: &str) -> Result<Option<bool>> {
        let options = self.state.options();
        if !options.persist_category_state {
            return Ok(None);
        }

        load_category_state(self.storage.as_ref(), &options.project, title)
    }

    fn read_desktop_open(&self) -> Option<bool> {
        match load_desktop_open(self.storage.as_ref()) {
            Ok(open) => open,
            Err(err) => {
                log::warn!("failed to read sidebar visibility: {err}");
                None
            },
        }
    }

    fn route_effect(&mut self, effect: &SidebarEffect) {
        match effect {
            SidebarEffect::DesktopVisibilityChanged { open } => {
                if let Err(err) =
                    save_desktop_open(self.storage.as_mut(), *open)
                {
                    log::warn!("failed to persist sidebar visibility: {err}");
                }
            },
            SidebarEffect::Navigate { .. } => {},
        }
    }
}
