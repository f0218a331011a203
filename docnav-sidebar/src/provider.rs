use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::command::{AddItemsOptions, SidebarCommand};
use crate::errors::{Result, SidebarError};
use crate::event::SidebarEffect;
use crate::model::SidebarItem;
use crate::store::SidebarStore;

/// Owner of a [`SidebarStore`] that serializes commands from proxies.
///
/// Commands are applied in arrival order when the host calls
/// [`SidebarProvider::pump`]. Dropping the provider closes every proxy.
pub struct SidebarProvider {
    store: SidebarStore,
    command_tx: Sender<SidebarCommand>,
    command_rx: Receiver<SidebarCommand>,
}

impl SidebarProvider {
    pub fn new(store: SidebarStore) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        Self {
            store,
            command_tx,
            command_rx,
        }
    }

    /// Acquire a handle that can send commands into this provider.
    pub fn proxy(&self) -> SidebarProxy {
        SidebarProxy {
            sender: self.command_tx.clone(),
        }
    }

    pub fn store(&self) -> &SidebarStore {
        &self.store
    }

    /// Direct access for calls that bypass the queue, such as category
    /// persistence.
    pub fn store_mut(&mut self) -> &mut SidebarStore {
        &mut self.store
    }

    /// Apply every queued command and collect the resulting effects.
    pub fn pump(&mut self) -> Vec<SidebarEffect> {
        let mut effects = Vec::new();
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => effects.extend(self.store.dispatch(command)),
                // The provider holds a sender, so the queue never disconnects.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        effects
    }
}

/// Cloneable handle used by components to mutate the sidebar.
#[derive(Clone)]
pub struct SidebarProxy {
    sender: Sender<SidebarCommand>,
}

impl SidebarProxy {
    /// Queue a command for the provider.
    ///
    /// Fails with [`SidebarError::ProviderClosed`] once the provider is gone.
    pub fn send(&self, command: SidebarCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| SidebarError::ProviderClosed)
    }

    pub fn set_active_path(&self, path: Option<String>) -> Result<()> {
        self.send(SidebarCommand::SetActivePath { path })
    }

    pub fn add_items(
        &self,
        items: Vec<SidebarItem>,
        options: AddItemsOptions,
    ) -> Result<()> {
        self.send(SidebarCommand::AddItems { items, options })
    }

    pub fn remove_items(
        &self,
        items: Vec<SidebarItem>,
        sidebar_id: impl Into<String>,
    ) -> Result<()> {
        self.send(SidebarCommand::RemoveItems {
            items,
            sidebar_id: sidebar_id.into(),
            parent: None,
        })
    }

    /// Remove items from the children of the root items equal to `parent`.
    pub fn remove_child_items(
        &self,
        items: Vec<SidebarItem>,
        sidebar_id: impl Into<String>,
        parent: SidebarItem,
    ) -> Result<()> {
        self.send(SidebarCommand::RemoveItems {
            items,
            sidebar_id: sidebar_id.into(),
            parent: Some(parent),
        })
    }

    pub fn reset_items(&self) -> Result<()> {
        self.send(SidebarCommand::ResetItems)
    }

    pub fn go_back(&self) -> Result<()> {
        self.send(SidebarCommand::GoBack)
    }

    pub fn set_mobile_open(&self, open: bool) -> Result<()> {
        self.send(SidebarCommand::SetMobileOpen { open })
    }

    pub fn set_desktop_open(&self, open: bool) -> Result<()> {
        self.send(SidebarCommand::SetDesktopOpen { open })
    }

    /// Add items and remove them again when the returned guard is dropped.
    pub fn register_items(
        &self,
        items: Vec<SidebarItem>,
        options: AddItemsOptions,
    ) -> Result<ItemRegistration> {
        let sidebar_id = options.sidebar_id.clone();
        let parent = options.parent.as_ref().map(|parent| parent.item.clone());
        self.add_items(items.clone(), options)?;

        Ok(ItemRegistration {
            proxy: self.clone(),
            items,
            sidebar_id,
            parent,
        })
    }
}

/// Items added by a component for as long as the guard lives.
pub struct ItemRegistration {
    proxy: SidebarProxy,
    items: Vec<SidebarItem>,
    sidebar_id: String,
    parent: Option<SidebarItem>,
}

impl ItemRegistration {
    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    pub fn sidebar_id(&self) -> &str {
        &self.sidebar_id
    }

    /// Parent the items were inserted under, if any.
    pub fn parent(&self) -> Option<&SidebarItem> {
        self.parent.as_ref()
    }
}

impl Drop for ItemRegistration {
    fn drop(&mut self) {
        let items = std::mem::take(&mut self.items);
        let sidebar_id = std::mem::take(&mut self.sidebar_id);
        let result = match self.parent.take() {
            Some(parent) => {
                self.proxy.remove_child_items(items, sidebar_id, parent)
            },
            None => self.proxy.remove_items(items, sidebar_id),
        };
        if let Err(err) = result {
            log::debug!("registration outlived its provider: {err}");
        }
    }
}
