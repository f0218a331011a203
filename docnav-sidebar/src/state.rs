use crate::command::AddItemsOptions;
use crate::matching::{
    FindOptions, find_item, find_item_mut, first_link_child, items_equal,
};
use crate::model::{Sidebar, SidebarItem};
use crate::options::SidebarOptions;
use crate::snapshot::{self, SidebarSnapshot};

/// Borrowed view over either a root sidebar or a nested `sidebar` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarView<'a> {
    pub sidebar_id: &'a str,
    pub title: &'a str,
    pub items: &'a [SidebarItem],
}

impl<'a> SidebarView<'a> {
    fn from_root(sidebar: &'a Sidebar) -> Self {
        Self {
            sidebar_id: &sidebar.sidebar_id,
            title: &sidebar.title,
            items: &sidebar.items,
        }
    }

    fn from_item(item: &'a SidebarItem) -> Option<Self> {
        match item {
            SidebarItem::Sidebar {
                sidebar_id,
                title,
                children,
            } => Some(Self {
                sidebar_id,
                title,
                items: children,
            }),
            _ => None,
        }
    }

    /// Return the first link of this sidebar in depth-first order.
    pub fn first_link_child(&self) -> Option<&'a SidebarItem> {
        first_link_child(self.items)
    }
}

/// Runtime state for the sidebar store.
#[derive(Debug)]
pub struct SidebarState {
    seed: Vec<Sidebar>,
    sidebars: Vec<Sidebar>,
    active_path: Option<String>,
    mobile_open: bool,
    desktop_open: bool,
    options: SidebarOptions,
    snapshot: SidebarSnapshot,
}

impl SidebarState {
    /// Seed state from the static configuration.
    pub fn new(seed: Vec<Sidebar>, options: SidebarOptions) -> Self {
        let mut state = Self {
            sidebars: seed.clone(),
            seed,
            active_path: None,
            mobile_open: false,
            desktop_open: true,
            options,
            snapshot: SidebarSnapshot::default(),
        };
        state.refresh();
        state
    }

    // --- Read access ---

    /// Return the current sidebars, runtime mutations included.
    pub fn sidebars(&self) -> &[Sidebar] {
        &self.sidebars
    }

    /// Return the seed the state resets to.
    pub fn seed(&self) -> &[Sidebar] {
        &self.seed
    }

    /// Return the currently highlighted path.
    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    /// Return whether the mobile sidebar drawer is open.
    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    /// Return whether the desktop sidebar is shown.
    pub fn is_desktop_open(&self) -> bool {
        self.desktop_open
    }

    /// Return the options the state was created with.
    pub fn options(&self) -> &SidebarOptions {
        &self.options
    }

    /// Return the snapshot derived after the last mutation.
    pub fn snapshot(&self) -> &SidebarSnapshot {
        &self.snapshot
    }

    /// Return the root sidebar that contains the active path.
    ///
    /// Falls back to the first sidebar when there is no active path, only
    /// one sidebar, or no sidebar holds a link at the active path.
    pub fn active_sidebar(&self) -> Option<&Sidebar> {
        let first = self.sidebars.first()?;
        let Some(path) = self.active_path.as_deref() else {
            return Some(first);
        };
        if self.sidebars.len() == 1 {
            return Some(first);
        }

        let lookup = SidebarItem::link(path, "");
        let containing = self.sidebars.iter().find(|sidebar| {
            find_item(&sidebar.items, &lookup, FindOptions::by_identity())
                .is_some()
        });

        Some(containing.unwrap_or(first))
    }

    /// Resolve a root sidebar, or a nested one inside the active sidebar.
    pub fn get_sidebar(&self, sidebar_id: &str) -> Option<SidebarView<'_>> {
        if let Some(root) = self
            .sidebars
            .iter()
            .find(|sidebar| sidebar.sidebar_id == sidebar_id)
        {
            return Some(SidebarView::from_root(root));
        }

        let active = self.active_sidebar()?;
        let lookup = SidebarItem::sidebar(sidebar_id, "", Vec::new());
        find_item(&active.items, &lookup, FindOptions::by_identity())
            .and_then(SidebarView::from_item)
    }

    /// Return the sidebar currently on screen.
    pub fn shown_sidebar(&self) -> Option<SidebarView<'_>> {
        let sidebar_id = self.snapshot.shown_sidebar_id.as_deref()?;
        self.get_sidebar(sidebar_id)
    }

    /// Return whether `item` or, optionally, one of its children is active.
    ///
    /// Links with children should pass `check_link_children = false` so the
    /// parent link is not highlighted together with an active child.
    pub fn is_item_active(
        &self,
        item: &SidebarItem,
        check_link_children: bool,
    ) -> bool {
        let Some(active_path) = self.active_path.as_deref() else {
            return false;
        };

        is_active_under(item, active_path, check_link_children)
    }

    // --- Write access ---

    /// Replace the active path. Empty paths clear it.
    ///
    /// Returns `true` when the path actually changed.
    pub(crate) fn set_active_path(&mut self, path: Option<String>) -> bool {
        let path = path.filter(|path| !path.is_empty());
        if self.active_path == path {
            return false;
        }

        self.active_path = path;
        true
    }

    pub(crate) fn set_mobile_open(&mut self, open: bool) {
        self.mobile_open = open;
    }

    pub(crate) fn set_desktop_open(&mut self, open: bool) -> bool {
        if self.desktop_open == open {
            return false;
        }

        self.desktop_open = open;
        true
    }

    /// Insert items into the target sidebar or under a parent item.
    ///
    /// Returns `false` when nothing was inserted.
    pub(crate) fn add_items(
        &mut self,
        mut items: Vec<SidebarItem>,
        options: &AddItemsOptions,
    ) -> bool {
        let Some(target) = self.target_items_mut(&options.sidebar_id) else {
            log::debug!(
                "sidebar {} not found, add ignored",
                options.sidebar_id
            );
            return false;
        };

        if !options.ignore_existing {
            let existing: &[SidebarItem] = target;
            items.retain(|item| {
                find_item(existing, item, FindOptions::default()).is_none()
            });
        }
        if items.is_empty() {
            return false;
        }

        let Some(parent) = &options.parent else {
            insert_at(target, options.index_position, items);
            return true;
        };

        // Parents are matched among root items only, and every match grows.
        let mut inserted = false;
        for item in target
            .iter_mut()
            .filter(|item| items_equal(item, &parent.item, true))
        {
            let Some(children) = item.children_mut() else {
                continue;
            };
            insert_at(children, options.index_position, items.clone());
            item.mark_loaded(parent.change_loaded);
            inserted = true;
        }

        if !inserted {
            log::debug!(
                "parent {:?} not found in sidebar {}, add ignored",
                parent.item.title(),
                options.sidebar_id
            );
        }
        inserted
    }

    /// Remove items from the target sidebar's root list, or from the
    /// children of its root items equal to `parent`.
    ///
    /// Nothing deeper is touched; callers remove what they added.
    pub(crate) fn remove_items(
        &mut self,
        items: &[SidebarItem],
        sidebar_id: &str,
        parent: Option<&SidebarItem>,
    ) -> bool {
        let Some(target) = self.target_items_mut(sidebar_id) else {
            log::debug!("sidebar {sidebar_id} not found, remove ignored");
            return false;
        };

        let Some(parent) = parent else {
            return retain_unlisted(target, items);
        };

        let mut removed = false;
        for item in target
            .iter_mut()
            .filter(|item| items_equal(item, parent, true))
        {
            if let Some(children) = item.children_mut() {
                removed |= retain_unlisted(children, items);
            }
        }
        removed
    }

    /// Restore the seed, discarding runtime mutations.
    pub(crate) fn reset_items(&mut self) {
        self.sidebars = self.seed.clone();
    }

    /// Store a new seed and reset when the first sidebar changed identity.
    ///
    /// Returns `true` when the state was reset.
    pub(crate) fn replace_seed(&mut self, seed: Vec<Sidebar>) -> bool {
        let next_first = seed.first().map(|sidebar| &sidebar.sidebar_id);
        let current_first =
            self.sidebars.first().map(|sidebar| &sidebar.sidebar_id);
        let identity_changed = next_first != current_first;

        self.seed = seed;
        if identity_changed {
            self.reset_items();
        }
        identity_changed
    }

    /// Recompute the derived snapshot.
    pub(crate) fn refresh(&mut self) {
        let next = snapshot::derive(self);
        if next.shown_sidebar_id != self.snapshot.shown_sidebar_id {
            log::debug!(
                "shown sidebar changed: {:?} -> {:?}",
                self.snapshot.shown_sidebar_id,
                next.shown_sidebar_id
            );
        }
        self.snapshot = next;
    }

    fn target_items_mut(
        &mut self,
        sidebar_id: &str,
    ) -> Option<&mut Vec<SidebarItem>> {
        if let Some(index) = self
            .sidebars
            .iter()
            .position(|sidebar| sidebar.sidebar_id == sidebar_id)
        {
            return Some(&mut self.sidebars[index].items);
        }

        let lookup = SidebarItem::sidebar(sidebar_id, "", Vec::new());
        self.sidebars
            .iter_mut()
            .find_map(|sidebar| {
                find_item_mut(
                    &mut sidebar.items,
                    &lookup,
                    FindOptions::by_identity(),
                )
            })
            .and_then(SidebarItem::children_mut)
    }
}

fn is_active_under(
    item: &SidebarItem,
    active_path: &str,
    check_link_children: bool,
) -> bool {
    match item {
        SidebarItem::Separator => return false,
        SidebarItem::Link { path, .. } => {
            if path == active_path {
                return true;
            }
            if !check_link_children {
                return false;
            }
        },
        SidebarItem::Category { .. }
        | SidebarItem::SubCategory { .. }
        | SidebarItem::Sidebar { .. }
        | SidebarItem::Ref { .. } => {},
    }

    item.children().iter().any(|child| {
        is_active_under(child, active_path, check_link_children)
    })
}

/// Drop entries equal to any of `items`. Returns whether any were dropped.
fn retain_unlisted(
    list: &mut Vec<SidebarItem>,
    items: &[SidebarItem],
) -> bool {
    let before = list.len();
    list.retain(|existing| {
        !items
            .iter()
            .any(|removed| items_equal(existing, removed, true))
    });
    list.len() != before
}

fn insert_at(
    list: &mut Vec<SidebarItem>,
    index: Option<usize>,
    items: Vec<SidebarItem>,
) {
    let index = index.map_or(list.len(), |index| index.min(list.len()));
    list.splice(index..index, items);
}

#[cfg(test)]
mod tests {
    use super::SidebarState;
    use crate::command::AddItemsOptions;
    use crate::model::{Sidebar, SidebarItem};
    use crate::options::SidebarOptions;

    fn single() -> SidebarState {
        SidebarState::new(
            vec![Sidebar::new(
                "s1",
                "S1",
                vec![
                    SidebarItem::link("/a", "A"),
                    SidebarItem::category(
                        "C",
                        vec![SidebarItem::link("/b", "B")],
                    ),
                ],
            )],
            SidebarOptions::default(),
        )
    }

    #[test]
    fn given_existing_item_when_added_then_state_is_unchanged() {
        let mut state = single();
        let before = state.sidebars().to_vec();

        let changed = state.add_items(
            vec![SidebarItem::link("/a", "A")],
            &AddItemsOptions::new("s1"),
        );

        assert!(!changed);
        assert_eq!(state.sidebars(), before.as_slice());
    }

    #[test]
    fn given_existing_item_with_ignore_existing_when_added_then_duplicated() {
        let mut state = single();

        let changed = state.add_items(
            vec![SidebarItem::link("/a", "A")],
            &AddItemsOptions::new("s1").ignoring_existing(),
        );

        assert!(changed);
        assert_eq!(state.sidebars()[0].items.len(), 3);
    }

    #[test]
    fn given_index_past_end_when_added_then_item_is_appended() {
        let mut state = single();

        let _ = state.add_items(
            vec![SidebarItem::link("/z", "Z")],
            &AddItemsOptions::new("s1").at(42),
        );

        assert_eq!(state.sidebars()[0].items[2].path(), Some("/z"));
    }

    #[test]
    fn given_parent_category_when_added_then_children_grow_and_load() {
        let mut state = single();

        let changed = state.add_items(
            vec![SidebarItem::link("/c", "C1")],
            &AddItemsOptions::new("s1")
                .with_parent(SidebarItem::category("C", Vec::new()))
                .at(0),
        );

        assert!(changed);
        let category = &state.sidebars()[0].items[1];
        assert_eq!(category.children()[0].path(), Some("/c"));
        assert_eq!(category.children()[1].path(), Some("/b"));
        assert_eq!(category.loaded(), Some(true));
    }

    fn shared_titles() -> SidebarState {
        let guides = || SidebarItem::sub_category("Guides", Vec::new());
        SidebarState::new(
            vec![Sidebar::new("s1", "S1", vec![
                SidebarItem::category("Cache", vec![guides()]),
                SidebarItem::category("Event", vec![guides()]),
                guides(),
                guides(),
            ])],
            SidebarOptions::default(),
        )
    }

    #[test]
    fn given_parent_nested_only_when_added_then_nothing_is_inserted() {
        let mut state = SidebarState::new(
            vec![Sidebar::new("s1", "S1", vec![SidebarItem::category(
                "Cache",
                vec![SidebarItem::sub_category("Guides", Vec::new())],
            )])],
            SidebarOptions::default(),
        );
        let before = state.sidebars().to_vec();

        let changed = state.add_items(
            vec![SidebarItem::link("/x", "X")],
            &AddItemsOptions::new("s1")
                .with_parent(SidebarItem::sub_category("Guides", Vec::new())),
        );

        assert!(!changed);
        assert_eq!(state.sidebars(), before.as_slice());
    }

    #[test]
    fn given_root_parents_sharing_a_title_when_added_then_each_grows() {
        let mut state = shared_titles();

        let changed = state.add_items(
            vec![SidebarItem::link("/x", "X")],
            &AddItemsOptions::new("s1")
                .with_parent(SidebarItem::sub_category("Guides", Vec::new())),
        );

        assert!(changed);
        let items = &state.sidebars()[0].items;
        assert_eq!(items[2].children()[0].path(), Some("/x"));
        assert_eq!(items[3].children()[0].path(), Some("/x"));
        // Same-titled categories nested under other roots stay untouched.
        assert!(items[0].children()[0].children().is_empty());
        assert!(items[1].children()[0].children().is_empty());
    }

    #[test]
    fn given_parent_when_removed_then_only_its_children_shrink() {
        let mut state = single();
        let _ = state.add_items(
            vec![SidebarItem::link("/a", "A")],
            &AddItemsOptions::new("s1")
                .with_parent(SidebarItem::category("C", Vec::new()))
                .ignoring_existing(),
        );

        let removed = state.remove_items(
            &[SidebarItem::link("/a", "A")],
            "s1",
            Some(&SidebarItem::category("C", Vec::new())),
        );

        assert!(removed);
        let items = &state.sidebars()[0].items;
        assert_eq!(items[0].path(), Some("/a"));
        assert_eq!(items[1].children().len(), 1);
        assert_eq!(items[1].children()[0].path(), Some("/b"));
    }

    #[test]
    fn given_parent_link_without_change_loaded_when_added_then_flag_is_kept()
    {
        let mut state = single();

        let _ = state.add_items(
            vec![SidebarItem::link("/a/x", "X")],
            &AddItemsOptions::new("s1")
                .with_parent(SidebarItem::link("/a", "A")),
        );
        let link = &state.sidebars()[0].items[0];
        assert_eq!(link.children().len(), 1);
        assert_eq!(link.loaded(), Some(false));

        let _ = state.add_items(
            vec![SidebarItem::link("/a/y", "Y")],
            &AddItemsOptions::new("s1")
                .with_loaded_parent(SidebarItem::link("/a", "A")),
        );
        let link = &state.sidebars()[0].items[0];
        assert_eq!(link.loaded(), Some(true));
    }

    #[test]
    fn given_unknown_sidebar_when_mutated_then_noop() {
        let mut state = single();

        assert!(!state.add_items(
            vec![SidebarItem::link("/z", "Z")],
            &AddItemsOptions::new("missing"),
        ));
        assert!(
            !state.remove_items(
                &[SidebarItem::link("/a", "A")],
                "missing",
                None
            )
        );
    }

    #[test]
    fn given_nested_child_when_removed_then_root_only_is_checked() {
        let mut state = single();

        let changed =
            state.remove_items(&[SidebarItem::link("/b", "B")], "s1", None);

        assert!(!changed);
        assert_eq!(state.sidebars()[0].items[1].children().len(), 1);
    }

    #[test]
    fn given_nested_sidebar_id_when_added_then_nested_children_grow() {
        let mut state = SidebarState::new(
            vec![Sidebar::new(
                "root",
                "Root",
                vec![SidebarItem::sidebar(
                    "api",
                    "API",
                    vec![SidebarItem::link("/api", "API")],
                )],
            )],
            SidebarOptions::default(),
        );

        let changed = state.add_items(
            vec![SidebarItem::link("section", "Section")],
            &AddItemsOptions::new("api"),
        );

        assert!(changed);
        assert_eq!(state.sidebars()[0].items[0].children().len(), 2);
    }

    #[test]
    fn given_seed_with_same_first_id_when_replaced_then_items_are_kept() {
        let mut state = single();
        let _ = state.add_items(
            vec![SidebarItem::link("/z", "Z")],
            &AddItemsOptions::new("s1"),
        );

        let reset = state.replace_seed(vec![Sidebar::new("s1", "S1", vec![])]);

        assert!(!reset);
        assert_eq!(state.sidebars()[0].items.len(), 3);

        state.reset_items();
        assert!(state.sidebars()[0].items.is_empty());
    }

    #[test]
    fn given_seed_with_new_first_id_when_replaced_then_state_resets() {
        let mut state = single();

        let reset = state.replace_seed(vec![Sidebar::new("s2", "S2", vec![])]);

        assert!(reset);
        assert_eq!(state.sidebars()[0].sidebar_id, "s2");
    }

    #[test]
    fn given_empty_path_when_set_then_active_path_is_cleared() {
        let mut state = single();

        assert!(state.set_active_path(Some(String::from("/a"))));
        assert!(state.set_active_path(Some(String::new())));
        assert_eq!(state.active_path(), None);
    }
}
