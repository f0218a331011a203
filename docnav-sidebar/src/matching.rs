//! Structural matching and lookup over sidebar trees.
//!
//! Every mutation and every lookup goes through [`items_equal`], so adding,
//! removing and highlighting agree on what "the same item" means.

use crate::model::SidebarItem;

/// Knobs for tree lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    /// Require link, ref and sidebar titles to agree as well.
    pub compare_titles: bool,
    /// Descend into children of non-matching items.
    pub check_children: bool,
}

impl FindOptions {
    /// Match identity keys only and search the whole tree.
    pub fn by_identity() -> Self {
        Self {
            compare_titles: false,
            check_children: true,
        }
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            compare_titles: true,
            check_children: true,
        }
    }
}

/// Item found by [`find_item_with_history`] with the nested sidebars
/// crossed on the way down, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWithHistory<'a> {
    pub item: &'a SidebarItem,
    pub sidebar_history: Vec<String>,
}

/// Compare two items by kind and identity key.
///
/// Separators never match. Links and refs are keyed by path, nested
/// sidebars by id and categories by title. With `compare_titles` the
/// titles of path-keyed and id-keyed items must agree too. Children never
/// take part in the comparison.
pub fn items_equal(
    left: &SidebarItem,
    right: &SidebarItem,
    compare_titles: bool,
) -> bool {
    use SidebarItem as I;

    match (left, right) {
        (
            I::Link {
                path: left_path,
                title: left_title,
                ..
            },
            I::Link {
                path: right_path,
                title: right_title,
                ..
            },
        )
        | (
            I::Ref {
                path: left_path,
                title: left_title,
            },
            I::Ref {
                path: right_path,
                title: right_title,
            },
        ) => {
            left_path == right_path
                && (!compare_titles || left_title == right_title)
        },
        (
            I::Sidebar {
                sidebar_id: left_id,
                title: left_title,
                ..
            },
            I::Sidebar {
                sidebar_id: right_id,
                title: right_title,
                ..
            },
        ) => {
            left_id == right_id
                && (!compare_titles || left_title == right_title)
        },
        (
            I::Category {
                title: left_title, ..
            },
            I::Category {
                title: right_title, ..
            },
        )
        | (
            I::SubCategory {
                title: left_title, ..
            },
            I::SubCategory {
                title: right_title, ..
            },
        ) => left_title == right_title,
        _ => false,
    }
}

/// Find the first item equal to `wanted`, depth-first.
pub fn find_item<'a>(
    items: &'a [SidebarItem],
    wanted: &SidebarItem,
    options: FindOptions,
) -> Option<&'a SidebarItem> {
    for item in items {
        if items_equal(item, wanted, options.compare_titles) {
            return Some(item);
        }

        if options.check_children {
            if let Some(found) = find_item(item.children(), wanted, options) {
                return Some(found);
            }
        }
    }

    None
}

/// Mutable counterpart of [`find_item`].
pub(crate) fn find_item_mut<'a>(
    items: &'a mut [SidebarItem],
    wanted: &SidebarItem,
    options: FindOptions,
) -> Option<&'a mut SidebarItem> {
    for item in items.iter_mut() {
        if items_equal(item, wanted, options.compare_titles) {
            return Some(item);
        }

        if !options.check_children {
            continue;
        }

        if let Some(children) = item.children_mut() {
            if let Some(found) = find_item_mut(children, wanted, options) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first item equal to `wanted` and record every nested sidebar
/// crossed to reach it.
///
/// The walk keeps its own stack of frames; the history trail grows when a
/// frame is entered through a `sidebar` item and shrinks when that frame is
/// exhausted.
pub fn find_item_with_history<'a>(
    items: &'a [SidebarItem],
    wanted: &SidebarItem,
    options: FindOptions,
) -> Option<ItemWithHistory<'a>> {
    let mut stack = vec![Frame {
        items,
        next: 0,
        crossed_sidebar: false,
    }];
    let mut history: Vec<String> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let frame_items = frame.items;
        let index = frame.next;

        let Some(item) = frame_items.get(index) else {
            if stack.pop().is_some_and(|done| done.crossed_sidebar) {
                history.pop();
            }
            continue;
        };
        frame.next += 1;

        if items_equal(item, wanted, options.compare_titles) {
            return Some(ItemWithHistory {
                item,
                sidebar_history: history,
            });
        }

        if !options.check_children || item.children().is_empty() {
            continue;
        }

        let crossed_sidebar = match item.sidebar_id() {
            Some(sidebar_id) => {
                history.push(sidebar_id.to_string());
                true
            },
            None => false,
        };
        stack.push(Frame {
            items: item.children(),
            next: 0,
            crossed_sidebar,
        });
    }

    None
}

/// Return the first link in depth-first order.
///
/// Any item with children is searched, including links themselves, but a
/// link is returned before its own children are considered.
pub fn first_link_child(items: &[SidebarItem]) -> Option<&SidebarItem> {
    items.iter().find_map(|item| {
        if item.is_link() {
            Some(item)
        } else {
            first_link_child(item.children())
        }
    })
}

struct Frame<'a> {
    items: &'a [SidebarItem],
    next: usize,
    crossed_sidebar: bool,
}
