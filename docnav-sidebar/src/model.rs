use serde::{Deserialize, Serialize};

/// Root navigation tree rendered as one sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub sidebar_id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

impl Sidebar {
    /// Create a sidebar with the provided root items.
    pub fn new(
        sidebar_id: impl Into<String>,
        title: impl Into<String>,
        items: Vec<SidebarItem>,
    ) -> Self {
        Self {
            sidebar_id: sidebar_id.into(),
            title: title.into(),
            items,
        }
    }
}

/// Discriminant of a [`SidebarItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Link,
    Category,
    SubCategory,
    Separator,
    Sidebar,
    Ref,
}

/// Single entry of a sidebar tree.
///
/// The serialized form matches the generated sidebar files: the variant is
/// stored under `type`, payload keys are camelCase except `sidebar_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum SidebarItem {
    Link {
        path: String,
        title: String,
        #[serde(default)]
        loaded: bool,
        #[serde(default)]
        is_path_href: bool,
        #[serde(default)]
        children: Vec<SidebarItem>,
    },
    Category {
        title: String,
        #[serde(default)]
        initial_open: bool,
        #[serde(default)]
        loaded: bool,
        #[serde(default)]
        children: Vec<SidebarItem>,
    },
    SubCategory {
        title: String,
        #[serde(default)]
        initial_open: bool,
        #[serde(default)]
        loaded: bool,
        #[serde(default)]
        children: Vec<SidebarItem>,
    },
    Separator,
    Sidebar {
        #[serde(rename = "sidebar_id")]
        sidebar_id: String,
        title: String,
        #[serde(default)]
        children: Vec<SidebarItem>,
    },
    Ref {
        path: String,
        title: String,
    },
}

impl SidebarItem {
    /// Build a link without children.
    pub fn link(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Link {
            path: path.into(),
            title: title.into(),
            loaded: false,
            is_path_href: false,
            children: Vec::new(),
        }
    }

    /// Build a category holding the provided children.
    pub fn category(
        title: impl Into<String>,
        children: Vec<SidebarItem>,
    ) -> Self {
        Self::Category {
            title: title.into(),
            initial_open: false,
            loaded: false,
            children,
        }
    }

    /// Build a sub-category holding the provided children.
    pub fn sub_category(
        title: impl Into<String>,
        children: Vec<SidebarItem>,
    ) -> Self {
        Self::SubCategory {
            title: title.into(),
            initial_open: false,
            loaded: false,
            children,
        }
    }

    /// Build a reference to a nested sidebar.
    pub fn sidebar(
        sidebar_id: impl Into<String>,
        title: impl Into<String>,
        children: Vec<SidebarItem>,
    ) -> Self {
        Self::Sidebar {
            sidebar_id: sidebar_id.into(),
            title: title.into(),
            children,
        }
    }

    /// Build an alias pointing at another path.
    pub fn reference(
        path: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::Ref {
            path: path.into(),
            title: title.into(),
        }
    }

    /// Return the variant discriminant.
    pub fn kind(&self) -> ItemKind {
        match self {
            SidebarItem::Link { .. } => ItemKind::Link,
            SidebarItem::Category { .. } => ItemKind::Category,
            SidebarItem::SubCategory { .. } => ItemKind::SubCategory,
            SidebarItem::Separator => ItemKind::Separator,
            SidebarItem::Sidebar { .. } => ItemKind::Sidebar,
            SidebarItem::Ref { .. } => ItemKind::Ref,
        }
    }

    /// Return whether the item is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, SidebarItem::Separator)
    }

    /// Return whether the item is a link.
    pub fn is_link(&self) -> bool {
        matches!(self, SidebarItem::Link { .. })
    }

    /// Return the display title, if the variant has one.
    pub fn title(&self) -> Option<&str> {
        match self {
            SidebarItem::Link { title, .. }
            | SidebarItem::Category { title, .. }
            | SidebarItem::SubCategory { title, .. }
            | SidebarItem::Sidebar { title, .. }
            | SidebarItem::Ref { title, .. } => Some(title),
            SidebarItem::Separator => None,
        }
    }

    /// Return the target path of links and refs.
    pub fn path(&self) -> Option<&str> {
        match self {
            SidebarItem::Link { path, .. } | SidebarItem::Ref { path, .. } => {
                Some(path)
            },
            _ => None,
        }
    }

    /// Return the referenced sidebar id of nested sidebar items.
    pub fn sidebar_id(&self) -> Option<&str> {
        match self {
            SidebarItem::Sidebar { sidebar_id, .. } => Some(sidebar_id),
            _ => None,
        }
    }

    /// Return nested children. Separators and refs never have any.
    pub fn children(&self) -> &[SidebarItem] {
        match self {
            SidebarItem::Link { children, .. }
            | SidebarItem::Category { children, .. }
            | SidebarItem::SubCategory { children, .. }
            | SidebarItem::Sidebar { children, .. } => children,
            SidebarItem::Separator | SidebarItem::Ref { .. } => &[],
        }
    }

    /// Return mutable children for variants that can hold them.
    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<SidebarItem>> {
        match self {
            SidebarItem::Link { children, .. }
            | SidebarItem::Category { children, .. }
            | SidebarItem::SubCategory { children, .. }
            | SidebarItem::Sidebar { children, .. } => Some(children),
            SidebarItem::Separator | SidebarItem::Ref { .. } => None,
        }
    }

    /// Return the loaded flag for variants that track it.
    pub fn loaded(&self) -> Option<bool> {
        match self {
            SidebarItem::Link { loaded, .. }
            | SidebarItem::Category { loaded, .. }
            | SidebarItem::SubCategory { loaded, .. } => Some(*loaded),
            _ => None,
        }
    }

    /// Return whether the link path is a full href rather than a hash.
    pub fn is_path_href(&self) -> bool {
        matches!(
            self,
            SidebarItem::Link {
                is_path_href: true,
                ..
            }
        )
    }

    /// Mark the item as loaded after children were attached.
    ///
    /// Links only change when `force` is set; categories always become
    /// loaded.
    pub(crate) fn mark_loaded(&mut self, force: bool) {
        match self {
            SidebarItem::Link { loaded, .. } => {
                if force {
                    *loaded = true;
                }
            },
            SidebarItem::Category { loaded, .. }
            | SidebarItem::SubCategory { loaded, .. } => *loaded = true,
            SidebarItem::Separator
            | SidebarItem::Sidebar { .. }
            | SidebarItem::Ref { .. } => {},
        }
    }

    /// Return a copy with `loaded` set.
    ///
    /// Useful for links registered at runtime by page headings.
    pub fn with_loaded(mut self) -> Self {
        self.mark_loaded(true);
        self
    }

    /// Return a link copy with `isPathHref` enabled.
    pub fn with_path_href(mut self) -> Self {
        if let SidebarItem::Link { is_path_href, .. } = &mut self {
            *is_path_href = true;
        }
        self
    }
}
