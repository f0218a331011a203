use crate::command::{Location, SidebarCommand};
use crate::event::SidebarEffect;
use crate::matching::first_link_child;
use crate::model::SidebarItem;
use crate::state::SidebarState;

/// Read-only context for sidebar reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidebarCtx {
    /// Desktop visibility read from durable storage, if any was saved.
    pub persisted_desktop_open: Option<bool>,
}

/// Reduce a sidebar command into state updates and effect events.
///
/// The derived snapshot is refreshed before returning, so the next command
/// always observes the consequences of this one.
pub fn reduce(
    state: &mut SidebarState,
    command: SidebarCommand,
    ctx: &SidebarCtx,
) -> Vec<SidebarEffect> {
    let effects = match command {
        SidebarCommand::Mounted { location } => {
            reduce_mounted(state, location, ctx);
            Vec::new()
        },
        SidebarCommand::PathChanged { pathname } => {
            if state.options().should_handle_path_change {
                let _ = state.set_active_path(Some(pathname));
            }
            Vec::new()
        },
        SidebarCommand::HashChanged { hash } => {
            if state.options().should_handle_hash_change {
                let _ = state.set_active_path(Some(strip_hash(&hash)));
            }
            Vec::new()
        },
        SidebarCommand::Scrolled { top } => reduce_scrolled(state, top),
        SidebarCommand::SetActivePath { path } => {
            let _ = state.set_active_path(path);
            Vec::new()
        },
        SidebarCommand::AddItems { items, options } => {
            let _ = state.add_items(items, &options);
            Vec::new()
        },
        SidebarCommand::RemoveItems {
            items,
            sidebar_id,
            parent,
        } => {
            let _ = state.remove_items(&items, &sidebar_id, parent.as_ref());
            Vec::new()
        },
        SidebarCommand::ResetItems => {
            state.reset_items();
            Vec::new()
        },
        SidebarCommand::ReplaceSeed { sidebars } => {
            if state.replace_seed(sidebars) {
                log::debug!("sidebar seed identity changed, state reset");
            }
            Vec::new()
        },
        SidebarCommand::GoBack => reduce_go_back(state),
        SidebarCommand::SetMobileOpen { open } => {
            state.set_mobile_open(open);
            Vec::new()
        },
        SidebarCommand::SetDesktopOpen { open } => {
            if state.set_desktop_open(open) {
                vec![SidebarEffect::DesktopVisibilityChanged { open }]
            } else {
                Vec::new()
            }
        },
    };

    state.refresh();
    effects
}

/// Handle provider mount: restore visibility and pick the initial path.
fn reduce_mounted(
    state: &mut SidebarState,
    location: Location,
    ctx: &SidebarCtx,
) {
    if let Some(open) = ctx.persisted_desktop_open {
        let _ = state.set_desktop_open(open);
    }

    if state.options().should_handle_hash_change {
        let hash_path = strip_hash(&location.hash);
        if !hash_path.is_empty() {
            let _ = state.set_active_path(Some(hash_path));
        } else if let Some(path) = active_sidebar_first_link_path(state) {
            let _ = state.set_active_path(Some(path));
        }
    }

    if state.options().should_handle_path_change {
        let _ = state.set_active_path(Some(location.pathname));
    }
}

/// Jump back to the first section once the page is scrolled to the top.
fn reduce_scrolled(state: &mut SidebarState, top: f64) -> Vec<SidebarEffect> {
    // NaN compares false, so it never counts as the top.
    let at_top = top <= 0.0;
    if !state.options().should_handle_hash_change || !at_top {
        return Vec::new();
    }

    let Some(path) = active_sidebar_first_link_path(state) else {
        return Vec::new();
    };

    let href = format!("#{path}");
    let _ = state.set_active_path(Some(path));
    vec![SidebarEffect::Navigate {
        href,
        replace: false,
        scroll: false,
    }]
}

/// Reopen the previous sidebar in the history, or the active one.
fn reduce_go_back(state: &mut SidebarState) -> Vec<SidebarEffect> {
    let history = &state.snapshot().sidebar_history;
    let target = if history.len() <= 1 {
        state
            .active_sidebar()
            .map(|sidebar| sidebar.sidebar_id.clone())
    } else {
        history.get(history.len() - 2).cloned()
    };

    let Some(sidebar_id) = target else {
        return Vec::new();
    };

    open_sidebar(state, &sidebar_id)
}

/// Activate the first link of a sidebar and ask the router to follow.
fn open_sidebar(
    state: &mut SidebarState,
    sidebar_id: &str,
) -> Vec<SidebarEffect> {
    let Some(link) = state
        .get_sidebar(sidebar_id)
        .and_then(|view| view.first_link_child())
    else {
        log::debug!("sidebar {sidebar_id} has no link to open");
        return Vec::new();
    };
    let Some(path) = link.path().map(str::to_string) else {
        return Vec::new();
    };

    let href = if link.is_path_href() {
        path.clone()
    } else {
        format!("#{path}")
    };

    let _ = state.set_active_path(Some(path));
    vec![SidebarEffect::Navigate {
        href,
        replace: true,
        scroll: true,
    }]
}

fn active_sidebar_first_link_path(state: &SidebarState) -> Option<String> {
    state
        .active_sidebar()
        .and_then(|sidebar| first_link_child(&sidebar.items))
        .and_then(SidebarItem::path)
        .map(str::to_string)
}

fn strip_hash(hash: &str) -> String {
    hash.strip_prefix('#').unwrap_or(hash).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AddItemsOptions;
    use crate::model::Sidebar;
    use crate::options::SidebarOptions;

    fn api_reference() -> SidebarState {
        SidebarState::new(
            vec![Sidebar::new(
                "api",
                "API Reference",
                vec![
                    SidebarItem::link("introduction", "Introduction"),
                    SidebarItem::category(
                        "Fulfillment Sets",
                        vec![SidebarItem::link(
                            "fulfillment-sets_service-zones",
                            "Service Zones",
                        )],
                    ),
                ],
            )],
            SidebarOptions::hash_driven("Medusa"),
        )
    }

    fn nested() -> SidebarState {
        SidebarState::new(
            vec![Sidebar::new(
                "resources",
                "Resources",
                vec![
                    SidebarItem::link("/resources", "Overview"),
                    SidebarItem::sidebar(
                        "commerce",
                        "Commerce Modules",
                        vec![
                            SidebarItem::link("/commerce", "Overview")
                                .with_path_href(),
                            SidebarItem::sidebar(
                                "cart",
                                "Cart Module",
                                vec![SidebarItem::link("/cart", "Cart")],
                            ),
                        ],
                    ),
                ],
            )],
            SidebarOptions::default(),
        )
    }

    #[test]
    fn given_hash_on_mount_when_reduced_then_hash_becomes_active_path() {
        let mut state = api_reference();

        let _ = reduce(
            &mut state,
            SidebarCommand::Mounted {
                location: Location {
                    pathname: String::from("/api/admin"),
                    hash: String::from("#fulfillment-sets_service-zones"),
                },
            },
            &SidebarCtx::default(),
        );

        assert_eq!(state.active_path(), Some("fulfillment-sets_service-zones"));
    }

    #[test]
    fn given_empty_hash_on_mount_when_reduced_then_first_link_is_active() {
        let mut state = api_reference();

        let _ = reduce(
            &mut state,
            SidebarCommand::Mounted {
                location: Location {
                    pathname: String::from("/api/admin"),
                    hash: String::new(),
                },
            },
            &SidebarCtx::default(),
        );

        assert_eq!(state.active_path(), Some("introduction"));
    }

    #[test]
    fn given_persisted_visibility_on_mount_when_reduced_then_restored() {
        let mut state = api_reference();

        let _ = reduce(
            &mut state,
            SidebarCommand::Mounted {
                location: Location::default(),
            },
            &SidebarCtx {
                persisted_desktop_open: Some(false),
            },
        );

        assert!(!state.snapshot().desktop_open);
    }

    #[test]
    fn given_path_handling_disabled_when_path_changes_then_ignored() {
        let mut state = api_reference();

        let _ = reduce(
            &mut state,
            SidebarCommand::PathChanged {
                pathname: String::from("/elsewhere"),
            },
            &SidebarCtx::default(),
        );

        assert_eq!(state.active_path(), None);
    }

    #[test]
    fn given_scroll_to_top_when_reduced_then_first_link_is_pushed() {
        let mut state = api_reference();
        let _ = state.set_active_path(Some(String::from(
            "fulfillment-sets_service-zones",
        )));

        let effects = reduce(
            &mut state,
            SidebarCommand::Scrolled { top: 0.0 },
            &SidebarCtx::default(),
        );

        assert_eq!(state.active_path(), Some("introduction"));
        assert_eq!(
            effects,
            vec![SidebarEffect::Navigate {
                href: String::from("#introduction"),
                replace: false,
                scroll: false,
            }]
        );
    }

    #[test]
    fn given_scroll_below_top_when_reduced_then_nothing_happens() {
        let mut state = api_reference();

        let effects = reduce(
            &mut state,
            SidebarCommand::Scrolled { top: 120.0 },
            &SidebarCtx::default(),
        );

        assert!(effects.is_empty());
        assert_eq!(state.active_path(), None);
    }

    #[test]
    fn given_nan_scroll_when_reduced_then_nothing_happens() {
        let mut state = api_reference();

        let effects = reduce(
            &mut state,
            SidebarCommand::Scrolled { top: f64::NAN },
            &SidebarCtx::default(),
        );

        assert!(effects.is_empty());
        assert_eq!(state.active_path(), None);
    }

    #[test]
    fn given_deep_history_when_going_back_then_previous_sidebar_opens() {
        let mut state = nested();
        let _ = reduce(
            &mut state,
            SidebarCommand::SetActivePath {
                path: Some(String::from("/cart")),
            },
            &SidebarCtx::default(),
        );
        assert_eq!(
            state.snapshot().sidebar_history,
            vec!["resources", "commerce", "cart"]
        );

        let effects =
            reduce(&mut state, SidebarCommand::GoBack, &SidebarCtx::default());

        assert_eq!(state.active_path(), Some("/commerce"));
        assert_eq!(
            state.snapshot().sidebar_history,
            vec!["resources", "commerce"]
        );
        assert_eq!(
            effects,
            vec![SidebarEffect::Navigate {
                href: String::from("/commerce"),
                replace: true,
                scroll: true,
            }]
        );
    }

    #[test]
    fn given_singleton_history_when_going_back_then_first_link_reopens() {
        let mut state = nested();
        let _ = state.set_active_path(Some(String::from("/resources")));
        state.refresh();

        let effects =
            reduce(&mut state, SidebarCommand::GoBack, &SidebarCtx::default());

        assert_eq!(state.active_path(), Some("/resources"));
        assert_eq!(
            effects,
            vec![SidebarEffect::Navigate {
                href: String::from("#/resources"),
                replace: true,
                scroll: true,
            }]
        );
    }

    #[test]
    fn given_desktop_toggle_when_reduced_then_persist_effect_is_emitted() {
        let mut state = nested();

        let effects = reduce(
            &mut state,
            SidebarCommand::SetDesktopOpen { open: false },
            &SidebarCtx::default(),
        );
        let repeated = reduce(
            &mut state,
            SidebarCommand::SetDesktopOpen { open: false },
            &SidebarCtx::default(),
        );

        assert_eq!(
            effects,
            vec![SidebarEffect::DesktopVisibilityChanged { open: false }]
        );
        assert!(repeated.is_empty());
    }

    #[test]
    fn given_added_heading_when_reduced_then_snapshot_is_refreshed() {
        let mut state = api_reference();

        let _ = reduce(
            &mut state,
            SidebarCommand::AddItems {
                items: vec![
                    SidebarItem::link("webhooks", "Webhooks").with_loaded(),
                ],
                options: AddItemsOptions::new("api"),
            },
            &SidebarCtx::default(),
        );
        let _ = reduce(
            &mut state,
            SidebarCommand::HashChanged {
                hash: String::from("#webhooks"),
            },
            &SidebarCtx::default(),
        );

        let active = state.snapshot().active_item.as_ref();
        assert_eq!(active.and_then(SidebarItem::title), Some("Webhooks"));
    }
}
