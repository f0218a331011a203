use docnav_sidebar::{Location, SidebarCommand, SidebarEffect};

/// Simulated browser location driven by navigation effects.
#[derive(Debug, Clone, Default)]
pub(crate) struct Router {
    location: Location,
    history: Vec<String>,
}

impl Router {
    pub(crate) fn location(&self) -> &Location {
        &self.location
    }

    /// Follow location changes reported by the host.
    pub(crate) fn observe(&mut self, command: &SidebarCommand) {
        match command {
            SidebarCommand::Mounted { location } => {
                self.location = location.clone();
            },
            SidebarCommand::PathChanged { pathname } => {
                self.location.pathname = pathname.clone();
                self.location.hash.clear();
            },
            SidebarCommand::HashChanged { hash } => {
                self.location.hash = hash.clone();
            },
            _ => {},
        }
    }

    /// Apply an effect and return the command the location change fires.
    pub(crate) fn route_effect(
        &mut self,
        effect: &SidebarEffect,
    ) -> Option<SidebarCommand> {
        match effect {
            SidebarEffect::Navigate {
                href,
                replace,
                scroll,
            } => {
                log::info!(
                    "navigate to {href} (replace: {replace}, scroll: {scroll})"
                );
                if !replace {
                    self.history.push(self.current_href());
                }

                if href.starts_with('#') {
                    self.location.hash = href.clone();
                    Some(SidebarCommand::HashChanged { hash: href.clone() })
                } else {
                    self.location.pathname = href.clone();
                    self.location.hash.clear();
                    Some(SidebarCommand::PathChanged {
                        pathname: href.clone(),
                    })
                }
            },
            SidebarEffect::DesktopVisibilityChanged { open } => {
                log::debug!("desktop sidebar open: {open}");
                None
            },
        }
    }

    /// Entries pushed by non-replacing navigation, oldest first.
    pub(crate) fn history(&self) -> &[String] {
        &self.history
    }

    fn current_href(&self) -> String {
        format!("{}{}", self.location.pathname, self.location.hash)
    }
}
