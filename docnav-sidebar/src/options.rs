use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Configuration knobs that influence how the sidebar store behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
    /// Project title used to namespace persisted category state.
    pub project: String,
    /// Follow the location hash (API reference style pages).
    pub should_handle_hash_change: bool,
    /// Follow the route pathname.
    pub should_handle_path_change: bool,
    /// Remember category open/closed state across sessions.
    pub persist_category_state: bool,
    /// Whether items come only from the seed or are also added at runtime.
    pub is_sidebar_static: bool,
    /// Skip the slide transition when switching nested sidebars.
    pub disable_active_transition: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            project: String::from("docs"),
            should_handle_hash_change: false,
            should_handle_path_change: true,
            persist_category_state: true,
            is_sidebar_static: true,
            disable_active_transition: true,
        }
    }
}

impl SidebarOptions {
    /// Options for pages that track sections through the location hash.
    pub fn hash_driven(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            should_handle_hash_change: true,
            should_handle_path_change: false,
            persist_category_state: false,
            is_sidebar_static: false,
            disable_active_transition: false,
        }
    }
}

/// How options were obtained from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading options from disk.
#[derive(Debug, Clone)]
pub struct OptionsLoad {
    options: SidebarOptions,
    status: OptionsLoadStatus,
}

impl OptionsLoad {
    pub fn new(options: SidebarOptions, status: OptionsLoadStatus) -> Self {
        Self { options, status }
    }

    pub fn status(&self) -> &OptionsLoadStatus {
        &self.status
    }

    /// Consume the value and return both payload and status.
    pub fn into_parts(self) -> (SidebarOptions, OptionsLoadStatus) {
        (self.options, self.status)
    }
}

/// Load options from a JSON file.
///
/// A missing file yields defaults. Malformed JSON also yields defaults but
/// reports the parse failure through [`OptionsLoadStatus::Invalid`].
pub fn load_options_from_path(path: &Path) -> Result<OptionsLoad> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(OptionsLoad::new(
                SidebarOptions::default(),
                OptionsLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<SidebarOptions>(&data) {
        Ok(options) => Ok(OptionsLoad::new(options, OptionsLoadStatus::Loaded)),
        Err(err) => Ok(OptionsLoad::new(
            SidebarOptions::default(),
            OptionsLoadStatus::Invalid(format!("{err}")),
        )),
    }
}
