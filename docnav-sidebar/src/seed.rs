use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{Result, SidebarError};
use crate::model::Sidebar;

/// Parse a JSON array of sidebars.
pub fn sidebars_from_str(payload: &str) -> Result<Vec<Sidebar>> {
    let sidebars: Vec<Sidebar> = serde_json::from_str(payload)?;
    validate(&sidebars)?;
    Ok(sidebars)
}

/// Read and parse a seed file.
pub fn load_sidebars_from_path(path: &Path) -> Result<Vec<Sidebar>> {
    let payload = fs::read_to_string(path)?;
    let sidebars = sidebars_from_str(&payload)?;
    log::debug!(
        "loaded {} sidebars from {}",
        sidebars.len(),
        path.display()
    );
    Ok(sidebars)
}

// Root ids must be unique and non-empty; everything keys off them.
fn validate(sidebars: &[Sidebar]) -> Result<()> {
    let mut seen = HashSet::new();
    for sidebar in sidebars {
        if sidebar.sidebar_id.is_empty() {
            return Err(SidebarError::InvalidSeed {
                message: format!(
                    "sidebar \"{}\" has an empty id",
                    sidebar.title
                ),
            });
        }
        if !seen.insert(sidebar.sidebar_id.as_str()) {
            return Err(SidebarError::InvalidSeed {
                message: format!(
                    "duplicate sidebar id \"{}\"",
                    sidebar.sidebar_id
                ),
            });
        }
    }

    Ok(())
}
