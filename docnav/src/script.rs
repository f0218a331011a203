use std::fs;
use std::path::Path;

use docnav_sidebar::SidebarCommand;
use serde::{Deserialize, Deserializer, de};

use crate::errors::CliError;

/// One entry of a replay script.
///
/// Category toggles bypass the command queue the same way a rendered
/// category writes its state directly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptStep {
    ToggleCategory { category: String, opened: bool },
    Command(SidebarCommand),
}

#[derive(Deserialize)]
struct CategoryToggle {
    category: String,
    opened: bool,
}

// A `command` key selects the command shape, anything else is a toggle.
impl<'de> Deserialize<'de> for ScriptStep {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("command").is_some() {
            return SidebarCommand::deserialize(value)
                .map(ScriptStep::Command)
                .map_err(de::Error::custom);
        }

        let toggle =
            CategoryToggle::deserialize(value).map_err(de::Error::custom)?;
        Ok(ScriptStep::ToggleCategory {
            category: toggle.category,
            opened: toggle.opened,
        })
    }
}

pub(crate) fn load_script(path: &Path) -> Result<Vec<ScriptStep>, CliError> {
    let payload =
        fs::read_to_string(path).map_err(|source| CliError::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&payload).map_err(|source| CliError::ScriptParse {
        path: path.to_path_buf(),
        source,
    })
}
