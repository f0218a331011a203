use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Key under which the desktop "hidden" flag is stored.
pub const HIDE_SIDEBAR_KEY: &str = "hide_sidebar";

/// Durable string key/value storage, the shape of browser local storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store used by tests and by hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// Every write rewrites the file atomically through a temporary sibling.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user config directory.
    pub fn default_location() -> Self {
        Self::new(default_storage_path())
    }

    /// Return the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            },
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let payload = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.path, payload.as_bytes())?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// Storage key holding the category state of `project`.
pub fn categories_key(project: &str) -> String {
    format!("{project}_categories")
}

/// Read the persisted open/closed state of a category.
pub fn load_category_state<S: KeyValueStore + ?Sized>(
    store: &S,
    project: &str,
    title: &str,
) -> Result<Option<bool>> {
    let data = read_categories(store, project)?;

    Ok(data
        .get(project)
        .and_then(|categories| categories.get(title))
        .copied())
}

/// Persist the open/closed state of a category for `project`.
pub fn save_category_state<S: KeyValueStore + ?Sized>(
    store: &mut S,
    project: &str,
    title: &str,
    opened: bool,
) -> Result<()> {
    let mut data = read_categories(store, project)?;
    data.entry(project.to_string())
        .or_default()
        .insert(title.to_string(), opened);

    let payload = serde_json::to_string(&data)?;
    store.set(&categories_key(project), &payload)
}

/// Read the persisted desktop visibility.
///
/// The stored value is the "hidden" flag, so `"false"` means open.
pub fn load_desktop_open<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<bool>> {
    Ok(store
        .get(HIDE_SIDEBAR_KEY)?
        .map(|hidden| hidden == "false"))
}

/// Persist desktop visibility as the inverted "hidden" flag.
pub fn save_desktop_open<S: KeyValueStore + ?Sized>(
    store: &mut S,
    open: bool,
) -> Result<()> {
    let hidden = if open { "false" } else { "true" };
    store.set(HIDE_SIDEBAR_KEY, hidden)
}

type CategoryData = BTreeMap<String, BTreeMap<String, bool>>;

fn read_categories<S: KeyValueStore + ?Sized>(
    store: &S,
    project: &str,
) -> Result<CategoryData> {
    match store.get(&categories_key(project))? {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(CategoryData::new()),
    }
}

fn default_storage_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("docnav")
            .join("storage.json");
    }

    std::env::temp_dir().join("docnav").join("storage.json")
}

fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::errors::SidebarError;

    #[test]
    fn given_saved_category_when_loaded_then_state_round_trips() {
        let mut store = MemoryStore::default();

        save_category_state(&mut store, "Medusa", "Installation", false)
            .expect("category state should save");

        assert_eq!(
            load_category_state(&store, "Medusa", "Installation")
                .expect("category state should load"),
            Some(false)
        );
        assert_eq!(
            load_category_state(&store, "Medusa", "Upgrade")
                .expect("category state should load"),
            None
        );
    }

    #[test]
    fn given_two_projects_when_saved_then_states_do_not_leak() {
        let mut store = MemoryStore::default();

        save_category_state(&mut store, "Docs", "Guides", true)
            .expect("category state should save");

        assert_eq!(
            load_category_state(&store, "Api", "Guides")
                .expect("category state should load"),
            None
        );
        let raw = store
            .get("Docs_categories")
            .expect("raw value should load")
            .expect("raw value should exist");
        assert_eq!(raw, r#"{"Docs":{"Guides":true}}"#);
    }

    #[test]
    fn given_hidden_flag_when_loaded_then_visibility_is_inverted() {
        let mut store = MemoryStore::default();
        assert_eq!(load_desktop_open(&store).expect("should load"), None);

        save_desktop_open(&mut store, false).expect("should save");

        assert_eq!(
            store.get(HIDE_SIDEBAR_KEY).expect("should load").as_deref(),
            Some("true")
        );
        assert_eq!(load_desktop_open(&store).expect("should load"), Some(false));
    }

    #[test]
    fn given_corrupt_category_payload_when_loaded_then_json_error() {
        let mut store = MemoryStore::default();
        store
            .set("Docs_categories", "{ not json")
            .expect("raw value should store");

        let result = load_category_state(&store, "Docs", "Guides");

        assert!(matches!(result, Err(SidebarError::Json(_))));
    }

    #[test]
    fn given_file_store_when_set_and_reopened_then_values_persist() {
        let root = test_temp_dir("file_store");
        let path = root.join("nested").join("storage.json");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("missing").expect("should read"), None);
        save_desktop_open(&mut store, true).expect("should save");
        save_category_state(&mut store, "Docs", "Guides", true)
            .expect("should save");

        let reopened = JsonFileStore::new(&path);
        assert_eq!(load_desktop_open(&reopened).expect("should load"), Some(true));
        assert_eq!(
            load_category_state(&reopened, "Docs", "Guides")
                .expect("should load"),
            Some(true)
        );
        assert!(!path.with_extension("json.tmp").exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "docnav-storage-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
