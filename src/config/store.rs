//! Lazily-loaded, memoized configuration store.
//!
//! The store resolves the user-global and repository-level files on first
//! access and keeps the merged map until [`ConfigStore::reload`] is called.
//! The cached map is swapped as a whole through `ArcSwapOption`, so readers
//! only ever observe a complete map. Loads are serialized by a mutex.

use super::loader::{RepositoryConfig, load_from, load_repository};
use super::merge::merge;
use super::types::{ConfigMap, ConfigValue, Settings, normalize_key};
use crate::error::{ConfigError, ConfigResult};
use crate::paths::ConfigPaths;
use arc_swap::ArcSwapOption;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Example shown after `setup` writes the default file.
const SETUP_EXAMPLE: &str = "\
Please edit this file to add your Anthropic API key.
Example config format:
---
api_key: your_api_key_here
model: claude-3-7-sonnet-20250219
scopes:
  - feature
  - api
  - ui
";

/// Resolved configuration for one process.
///
/// Construct once and pass by reference to whatever needs configuration.
pub struct ConfigStore {
    paths: ConfigPaths,
    cache: ArcSwapOption<ConfigMap>,
    load_lock: Mutex<()>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("paths", &self.paths)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigStore {
    /// Store over the given paths. Nothing is read until first access.
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            cache: ArcSwapOption::empty(),
            load_lock: Mutex::new(()),
        }
    }

    /// Store over `~/.committer/config.yml` and the enclosing git repository.
    pub fn discover() -> Self {
        Self::new(ConfigPaths::discover())
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Whether a merged map is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.cache.load().is_some()
    }

    /// Resolve both files and merge them without touching the cache.
    ///
    /// The user-global file is authoritative: read, parse, and format errors
    /// propagate. The repository file is best-effort: any failure locating or
    /// loading it counts as no override.
    pub fn load(&self) -> ConfigResult<ConfigMap> {
        let user_path = self.paths.user_config_path();
        let user = load_from(&user_path)?;

        let repository = match load_repository(&self.paths) {
            RepositoryConfig::Loaded { path, map } => {
                debug!(path = %path.display(), keys = map.len(), "Repository config");
                map
            }
            other => other.into_map(),
        };

        if user.is_empty() && repository.is_empty() {
            return Err(ConfigError::NotSetup { user_path });
        }

        Ok(merge(user, repository))
    }

    /// The cached map, loading it on first use.
    ///
    /// A failed load is not cached; the next call tries again.
    fn resolved(&self) -> ConfigResult<Arc<ConfigMap>> {
        if let Some(map) = self.cache.load_full() {
            return Ok(map);
        }

        let _guard = self.lock();
        // Another caller may have loaded while we waited
        if let Some(map) = self.cache.load_full() {
            return Ok(map);
        }

        let map = Arc::new(self.load()?);
        self.cache.store(Some(Arc::clone(&map)));
        Ok(map)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), so a poisoned lock is still usable
        self.load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up one value.
    ///
    /// `":model"` and `"model"` name the same key.
    pub fn get(&self, key: &str) -> ConfigResult<Option<ConfigValue>> {
        let map = self.resolved()?;
        Ok(map.get(normalize_key(key)).cloned())
    }

    /// A string value, or `None` when missing or not a string.
    pub fn get_str(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self
            .get(key)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// A copy of the merged map. Mutating it does not affect the cache.
    pub fn as_mapping(&self) -> ConfigResult<ConfigMap> {
        Ok(self.resolved()?.as_ref().clone())
    }

    /// Typed view of the well-known keys.
    pub fn settings(&self) -> ConfigResult<Settings> {
        let map = self.resolved()?;
        Ok(Settings::from_map(&map))
    }

    /// Discard the cached map and load it again.
    ///
    /// On failure the cache stays empty and the error is returned.
    pub fn reload(&self) -> ConfigResult<()> {
        let _guard = self.lock();
        self.cache.store(None);

        let map = self.load()?;
        info!(keys = map.len(), "Configuration reloaded");
        self.cache.store(Some(Arc::new(map)));
        Ok(())
    }

    /// Write the default config file to the user-global path.
    ///
    /// Creates the config directory if needed and overwrites any existing
    /// file. Writes a confirmation naming the path to `out`. The cache is
    /// left alone; call [`ConfigStore::reload`] to pick up the new file.
    pub fn setup(&self, out: &mut impl Write) -> ConfigResult<PathBuf> {
        let dir = self.paths.user_dir();
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = self.paths.user_config_path();
        let document = Settings::default_yaml()?;
        std::fs::write(&path, document).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote default config");

        write_setup_message(out, &path).map_err(ConfigError::Output)?;
        Ok(path)
    }
}

fn write_setup_message(out: &mut impl Write, path: &Path) -> std::io::Result<()> {
    writeln!(out, "Created config file at:")?;
    writeln!(out, "{}", path.display())?;
    writeln!(out)?;
    out.write_all(SETUP_EXAMPLE.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::RepositoryLookup;
    use std::fs;
    use tempfile::TempDir;

    fn store_without_repository(temp: &TempDir) -> ConfigStore {
        let user_dir = temp.path().join(".committer");
        ConfigStore::new(ConfigPaths::with_resolver(user_dir, || {
            RepositoryLookup::NotFound
        }))
    }

    fn write_user(temp: &TempDir, content: &str) {
        let dir = temp.path().join(".committer");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
    }

    #[test]
    fn test_nothing_configured_is_not_setup() {
        let temp = TempDir::new().unwrap();
        let store = store_without_repository(&temp);

        let err = store.load().unwrap_err();
        assert!(err.is_not_setup());
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_lazy_load_and_memoize() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "model: m1\n");
        let store = store_without_repository(&temp);
        assert!(!store.is_loaded());

        assert_eq!(store.get_str("model").unwrap().as_deref(), Some("m1"));
        assert!(store.is_loaded());

        write_user(&temp, "model: m2\n");
        assert_eq!(store.get_str("model").unwrap().as_deref(), Some("m1"));

        store.reload().unwrap();
        assert_eq!(store.get_str("model").unwrap().as_deref(), Some("m2"));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let store = store_without_repository(&temp);

        assert!(store.get("model").unwrap_err().is_not_setup());
        assert!(!store.is_loaded());

        write_user(&temp, "model: m1\n");
        assert_eq!(store.get_str("model").unwrap().as_deref(), Some("m1"));
    }

    #[test]
    fn test_failed_reload_discards_cache() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "model: m1\n");
        let store = store_without_repository(&temp);
        store.get("model").unwrap();

        write_user(&temp, "- not\n- a mapping\n");
        let err = store.reload().unwrap_err();
        assert!(matches!(err, ConfigError::Format { .. }));
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_symbolic_and_textual_keys_match() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "api_key: abc\n");
        let store = store_without_repository(&temp);

        assert_eq!(store.get(":api_key").unwrap(), store.get("api_key").unwrap());
        assert_eq!(store.get_str(":api_key").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "api_key: abc\n");
        let store = store_without_repository(&temp);

        assert_eq!(store.get("scopes").unwrap(), None);
    }

    #[test]
    fn test_as_mapping_is_a_copy() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "api_key: abc\n");
        let store = store_without_repository(&temp);

        let mut copy = store.as_mapping().unwrap();
        copy.insert("api_key".into(), "changed".into());
        copy.insert("extra".into(), ConfigValue::Null);

        let fresh = store.as_mapping().unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh["api_key"].as_str(), Some("abc"));
    }

    #[test]
    fn test_settings_reads_merged_map() {
        let temp = TempDir::new().unwrap();
        write_user(&temp, "api_key: abc\nscopes: [feature, ui]\n");
        let store = store_without_repository(&temp);

        let settings = store.settings().unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
        assert_eq!(settings.model, crate::config::DEFAULT_MODEL);
        assert_eq!(
            settings.scopes,
            Some(vec!["feature".to_string(), "ui".to_string()])
        );
    }

    #[test]
    fn test_setup_writes_default() {
        let temp = TempDir::new().unwrap();
        let store = store_without_repository(&temp);
        let mut out = Vec::new();

        let path = store.setup(&mut out).unwrap();
        assert_eq!(path, temp.path().join(".committer").join("config.yml"));

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(&path.display().to_string()));

        let settings = store.settings().unwrap();
        assert_eq!(settings, Settings::default());
    }
}
