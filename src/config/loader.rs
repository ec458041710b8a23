//! Reading a single config file into a [`ConfigMap`].
//!
//! A missing file is an empty mapping. A present file must parse as YAML and
//! its top level must be a mapping; anything else is an error. An empty or
//! comment-only document parses as null and is read as an empty mapping.

use super::types::{ConfigMap, ConfigValue, is_symbolic_key, key_from_yaml};
use crate::error::{ConfigError, ConfigResult};
use crate::paths::{ConfigPaths, RepositoryLookup};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load one config file.
///
/// Returns an empty map when `path` does not exist. Read and parse failures
/// of an existing file propagate.
pub fn load_from(path: &Path) -> ConfigResult<ConfigMap> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file");
        return Ok(ConfigMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_document(&content, path)?;
    debug!(path = %path.display(), keys = map.len(), "Loaded config file");
    Ok(map)
}

/// Parse YAML text into a flat map. `path` is used for error context only.
pub fn parse_document(content: &str, path: &Path) -> ConfigResult<ConfigMap> {
    let value: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match value {
        Value::Null => return Ok(ConfigMap::new()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ConfigError::Format {
                path: path.to_path_buf(),
            });
        }
    };

    // Textual keys win over their symbolic spelling regardless of file order
    let mut map = ConfigMap::new();
    let mut symbolic = Vec::new();
    for (key, value) in mapping {
        let Some(name) = key_from_yaml(&key) else {
            warn!(path = %path.display(), key = ?key, "Skipping non-scalar config key");
            continue;
        };
        if is_symbolic_key(&key) {
            symbolic.push((name, value));
        } else {
            map.insert(name, ConfigValue::from(value));
        }
    }
    for (name, value) in symbolic {
        if map.contains_key(&name) {
            warn!(
                path = %path.display(),
                key = %name,
                "Key given in both :symbol and text form; using text form"
            );
            continue;
        }
        map.insert(name, ConfigValue::from(value));
    }
    Ok(map)
}

/// Outcome of loading the repository-level file.
#[derive(Debug)]
pub enum RepositoryConfig {
    /// The file was read; the map may still be empty.
    Loaded { path: PathBuf, map: ConfigMap },
    /// Not inside a repository.
    NotFound,
    /// Resolver, read, or parse failure.
    Failed(ConfigError),
}

impl RepositoryConfig {
    /// The mapping to merge: `NotFound` and `Failed` both count as empty.
    pub fn into_map(self) -> ConfigMap {
        match self {
            RepositoryConfig::Loaded { map, .. } => map,
            RepositoryConfig::NotFound => ConfigMap::new(),
            RepositoryConfig::Failed(err) => {
                warn!(error = %err, "Ignoring repository config");
                ConfigMap::new()
            }
        }
    }
}

/// Locate and load the repository-level file.
pub fn load_repository(paths: &ConfigPaths) -> RepositoryConfig {
    let path = match paths.lookup_repository_config() {
        RepositoryLookup::Found(path) => path,
        RepositoryLookup::NotFound => {
            debug!("Not inside a repository");
            return RepositoryConfig::NotFound;
        }
        RepositoryLookup::Failed(err) => return RepositoryConfig::Failed(err),
    };

    match load_from(&path) {
        Ok(map) => RepositoryConfig::Loaded { path, map },
        Err(err) => RepositoryConfig::Failed(err),
    }
}
