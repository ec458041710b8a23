//! Per-key merging of configuration layers.
//!
//! Merging is shallow: a key present in the overlay replaces the base value
//! outright, including when the overlay value is null. Keys only in the base
//! survive.

use super::types::ConfigMap;

/// Merge `overlay` onto `base`, with `overlay` taking precedence per key.
///
/// # Example
/// ```
/// use committer_config::config::{ConfigMap, merge};
///
/// let mut user = ConfigMap::new();
/// user.insert("api_key".into(), "abc".into());
/// user.insert("model".into(), "m1".into());
///
/// let mut repo = ConfigMap::new();
/// repo.insert("model".into(), "m2".into());
///
/// let merged = merge(user, repo);
/// assert_eq!(merged["api_key"].as_str(), Some("abc"));
/// assert_eq!(merged["model"].as_str(), Some("m2"));
/// ```
pub fn merge(base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    let mut merged = base;
    merged.extend(overlay);
    merged
}
