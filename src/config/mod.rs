//! Layered configuration.
//!
//! Settings come from two files merged key by key:
//! 1. **User** - `~/.committer/config.yml`
//! 2. **Repository** - `<repo-root>/.committer/config.yml` (overrides user)
//!
//! ## Merge Strategy
//! - Shallow: a repository key replaces the user value outright
//! - Keys only in the user file survive
//! - Both files missing or empty is a [`NotSetup`](crate::error::ConfigError::NotSetup) error
//!
//! ## Failure Policy
//! - User file: a malformed or non-mapping file is a hard error
//! - Repository file: any failure is logged and treated as no override

mod loader;
mod merge;
mod store;
mod types;

pub use loader::{RepositoryConfig, load_from, load_repository, parse_document};
pub use merge::merge;
pub use store::ConfigStore;
pub use types::*;
