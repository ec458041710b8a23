//! Committer configuration library
//!
//! Resolves the API key, model, and scopes for the committer CLI from the
//! user-global and repository-level config files.

pub mod cli;
pub mod config;
pub mod error;
pub mod paths;
