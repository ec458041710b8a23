//! Config file locations.
//!
//! Two candidate files are consulted:
//! - **User** - `~/.committer/config.yml`, always present as a path
//! - **Repository** - `<repo-root>/.committer/config.yml`, only when the
//!   working directory lies inside a git repository
//!
//! Repository discovery is delegated to a [`RepositoryRootResolver`] so the
//! store can be driven without shelling out to git.

use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Directory holding the config file, relative to home or repository root.
pub const CONFIG_DIR_NAME: &str = ".committer";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Outcome of asking for the enclosing repository root.
#[derive(Debug)]
pub enum RepositoryLookup {
    /// The working directory is inside a repository rooted here.
    Found(PathBuf),
    /// Not inside a repository.
    NotFound,
    /// The resolver itself failed (binary missing, bad output, ...).
    Failed(ConfigError),
}

impl RepositoryLookup {
    /// Collapse to the root path, treating both `NotFound` and `Failed` as absent.
    pub fn root(self) -> Option<PathBuf> {
        match self {
            RepositoryLookup::Found(root) => Some(root),
            RepositoryLookup::NotFound | RepositoryLookup::Failed(_) => None,
        }
    }
}

/// Source of the repository root.
pub trait RepositoryRootResolver: Send + Sync {
    fn repository_root(&self) -> RepositoryLookup;
}

impl<F> RepositoryRootResolver for F
where
    F: Fn() -> RepositoryLookup + Send + Sync,
{
    fn repository_root(&self) -> RepositoryLookup {
        self()
    }
}

/// Resolves the repository root with `git rev-parse --show-toplevel`.
#[derive(Debug, Clone, Default)]
pub struct GitRootResolver {
    /// Directory git runs in; the process working directory when `None`.
    working_dir: Option<PathBuf>,
}

impl GitRootResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git from `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

impl RepositoryRootResolver for GitRootResolver {
    fn repository_root(&self) -> RepositoryLookup {
        let mut cmd = Command::new("git");
        cmd.args(["rev-parse", "--show-toplevel"])
            .stdin(Stdio::null())
            .stderr(Stdio::null());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                return RepositoryLookup::Failed(ConfigError::Repository(format!(
                    "failed to execute git: {}",
                    e
                )));
            }
        };

        // git exits non-zero outside a work tree
        if !output.status.success() {
            return RepositoryLookup::NotFound;
        }

        match path_from_stdout(output.stdout) {
            Some(root) => RepositoryLookup::Found(root),
            None => RepositoryLookup::NotFound,
        }
    }
}

/// Raw git output to a path, dropping only the trailing line ending.
fn path_from_stdout(mut bytes: Vec<u8>) -> Option<PathBuf> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    if bytes.is_empty() {
        return None;
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStringExt;
        Some(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
    }
    #[cfg(not(unix))]
    {
        Some(PathBuf::from(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// Locations of the user-global and repository-level config files.
pub struct ConfigPaths {
    /// Directory holding the user-global file (`~/.committer`).
    user_dir: PathBuf,
    resolver: Box<dyn RepositoryRootResolver>,
}

impl fmt::Debug for ConfigPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigPaths")
            .field("user_dir", &self.user_dir)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Home directory plus git discovery from the process working directory.
    pub fn discover() -> Self {
        // Without a home directory the file is looked up relative to the working directory
        let user_dir = dirs::home_dir()
            .map(|h| h.join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        Self {
            user_dir,
            resolver: Box::new(GitRootResolver::new()),
        }
    }

    /// Explicit user config directory and repository resolver.
    pub fn with_resolver(
        user_dir: impl Into<PathBuf>,
        resolver: impl RepositoryRootResolver + 'static,
    ) -> Self {
        Self {
            user_dir: user_dir.into(),
            resolver: Box::new(resolver),
        }
    }

    /// The user-global config directory.
    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// The user-global config file. Never fails.
    pub fn user_config_path(&self) -> PathBuf {
        self.user_dir.join(CONFIG_FILE_NAME)
    }

    /// Ask the resolver for the repository-level config file.
    ///
    /// The tri-state is preserved so callers can tell "not a repository"
    /// from "resolver failed"; [`ConfigPaths::repository_config_path`]
    /// collapses both to `None`.
    pub fn lookup_repository_config(&self) -> RepositoryLookup {
        match self.resolver.repository_root() {
            RepositoryLookup::Found(root) => {
                let path = repository_config_file(&root);
                debug!(path = %path.display(), "Repository config path");
                RepositoryLookup::Found(path)
            }
            other => other,
        }
    }

    /// The repository-level config file, or `None` outside a repository or
    /// when the resolver fails.
    pub fn repository_config_path(&self) -> Option<PathBuf> {
        self.lookup_repository_config().root()
    }
}

/// `<root>/.committer/config.yml`.
pub fn repository_config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}
