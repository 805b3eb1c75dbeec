//! Workspace path guard.
//!
//! Every plan path supplied by a caller is resolved against a fixed workspace
//! root. Paths that would land outside the root after normalization, whether
//! through `..` segments, an absolute path or a symlink, are rejected before
//! any read or write happens. Symlinks are followed even when their target
//! does not exist yet, since a write through a dangling link lands on the
//! target.

use std::{
    ffi::OsString,
    fs, io,
    path::{Component, Path, PathBuf},
};

use log::debug;

use crate::error::{IoResultExt, PlannerError, Result};

/// Symlink hops allowed while resolving one path.
const MAX_SYMLINK_HOPS: usize = 40;

/// A canonical directory that bounds every path the planner touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates a workspace rooted at `root`, which must be an existing
    /// directory. The root is canonicalized so containment checks compare
    /// like with like.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().fs_context("resolve workspace root", root)?;
        if !root.is_dir() {
            return Err(PlannerError::Configuration {
                message: format!("workspace root '{}' is not a directory", root.display()),
            });
        }
        Ok(Self { root })
    }

    /// Creates a workspace rooted at the current working directory.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().fs_context("read current directory", ".")?;
        Self::new(cwd)
    }

    /// The canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a caller-supplied path to an absolute path inside the root.
    ///
    /// `~` expands to the home directory, relative paths are joined onto the
    /// root, and every symlink along the path is followed, dangling ones
    /// included. The target itself does not need to exist.
    ///
    /// # Errors
    ///
    /// * `PlannerError::OutsideWorkspace` - When the resolved path is not
    ///   under the root
    /// * `PlannerError::FileSystem` - When symlinks loop or a link cannot be
    ///   read
    pub fn resolve(&self, path_value: &str) -> Result<PathBuf> {
        let raw = expand_home(path_value);
        let joined = if raw.is_absolute() {
            raw
        } else {
            self.root.join(raw)
        };
        let joined = normalize_lexically(&joined);
        let resolved = resolve_links(&joined).fs_context("resolve path", &joined)?;

        if !resolved.starts_with(&self.root) {
            return Err(PlannerError::OutsideWorkspace {
                path: path_value.to_string(),
                root: self.root.display().to_string(),
            });
        }

        debug!("Resolved '{path_value}' to {}", resolved.display());
        Ok(resolved)
    }

    /// Renders a path inside the workspace relative to the root, using `/`
    /// separators. Paths outside the root are rendered as given.
    pub fn relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.display().to_string(),
        }
    }
}

fn expand_home(path_value: &str) -> PathBuf {
    if path_value == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path_value.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path_value)
}

/// Folds `.` and `..` segments without touching the filesystem. `..` at the
/// filesystem root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Follows symlinks one component at a time, like a non-strict `realpath`.
///
/// A link is replaced by its target whether or not the target exists. Once a
/// component is missing, the rest of the path is appended as given.
fn resolve_links(path: &Path) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();
    let mut pending = Vec::new();
    queue_components(path, &mut resolved, &mut pending);

    let mut hops = 0;
    let mut exists = true;
    while let Some(part) = pending.pop() {
        if part == ".." {
            resolved.pop();
            continue;
        }
        if part == "." {
            continue;
        }
        resolved.push(&part);
        if !exists {
            continue;
        }

        match fs::symlink_metadata(&resolved) {
            Ok(meta) if meta.file_type().is_symlink() => {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::other("too many levels of symbolic links"));
                }
                let target = fs::read_link(&resolved)?;
                debug!("Following {} -> {}", resolved.display(), target.display());
                resolved.pop();
                queue_components(&target, &mut resolved, &mut pending);
            }
            Ok(_) => {}
            Err(_) => exists = false,
        }
    }
    Ok(resolved)
}

/// Pushes the components of `path` onto the stack so they pop in order. An
/// absolute path restarts resolution from its root.
fn queue_components(path: &Path, resolved: &mut PathBuf, pending: &mut Vec<OsString>) {
    if path.has_root() {
        *resolved = PathBuf::new();
    }
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            other => parts.push(other.as_os_str().to_os_string()),
        }
    }
    pending.extend(parts.into_iter().rev());
}
