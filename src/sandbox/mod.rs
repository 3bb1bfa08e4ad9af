use crate::errors::AgentboxError;
use std::path::{Component, Path, PathBuf};

/// A working directory that confines every tool operation.
///
/// The root is canonicalized once at construction and is immutable for the
/// lifetime of the value. Each call to [`Sandbox::resolve`] re-derives the
/// target path from scratch; there is no cached state between calls.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AgentboxError> {
        let root = root.into();
        let root = root.canonicalize().map_err(|e| {
            AgentboxError::Config(format!(
                "working directory \"{}\": {}",
                root.display(),
                e
            ))
        })?;
        if !root.is_dir() {
            return Err(AgentboxError::Config(format!(
                "working directory \"{}\" is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an untrusted relative path against the sandbox root.
    ///
    /// Containment is a component-wise subtree test (`Path::starts_with`),
    /// not a raw string-prefix comparison, so a sibling directory whose name
    /// shares a prefix with the root (`/tmp/ws` vs `/tmp/ws2`) is rejected.
    /// On failure no I/O beyond the path computation itself has occurred.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AgentboxError> {
        let resolved = resolve_path(&self.root.join(relative));
        if resolved == self.root || resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(AgentboxError::OutsideWorkspace(relative.to_string()))
        }
    }

    /// Render an absolute path inside the sandbox as a root-relative string
    /// for reports, so absolute host paths do not leak into tool output.
    pub fn relative_display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Resolve a path to absolute canonical form.
///
/// Uses canonicalize if the path exists (resolves symlinks). For non-existent
/// paths (e.g. write to a new file), try to canonicalize the parent directory
/// and append the filename. Final fallback: lexical normalization of the
/// already-absolute joined path.
fn resolve_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if let (Some(parent), Some(file_name)) = (path.parent(), path.file_name())
            && let Ok(parent_resolved) = parent.canonicalize()
        {
            return parent_resolved.join(file_name);
        }
        lexical_normalize(path)
    })
}

/// Normalize a path lexically (without touching the filesystem).
/// Resolves `.` and `..` components so that `/workspace/../etc/passwd`
/// correctly normalizes to `/etc/passwd` rather than passing through
/// as if it starts with `/workspace`.
pub(crate) fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                // Pop the last normal component (but never pop past root)
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            Component::CurDir => {} // skip "."
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
mod tests;
