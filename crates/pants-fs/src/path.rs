//! Normalized path handling with purely lexical operations
//!
//! Nothing in this module touches the filesystem except the explicit
//! `exists`/`is_file`/`is_dir` probes. Symlinks are never resolved: paths
//! handed to the bootstrap are untrusted strings and are only cleaned and
//! compared component-wise.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A path normalized to forward slashes with `.`/`..`/empty components
/// resolved lexically.
///
/// - Backslashes become forward slashes.
/// - Repeated separators collapse (a leading `//` network prefix is kept).
/// - `.` components are dropped; `..` pops the previous component. Above the
///   root of an absolute path `..` is discarded; at the start of a relative
///   path it is kept.
/// - Trailing separators are removed. The empty relative path is `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path starts at a root (`/` or a `//` network prefix).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Check if this appears to be a network path (`//server/share`).
    pub fn is_network_path(&self) -> bool {
        self.inner.starts_with("//")
    }

    /// Join this path with a segment and normalize the result.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(idx) if idx > 0 && !(self.is_network_path() && idx == 1) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last().filter(|name| *name != "..")
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Iterate over the non-root components of the path.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner
            .trim_start_matches('/')
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
    }

    /// Compute this path relative to `base` using only string manipulation.
    ///
    /// A relative `self` is interpreted as relative to `base`. The result is
    /// `.` when both name the same location and starts with `..` components
    /// when `self` lies outside `base`.
    pub fn relative_to(&self, base: &NormalizedPath) -> NormalizedPath {
        let target = if self.is_absolute() || !base.is_absolute() {
            self.clone()
        } else {
            base.join(&self.inner)
        };

        let target_parts: Vec<&str> = target.components().collect();
        let base_parts: Vec<&str> = base.components().collect();
        let common = target_parts
            .iter()
            .zip(&base_parts)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = std::iter::repeat_n("..", base_parts.len() - common).collect();
        parts.extend_from_slice(&target_parts[common..]);

        if parts.is_empty() {
            Self {
                inner: ".".to_string(),
            }
        } else {
            Self {
                inner: parts.join("/"),
            }
        }
    }

    /// Strip `root` from the front of this path on a directory boundary.
    ///
    /// Never produces `..`: returns `None` when `root` is not a prefix of this
    /// path, and `Some("")` when both are equal.
    pub fn strip_root(&self, root: &NormalizedPath) -> Option<&str> {
        let prefix = root.inner.strip_suffix('/').unwrap_or(&root.inner);
        let rest = self.inner.strip_prefix(prefix)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Resolve empty, `.` and `..` components of a forward-slash path.
fn clean(path: &str) -> String {
    let (prefix, rest) = if path.starts_with("//") && !path.starts_with("///") {
        ("//", &path[2..])
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        ("", path)
    };
    let absolute = !prefix.is_empty();

    let mut components: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => match components.last() {
                Some(&last) if last != ".." => {
                    components.pop();
                }
                _ if absolute => {}
                _ => components.push(".."),
            },
            other => components.push(other),
        }
    }

    let joined = components.join("/");
    match (joined.is_empty(), absolute) {
        (true, true) => prefix.to_string(),
        (true, false) => ".".to_string(),
        (false, _) => format!("{prefix}{joined}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
