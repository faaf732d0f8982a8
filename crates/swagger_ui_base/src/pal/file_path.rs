use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/* 📖 # Why use RelativePathBuf for FilePath?

FilePath wraps RelativePathBuf so every PAL path is relative to the PAL's base directory.
Asset bundles use the same `/`-separated form for resource names on every platform, which
keeps derived request paths identical between Windows and Unix builds.
*/

/// Type-safe wrapper for file paths relative to the PAL base directory.
///
/// # Examples
///
/// ```
/// use swagger_ui_base::FilePath;
///
/// let dir = FilePath::from("assets/./swagger-ui");
/// let file = dir.join("lib/marked.js");
/// assert_eq!(file.as_str(), "assets/swagger-ui/lib/marked.js");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePathBuf as a reference.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }

    /// Consumes the FilePath and returns a PathBuf.
    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.0.as_str())
    }

    /// Joins a child path and normalizes `.` and `..` components.
    pub fn join(&self, child: impl AsRef<str>) -> FilePath {
        Self(self.0.join_normalized(child.as_ref()))
    }

    /// Returns the path with `.` and `..` components resolved (`.` becomes empty).
    pub fn normalized(&self) -> FilePath {
        Self(self.0.normalize())
    }

    /// Returns the remainder of this path below `base`, if it lies inside it.
    pub fn strip_prefix(&self, base: &FilePath) -> Option<FilePath> {
        let normalized = self.0.normalize();
        let base = base.0.normalize();
        normalized
            .strip_prefix(&base)
            .ok()
            .map(|rest| Self(rest.to_relative_path_buf()))
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<RelativePathBuf> for FilePath {
    fn from(p: RelativePathBuf) -> Self {
        Self(p)
    }
}

impl From<&RelativePath> for FilePath {
    fn from(p: &RelativePath) -> Self {
        Self(p.to_relative_path_buf())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.0
    }
}
