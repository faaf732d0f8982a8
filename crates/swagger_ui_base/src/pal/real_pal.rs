use std::fs;
use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use relative_path::RelativePathBuf;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::{SwaggerUiError, SwaggerUiResult, error::ErrorKind};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use std::fs instead of async or other crates?

Asset bundles and settings are read once during startup, before any request is served.
Synchronous std::fs keeps that path simple and leaves the async runtime choice to the host.
*/

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        path.as_relative().to_path(&self.base_dir)
    }

    fn file_error(path: PathBuf, source: std::io::Error) -> Box<SwaggerUiError> {
        Box::new(SwaggerUiError::new(ErrorKind::FileError { path, source }))
    }

    /// Build a GlobSet from the given glob patterns.
    #[instrument(skip(self))]
    fn build_glob_set(&self, globs: &[String]) -> SwaggerUiResult<GlobSet> {
        debug!("compiling {} glob patterns", globs.len());
        let mut builder = GlobSetBuilder::new();
        for (idx, glob) in globs.iter().enumerate() {
            let compiled = GlobBuilder::new(glob)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    debug!(index = idx, pattern = %glob, error = %e, "failed to compile glob pattern");
                    crate::err!("Invalid glob pattern '{}': {}", glob, e)
                })?;
            builder.add(compiled);
        }
        builder.build().map_err(|e| {
            debug!(error = %e, "failed to build glob set");
            crate::err!("Failed to build glob set: {}", e)
        })
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> SwaggerUiResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self))]
    fn read_executable_file(&self) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>> {
        let exe_path = std::env::current_exe().map_err(|e| {
            debug!("failed to get current executable path: {}", e);
            Self::file_error(PathBuf::from("<current_exe>"), e)
        })?;

        debug!(path = %exe_path.display(), "opening executable file");
        let file = fs::File::open(&exe_path).map_err(|e| {
            debug!("failed to open executable: {}", e);
            Self::file_error(exe_path, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Self::file_error(resolved, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path, globs = ?globs))]
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> SwaggerUiResult<Box<dyn Iterator<Item = SwaggerUiResult<FilePath>> + '_>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "starting directory walk");

        if !resolved.is_dir() {
            debug!("directory not found");
            return Err(Self::file_error(
                resolved,
                std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            ));
        }

        let glob_set = self.build_glob_set(globs)?;
        let base_path = path.clone();
        let iter = WalkDir::new(&resolved)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(e) if e.file_type().is_file() => {
                    let relative = e.path().strip_prefix(&resolved).ok()?;
                    // Backslashes on Windows become `/` here
                    let relative = RelativePathBuf::from_path(relative).ok()?;
                    if glob_set.is_match(relative.as_str()) {
                        Some(Ok(base_path.join(relative.as_str())))
                    } else {
                        None
                    }
                }
                Ok(_) => None,
                Err(e) => {
                    debug!(error = %e, "error walking directory");
                    Some(Err(Self::file_error(
                        e.path()
                            .map(|p| p.to_path_buf())
                            .unwrap_or_else(|| PathBuf::from("unknown")),
                        std::io::Error::other(e.to_string()),
                    )))
                }
            });

        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_file_exists() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("swagger.toml"), "title = 'x'").unwrap();

        assert!(pal.file_exists(&FilePath::from("swagger.toml")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("nonexistent.toml")).unwrap());
    }

    #[test]
    fn test_read_file_to_string() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("swagger.toml"), "title = 'Docs'").unwrap();

        let result = pal.read_file_to_string(&FilePath::from("swagger.toml")).unwrap();
        assert_eq!(result, "title = 'Docs'");
    }

    #[test]
    fn test_read_file_not_found() {
        let (_temp_dir, pal) = setup_test_dir();
        assert!(pal.read_file(&FilePath::from("nonexistent.txt")).is_err());
    }

    #[test]
    fn test_walk_directory_with_nested_glob() {
        let (temp_dir, pal) = setup_test_dir();
        fs::create_dir_all(temp_dir.path().join("ui/lib")).unwrap();
        fs::write(temp_dir.path().join("ui/index.html"), "").unwrap();
        fs::write(temp_dir.path().join("ui/lib/marked.js"), "").unwrap();
        fs::write(temp_dir.path().join("ui/notes.txt"), "").unwrap();

        let globs = vec!["**/*.js".to_string(), "**/*.html".to_string()];
        let mut results: Vec<FilePath> = pal
            .walk_directory(&FilePath::from("ui"), &globs)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        results.sort();

        assert_eq!(
            results,
            vec![
                FilePath::from("ui/index.html"),
                FilePath::from("ui/lib/marked.js")
            ]
        );
    }

    #[test]
    fn test_walk_directory_not_found() {
        let (_temp_dir, pal) = setup_test_dir();
        let result = pal.walk_directory(&FilePath::from("nonexistent"), &["**".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let (_temp_dir, pal) = setup_test_dir();
        let result = pal.walk_directory(&FilePath::from("."), &["[invalid".to_string()]);
        assert!(result.is_err());
    }
}
