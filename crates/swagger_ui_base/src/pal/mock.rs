use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::SwaggerUiResult;
use crate::error::{ErrorKind, SwaggerUiError};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use a map behind Arc<Mutex<..>> for MockPal storage?

1. **Speed**: No filesystem I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem
3. **Shared**: Clones of a MockPal (and PalHandles wrapping it) see the same files,
   so a test can add files after handing the PAL to the code under test

A BTreeMap keeps directory walks in a stable order.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use swagger_ui_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("swagger.toml"), b"title = 'Docs'".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("swagger.toml")).unwrap();
/// assert_eq!(content, "title = 'Docs'");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<BTreeMap<FilePath, Vec<u8>>>>,
    executable: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.lock_files().insert(path.normalized(), content);
    }

    /// Set the executable file content.
    pub fn set_executable(&self, content: Vec<u8>) {
        *self
            .executable
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(content);
    }

    fn lock_files(&self) -> MutexGuard<'_, BTreeMap<FilePath, Vec<u8>>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn build_glob_set(globs: &[String]) -> SwaggerUiResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let compiled = GlobBuilder::new(glob)
                .literal_separator(true)
                .build()
                .map_err(|e| crate::err!("Invalid glob pattern '{}': {}", glob, e))?;
            builder.add(compiled);
        }
        builder
            .build()
            .map_err(|e| crate::err!("Failed to build glob set: {}", e))
    }

    fn not_found(path: &FilePath, what: &str) -> Box<SwaggerUiError> {
        Box::new(SwaggerUiError::new(ErrorKind::FileError {
            path: path.as_path().to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found: {}", what, path),
            ),
        }))
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> SwaggerUiResult<bool> {
        Ok(self.lock_files().contains_key(&path.normalized()))
    }

    fn read_executable_file(&self) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>> {
        let executable = self
            .executable
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let content = executable
            .as_ref()
            .ok_or_else(|| crate::err!("No executable set in MockPal"))?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn read_file(&self, path: &FilePath) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>> {
        let content = self
            .lock_files()
            .get(&path.normalized())
            .ok_or_else(|| Self::not_found(path, "File"))?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> SwaggerUiResult<Box<dyn Iterator<Item = SwaggerUiResult<FilePath>> + '_>> {
        let glob_set = Self::build_glob_set(globs)?;
        let files = self.lock_files();
        let inside: Vec<(FilePath, FilePath)> = files
            .keys()
            .filter_map(|file| file.strip_prefix(path).map(|rest| (file.clone(), rest)))
            .collect();
        if inside.is_empty() && !path.normalized().as_str().is_empty() {
            return Err(Self::not_found(path, "Directory"));
        }
        let matching: Vec<FilePath> = inside
            .into_iter()
            .filter(|(_, relative)| glob_set.is_match(relative.as_str()))
            .map(|(file, _)| file)
            .collect();
        Ok(Box::new(matching.into_iter().map(Ok)))
    }
}
