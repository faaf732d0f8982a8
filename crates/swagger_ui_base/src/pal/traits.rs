use std::io::{Read, Seek};
use std::sync::Arc;

use crate::SwaggerUiResult;
use crate::error::{ErrorKind, SwaggerUiError};

use super::file_path::FilePath;

/// Trait combining Read + Seek for file operations.
///
/// Zip archives need to seek to the central directory, so file handles returned by the PAL
/// support both.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/* 📖 # Why is Pal a trait instead of a struct?

Using a trait enables two key benefits:
1. **Testability**: MockPal implements Pal for fast, deterministic tests without filesystem side effects
2. **Flexibility**: Code depends on the abstraction, not the concrete implementation

The asset engine only ever reads: settings files, asset directories and the executable.
*/

/// Platform Abstraction Layer (PAL) trait providing read-only filesystem operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> SwaggerUiResult<bool>;

    /// Read the executable file (current program binary).
    fn read_executable_file(&self) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> SwaggerUiResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents into memory.
    fn read_file_to_bytes(&self, path: &FilePath) -> SwaggerUiResult<Vec<u8>> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(SwaggerUiError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: e,
            }))
        })?;
        Ok(contents)
    }

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> SwaggerUiResult<String> {
        let contents = self.read_file_to_bytes(path)?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Walk a directory tree, yielding paths matching the given glob patterns.
    ///
    /// Globs are matched against the path relative to `path`; the yielded paths are relative
    /// to the PAL base directory (i.e. they include `path` as prefix).
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> SwaggerUiResult<Box<dyn Iterator<Item = SwaggerUiResult<FilePath>> + '_>>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe sharing.
///
/// # Examples
///
/// ```no_run
/// use swagger_ui_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
