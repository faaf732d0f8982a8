/* 📖 # Why have swagger_ui_base as a core library?
swagger_ui_base provides the error handling, tracing setup and platform abstraction used by the engine crate.
Keeping them apart lets the engine depend on plain traits (Pal, HttpService) instead of the filesystem or a server.
*/

pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, ResultExt, SwaggerUiError, SwaggerUiResult};
pub use pal::{FilePath, MockPal, Pal, PalHandle, ReadSeek, RealPal};
