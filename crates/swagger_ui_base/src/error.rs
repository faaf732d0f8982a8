use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate beyond tracing-error
- More transparency into error handling logic
- The asset engine needs a small set of well known failure kinds that callers
  (the HTTP adapter, startup validation) match on
 */

/// Error variants that can occur while configuring or serving UI assets.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// A template token name outside the fixed token set was referenced
    InvalidToken { name: String },

    /// No asset is registered for the requested path
    AssetNotFound { path: String },

    /// A registered asset's backing bytes could not be loaded
    ResourceLoad {
        bundle: String,
        resource: String,
        reason: String,
    },

    /// A configuration value could not be serialized to its string form
    Serialization { message: String },

    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Multiple errors occurred during batch operations
    Multiple {
        errors: Vec<SwaggerUiError>,
        count: usize,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why separate ErrorKind and SwaggerUiError?
ErrorKind carries the structural variant callers pattern match on (e.g. the HTTP
adapter turns AssetNotFound into a 404). SwaggerUiError wraps it with the runtime
context stack, an optional cause and the span trace captured at construction time.
*/

/// Error type wrapping an [`ErrorKind`] with context, an optional cause and a span trace.
pub struct SwaggerUiError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<SwaggerUiError>>,
    span_trace: SpanTrace,
}

impl SwaggerUiError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a catch-all error with the given message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    pub fn invalid_token(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken { name: name.into() })
    }

    pub fn asset_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssetNotFound { path: path.into() })
    }

    pub fn resource_load(
        bundle: impl Into<String>,
        resource: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ResourceLoad {
            bundle: bundle.into(),
            resource: resource.into(),
            reason: reason.into(),
        })
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization {
            message: message.into(),
        })
    }

    /// Combines several errors into one `Multiple` error.
    pub fn multiple(errors: Vec<SwaggerUiError>) -> Self {
        let count = errors.len();
        Self::new(ErrorKind::Multiple { errors, count })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that caused this one.
    pub fn caused_by(mut self, cause: SwaggerUiError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings in the order they were added.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    pub fn cause(&self) -> Option<&SwaggerUiError> {
        self.cause.as_deref()
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn is_asset_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::AssetNotFound { .. })
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InvalidToken { name } => {
                write!(f, "Unknown template token '{}'", name)
            }
            ErrorKind::AssetNotFound { path } => {
                write!(f, "No asset registered for path '{}'", path)
            }
            ErrorKind::ResourceLoad {
                bundle,
                resource,
                reason,
            } => write!(
                f,
                "Failed to load resource '{}' from bundle '{}': {}",
                resource, bundle, reason
            ),
            ErrorKind::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Multiple { errors, count } => {
                write!(f, "Multiple errors occurred ({} total)", count)?;
                if let Some(first) = errors.first() {
                    write!(f, ": {}", first)?;
                }
                Ok(())
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }

    /// Writes context lines, batch members and the cause as a tree below the message.
    fn fmt_children(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let members: &[SwaggerUiError] = match &self.kind {
            ErrorKind::Multiple { errors, .. } => errors,
            _ => &[],
        };
        let child_count = self.context.len() + members.len() + usize::from(self.cause.is_some());
        let mut index = 0;
        let branch = |i: usize| {
            if i + 1 == child_count {
                ("└─", "   ")
            } else {
                ("├─", "│  ")
            }
        };

        for ctx in &self.context {
            let (prefix, _) = branch(index);
            writeln!(f, "{}{} {}", indent, prefix, ctx)?;
            index += 1;
        }
        for member in members {
            let (prefix, continuation) = branch(index);
            write!(f, "{}{} error: ", indent, prefix)?;
            member.fmt_kind(f)?;
            writeln!(f)?;
            member.fmt_children(f, &format!("{}{}", indent, continuation))?;
            index += 1;
        }
        if let Some(cause) = &self.cause {
            let (prefix, continuation) = branch(index);
            write!(f, "{}{} cause: ", indent, prefix)?;
            cause.fmt_kind(f)?;
            writeln!(f)?;
            cause.fmt_children(f, &format!("{}{}", indent, continuation))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for SwaggerUiError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for SwaggerUiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Multiple { errors, .. } => errors.first().and_then(|e| e.source()),
            _ => self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl fmt::Display for SwaggerUiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        self.fmt_kind(f)
    }
}

/* 📖 # Why a tree-shaped Debug output?
Errors bubble up to `main` or to the startup validation log where `{:?}` is used.
Printing the message first, then the context stack, the cause chain and finally the
span trace reads top-down like the failure happened, instead of a nested struct dump.
*/
impl fmt::Debug for SwaggerUiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_kind(f)?;
        writeln!(f)?;
        self.fmt_children(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<SwaggerUiError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.
The span trace and context vector would otherwise bloat every `Ok` value.
*/

/// Standard result type for swagger-ui operations.
pub type SwaggerUiResult<T> = std::result::Result<T, Box<SwaggerUiError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> SwaggerUiResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> SwaggerUiResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for SwaggerUiResult<T> {
    fn context(self, context: impl Into<String>) -> SwaggerUiResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> SwaggerUiResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Creates a boxed `Message` error from a format string.
///
/// ```
/// use swagger_ui_base::{SwaggerUiResult, err};
///
/// fn fails() -> SwaggerUiResult<()> {
///     Err(err!("bundle {} is empty", "ui"))
/// }
/// assert_eq!(fails().unwrap_err().to_string(), "bundle ui is empty");
/// ```
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        ::std::boxed::Box::new($crate::error::SwaggerUiError::message(format!($($arg)*)))
    };
}
