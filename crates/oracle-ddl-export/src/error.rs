//! Error types for the export library.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration errors (invalid TOML/YAML, missing fields, etc.)
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for Oracle client library initialization failures.
pub const EXIT_CLIENT_INIT_ERROR: u8 = 2;
/// Exit code for connection and authentication failures.
pub const EXIT_CONNECTION_ERROR: u8 = 3;
/// Exit code for catalog enumeration failures.
pub const EXIT_ENUMERATION_ERROR: u8 = 4;
/// Exit code for failures writing DDL files.
pub const EXIT_WRITE_ERROR: u8 = 5;
/// Exit code for other IO errors (missing config file, etc.)
pub const EXIT_IO_ERROR: u8 = 7;
/// Exit code for JSON serialization errors.
pub const EXIT_SERIALIZATION_ERROR: u8 = 8;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Configuration error (invalid document, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Oracle client library could not be initialized
    #[error("Oracle client initialization failed: {0}")]
    ClientInit(String),

    /// Connection or authentication error with context
    #[error("Connection error: {message}\n  Context: {context}")]
    Connection { message: String, context: String },

    /// Catalog query failed; no partial object list is usable
    #[error("Object enumeration failed: {0}")]
    Enumeration(String),

    /// DDL generation failed for a single object
    #[error("DDL generation failed for {object_type} {name}: {message}")]
    DdlGeneration {
        object_type: String,
        name: String,
        message: String,
    },

    /// Name cannot be used as a single path component
    #[error("Unsafe name for output path: {0}")]
    UnsafeName(String),

    /// Writing a DDL file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Create a Connection error with context about where it occurred
    pub fn connection(message: impl Into<String>, context: impl Into<String>) -> Self {
        ExportError::Connection {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Create a DdlGeneration error
    pub fn ddl_generation(
        object_type: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ExportError::DdlGeneration {
            object_type: object_type.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a Write error for the given path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the pipeline absorbs this error and moves on to the next object.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExportError::DdlGeneration { .. } | ExportError::UnsafeName(_)
        )
    }

    /// Process exit code for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExportError::Config(_)
            | ExportError::Toml(_)
            | ExportError::Yaml(_)
            | ExportError::UnsafeName(_) => EXIT_CONFIG_ERROR,
            ExportError::ClientInit(_) => EXIT_CLIENT_INIT_ERROR,
            ExportError::Connection { .. } => EXIT_CONNECTION_ERROR,
            ExportError::Enumeration(_) | ExportError::DdlGeneration { .. } => {
                EXIT_ENUMERATION_ERROR
            }
            ExportError::Write { .. } => EXIT_WRITE_ERROR,
            ExportError::Io(_) => EXIT_IO_ERROR,
            ExportError::Json(_) => EXIT_SERIALIZATION_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
