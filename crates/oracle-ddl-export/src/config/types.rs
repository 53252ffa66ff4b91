//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Oracle client library settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// What to extract.
    pub extraction: ExtractionConfig,

    /// Where to write the DDL files.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Oracle client library configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Directory containing the Instant Client libraries.
    /// When unset, the platform library search path is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instant_client_path: Option<PathBuf>,
}

/// Database connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,

    /// Listener port (default: 1521).
    #[serde(default = "default_oracle_port")]
    pub port: u16,

    /// Service name.
    pub service_name: String,

    /// Username.
    pub user: String,

    /// Password. Never serialized.
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service_name", &self.service_name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Extraction scope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Schema (owner) to extract.
    pub schema: String,

    /// Catalog object types to extract, e.g. `TABLE`, `PACKAGE BODY`.
    pub object_types: Vec<String>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for the `{schema}/{type}/{name}.sql` tree (default: "output").
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

// Default value functions for serde
fn default_oracle_port() -> u16 {
    1521
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}
