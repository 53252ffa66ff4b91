//! # oracle-ddl-export
//!
//! Extract the DDL of an Oracle schema into a version-controllable directory
//! tree: one `{schema}/{type}/{name}.sql` file per valid catalog object.
//!
//! - **Single catalog query** sized to the requested object types
//! - **Per-object isolation**: a failed `DBMS_METADATA` call is logged and
//!   skipped, the rest of the schema is still exported
//! - **LOB materialization**: large DDL is read fully before writing
//! - **Idempotent output**: re-running overwrites files with identical content
//!
//! ## Example
//!
//! ```rust,no_run
//! use oracle_ddl_export::{init_client, Config, ExportOptions, Exporter, OracleSource};
//!
//! fn main() -> oracle_ddl_export::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     init_client(config.client.instant_client_path.as_deref())?;
//!
//!     let source = OracleSource::connect(&config.database)?;
//!     let result = Exporter::new(&source, ExportOptions::from_config(&config)).run()?;
//!     println!("Wrote {} files", result.objects_written);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod exporter;
pub mod output;
pub mod retrieve;
pub mod source;

// Re-exports for convenient access
pub use catalog::{enumerate_objects, CatalogObject, ObjectType};
pub use config::{ClientConfig, Config, DatabaseConfig, ExtractionConfig, OutputConfig};
pub use error::{ExportError, Result};
pub use exporter::{
    ExportOptions, ExportPhase, ExportResult, Exporter, FailedObject, ObjectOutcome,
    ProgressObserver,
};
pub use output::{resolve_path, write_ddl};
pub use retrieve::{retrieve_ddl, DdlOutcome};
pub use source::{init_client, DdlValue, MetadataSource, OracleSource};
