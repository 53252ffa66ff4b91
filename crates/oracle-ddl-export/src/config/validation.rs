//! Configuration validation.

use super::Config;
use crate::error::{ExportError, Result};
use crate::output::check_path_component;

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Database validation
    if config.database.host.trim().is_empty() {
        return Err(ExportError::Config("database.host is required".into()));
    }
    if config.database.port == 0 {
        return Err(ExportError::Config(
            "database.port must be between 1 and 65535".into(),
        ));
    }
    if config.database.service_name.trim().is_empty() {
        return Err(ExportError::Config(
            "database.service_name is required".into(),
        ));
    }
    if config.database.user.trim().is_empty() {
        return Err(ExportError::Config("database.user is required".into()));
    }

    // Extraction validation
    if config.extraction.schema.trim().is_empty() {
        return Err(ExportError::Config("extraction.schema is required".into()));
    }
    // The schema becomes a directory name
    check_path_component(&config.extraction.schema).map_err(|_| {
        ExportError::Config(format!(
            "extraction.schema cannot be used as a directory name: {:?}",
            config.extraction.schema
        ))
    })?;
    if config.extraction.object_types.is_empty() {
        return Err(ExportError::Config(
            "extraction.object_types must list at least one type".into(),
        ));
    }
    if config
        .extraction
        .object_types
        .iter()
        .any(|t| t.trim().is_empty())
    {
        return Err(ExportError::Config(
            "extraction.object_types cannot contain blank entries".into(),
        ));
    }

    // Output validation
    if config.output.directory.as_os_str().is_empty() {
        return Err(ExportError::Config("output.directory is required".into()));
    }

    Ok(())
}
