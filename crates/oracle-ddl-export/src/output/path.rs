//! Output path construction and name checks.
//!
//! Object and schema names become directory and file names verbatim. They are
//! not escaped; names that cannot be a single path component are rejected.
//! Oracle identifiers are normally letters, digits, `_`, `$` and `#`, but
//! quoted identifiers and Java class names (`com/acme/Util`) may contain path
//! separators.

use crate::catalog::ObjectType;
use crate::error::{ExportError, Result};
use std::path::{Path, PathBuf};

/// File extension of exported DDL files.
pub const DDL_EXTENSION: &str = "sql";

/// Reject names that cannot be used as one path component.
///
/// Rejects:
/// - Empty names
/// - Names containing null bytes
/// - Names containing `/` or `\`
/// - `.` and `..`
pub fn check_path_component(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ExportError::UnsafeName("name cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(ExportError::UnsafeName(format!(
            "name contains null byte: {:?}",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ExportError::UnsafeName(format!(
            "name contains a path separator: {:?}",
            name
        )));
    }

    if name == "." || name == ".." {
        return Err(ExportError::UnsafeName(format!(
            "name is a relative directory reference: {:?}",
            name
        )));
    }

    Ok(())
}

/// Directory holding the DDL files of one schema and type:
/// `{output_root}/{schema}/{ddl_type}`.
pub fn object_dir(output_root: &Path, schema: &str, object_type: &ObjectType) -> PathBuf {
    output_root.join(schema).join(object_type.ddl_name())
}

/// File name of one object's DDL: `{name}.sql`.
pub fn object_file_name(name: &str) -> String {
    format!("{}.{}", name, DDL_EXTENSION)
}

/// Full output path: `{output_root}/{schema}/{ddl_type}/{name}.sql`.
pub fn resolve_path(
    output_root: &Path,
    schema: &str,
    object_type: &ObjectType,
    name: &str,
) -> PathBuf {
    object_dir(output_root, schema, object_type).join(object_file_name(name))
}
