//! DDL file output.

mod path;

pub use path::*;

use crate::error::{ExportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `ddl` to `dir/file_name`, creating `dir` as needed.
///
/// Existing files are overwritten. Errors are fatal to the run.
///
/// The file holds the trimmed DDL followed by exactly one `\n`, so it is
/// not byte-for-byte the trimmed text: a newline is appended when the DDL
/// lacks one, and trailing newlines beyond the first are dropped.
pub fn write_ddl(dir: &Path, file_name: &str, ddl: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ExportError::write(dir, e))?;

    let file_path = dir.join(file_name);
    let mut content = String::with_capacity(ddl.len() + 1);
    content.push_str(ddl.trim_end_matches('\n'));
    content.push('\n');

    fs::write(&file_path, content).map_err(|e| ExportError::write(&file_path, e))?;
    info!("Written: {}", file_path.display());

    Ok(file_path)
}
