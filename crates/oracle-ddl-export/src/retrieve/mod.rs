//! Per-object DDL retrieval.
//!
//! A failed retrieval never aborts the run: errors come back as
//! [`DdlOutcome::Failed`] and the caller moves on to the next object.

use crate::error::{ExportError, Result};
use crate::source::{DdlValue, MetadataSource};
use tracing::{debug, warn};

/// Result of asking the metadata facility for one object's DDL.
#[derive(Debug)]
pub enum DdlOutcome {
    /// Trimmed, non-empty DDL text.
    Document(String),

    /// The facility produced no DDL for the object.
    Absent,

    /// Generation failed; the error carries the object type and name.
    Failed(ExportError),
}

impl DdlOutcome {
    /// The document text, if any.
    pub fn document(&self) -> Option<&str> {
        match self {
            DdlOutcome::Document(ddl) => Some(ddl),
            _ => None,
        }
    }
}

/// Retrieve the DDL of one object.
///
/// `object_type` is the metadata spelling (e.g. `PACKAGE_BODY`). Inline text
/// and large-object results normalize to the same trimmed string.
pub fn retrieve_ddl<S: MetadataSource + ?Sized>(
    source: &S,
    object_type: &str,
    name: &str,
    schema: &str,
) -> DdlOutcome {
    match fetch_text(source, object_type, name, schema) {
        Ok(Some(ddl)) => DdlOutcome::Document(ddl),
        Ok(None) => {
            debug!("No DDL generated for {} {}", object_type, name);
            DdlOutcome::Absent
        }
        Err(e) => {
            warn!("Error getting DDL for {} {}: {}", object_type, name, e);
            DdlOutcome::Failed(e)
        }
    }
}

fn fetch_text<S: MetadataSource + ?Sized>(
    source: &S,
    object_type: &str,
    name: &str,
    schema: &str,
) -> Result<Option<String>> {
    let value = match source.fetch_ddl(object_type, name, schema)? {
        Some(value) => value,
        None => return Ok(None),
    };

    let is_lob = matches!(value, DdlValue::Lob(_));
    let text = value.into_text().map_err(|e| {
        ExportError::ddl_generation(object_type, name, format!("reading DDL: {}", e))
    })?;
    if is_lob {
        debug!(
            "Read {} bytes of LOB DDL for {} {}",
            text.len(),
            object_type,
            name
        );
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::{MemorySource, StoredDdl};

    const ORDERS_DDL: &str = "CREATE TABLE \"APP\".\"ORDERS\" (\"ID\" NUMBER)";

    #[test]
    fn test_text_result_is_trimmed() {
        let source = MemorySource::new().with_ddl(
            "TABLE",
            "ORDERS",
            StoredDdl::Text(format!("\n  {}\n  ", ORDERS_DDL)),
        );
        let outcome = retrieve_ddl(&source, "TABLE", "ORDERS", "APP");
        assert_eq!(outcome.document(), Some(ORDERS_DDL));
    }

    #[test]
    fn test_lob_and_text_normalize_identically() {
        let raw = format!("\n  {}\n", ORDERS_DDL);
        let source = MemorySource::new()
            .with_ddl("TABLE", "AS_TEXT", StoredDdl::Text(raw.clone()))
            .with_ddl("TABLE", "AS_LOB", StoredDdl::Lob(raw));

        let text = retrieve_ddl(&source, "TABLE", "AS_TEXT", "APP");
        let lob = retrieve_ddl(&source, "TABLE", "AS_LOB", "APP");
        assert_eq!(text.document(), lob.document());
        assert_eq!(lob.document(), Some(ORDERS_DDL));
    }

    #[test]
    fn test_no_row_is_absent() {
        let source = MemorySource::new();
        let outcome = retrieve_ddl(&source, "VIEW", "MISSING_V", "APP");
        assert!(matches!(outcome, DdlOutcome::Absent));
    }

    #[test]
    fn test_null_is_absent() {
        let source = MemorySource::new().with_ddl("VIEW", "NULL_V", StoredDdl::Null);
        let outcome = retrieve_ddl(&source, "VIEW", "NULL_V", "APP");
        assert!(matches!(outcome, DdlOutcome::Absent));
    }

    #[test]
    fn test_whitespace_only_is_absent() {
        let source = MemorySource::new().with_ddl(
            "VIEW",
            "BLANK_V",
            StoredDdl::Lob(" \n\t ".to_string()),
        );
        let outcome = retrieve_ddl(&source, "VIEW", "BLANK_V", "APP");
        assert!(matches!(outcome, DdlOutcome::Absent));
    }

    #[test]
    fn test_database_error_is_failed_not_panic() {
        let source = MemorySource::new().with_ddl(
            "TABLE",
            "ORDERS",
            StoredDdl::Fail("ORA-31603: object not found".to_string()),
        );
        match retrieve_ddl(&source, "TABLE", "ORDERS", "APP") {
            DdlOutcome::Failed(e) => {
                assert!(e.is_recoverable());
                let message = e.to_string();
                assert!(message.contains("TABLE"));
                assert!(message.contains("ORDERS"));
                assert!(message.contains("ORA-31603"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_lob_read_error_is_failed() {
        let source =
            MemorySource::new().with_ddl("PACKAGE_BODY", "CALC_PKG", StoredDdl::BrokenLob);
        let outcome = retrieve_ddl(&source, "PACKAGE_BODY", "CALC_PKG", "APP");
        assert!(matches!(
            outcome,
            DdlOutcome::Failed(ExportError::DdlGeneration { .. })
        ));
    }
}
