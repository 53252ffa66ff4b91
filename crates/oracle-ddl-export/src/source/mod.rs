//! Source database operations.
//!
//! [`MetadataSource`] is the database boundary of the pipeline: one catalog
//! query to enumerate objects and one metadata call per object. The Oracle
//! implementation lives in [`oracle`]; tests use an in-memory source.

#[cfg(test)]
pub(crate) mod memory;
mod oracle;

pub use self::oracle::{init_client, OracleSource};

use crate::catalog::{CatalogObject, ObjectType};
use crate::error::Result;
use std::fmt;
use std::io::Read;

/// Trait for source database operations.
pub trait MetadataSource {
    /// List catalog objects owned by `schema` with one of `object_types`.
    ///
    /// Implementations should filter on type and status in the query itself;
    /// callers re-check both.
    fn list_objects(&self, schema: &str, object_types: &[ObjectType])
        -> Result<Vec<CatalogObject>>;

    /// Generate the DDL of one object.
    ///
    /// `object_type` uses the metadata facility spelling (see
    /// [`ObjectType::ddl_name`]). Returns `Ok(None)` when the facility
    /// produced no row or a NULL value.
    fn fetch_ddl(&self, object_type: &str, name: &str, schema: &str) -> Result<Option<DdlValue>>;

    /// Check that the connection is usable.
    fn ping(&self) -> Result<()>;

    /// Get the database type.
    fn db_type(&self) -> &str;
}

/// A raw DDL value as returned by the metadata facility.
pub enum DdlValue {
    /// Inline text.
    Text(String),

    /// Large object; must be read fully before use.
    Lob(Box<dyn Read>),
}

impl DdlValue {
    /// Materialize the value as text, reading a large object to the end.
    pub fn into_text(self) -> std::io::Result<String> {
        match self {
            DdlValue::Text(text) => Ok(text),
            DdlValue::Lob(mut reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

impl fmt::Debug for DdlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdlValue::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            DdlValue::Lob(_) => f.write_str("Lob(..)"),
        }
    }
}
