//! In-memory metadata source for tests.

use crate::catalog::{CatalogObject, ObjectType};
use crate::error::{ExportError, Result};
use crate::source::{DdlValue, MetadataSource};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Cursor, Read};

/// What `fetch_ddl` returns for one object.
#[derive(Debug, Clone)]
pub enum StoredDdl {
    Text(String),
    Lob(String),
    Null,
    BrokenLob,
    Fail(String),
}

/// Reader that fails on first read.
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "LOB read interrupted"))
    }
}

/// Catalog and DDL held in memory.
///
/// `list_objects` returns every stored object unfiltered so callers'
/// filtering is exercised.
#[derive(Debug, Default)]
pub struct MemorySource {
    objects: Vec<CatalogObject>,
    ddl: HashMap<(String, String), StoredDdl>,
    enumeration_error: Option<String>,
    catalog_queries: RefCell<Vec<(String, Vec<String>)>>,
    calls: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, object: CatalogObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Register DDL under the metadata spelling of the type.
    pub fn with_ddl(mut self, ddl_type: &str, name: &str, ddl: StoredDdl) -> Self {
        self.ddl.insert((ddl_type.to_string(), name.to_string()), ddl);
        self
    }

    pub fn with_enumeration_error(mut self, message: &str) -> Self {
        self.enumeration_error = Some(message.to_string());
        self
    }

    /// Owner and catalog type names of every `list_objects` call, in order.
    pub fn catalog_queries(&self) -> Vec<(String, Vec<String>)> {
        self.catalog_queries.borrow().clone()
    }

    /// `SCHEMA:TYPE/NAME` of every `fetch_ddl` call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MetadataSource for MemorySource {
    fn list_objects(
        &self,
        schema: &str,
        object_types: &[ObjectType],
    ) -> Result<Vec<CatalogObject>> {
        self.catalog_queries.borrow_mut().push((
            schema.to_string(),
            object_types.iter().map(|t| t.catalog_name().to_string()).collect(),
        ));

        if let Some(ref message) = self.enumeration_error {
            return Err(ExportError::Enumeration(message.clone()));
        }
        Ok(self.objects.clone())
    }

    fn fetch_ddl(&self, object_type: &str, name: &str, schema: &str) -> Result<Option<DdlValue>> {
        self.calls
            .borrow_mut()
            .push(format!("{}:{}/{}", schema, object_type, name));

        match self.ddl.get(&(object_type.to_string(), name.to_string())) {
            None => Ok(None),
            Some(StoredDdl::Null) => Ok(None),
            Some(StoredDdl::Text(text)) => Ok(Some(DdlValue::Text(text.clone()))),
            Some(StoredDdl::Lob(text)) => Ok(Some(DdlValue::Lob(Box::new(Cursor::new(
                text.clone().into_bytes(),
            ))))),
            Some(StoredDdl::BrokenLob) => Ok(Some(DdlValue::Lob(Box::new(BrokenReader)))),
            Some(StoredDdl::Fail(message)) => Err(ExportError::ddl_generation(
                object_type,
                name,
                message.clone(),
            )),
        }
    }

    fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn db_type(&self) -> &str {
        "memory"
    }
}
