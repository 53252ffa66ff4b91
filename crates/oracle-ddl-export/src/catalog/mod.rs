//! Catalog objects and enumeration.
//!
//! The object catalog (`ALL_OBJECTS`) and `DBMS_METADATA` spell some object
//! types differently. [`ObjectType`] keeps the catalog spelling and hands out
//! the metadata spelling through [`ObjectType::ddl_name`].

use crate::error::Result;
use crate::source::MetadataSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Catalog status of objects eligible for export.
pub const VALID_STATUS: &str = "VALID";

/// Catalog spelling of package bodies.
const PACKAGE_BODY_CATALOG: &str = "PACKAGE BODY";

/// Metadata facility spelling of package bodies.
const PACKAGE_BODY_DDL: &str = "PACKAGE_BODY";

/// An object type in catalog spelling, e.g. `TABLE` or `PACKAGE BODY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(String);

impl ObjectType {
    /// Build from a catalog or user-supplied type name (trimmed, upper-cased).
    pub fn from_catalog(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// The spelling used by the object catalog.
    pub fn catalog_name(&self) -> &str {
        &self.0
    }

    /// The spelling expected by `DBMS_METADATA.GET_DDL`.
    ///
    /// Only `PACKAGE BODY` differs; every other type passes through unchanged.
    pub fn ddl_name(&self) -> &str {
        if self.0 == PACKAGE_BODY_CATALOG {
            PACKAGE_BODY_DDL
        } else {
            &self.0
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the object catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogObject {
    /// Object name, unique within schema and type.
    pub name: String,

    /// Object type in catalog spelling.
    pub object_type: ObjectType,

    /// Catalog status (`VALID` or `INVALID`).
    pub status: String,
}

impl CatalogObject {
    /// Create a catalog object.
    pub fn new(name: impl Into<String>, object_type: &str, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_type: ObjectType::from_catalog(object_type),
            status: status.into(),
        }
    }

    /// Whether the catalog marks this object as valid.
    pub fn is_valid(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(VALID_STATUS)
    }
}

/// Build the catalog query for `type_count` requested types.
///
/// `:1` binds the owner, `:2` through `:type_count + 1` bind the types.
pub fn catalog_query(type_count: usize) -> String {
    let placeholders = (0..type_count)
        .map(|i| format!(":{}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT object_name, object_type, status \
         FROM all_objects \
         WHERE owner = :1 AND object_type IN ({}) AND status = '{}'",
        placeholders, VALID_STATUS
    )
}

/// Enumerate the valid objects of `schema` whose type is one of `object_types`.
///
/// Issues a single catalog query through `source`, or none at all when no
/// types are requested. The returned list is sorted by metadata type name,
/// then object name.
pub fn enumerate_objects<S: MetadataSource + ?Sized>(
    source: &S,
    schema: &str,
    object_types: &[ObjectType],
) -> Result<Vec<CatalogObject>> {
    debug!(
        "Enumerating {} object types in schema {}",
        object_types.len(),
        schema
    );

    if object_types.is_empty() {
        info!("No object types requested for schema {}", schema);
        return Ok(Vec::new());
    }

    let mut objects = source.list_objects(schema, object_types)?;
    let fetched = objects.len();

    objects.retain(|obj| obj.is_valid() && object_types.contains(&obj.object_type));
    if objects.len() != fetched {
        debug!(
            "Dropped {} catalog rows that were invalid or of an unrequested type",
            fetched - objects.len()
        );
    }

    objects.sort_by(|a, b| {
        a.object_type
            .ddl_name()
            .cmp(b.object_type.ddl_name())
            .then_with(|| a.name.cmp(&b.name))
    });

    info!("Found {} objects to export in schema {}", objects.len(), schema);
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::source::memory::MemorySource;

    fn types(names: &[&str]) -> Vec<ObjectType> {
        names.iter().map(|n| ObjectType::from_catalog(n)).collect()
    }

    #[test]
    fn test_package_body_normalized() {
        let ty = ObjectType::from_catalog("PACKAGE BODY");
        assert_eq!(ty.catalog_name(), "PACKAGE BODY");
        assert_eq!(ty.ddl_name(), "PACKAGE_BODY");
    }

    #[test]
    fn test_other_types_unchanged() {
        for name in ["TABLE", "VIEW", "PACKAGE", "TYPE BODY", "SEQUENCE", "TRIGGER"] {
            let ty = ObjectType::from_catalog(name);
            assert_eq!(ty.ddl_name(), name);
        }
    }

    #[test]
    fn test_from_catalog_trims_and_uppercases() {
        assert_eq!(
            ObjectType::from_catalog("  package body ").ddl_name(),
            "PACKAGE_BODY"
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(CatalogObject::new("ORDERS", "TABLE", "VALID").is_valid());
        assert!(!CatalogObject::new("LEGACY_VIEW", "TABLE", "INVALID").is_valid());
        assert!(!CatalogObject::new("X", "TABLE", "").is_valid());
    }

    #[test]
    fn test_catalog_query_single_type() {
        let sql = catalog_query(1);
        assert!(sql.contains("owner = :1"));
        assert!(sql.contains("object_type IN (:2)"));
        assert!(sql.contains("status = 'VALID'"));
    }

    #[test]
    fn test_catalog_query_sized_to_type_count() {
        let sql = catalog_query(5);
        assert!(sql.contains("IN (:2, :3, :4, :5, :6)"));
        assert!(!sql.contains(":7"));
    }

    #[test]
    fn test_enumerate_excludes_invalid_objects() {
        let source = MemorySource::new()
            .with_object(CatalogObject::new("ORDERS", "TABLE", "VALID"))
            .with_object(CatalogObject::new("LEGACY_VIEW", "TABLE", "INVALID"))
            .with_object(CatalogObject::new("CALC_PKG", "PACKAGE BODY", "VALID"));

        let objects =
            enumerate_objects(&source, "APP", &types(&["TABLE", "PACKAGE BODY"])).unwrap();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["CALC_PKG", "ORDERS"]);
    }

    #[test]
    fn test_enumerate_passes_owner_and_types_to_query() {
        let source = MemorySource::new();

        enumerate_objects(&source, "APP", &types(&["TABLE", "package body", "VIEW"])).unwrap();

        assert_eq!(
            source.catalog_queries(),
            vec![(
                "APP".to_string(),
                vec![
                    "TABLE".to_string(),
                    "PACKAGE BODY".to_string(),
                    "VIEW".to_string()
                ]
            )]
        );
    }

    #[test]
    fn test_enumerate_without_types_skips_query() {
        let source = MemorySource::new()
            .with_object(CatalogObject::new("ORDERS", "TABLE", "VALID"))
            .with_enumeration_error("ORA-00936: missing expression");

        let objects = enumerate_objects(&source, "APP", &[]).unwrap();

        assert!(objects.is_empty());
        assert!(source.catalog_queries().is_empty());
    }

    #[test]
    fn test_enumerate_excludes_unrequested_types() {
        let source = MemorySource::new()
            .with_object(CatalogObject::new("ORDERS", "TABLE", "VALID"))
            .with_object(CatalogObject::new("ORDERS_V", "VIEW", "VALID"));

        let objects = enumerate_objects(&source, "APP", &types(&["VIEW"])).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "ORDERS_V");
    }

    #[test]
    fn test_enumerate_sorted_by_type_then_name() {
        let source = MemorySource::new()
            .with_object(CatalogObject::new("ZETA", "VIEW", "VALID"))
            .with_object(CatalogObject::new("BETA", "TABLE", "VALID"))
            .with_object(CatalogObject::new("ALPHA", "VIEW", "VALID"));

        let objects = enumerate_objects(&source, "APP", &types(&["TABLE", "VIEW"])).unwrap();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["BETA", "ALPHA", "ZETA"]);
    }

    #[test]
    fn test_enumerate_propagates_failure() {
        let source = MemorySource::new()
            .with_enumeration_error("ORA-00942: table or view does not exist");
        let err = enumerate_objects(&source, "APP", &types(&["TABLE"])).unwrap_err();
        assert!(matches!(err, ExportError::Enumeration(_)));
    }
}
