//! Oracle source backed by the `oracle` crate (ODPI-C).
//!
//! **Requirements:**
//! - Oracle Instant Client (or a full client install) must be available at
//!   runtime. Point `client.instant_client_path` at its directory, or put it
//!   on the platform library search path (`LD_LIBRARY_PATH`, `PATH`).

use crate::catalog::{catalog_query, CatalogObject, ObjectType};
use crate::config::DatabaseConfig;
use crate::error::{ExportError, Result};
use crate::source::{DdlValue, MetadataSource};
use oracle::sql_type::{Clob, OracleType, ToSql};
use oracle::{Connection, InitParams};
use std::path::Path;
use tracing::{debug, info};

/// Query used to generate the DDL of a single object.
const DDL_QUERY: &str = "SELECT DBMS_METADATA.GET_DDL(:1, :2, :3) FROM DUAL";

/// Initialize the Oracle client library.
///
/// Call once at process startup, before the first connection. Returns `true`
/// when this call performed the initialization and `false` when the library
/// was already initialized; repeated calls are harmless.
pub fn init_client(lib_dir: Option<&Path>) -> Result<bool> {
    let mut params = InitParams::new();
    if let Some(dir) = lib_dir {
        params
            .oracle_client_lib_dir(dir)
            .map_err(|e| ExportError::ClientInit(e.to_string()))?;
    }

    let initialized = params.init().map_err(|e| {
        ExportError::ClientInit(format!(
            "{}. Make sure Oracle Instant Client is installed and \
             client.instant_client_path points at it.",
            e
        ))
    })?;

    if initialized {
        match lib_dir {
            Some(dir) => info!("Initialized Oracle client from {}", dir.display()),
            None => info!("Initialized Oracle client from the library search path"),
        }
    } else {
        debug!("Oracle client already initialized");
    }

    Ok(initialized)
}

/// Oracle metadata source holding a single connection.
///
/// The connection is closed when the source is dropped.
pub struct OracleSource {
    conn: Connection,
    connect_string: String,
}

impl OracleSource {
    /// Connect using the given database configuration.
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let connect_string = config.connect_string();
        let conn = Connection::connect(&config.user, &config.password, &connect_string)
            .map_err(|e| {
                ExportError::connection(
                    e.to_string(),
                    format!("connecting to {} as {}", connect_string, config.user),
                )
            })?;

        info!("Connected to Oracle at {} as {}", connect_string, config.user);
        Ok(Self {
            conn,
            connect_string,
        })
    }

    /// Close the connection explicitly, reporting any error.
    pub fn close(self) -> Result<()> {
        let context = format!("closing connection to {}", self.connect_string);
        self.conn
            .close()
            .map_err(|e| ExportError::connection(e.to_string(), context))
    }
}

impl MetadataSource for OracleSource {
    fn list_objects(
        &self,
        schema: &str,
        object_types: &[ObjectType],
    ) -> Result<Vec<CatalogObject>> {
        let sql = catalog_query(object_types.len());
        debug!("Catalog query: {}", sql);

        let type_names: Vec<&str> = object_types.iter().map(|t| t.catalog_name()).collect();
        let mut params: Vec<&dyn ToSql> = Vec::with_capacity(type_names.len() + 1);
        params.push(&schema);
        for name in &type_names {
            params.push(name);
        }

        let enumeration_error = |e: oracle::Error| ExportError::Enumeration(e.to_string());

        // The statement and its cursor are released before the caller starts
        // issuing per-object metadata calls.
        let mut stmt = self
            .conn
            .statement(&sql)
            .build()
            .map_err(enumeration_error)?;
        let rows = stmt
            .query_as::<(String, String, String)>(&params)
            .map_err(enumeration_error)?;

        let mut objects = Vec::new();
        for row in rows {
            let (name, object_type, status) = row.map_err(enumeration_error)?;
            objects.push(CatalogObject::new(name, &object_type, status));
        }

        Ok(objects)
    }

    fn fetch_ddl(&self, object_type: &str, name: &str, schema: &str) -> Result<Option<DdlValue>> {
        let ddl_error =
            |e: oracle::Error| ExportError::ddl_generation(object_type, name, e.to_string());

        let mut stmt = self
            .conn
            .statement(DDL_QUERY)
            .lob_locator()
            .build()
            .map_err(ddl_error)?;
        let mut rows = stmt
            .query(&[&object_type, &name, &schema])
            .map_err(ddl_error)?;

        let row = match rows.next() {
            Some(row) => row.map_err(ddl_error)?,
            None => return Ok(None),
        };

        let is_lob = row
            .column_info()
            .first()
            .map(|info| matches!(info.oracle_type(), OracleType::CLOB | OracleType::NCLOB))
            .unwrap_or(false);

        if is_lob {
            let lob: Option<Clob> = row.get(0).map_err(ddl_error)?;
            Ok(lob.map(|lob| DdlValue::Lob(Box::new(lob))))
        } else {
            let text: Option<String> = row.get(0).map_err(ddl_error)?;
            Ok(text.map(DdlValue::Text))
        }
    }

    fn ping(&self) -> Result<()> {
        self.conn
            .query_row_as::<i32>("SELECT 1 FROM DUAL", &[])
            .map(|_| ())
            .map_err(|e| ExportError::connection(e.to_string(), "health check"))
    }

    fn db_type(&self) -> &str {
        "oracle"
    }
}
