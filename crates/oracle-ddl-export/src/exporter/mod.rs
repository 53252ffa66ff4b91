//! Export pipeline - enumerate, retrieve, write.

use crate::catalog::{enumerate_objects, CatalogObject, ObjectType};
use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::output::{check_path_component, object_dir, object_file_name, write_ddl};
use crate::retrieve::{retrieve_ddl, DdlOutcome};
use crate::source::MetadataSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Schema (owner) to export.
    pub schema: String,

    /// Requested object types in catalog spelling.
    pub object_types: Vec<ObjectType>,

    /// Root of the output tree.
    pub output_dir: PathBuf,

    /// Enumerate and plan paths only; no DDL is generated or written.
    pub dry_run: bool,
}

impl ExportOptions {
    /// Build options from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            schema: config.extraction.schema.clone(),
            object_types: config.extraction.object_types(),
            output_dir: config.output.directory.clone(),
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    Enumerating,
    Iterating,
    Done,
}

/// What happened to one catalog object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOutcome {
    /// DDL written to the path.
    Written(PathBuf),

    /// Dry run: DDL would be written to the path.
    Planned(PathBuf),

    /// No DDL was generated; nothing written.
    Skipped,

    /// Retrieval failed or the name is unusable; nothing written.
    Failed(String),
}

/// Receives progress events from a run.
pub trait ProgressObserver {
    /// Enumeration finished with `total` objects to process.
    fn on_start(&self, _total: usize) {}

    /// One object was processed.
    fn on_object(&self, _object: &CatalogObject, _outcome: &ObjectOutcome) {}

    /// All objects were processed.
    fn on_finish(&self) {}
}

/// A failed object in the run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedObject {
    pub object_type: String,
    pub name: String,
    pub error: String,
}

/// Result of an export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// Unique run identifier.
    pub run_id: String,

    /// Exported schema.
    pub schema: String,

    /// Final status ("completed" or "dry_run").
    pub status: String,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Eligible objects found in the catalog.
    pub objects_total: usize,

    /// Objects whose DDL was written (or planned, in a dry run).
    pub objects_written: usize,

    /// Objects with no DDL.
    pub objects_skipped: usize,

    /// Objects whose retrieval failed.
    pub objects_failed: usize,

    /// Files written (or planned), in processing order.
    pub written_files: Vec<PathBuf>,

    /// Objects whose retrieval failed.
    pub failed_objects: Vec<FailedObject>,
}

impl ExportResult {
    /// Convert result to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether every object was exported or cleanly skipped.
    pub fn is_clean(&self) -> bool {
        self.objects_failed == 0
    }
}

/// Export pipeline driver.
///
/// Runs single-threaded: one catalog query, then one metadata call per object.
/// Retrieval failures are recorded and skipped; write failures end the run.
pub struct Exporter<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    options: ExportOptions,
    observer: Option<&'a dyn ProgressObserver>,
    phase: ExportPhase,
}

impl<'a, S: MetadataSource + ?Sized> Exporter<'a, S> {
    /// Create a new exporter.
    pub fn new(source: &'a S, options: ExportOptions) -> Self {
        Self {
            source,
            options,
            observer: None,
            phase: ExportPhase::Enumerating,
        }
    }

    /// Report progress to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current pipeline state.
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Enumerate the objects this run would process.
    pub fn list(&self) -> Result<Vec<CatalogObject>> {
        enumerate_objects(
            self.source,
            &self.options.schema,
            &self.options.object_types,
        )
    }

    /// Run the export.
    pub fn run(&mut self) -> Result<ExportResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let schema = self.options.schema.clone();

        check_path_component(&schema).map_err(|e| {
            ExportError::Config(format!("schema cannot be used as a directory name: {}", e))
        })?;

        info!(
            "Starting export run {} for schema {} ({} source)",
            run_id,
            schema,
            self.source.db_type()
        );

        self.phase = ExportPhase::Enumerating;
        let objects = self.list()?;

        self.phase = ExportPhase::Iterating;
        if let Some(observer) = self.observer {
            observer.on_start(objects.len());
        }

        let mut written_files = Vec::new();
        let mut failed_objects = Vec::new();
        let mut objects_skipped = 0;

        for object in &objects {
            let outcome = self.export_object(object)?;
            match &outcome {
                ObjectOutcome::Written(path) | ObjectOutcome::Planned(path) => {
                    written_files.push(path.clone())
                }
                ObjectOutcome::Skipped => objects_skipped += 1,
                ObjectOutcome::Failed(error) => failed_objects.push(FailedObject {
                    object_type: object.object_type.to_string(),
                    name: object.name.clone(),
                    error: error.clone(),
                }),
            }
            if let Some(observer) = self.observer {
                observer.on_object(object, &outcome);
            }
        }

        self.phase = ExportPhase::Done;
        if let Some(observer) = self.observer {
            observer.on_finish();
        }

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let status = if self.options.dry_run {
            "dry_run"
        } else {
            "completed"
        };
        let result = ExportResult {
            run_id,
            schema,
            status: status.to_string(),
            started_at,
            completed_at,
            duration_seconds: duration,
            objects_total: objects.len(),
            objects_written: written_files.len(),
            objects_skipped,
            objects_failed: failed_objects.len(),
            written_files,
            failed_objects,
        };

        info!(
            "Export finished: {} written, {} skipped, {} failed in {:.2}s",
            result.objects_written, result.objects_skipped, result.objects_failed, duration
        );
        if !result.failed_objects.is_empty() {
            warn!("{} objects could not be exported", result.objects_failed);
        }

        Ok(result)
    }

    /// Process one object. Only write errors are returned as `Err`.
    fn export_object(&self, object: &CatalogObject) -> Result<ObjectOutcome> {
        let schema = &self.options.schema;
        let ddl_type = object.object_type.ddl_name();

        if let Err(e) = check_path_component(&object.name) {
            warn!("Skipping {} {}: {}", ddl_type, object.name, e);
            return Ok(ObjectOutcome::Failed(e.to_string()));
        }

        let dir = object_dir(&self.options.output_dir, schema, &object.object_type);
        let file_name = object_file_name(&object.name);

        if self.options.dry_run {
            return Ok(ObjectOutcome::Planned(dir.join(file_name)));
        }

        match retrieve_ddl(self.source, ddl_type, &object.name, schema) {
            DdlOutcome::Document(ddl) => {
                let path = write_ddl(&dir, &file_name, &ddl)?;
                Ok(ObjectOutcome::Written(path))
            }
            DdlOutcome::Absent => {
                debug!("Skipping {} {}: no DDL", ddl_type, object.name);
                Ok(ObjectOutcome::Skipped)
            }
            DdlOutcome::Failed(e) => Ok(ObjectOutcome::Failed(e.to_string())),
        }
    }
}
