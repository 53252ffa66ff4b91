//! oracle-ddl-export CLI - extract Oracle schema DDL into files.

mod progress;

use clap::{Parser, Subcommand};
use oracle_ddl_export::{
    init_client, Config, ExportError, ExportOptions, Exporter, MetadataSource, OracleSource,
};
use progress::ExportProgress;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Parser)]
#[command(name = "oracle-ddl-export")]
#[command(about = "Extract Oracle schema object DDL into a directory tree")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export DDL for every valid object of the configured types
    Export {
        /// Override extraction schema
        #[arg(long)]
        schema: Option<String>,

        /// Override output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Override object types (comma-separated, e.g. "TABLE,PACKAGE BODY")
        #[arg(long, value_delimiter = ',')]
        object_types: Option<Vec<String>>,

        /// Dry run: list the files that would be written without generating DDL
        #[arg(long)]
        dry_run: bool,
    },

    /// List the objects that would be exported
    List {
        /// Override extraction schema
        #[arg(long)]
        schema: Option<String>,
    },

    /// Test the database connection
    HealthCheck,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ExportError> {
    let cli = Cli::parse();

    // Only export drives the bar; other commands get a hidden one
    let show_progress = matches!(cli.command, Commands::Export { .. })
        && !cli.no_progress
        && !cli.output_json
        && cli.log_format != "json";
    let progress = ExportProgress::new(show_progress);

    // Setup logging
    setup_logging(&cli.verbosity, &cli.log_format, progress.log_writer())
        .map_err(|e| ExportError::Config(e.to_string()))?;

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Export {
            schema,
            output_dir,
            object_types,
            dry_run,
        } => {
            // Apply overrides
            if let Some(schema) = schema {
                config.extraction.schema = schema;
            }
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }
            if let Some(types) = object_types {
                config.extraction.object_types = types;
            }
            config.validate()?;

            let source = connect(&config)?;
            let options = ExportOptions::from_config(&config).with_dry_run(dry_run);

            let result = Exporter::new(&source, options)
                .with_observer(&progress)
                .run()?;
            source.close()?;

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                let status_msg = if dry_run {
                    "Dry run completed!"
                } else {
                    "Export completed!"
                };
                println!("\n{}", status_msg);
                println!("  Run ID: {}", result.run_id);
                println!("  Schema: {}", result.schema);
                println!("  Duration: {:.2}s", result.duration_seconds);
                println!(
                    "  Objects: {} written, {} skipped, {} failed (of {})",
                    result.objects_written,
                    result.objects_skipped,
                    result.objects_failed,
                    result.objects_total
                );
                if dry_run {
                    for path in &result.written_files {
                        println!("    {}", path.display());
                    }
                }
                for failed in &result.failed_objects {
                    println!(
                        "  Failed: {} {}: {}",
                        failed.object_type, failed.name, failed.error
                    );
                }
            }
        }

        Commands::List { schema } => {
            if let Some(schema) = schema {
                config.extraction.schema = schema;
            }
            config.validate()?;

            let source = connect(&config)?;
            let exporter = Exporter::new(&source, ExportOptions::from_config(&config));
            let objects = exporter.list()?;
            source.close()?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&objects)?);
            } else {
                for object in &objects {
                    println!("{}\t{}", object.object_type, object.name);
                }
                println!("\n{} objects", objects.len());
            }
        }

        Commands::HealthCheck => {
            let start = Instant::now();
            let source = connect(&config)?;
            source.ping()?;
            let latency_ms = start.elapsed().as_millis() as u64;
            source.close()?;

            if cli.output_json {
                let result = serde_json::json!({
                    "connected": true,
                    "connect_string": config.database.connect_string(),
                    "latency_ms": latency_ms,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Health Check Results:");
                println!(
                    "  Oracle ({}): OK ({}ms)",
                    config.database.connect_string(),
                    latency_ms
                );
            }
        }
    }

    Ok(())
}

/// Initialize the Oracle client library and open the connection.
fn connect(config: &Config) -> Result<OracleSource, ExportError> {
    init_client(config.client.instant_client_path.as_deref())?;
    OracleSource::connect(&config.database)
}

fn setup_logging<W>(verbosity: &str, format: &str, writer: W) -> Result<(), String>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(writer);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
