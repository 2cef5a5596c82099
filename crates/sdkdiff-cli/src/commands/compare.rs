//! Compare command
//!
//! Usage: sdkdiff compare --main <FILE> --base <FILE> (--kind <KIND> | --source <NAME>)

use crate::commands::read_payload;
use crate::config::{CliConfig, OutputFormat};
use clap::Args;
use sdkdiff_core::diff::render_summary;
use sdkdiff_core::errors::{ExError, ExErrorKind};
use sdkdiff_core::logging_facility::{self, Profile};
use sdkdiff_core::{compare_payload_bytes, Comparison, ComparisonRequest, RecordKind, RecordSource};
use sdkdiff_core_types::schema::{SIDE_BASE, SIDE_MAIN};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Payload of the newer release
    #[arg(long)]
    pub main: PathBuf,

    /// Payload of the older release
    #[arg(long)]
    pub base: PathBuf,

    /// Built-in record kind (fields, nodes, codelists, notice-types, notice-type-content)
    #[arg(long, conflicts_with = "source", required_unless_present = "source")]
    pub kind: Option<String>,

    /// Named record source from the config file
    #[arg(long, conflicts_with = "kind")]
    pub source: Option<String>,

    /// Override the id field of the selected source
    #[arg(long)]
    pub id_field: Option<String>,

    /// Version label of the main payload (defaults to the file name)
    #[arg(long)]
    pub main_version: Option<String>,

    /// Version label of the base payload (defaults to the file name)
    #[arg(long)]
    pub base_version: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute compare command
pub fn execute(
    args: CompareArgs,
    log_profile: Option<Profile>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(args.config.as_deref())?;
    logging_facility::init(
        log_profile
            .or(config.log_profile)
            .unwrap_or(Profile::Development),
    );

    let mut source = resolve_source(&args, &config)?;
    if let Some(id_field) = &args.id_field {
        source.id_field = id_field.clone();
    }

    let request = ComparisonRequest::new(
        version_label(args.main_version.as_deref(), &args.main),
        version_label(args.base_version.as_deref(), &args.base),
        source,
    );
    tracing::debug!(
        request_id = %request.request_id,
        main = %args.main.display(),
        base = %args.base.display(),
        "reading payloads"
    );

    let main_bytes = read_payload(&args.main, SIDE_MAIN)?;
    let base_bytes = read_payload(&args.base, SIDE_BASE)?;
    let comparison = compare_payload_bytes(&request, &main_bytes, &base_bytes)?;

    let format = args.format.or(config.format).unwrap_or_default();
    let rendered = render(&comparison, format)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Wrote comparison to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

fn resolve_source(args: &CompareArgs, config: &CliConfig) -> Result<RecordSource, ExError> {
    match (&args.kind, &args.source) {
        (Some(kind), _) => {
            let kind: RecordKind = kind.parse().map_err(ExError::from)?;
            Ok(kind.source())
        }
        (None, Some(name)) => config.source(name).ok_or_else(|| {
            ExError::new(ExErrorKind::UnknownRecordKind)
                .with_message(format!("no source named '{}' in configuration", name))
        }),
        (None, None) => Err(ExError::new(ExErrorKind::InvalidArgument)
            .with_message("either --kind or --source is required")),
    }
}

fn version_label(explicit: Option<&str>, path: &std::path::Path) -> String {
    match explicit {
        Some(label) => label.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    }
}

fn render(comparison: &Comparison, format: OutputFormat) -> Result<String, ExError> {
    match format {
        OutputFormat::Summary => {
            let request = &comparison.request;
            let title = format!(
                "{}: {} vs {}",
                request.source.name, request.main_version, request.base_version
            );
            Ok(render_summary(&comparison.diff, &title))
        }
        OutputFormat::Json => serde_json::to_string_pretty(&comparison.diff)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ExError::new(ExErrorKind::Serialization).with_message(e.to_string())),
    }
}
