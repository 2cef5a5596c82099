//! Flatten command
//!
//! Usage: sdkdiff flatten --input <FILE> [--pointer <POINTER>]

use crate::commands::read_payload;
use clap::Args;
use sdkdiff_core::errors::ExError;
use sdkdiff_core::logging_facility::{self, Profile};
use sdkdiff_core::source::parse_payload_bytes;
use sdkdiff_core::{FlattenOptions, GroupRule, RecordSource};
use sdkdiff_core_types::schema::SIDE_MAIN;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// Payload holding the tree
    #[arg(long)]
    pub input: PathBuf,

    /// JSON pointer to the node collection
    #[arg(long, default_value = "/content")]
    pub pointer: String,

    #[arg(long, default_value = "id")]
    pub id_field: String,

    #[arg(long, default_value = "content")]
    pub children_field: String,

    /// Only nodes whose field holds this value are groups (requires --group-value)
    #[arg(long, requires = "group_value")]
    pub group_field: Option<String>,

    #[arg(long, requires = "group_field")]
    pub group_value: Option<String>,
}

/// Execute flatten command
pub fn execute(
    args: FlattenArgs,
    log_profile: Option<Profile>,
) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(log_profile.unwrap_or(Profile::Development));

    let group = match (args.group_field, args.group_value) {
        (Some(field), Some(value)) => GroupRule::FieldEquals {
            field,
            value: serde_json::Value::String(value),
        },
        _ => GroupRule::Always,
    };
    let source = RecordSource {
        name: "flatten".to_string(),
        pointer: args.pointer,
        id_field: args.id_field.clone(),
        hierarchy: Some(FlattenOptions {
            id_field: args.id_field,
            children_field: args.children_field,
            group,
            ..FlattenOptions::default()
        }),
    };

    let bytes = read_payload(&args.input, SIDE_MAIN)?;
    let payload = parse_payload_bytes(&bytes).map_err(ExError::from)?;
    let records = source.extract(&payload, SIDE_MAIN).map_err(ExError::from)?;
    tracing::debug!(op = "flatten", record_count = records.len() as u64);

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
