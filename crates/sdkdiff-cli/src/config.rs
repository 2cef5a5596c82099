//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! log_profile = "production"
//! format = "json"
//!
//! [sources.business-entities]
//! pointer = "/businessEntities"
//! id_field = "id"
//! ```

use sdkdiff_core::errors::{ExError, ExErrorKind};
use sdkdiff_core::logging_facility::Profile;
use sdkdiff_core::RecordSource;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Output format for `compare`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log_profile: Option<Profile>,
    pub format: Option<OutputFormat>,
    /// Custom record sources keyed by the name passed to `--source`
    pub sources: BTreeMap<String, SourceEntry>,
}

/// A named source as written in the file; the name comes from the table key.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub pointer: String,
    #[serde(default)]
    pub id_field: Option<String>,
    #[serde(default)]
    pub hierarchy: Option<sdkdiff_core::FlattenOptions>,
}

impl CliConfig {
    /// Load from `path`, or the default configuration when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ExError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_message(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text).map_err(|e| e.with_op("load_config"))
    }

    pub fn parse(text: &str) -> Result<Self, ExError> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_message(format!("invalid configuration: {}", e))
        })
    }

    /// Resolve a named custom source.
    pub fn source(&self, name: &str) -> Option<RecordSource> {
        self.sources.get(name).map(|entry| {
            let mut source = RecordSource::flat(
                name,
                entry.pointer.clone(),
                entry.id_field.as_deref().unwrap_or("id"),
            );
            source.hierarchy = entry.hierarchy.clone();
            source
        })
    }
}
