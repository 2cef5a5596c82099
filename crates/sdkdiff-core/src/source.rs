//! Record sources: where a record kind lives inside an SDK payload.
//!
//! A payload is one parsed JSON document from an SDK release (for example the
//! fields file or a notice type definition). A [`RecordSource`] names the
//! collection inside it, the id property of its records and, for nested
//! collections, how to flatten them.

use crate::diff::engine::json_type_name;
use crate::errors::{Result, SdkDiffError};
use crate::hierarchy::{flatten, FlattenOptions, GroupRule};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// Record kinds with a built-in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Fields,
    Nodes,
    Codelists,
    NoticeTypes,
    NoticeTypeContent,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Fields,
        RecordKind::Nodes,
        RecordKind::Codelists,
        RecordKind::NoticeTypes,
        RecordKind::NoticeTypeContent,
    ];

    /// Kebab-case name, as accepted by [`RecordKind::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Fields => "fields",
            RecordKind::Nodes => "nodes",
            RecordKind::Codelists => "codelists",
            RecordKind::NoticeTypes => "notice-types",
            RecordKind::NoticeTypeContent => "notice-type-content",
        }
    }

    /// The built-in source for this kind.
    pub fn source(&self) -> RecordSource {
        match self {
            RecordKind::Fields => RecordSource::flat(self.name(), "/fields", "id"),
            RecordKind::Nodes => RecordSource::flat(self.name(), "/xmlStructure", "id"),
            RecordKind::Codelists => RecordSource::flat(self.name(), "/codelists", "id"),
            RecordKind::NoticeTypes => {
                RecordSource::flat(self.name(), "/noticeSubTypes", "subTypeId")
            }
            RecordKind::NoticeTypeContent => RecordSource {
                name: self.name().to_string(),
                pointer: "/content".to_string(),
                id_field: "id".to_string(),
                hierarchy: Some(FlattenOptions {
                    group: GroupRule::FieldEquals {
                        field: "contentType".to_string(),
                        value: json!("group"),
                    },
                    ..FlattenOptions::default()
                }),
            },
        }
    }
}

impl FromStr for RecordKind {
    type Err = SdkDiffError;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SdkDiffError::UnknownRecordKind {
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Location and keying of one record collection in a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSource {
    /// Label used in logs and reports
    pub name: String,
    /// JSON pointer to the collection; empty string means the payload root
    pub pointer: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Present when the collection is a tree to be flattened
    #[serde(default)]
    pub hierarchy: Option<FlattenOptions>,
}

fn default_id_field() -> String {
    crate::diff::engine::DEFAULT_ID_FIELD.to_string()
}

impl RecordSource {
    /// A non-hierarchical source.
    pub fn flat(name: impl Into<String>, pointer: impl Into<String>, id_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: pointer.into(),
            id_field: id_field.into(),
            hierarchy: None,
        }
    }

    /// Pull this source's records out of `payload`, flattening when needed.
    ///
    /// For hierarchical sources the flattener's id field follows
    /// `self.id_field`.
    ///
    /// # Errors
    ///
    /// - `MissingCollection`: nothing at `pointer`
    /// - `RecordsNotASequence`: the value at `pointer` is not an array
    /// - flattener errors for hierarchical sources
    pub fn extract(&self, payload: &Value, side: &str) -> Result<Vec<Value>> {
        let collection = payload
            .pointer(&self.pointer)
            .ok_or_else(|| SdkDiffError::MissingCollection {
                pointer: self.pointer.clone(),
            })?;
        let records = collection
            .as_array()
            .ok_or_else(|| SdkDiffError::RecordsNotASequence {
                side: side.to_string(),
                found: json_type_name(collection).to_string(),
            })?;

        match &self.hierarchy {
            None => Ok(records.clone()),
            Some(options) => {
                let options = FlattenOptions {
                    id_field: self.id_field.clone(),
                    ..options.clone()
                };
                flatten(records, None, &options)
            }
        }
    }
}

impl From<RecordKind> for RecordSource {
    fn from(kind: RecordKind) -> Self {
        kind.source()
    }
}

/// Decode payload bytes into JSON.
///
/// # Errors
///
/// - `InvalidPayload`: bytes are not valid UTF-8 or not valid JSON
pub fn parse_payload_bytes(bytes: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| SdkDiffError::InvalidPayload {
        reason: format!("payload is not valid UTF-8: {}", e),
    })?;
    serde_json::from_str(text).map_err(|e| SdkDiffError::InvalidPayload {
        reason: format!("payload is not valid JSON: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.name().parse::<RecordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "schemas".parse::<RecordKind>().unwrap_err(),
            SdkDiffError::UnknownRecordKind {
                name: "schemas".to_string()
            }
        );
    }

    #[test]
    fn test_extract_flat_collection() {
        let payload = json!({"ver": "1.0", "fields": [{"id": "BT-01"}, {"id": "BT-02"}]});
        let records = RecordKind::Fields.source().extract(&payload, "main").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extract_missing_collection() {
        let payload = json!({"xmlStructure": []});
        assert_eq!(
            RecordKind::Fields.source().extract(&payload, "main").unwrap_err(),
            SdkDiffError::MissingCollection {
                pointer: "/fields".to_string()
            }
        );
    }

    #[test]
    fn test_extract_non_array_collection() {
        let payload = json!({"fields": {"id": "BT-01"}});
        assert!(matches!(
            RecordKind::Fields.source().extract(&payload, "base"),
            Err(SdkDiffError::RecordsNotASequence { .. })
        ));
    }

    #[test]
    fn test_extract_notice_type_content_flattens_groups() {
        let payload = json!({
            "noticeId": "16",
            "content": [
                {"id": "GR-Part", "contentType": "group", "content": [
                    {"id": "BT-01-notice", "contentType": "field"}
                ]},
                {"id": "BT-02-notice", "contentType": "field"}
            ]
        });
        let records = RecordKind::NoticeTypeContent
            .source()
            .extract(&payload, "main")
            .unwrap();
        let ids: Vec<&str> = records.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["GR-Part", "BT-01-notice", "BT-02-notice"]);
        assert_eq!(records[1]["parentId"], json!("GR-Part"));
    }

    #[test]
    fn test_root_pointer() {
        let payload = json!([{"id": 1}]);
        let source = RecordSource::flat("custom", "", "id");
        assert_eq!(source.extract(&payload, "main").unwrap().len(), 1);
    }

    #[test]
    fn test_source_deserializes_with_default_id() {
        let source: RecordSource =
            serde_json::from_value(json!({"name": "labels", "pointer": "/labels"})).unwrap();
        assert_eq!(source.id_field, "id");
        assert!(source.hierarchy.is_none());
    }

    #[test]
    fn test_parse_payload_bytes() {
        assert!(parse_payload_bytes(b"{\"fields\": []}").is_ok());
        assert!(matches!(
            parse_payload_bytes(b"{not json"),
            Err(SdkDiffError::InvalidPayload { .. })
        ));
        assert!(matches!(
            parse_payload_bytes(&[0xff, 0xfe]),
            Err(SdkDiffError::InvalidPayload { .. })
        ));
    }
}
