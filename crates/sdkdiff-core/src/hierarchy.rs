//! Hierarchy flattening.
//!
//! Nested record trees (a node optionally holding a child collection) are
//! converted into a flat, pre-ordered sequence where every record names its
//! parent explicitly, so the diff engine can treat them like any flat
//! collection.

use crate::diff::record_id::RecordId;
use crate::errors::{Result, SdkDiffError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decides whether a node is a grouping node whose children are flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum GroupRule {
    /// Every node is a potential group
    Always,
    /// A node is a group when `field` holds exactly `value`
    FieldEquals { field: String, value: Value },
    /// A node is a group when `field` is `true`
    Flag { field: String },
}

impl GroupRule {
    pub fn is_group(&self, node: &Map<String, Value>) -> bool {
        match self {
            GroupRule::Always => true,
            GroupRule::FieldEquals { field, value } => node.get(field) == Some(value),
            GroupRule::Flag { field } => node.get(field).and_then(Value::as_bool) == Some(true),
        }
    }
}

/// Field names used while flattening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    pub id_field: String,
    /// Property holding a node's children; never copied into output records
    pub children_field: String,
    /// Property added to every output record
    pub parent_field: String,
    pub group: GroupRule,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            children_field: "content".to_string(),
            parent_field: "parentId".to_string(),
            group: GroupRule::Always,
        }
    }
}

/// Flatten `nodes` using `options.group` to recognise groups.
///
/// Root records get a `null` parent when `parent_id` is `None`.
///
/// # Errors
///
/// - `NodeNotAnObject`: a node is not a JSON object
/// - `NodeMissingId`: a node has no id value (absent or `null`)
/// - `InvalidChildren`: a group node's child collection is not an array
pub fn flatten(
    nodes: &[Value],
    parent_id: Option<&Value>,
    options: &FlattenOptions,
) -> Result<Vec<Value>> {
    flatten_with(nodes, parent_id, options, |node| options.group.is_group(node))
}

/// Flatten `nodes` with a caller-supplied group predicate.
///
/// Each node is emitted as a copy of its own properties minus the child
/// collection, plus the parent reference. A group's descendants follow it
/// immediately (pre-order). A missing or `null` child collection means no
/// children.
///
/// # Errors
///
/// See [`flatten`].
pub fn flatten_with<F>(
    nodes: &[Value],
    parent_id: Option<&Value>,
    options: &FlattenOptions,
    is_group: F,
) -> Result<Vec<Value>>
where
    F: Fn(&Map<String, Value>) -> bool,
{
    let mut out = Vec::new();
    flatten_into(&mut out, nodes, parent_id, options, &is_group)?;
    Ok(out)
}

fn flatten_into<F>(
    out: &mut Vec<Value>,
    nodes: &[Value],
    parent_id: Option<&Value>,
    options: &FlattenOptions,
    is_group: &F,
) -> Result<()>
where
    F: Fn(&Map<String, Value>) -> bool,
{
    for (index, node) in nodes.iter().enumerate() {
        let obj = node
            .as_object()
            .ok_or(SdkDiffError::NodeNotAnObject { index })?;

        let id = match obj.get(&options.id_field) {
            Some(id) if !id.is_null() => id,
            _ => {
                return Err(SdkDiffError::NodeMissingId {
                    index,
                    id_field: options.id_field.clone(),
                    parent_id: parent_id.map(|p| RecordId::from(p).to_string()),
                })
            }
        };

        let mut record: Map<String, Value> = obj
            .iter()
            .filter(|(k, _)| **k != options.children_field)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        record.insert(
            options.parent_field.clone(),
            parent_id.cloned().unwrap_or(Value::Null),
        );
        out.push(Value::Object(record));

        if !is_group(obj) {
            continue;
        }
        match obj.get(&options.children_field) {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => {
                flatten_into(out, children, Some(id), options, is_group)?;
            }
            Some(_) => {
                return Err(SdkDiffError::InvalidChildren {
                    node_id: RecordId::from(id).to_string(),
                    children_field: options.children_field.clone(),
                })
            }
        }
    }
    Ok(())
}
