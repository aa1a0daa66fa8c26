//! External JSON format definitions

use crate::kind::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tessera_core::{Rect, Sides};

/// One node as it appears in a `structure_json` document.
///
/// Role and type stay strings here so that unknown values can be reported
/// with the offending node's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,

    pub role: String,

    #[serde(rename = "type")]
    pub node_type: String,

    pub position: Rect,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Sides>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,

    /// Fields the tools do not interpret, preserved on write
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
