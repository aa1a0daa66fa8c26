//! Tree loading from JSON

use crate::format::NodeDef;
use crate::kind::NodeType;
use crate::node::{LayoutAttrs, Node, TreeIndex};
use crate::role::Role;
use crate::space::{Relative, Tree};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tessera_core::{NodeId, Result, TesseraError};

/// Deepest nesting accepted before a tree is treated as malformed
pub const MAX_TREE_DEPTH: usize = 64;

/// Load a tree from a JSON file
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<Tree<Relative>> {
    let content = fs::read_to_string(path)?;
    load_tree_string(&content)
}

/// Load a tree from a JSON string
pub fn load_tree_string(content: &str) -> Result<Tree<Relative>> {
    let def: NodeDef = serde_json::from_str(content).map_err(parse_error)?;
    tree_from_def(def)
}

/// Load a tree from an already-parsed JSON value
pub fn load_tree_value(value: Value) -> Result<Tree<Relative>> {
    let def: NodeDef = serde_json::from_value(value).map_err(parse_error)?;
    tree_from_def(def)
}

/// Load one or more trees from a file holding an object or an array of objects
pub fn load_forest<P: AsRef<Path>>(path: P) -> Result<Vec<Tree<Relative>>> {
    let content = fs::read_to_string(path)?;
    load_forest_string(&content)
}

/// Load one or more trees from a JSON object or array
pub fn load_forest_string(content: &str) -> Result<Vec<Tree<Relative>>> {
    let value: Value = serde_json::from_str(content).map_err(parse_error)?;
    match value {
        Value::Array(items) => items.into_iter().map(load_tree_value).collect(),
        other => Ok(vec![load_tree_value(other)?]),
    }
}

/// Convert a parsed definition into a checked tree
pub fn tree_from_def(def: NodeDef) -> Result<Tree<Relative>> {
    let root = node_from_def(def, 1)?;
    TreeIndex::build(&root)?;
    Ok(Tree::relative(root))
}

fn node_from_def(def: NodeDef, depth: usize) -> Result<Node> {
    if depth > MAX_TREE_DEPTH {
        return Err(TesseraError::malformed(
            def.id,
            format!("nesting deeper than {} levels", MAX_TREE_DEPTH),
        ));
    }

    let role: Role = def
        .role
        .parse()
        .map_err(|e: TesseraError| TesseraError::malformed(def.id.as_str(), e.to_string()))?;
    let node_type: NodeType = def
        .node_type
        .parse()
        .map_err(|e: TesseraError| TesseraError::malformed(def.id.as_str(), e.to_string()))?;

    let p = &def.position;
    if ![p.x, p.y, p.width, p.height].iter().all(|v| v.is_finite()) {
        return Err(TesseraError::malformed(def.id, "non-finite position"));
    }

    let children = def
        .children
        .into_iter()
        .map(|child| node_from_def(child, depth + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Node {
        id: NodeId::new(def.id),
        role,
        node_type,
        rect: def.position,
        layout: LayoutAttrs {
            direction: def.direction,
            padding: def.padding,
            gap: def.gap,
        },
        children,
        extra: def.extra,
    })
}

fn parse_error(err: serde_json::Error) -> TesseraError {
    TesseraError::malformed("<input>", err.to_string())
}
