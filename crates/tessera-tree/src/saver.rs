//! Tree saving to JSON

use crate::format::NodeDef;
use crate::node::Node;
use crate::space::{CoordSpace, Tree};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tessera_core::Result;

/// Save a tree to a JSON file
pub fn save_tree<P: AsRef<Path>, S: CoordSpace>(path: P, tree: &Tree<S>) -> Result<()> {
    let content = save_tree_string(tree)?;
    fs::write(path, content)?;
    Ok(())
}

/// Save a tree to a pretty-printed JSON string
pub fn save_tree_string<S: CoordSpace>(tree: &Tree<S>) -> Result<String> {
    let content = serde_json::to_string_pretty(&node_to_def(tree.root()))?;
    Ok(content)
}

/// Convert a tree to a JSON value
pub fn tree_to_value<S: CoordSpace>(tree: &Tree<S>) -> Result<Value> {
    Ok(serde_json::to_value(node_to_def(tree.root()))?)
}

/// Convert a node (and its subtree) to its external definition
pub fn node_to_def(node: &Node) -> NodeDef {
    NodeDef {
        id: node.id.to_string(),
        role: node.role.to_string(),
        node_type: node.node_type.name().to_string(),
        position: node.rect,
        direction: node.layout.direction,
        padding: node.layout.padding,
        gap: node.layout.gap,
        children: node.children.iter().map(node_to_def).collect(),
        extra: node.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Direction, NodeType};
    use crate::loader::{load_tree, load_tree_string};
    use crate::role::Role;
    use tessera_core::{Rect, Sides};

    const SAMPLE: &str = r#"{
        "id": "root",
        "role": "Role.LayoutContainer.Content",
        "type": "VStack",
        "position": {"x": 0, "y": 0, "width": 200, "height": 100},
        "locked": true,
        "children": [
            {"id": "t", "role": "Role.Element.Title", "type": "Text",
             "position": {"x": 10, "y": 10, "width": 100, "height": 20}}
        ]
    }"#;

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let tree = load_tree_string(SAMPLE).unwrap();
        let out = save_tree_string(&tree).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["locked"], Value::Bool(true));
        assert_eq!(value["type"], "VStack");
        assert_eq!(value["children"][0]["role"], "Role.Element.Title");

        let again = load_tree_string(&out).unwrap();
        assert_eq!(again, tree);
    }

    #[test]
    fn test_layout_attrs_written_only_when_set() {
        let mut tree = load_tree_string(SAMPLE).unwrap();
        let value = tree_to_value(&tree).unwrap();
        assert!(value.get("direction").is_none());
        assert!(value["children"][0].get("children").is_none());

        tree.root_mut().layout.direction = Some(Direction::Vertical);
        tree.root_mut().layout.padding = Some(Sides::new(10.0, 90.0, 70.0, 10.0));
        tree.root_mut().layout.gap = Some(0.0);
        let value = tree_to_value(&tree).unwrap();
        assert_eq!(value["direction"], "vertical");
        assert_eq!(value["padding"]["right"], 90.0);
        assert_eq!(value["gap"], 0.0);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let tree = Tree::relative(Node::new(
            "solo",
            Role::DECORATION,
            NodeType::Svg,
            Rect::new(1.0, 2.0, 3.0, 4.0),
        ));
        save_tree(&path, &tree).unwrap();
        assert_eq!(load_tree(&path).unwrap(), tree);
    }
}
