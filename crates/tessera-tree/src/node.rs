//! The in-memory design object tree

use crate::kind::{Direction, NodeType};
use crate::role::Role;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tessera_core::{NodeId, Rect, Result, Sides, TesseraError};

/// Layout attributes written by layout inference
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutAttrs {
    pub direction: Option<Direction>,
    pub padding: Option<Sides>,
    pub gap: Option<f64>,
}

impl LayoutAttrs {
    pub fn is_empty(&self) -> bool {
        self.direction.is_none() && self.padding.is_none() && self.gap.is_none()
    }
}

/// A single design object.
///
/// `rect` is interpreted in whatever coordinate space the owning
/// [`Tree`](crate::Tree) is in. Fields the tools do not understand are kept
/// in `extra` and written back unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub role: Role,
    pub node_type: NodeType,
    pub rect: Rect,
    pub layout: LayoutAttrs,
    pub children: Vec<Node>,
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, role: Role, node_type: NodeType, rect: Rect) -> Self {
        Self {
            id: id.into(),
            role,
            node_type,
            rect,
            layout: LayoutAttrs::default(),
            children: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Builder-style helper for constructing small trees
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_layout_container(&self) -> bool {
        self.node_type.is_layout_container()
    }

    /// Pre-order iterator over this node and all descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Visit every node with its depth (this node is depth 1)
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize),
    {
        fn go<F: FnMut(&Node, usize)>(node: &Node, depth: usize, visit: &mut F) {
            visit(node, depth);
            for child in &node.children {
                go(child, depth + 1, visit);
            }
        }
        go(self, 1, &mut visit);
    }

    /// Number of levels in this subtree (a lone leaf has depth 1)
    pub fn max_depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Node::max_depth)
            .max()
            .unwrap_or(0)
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|n| &n.id == id)
    }

    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Every id in this subtree
    pub fn ids(&self) -> HashSet<NodeId> {
        self.iter().map(|n| n.id.clone()).collect()
    }
}

/// Pre-order traversal over borrowed nodes
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Parent links keyed by id.
///
/// Nodes own their children; upward navigation goes through this index
/// instead of back-pointers. Building it also rejects duplicate ids, which
/// is the only way a JSON tree can alias a node.
#[derive(Debug, Default)]
pub struct TreeIndex {
    parents: HashMap<NodeId, NodeId>,
    ids: HashSet<NodeId>,
}

impl TreeIndex {
    pub fn build(root: &Node) -> Result<Self> {
        let mut index = TreeIndex::default();
        index.insert(root, None)?;
        Ok(index)
    }

    fn insert(&mut self, node: &Node, parent: Option<&NodeId>) -> Result<()> {
        if !self.ids.insert(node.id.clone()) {
            return Err(TesseraError::DuplicateNodeId(node.id.to_string()));
        }
        if let Some(parent) = parent {
            self.parents.insert(node.id.clone(), parent.clone());
        }
        for child in &node.children {
            self.insert(child, Some(&node.id))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.parents.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::ElementRole;

    fn leaf(id: &str, node_type: NodeType) -> Node {
        Node::new(
            id,
            Role::Element(ElementRole::Title),
            node_type,
            Rect::new(0.0, 0.0, 10.0, 10.0),
        )
    }

    fn sample() -> Node {
        Node::new(
            "root",
            Role::DECORATION_GROUP,
            NodeType::ZStack,
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .with_children(vec![
            leaf("a", NodeType::Text),
            Node::new(
                "stack",
                Role::DECORATION_GROUP,
                NodeType::VStack,
                Rect::new(0.0, 0.0, 50.0, 50.0),
            )
            .with_children(vec![leaf("b", NodeType::Text), leaf("c", NodeType::Svg)]),
        ])
    }

    #[test]
    fn test_preorder() {
        let root = sample();
        let ids: Vec<&str> = root.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "stack", "b", "c"]);
    }

    #[test]
    fn test_depth_and_counts() {
        let root = sample();
        assert_eq!(root.max_depth(), 3);
        assert_eq!(leaf("x", NodeType::Text).max_depth(), 1);

        let mut depths = Vec::new();
        root.walk(|n, d| depths.push((n.id.to_string(), d)));
        assert_eq!(depths[3], ("b".to_string(), 3));
    }

    #[test]
    fn test_find() {
        let mut root = sample();
        assert!(root.find(&NodeId::from("c")).is_some());
        assert!(root.find(&NodeId::from("zzz")).is_none());
        root.find_mut(&NodeId::from("c")).unwrap().role = Role::MARKER;
        assert_eq!(root.find(&NodeId::from("c")).unwrap().role, Role::MARKER);
    }

    #[test]
    fn test_index_parents() {
        let root = sample();
        let index = TreeIndex::build(&root).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.parent_of(&NodeId::from("b")), Some(&NodeId::from("stack")));
        assert_eq!(index.parent_of(&NodeId::from("root")), None);
        assert_eq!(index.parent_of(&NodeId::from("c")), Some(&NodeId::from("stack")));
    }

    #[test]
    fn test_index_rejects_duplicates() {
        let mut root = sample();
        root.children[1].children[1].id = NodeId::from("a");
        let err = TreeIndex::build(&root).unwrap_err();
        assert!(matches!(err, TesseraError::DuplicateNodeId(id) if id == "a"));
    }
}
