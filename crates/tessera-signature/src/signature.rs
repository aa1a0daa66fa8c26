//! Exact structural signatures

use std::fmt;
use tessera_core::ContentHash;
use tessera_tree::Node;

/// Marker written in place of subtrees below the depth cap
pub(crate) const TRUNCATED: &str = "...";

/// Ordered role/type structure of a subtree.
///
/// Renders as `role:type[child,child]` with geometry and text ignored.
/// Levels deeper than `max_depth` (root is 0) collapse to `...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactSignature(String);

impl ExactSignature {
    pub fn of(node: &Node, max_depth: usize) -> Self {
        let mut text = String::new();
        write_node(node, 0, max_depth, &mut text);
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hash(&self) -> ContentHash {
        ContentHash::of(&self.0)
    }
}

impl fmt::Display for ExactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_node(node: &Node, depth: usize, max_depth: usize, out: &mut String) {
    if depth > max_depth {
        out.push_str(TRUNCATED);
        return;
    }
    out.push_str(&format!("{}:{}", node.role, node.node_type));
    if node.children.is_empty() {
        return;
    }
    out.push('[');
    for (i, child) in node.children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_node(child, depth + 1, max_depth, out);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Rect;
    use tessera_tree::{ContainerRole, ElementRole, NodeType, Role};

    fn card(id: &str, x: f64) -> Node {
        Node::new(
            id,
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::VStack,
            Rect::new(x, 0.0, 100.0, 100.0),
        )
        .with_children(vec![
            Node::new(format!("{id}-t"), Role::Element(ElementRole::Title), NodeType::Text, Rect::new(0.0, 0.0, 100.0, 20.0)),
            Node::new(format!("{id}-d"), Role::Element(ElementRole::Description), NodeType::Text, Rect::new(0.0, 30.0, 100.0, 20.0)),
        ])
    }

    #[test]
    fn test_format() {
        let sig = ExactSignature::of(&card("a", 0.0), 3);
        assert_eq!(
            sig.as_str(),
            "Role.LayoutContainer.Content:VStack[Role.Element.Title:Text,Role.Element.Description:Text]"
        );
    }

    #[test]
    fn test_geometry_and_ids_ignored() {
        let a = ExactSignature::of(&card("a", 0.0), 3);
        let b = ExactSignature::of(&card("b", 250.0), 3);
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash().short_hex().len(), 8);
    }

    #[test]
    fn test_depth_cap() {
        let sig = ExactSignature::of(&card("a", 0.0), 0);
        assert_eq!(sig.as_str(), "Role.LayoutContainer.Content:VStack[...,...]");
    }

    #[test]
    fn test_child_order_matters() {
        let mut swapped = card("a", 0.0);
        swapped.children.reverse();
        assert_ne!(ExactSignature::of(&swapped, 3), ExactSignature::of(&card("a", 0.0), 3));
    }
}
