//! Skeleton signatures
//!
//! A skeleton is an exact signature in which sibling subtrees with the same
//! shape are collapsed into one representative and a multiplicity. Two
//! lists of three and five identical cards therefore share a shape.

use crate::signature::TRUNCATED;
use std::fmt;
use tessera_core::ContentHash;
use tessera_tree::{Node, NodeType, Role};

#[derive(Debug, Clone, PartialEq)]
pub enum SkeletonSignature {
    /// Subtree below the depth cap
    Truncated,
    Node {
        role: Role,
        node_type: NodeType,
        /// Distinct child shapes in first-appearance order, with counts
        children: Vec<(SkeletonSignature, usize)>,
    },
}

impl SkeletonSignature {
    pub fn of(node: &Node, max_depth: usize) -> Self {
        Self::build(node, 0, max_depth)
    }

    fn build(node: &Node, depth: usize, max_depth: usize) -> Self {
        if depth > max_depth {
            return SkeletonSignature::Truncated;
        }

        let mut children: Vec<(SkeletonSignature, usize)> = Vec::new();
        for child in &node.children {
            let sig = Self::build(child, depth + 1, max_depth);
            let key = sig.shape_key();
            match children.iter_mut().find(|(seen, _)| seen.shape_key() == key) {
                Some((_, count)) => *count += 1,
                None => children.push((sig, 1)),
            }
        }

        SkeletonSignature::Node {
            role: node.role,
            node_type: node.node_type,
            children,
        }
    }

    /// The skeleton text without multiplicities
    pub fn shape_key(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, false);
        out
    }

    /// Hash of the shape key, so skeletons differing only in counts collide
    pub fn hash(&self) -> ContentHash {
        ContentHash::of(&self.shape_key())
    }

    pub fn children(&self) -> &[(SkeletonSignature, usize)] {
        match self {
            SkeletonSignature::Truncated => &[],
            SkeletonSignature::Node { children, .. } => children,
        }
    }

    fn write(&self, out: &mut String, with_counts: bool) {
        let (role, node_type, children) = match self {
            SkeletonSignature::Truncated => {
                out.push_str(TRUNCATED);
                return;
            }
            SkeletonSignature::Node {
                role,
                node_type,
                children,
            } => (role, node_type, children),
        };

        out.push_str(&format!("{}:{}", role, node_type));
        if children.is_empty() {
            return;
        }
        out.push('[');
        for (i, (child, count)) in children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            child.write(out, with_counts);
            if with_counts && *count > 1 {
                out.push_str(&format!("*{}", count));
            }
        }
        out.push(']');
    }
}

impl fmt::Display for SkeletonSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out, true);
        f.write_str(&out)
    }
}
