//! Caller-side filters deciding which trees a scan looks at

use serde::{Deserialize, Serialize};
use std::fmt;
use tessera_tree::{Node, NodeType, PageRole, Role};

/// Which trees to include in a scan.
///
/// Depth counts levels: a lone root has depth 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    pub min_depth: usize,
    pub max_depth: usize,
    /// Skip trees where any node's role starts with one of these
    pub excluded_role_prefixes: Vec<String>,
    /// Skip trees containing any node of these types
    pub excluded_types: Vec<NodeType>,
    /// Skip trees whose root carries one of these roles
    pub excluded_root_roles: Vec<Role>,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            min_depth: 4,
            max_depth: 8,
            excluded_role_prefixes: vec!["Role.LayoutContainer.Page".to_string()],
            excluded_types: Vec::new(),
            excluded_root_roles: PageRole::ALL.iter().map(|r| Role::Page(*r)).collect(),
        }
    }
}

/// Why a tree was left out of a scan
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    RootRole(Role),
    ExcludedRole(String),
    ExcludedType(NodeType),
    DepthOutOfRange(usize),
}

impl SkipReason {
    /// Short stable code used as a summary bucket
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::RootRole(_) => "root_role",
            SkipReason::ExcludedRole(_) => "excluded_role",
            SkipReason::ExcludedType(_) => "excluded_type",
            SkipReason::DepthOutOfRange(_) => "depth_out_of_range",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::RootRole(role) => write!(f, "root role {}", role),
            SkipReason::ExcludedRole(prefix) => write!(f, "contains role {}*", prefix),
            SkipReason::ExcludedType(t) => write!(f, "contains {} node", t),
            SkipReason::DepthOutOfRange(d) => write!(f, "depth {} out of range", d),
        }
    }
}

impl ScanFilter {
    /// Filter that accepts every tree
    pub fn accept_all() -> Self {
        Self {
            min_depth: 0,
            max_depth: usize::MAX,
            excluded_role_prefixes: Vec::new(),
            excluded_types: Vec::new(),
            excluded_root_roles: Vec::new(),
        }
    }

    pub fn check(&self, root: &Node) -> Result<(), SkipReason> {
        if self.excluded_root_roles.contains(&root.role) {
            return Err(SkipReason::RootRole(root.role));
        }

        for node in root.iter() {
            if let Some(prefix) = self
                .excluded_role_prefixes
                .iter()
                .find(|p| node.role.has_prefix(p))
            {
                return Err(SkipReason::ExcludedRole(prefix.clone()));
            }
            if self.excluded_types.contains(&node.node_type) {
                return Err(SkipReason::ExcludedType(node.node_type));
            }
        }

        let depth = root.max_depth();
        if depth < self.min_depth || depth > self.max_depth {
            return Err(SkipReason::DepthOutOfRange(depth));
        }
        Ok(())
    }
}
