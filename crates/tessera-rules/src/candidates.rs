//! Fix-candidate finder
//!
//! Scans a tree for the two problems the repair engine addresses and says
//! where they are, without changing anything. Only sibling rectangles are
//! compared, so the tree may be in either coordinate space.

use crate::config::CandidateConfig;
use serde::Serialize;
use tessera_core::NodeId;
use tessera_tree::{Node, NodeType};

/// Overlap pairs kept per container in a report
const MAX_SAMPLE_PAIRS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundRef {
    pub id: NodeId,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapPair {
    pub first: NodeId,
    pub second: NodeId,
}

/// One problem found under one container.
///
/// `depth` counts from the root at 0; `path` reads like
/// `root.children[0].children[2]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue_type", rename_all = "snake_case")]
pub enum CandidateIssue {
    MultipleBackgrounds {
        depth: usize,
        path: String,
        container: NodeId,
        backgrounds: Vec<BackgroundRef>,
    },
    OverlappingDecorations {
        depth: usize,
        path: String,
        container: NodeId,
        pair_count: usize,
        pairs: Vec<OverlapPair>,
    },
}

impl CandidateIssue {
    pub fn depth(&self) -> usize {
        match self {
            CandidateIssue::MultipleBackgrounds { depth, .. }
            | CandidateIssue::OverlappingDecorations { depth, .. } => *depth,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            CandidateIssue::MultipleBackgrounds { path, .. }
            | CandidateIssue::OverlappingDecorations { path, .. } => path,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CandidateIssue::MultipleBackgrounds { .. } => "multiple_backgrounds",
            CandidateIssue::OverlappingDecorations { .. } => "overlapping_decorations",
        }
    }
}

/// Everything found in one tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateReport {
    pub needs_fix: bool,
    pub issue_count: usize,
    /// Deepest issue depth (0 when there are none)
    pub max_depth: usize,
    pub issues: Vec<CandidateIssue>,
}

/// Find fix candidates in the subtree rooted at `root`
pub fn find_candidates(root: &Node, config: &CandidateConfig) -> CandidateReport {
    let mut issues = Vec::new();
    scan(root, 0, "root".to_string(), config, &mut issues);

    CandidateReport {
        needs_fix: !issues.is_empty(),
        issue_count: issues.len(),
        max_depth: issues.iter().map(CandidateIssue::depth).max().unwrap_or(0),
        issues,
    }
}

fn scan(
    node: &Node,
    depth: usize,
    path: String,
    config: &CandidateConfig,
    issues: &mut Vec<CandidateIssue>,
) {
    let children = &node.children;
    if children.is_empty() {
        return;
    }

    let backgrounds: Vec<BackgroundRef> = children
        .iter()
        .filter(|c| c.role.leaf_name() == "Background")
        .map(|c| BackgroundRef {
            id: c.id.clone(),
            node_type: c.node_type,
        })
        .collect();
    if backgrounds.len() > 1 {
        issues.push(CandidateIssue::MultipleBackgrounds {
            depth,
            path: path.clone(),
            container: node.id.clone(),
            backgrounds,
        });
    }

    let mut pairs = Vec::new();
    for (i, a) in children.iter().enumerate() {
        for b in &children[i + 1..] {
            if should_check_pair(a, b) && config.overlap.test(&a.rect, &b.rect) {
                pairs.push(OverlapPair {
                    first: a.id.clone(),
                    second: b.id.clone(),
                });
            }
        }
    }
    if !pairs.is_empty() {
        let pair_count = pairs.len();
        pairs.truncate(MAX_SAMPLE_PAIRS);
        issues.push(CandidateIssue::OverlappingDecorations {
            depth,
            path: path.clone(),
            container: node.id.clone(),
            pair_count,
            pairs,
        });
    }

    for (i, child) in children.iter().enumerate() {
        scan(child, depth + 1, format!("{}.children[{}]", path, i), config, issues);
    }
}

/// Backgrounds may overlap anything; otherwise a pair is checked when either
/// side is a Decoration/Marker (any namespace) or a Frame/Image
fn should_check_pair(a: &Node, b: &Node) -> bool {
    let (ra, rb) = (a.role.leaf_name(), b.role.leaf_name());
    if ra == "Background" || rb == "Background" {
        return false;
    }
    let checkable_role = |r: &str| r == "Decoration" || r == "Marker";
    let checkable_type = |t: NodeType| matches!(t, NodeType::Frame | NodeType::Image);
    checkable_role(ra) || checkable_role(rb) || checkable_type(a.node_type) || checkable_type(b.node_type)
}
