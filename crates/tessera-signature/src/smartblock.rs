//! Repeated-block detection and smart-block scoring
//!
//! Every layout container is searched for children that repeat: first by
//! exact signature, then by skeleton, then by similarity grouping. Each
//! later method only replaces an earlier one when it finds more repeats.
//! The strongest container across the input trees decides the score.

use crate::config::SignatureConfig;
use crate::signature::ExactSignature;
use crate::similarity::{mean_pairwise_similarity, similar_groups};
use crate::skeleton::SkeletonSignature;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tessera_core::NodeId;
use tessera_tree::{Node, NodeType};

/// Score at or above which a tree is a smart-block candidate
const ELIGIBLE_SCORE: u8 = 5;
const MAX_SCORE: u8 = 10;

/// How the repeating children were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Skeleton,
    Similarity,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchKind::Exact => "exact",
            MatchKind::Skeleton => "skeleton",
            MatchKind::Similarity => "similarity",
        })
    }
}

/// What a repeated block looks like, judged from one sample child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    ProfileCard,
    ImageTextCard,
    ImageGrid,
    IconTextCard,
    IconTitleList,
    IconGrid,
    InfoCardGrid,
    TitleList,
    ContentBlockGrid,
    TextList,
    Generic,
}

impl PatternKind {
    /// Classify a sample child, looking at most `max_depth` levels down
    pub fn classify(sample: &Node, max_depth: usize) -> Self {
        let mut features = Features::default();
        sample.walk(|node, depth| {
            if depth > max_depth + 1 {
                return;
            }
            features.image |= matches!(node.node_type, NodeType::Image | NodeType::Frame);
            features.svg |= node.node_type == NodeType::Svg;
            match node.role.leaf_name() {
                "Title" => features.title = true,
                "Description" => features.description = true,
                "Subtitle" => features.subtitle = true,
                _ => {}
            }
        });

        let Features {
            image,
            svg,
            title,
            description,
            subtitle,
        } = features;

        if image {
            if title && (description || subtitle) {
                PatternKind::ProfileCard
            } else if title {
                PatternKind::ImageTextCard
            } else {
                PatternKind::ImageGrid
            }
        } else if svg {
            if title && description {
                PatternKind::IconTextCard
            } else if title {
                PatternKind::IconTitleList
            } else {
                PatternKind::IconGrid
            }
        } else if sample.node_type.is_stack() {
            if title && description {
                PatternKind::InfoCardGrid
            } else if title {
                PatternKind::TitleList
            } else {
                PatternKind::ContentBlockGrid
            }
        } else if sample.node_type == NodeType::Text {
            PatternKind::TextList
        } else {
            PatternKind::Generic
        }
    }

    /// Patterns that earn the semantic bonus
    pub fn is_meaningful(&self) -> bool {
        matches!(
            self,
            PatternKind::ProfileCard
                | PatternKind::IconTextCard
                | PatternKind::InfoCardGrid
                | PatternKind::ImageTextCard
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternKind::ProfileCard => "profile card (image + title + text)",
            PatternKind::ImageTextCard => "image + title card",
            PatternKind::ImageGrid => "image grid",
            PatternKind::IconTextCard => "icon + title + description card",
            PatternKind::IconTitleList => "icon + title list",
            PatternKind::IconGrid => "icon/decoration grid",
            PatternKind::InfoCardGrid => "info card grid (title + description)",
            PatternKind::TitleList => "title list",
            PatternKind::ContentBlockGrid => "content block grid",
            PatternKind::TextList => "text list",
            PatternKind::Generic => "generic repeated block",
        }
    }
}

#[derive(Default)]
struct Features {
    image: bool,
    svg: bool,
    title: bool,
    description: bool,
    subtitle: bool,
}

/// A container whose children repeat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatingContainer {
    pub path: String,
    /// Root is 0
    pub depth: usize,
    pub container: NodeId,
    pub container_type: NodeType,
    pub total_children: usize,
    pub repeating_count: usize,
    pub repeating_ratio: f64,
    pub match_kind: MatchKind,
    /// Mean pairwise similarity of the members (1.0 for exact/skeleton)
    pub similarity: f64,
    /// Child indices of the repeating members
    pub members: Vec<usize>,
    pub sample_signature: String,
    pub sample_hash: String,
    pub pattern: PatternKind,
}

impl RepeatingContainer {
    /// More repeats, then higher ratio, then shallower
    fn outranks(&self, other: &RepeatingContainer) -> bool {
        match self.repeating_count.cmp(&other.repeating_count) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.repeating_ratio.partial_cmp(&other.repeating_ratio) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Less) => false,
                _ => self.depth < other.depth,
            },
        }
    }
}

/// Smart-block verdict for one tree or forest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartBlockResult {
    pub eligible: bool,
    pub score: u8,
    pub repeatable_count: usize,
    pub pattern: Option<PatternKind>,
    pub container_type: Option<NodeType>,
    pub best: Option<RepeatingContainer>,
    pub repeating: Vec<RepeatingContainer>,
}

impl SmartBlockResult {
    pub fn summary(&self) -> String {
        match &self.best {
            Some(best) => format!(
                "{} x {} in {} ({:.0}%, {} match), score {}/{}",
                best.repeating_count,
                best.pattern.description(),
                best.container_type,
                best.repeating_ratio * 100.0,
                best.match_kind,
                self.score,
                MAX_SCORE
            ),
            None => format!("no repeating elements, score {}/{}", self.score, MAX_SCORE),
        }
    }
}

/// Count element nodes (Text/SVG/Image/Frame) without descending into them
pub fn count_leaf_elements(node: &Node) -> usize {
    if node.node_type.is_element() {
        1
    } else {
        node.children.iter().map(count_leaf_elements).sum()
    }
}

/// Every container under `root` whose children repeat, in pre-order
pub fn find_repeating_containers(root: &Node, config: &SignatureConfig) -> Vec<RepeatingContainer> {
    let mut found = Vec::new();
    scan(root, 0, "root".to_string(), config, &mut found);
    found
}

/// Score the best repeating container across `roots`
pub fn evaluate_smartblock(roots: &[&Node], config: &SignatureConfig) -> SmartBlockResult {
    let mut repeating = Vec::new();
    for (i, root) in roots.iter().enumerate() {
        let path = if roots.len() == 1 {
            "root".to_string()
        } else {
            format!("root[{}]", i)
        };
        scan(root, 0, path, config, &mut repeating);
    }

    let mut best: Option<&RepeatingContainer> = None;
    for candidate in &repeating {
        if best.map_or(true, |current| candidate.outranks(current)) {
            best = Some(candidate);
        }
    }
    let best = best.cloned();

    let score = best.as_ref().map_or(1, score_of);
    let repeatable_count = best.as_ref().map_or(0, |b| b.repeating_count);

    SmartBlockResult {
        eligible: score >= ELIGIBLE_SCORE && repeatable_count >= 2,
        score,
        repeatable_count,
        pattern: best.as_ref().map(|b| b.pattern),
        container_type: best.as_ref().map(|b| b.container_type),
        best,
        repeating,
    }
}

fn score_of(best: &RepeatingContainer) -> u8 {
    let mut score = 1;
    score += match best.repeating_count {
        n if n >= 4 => 4,
        3 => 3,
        _ => 2,
    };
    if best.repeating_ratio >= 1.0 {
        score += 3;
    } else if best.repeating_ratio >= 0.8 {
        score += 2;
    } else if best.repeating_ratio >= 0.5 {
        score += 1;
    }
    if best.container_type == NodeType::Grid {
        score += 1;
    }
    if best.pattern.is_meaningful() {
        score += 1;
    }
    score.min(MAX_SCORE)
}

fn scan(
    node: &Node,
    depth: usize,
    path: String,
    config: &SignatureConfig,
    found: &mut Vec<RepeatingContainer>,
) {
    if let Some(container) = analyze(node, depth, &path, config) {
        log::debug!(
            "'{}' at {}: {} repeating children ({})",
            node.id.short(),
            path,
            container.repeating_count,
            container.match_kind
        );
        found.push(container);
    }
    for (i, child) in node.children.iter().enumerate() {
        scan(child, depth + 1, format!("{}.children[{}]", path, i), config, found);
    }
}

fn analyze(
    node: &Node,
    depth: usize,
    path: &str,
    config: &SignatureConfig,
) -> Option<RepeatingContainer> {
    if !node.is_layout_container() || node.children.len() < 2 {
        return None;
    }

    let candidates: Vec<(usize, &Node)> = node
        .children
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_layout_container() && count_leaf_elements(c) >= config.min_leaf_count)
        .collect();
    if candidates.len() < 2 {
        return None;
    }

    let exact: Vec<ExactSignature> = candidates
        .iter()
        .map(|(_, c)| ExactSignature::of(c, config.exact_max_depth))
        .collect();
    let mut matched = (MatchKind::Exact, largest_bucket(&exact), 1.0);

    let skeletons: Vec<SkeletonSignature> = candidates
        .iter()
        .map(|(_, c)| SkeletonSignature::of(c, config.skeleton_max_depth))
        .collect();
    let shapes: Vec<String> = skeletons.iter().map(SkeletonSignature::shape_key).collect();
    let by_shape = largest_bucket(&shapes);
    if by_shape.len() >= 2 && by_shape.len() > matched.1.len() {
        matched = (MatchKind::Skeleton, by_shape, 1.0);
    }

    if config.use_similarity {
        let mut largest: Option<Vec<usize>> = None;
        for group in similar_groups(&skeletons, config.similarity_threshold) {
            if largest.as_ref().map_or(true, |l| group.len() > l.len()) {
                largest = Some(group);
            }
        }
        if let Some(group) = largest {
            if group.len() > matched.1.len() {
                let score = mean_pairwise_similarity(&skeletons, &group);
                matched = (MatchKind::Similarity, group, score);
            }
        }
    }

    let (match_kind, members, similarity) = matched;
    if members.len() < 2 {
        return None;
    }

    let sample = candidates[members[0]].1;
    let sample_signature = &exact[members[0]];
    Some(RepeatingContainer {
        path: path.to_string(),
        depth,
        container: node.id.clone(),
        container_type: node.node_type,
        total_children: node.children.len(),
        repeating_count: members.len(),
        repeating_ratio: members.len() as f64 / node.children.len() as f64,
        match_kind,
        similarity,
        members: members.iter().map(|&m| candidates[m].0).collect(),
        sample_signature: sample_signature.to_string(),
        sample_hash: sample_signature.hash().short_hex(),
        pattern: PatternKind::classify(sample, config.exact_max_depth),
    })
}

/// Indices of the most common key; the earliest key wins a tie
fn largest_bucket<K: PartialEq>(keys: &[K]) -> Vec<usize> {
    let mut buckets: Vec<(&K, Vec<usize>)> = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(i),
            None => buckets.push((key, vec![i])),
        }
    }

    let mut best: Vec<usize> = Vec::new();
    for (_, members) in buckets {
        if members.len() > best.len() {
            best = members;
        }
    }
    best
}
