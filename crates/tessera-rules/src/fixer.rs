//! Bottom-up structural repair on absolute coordinates
//!
//! One pass, children before parents. For every layout container:
//! normalize Frame/Image roles, promote a Background when none exists,
//! keep only the largest Background, then wrap each cluster of overlapping
//! Decoration/Marker leaves into a new Group. Re-running on the output is a
//! no-op.

use crate::config::RepairConfig;
use crate::report::{RepairAction, RepairKind};
use std::collections::{HashMap, HashSet};
use tessera_core::{bounding_box, DisjointSet, NodeId, OverlapRule, Rect};
use tessera_tree::{Absolute, Node, NodeType, Role, Tree};

/// Applies structural repairs to a tree in absolute coordinates
pub struct StructureFixer<'a> {
    config: &'a RepairConfig,
}

impl<'a> StructureFixer<'a> {
    /// Create a new fixer
    pub fn new(config: &'a RepairConfig) -> Self {
        Self { config }
    }

    /// Repair the tree in place and return every change made
    pub fn repair(&self, tree: &mut Tree<Absolute>) -> Vec<RepairAction> {
        let mut pass = RepairPass {
            rule: self.config.overlap,
            taken: tree.root().ids(),
            actions: Vec::new(),
        };
        let root = tree.root_mut();
        pass.normalize(root, false);
        pass.repair_node(root);
        pass.actions
    }

    /// Dry run: repair a copy and return the actions without touching `tree`
    pub fn dry_run(&self, tree: &Tree<Absolute>) -> Vec<RepairAction> {
        let mut copy = tree.clone();
        self.repair(&mut copy)
    }
}

struct RepairPass {
    rule: OverlapRule,
    /// Every id in the tree, including groups created so far
    taken: HashSet<NodeId>,
    actions: Vec<RepairAction>,
}

impl RepairPass {
    fn record(&mut self, kind: RepairKind, node_id: &NodeId, description: String) {
        log::debug!("repair {:?} on '{}': {}", kind, node_id.short(), description);
        self.actions.push(RepairAction {
            kind,
            node_id: node_id.clone(),
            description,
        });
    }

    fn repair_node(&mut self, node: &mut Node) {
        if node.children.is_empty() {
            return;
        }

        let in_container = node.is_layout_container();
        for child in &mut node.children {
            self.normalize(child, in_container);
        }
        for child in &mut node.children {
            self.repair_node(child);
        }

        if in_container {
            self.repair_children(node);
        }
    }

    /// Frames are always markers; Images only when they are not laid out
    /// directly by a container (e.g. clipped inside a Frame).
    fn normalize(&mut self, node: &mut Node, in_container: bool) {
        if node.role == Role::MARKER || node.role.is_background() {
            return;
        }

        let kind = match node.node_type {
            NodeType::Frame => RepairKind::NormalizeFrame,
            NodeType::Image if !in_container => RepairKind::NormalizeImage,
            _ => return,
        };

        let previous = node.role;
        node.role = Role::MARKER;
        self.record(kind, &node.id, format!("{} -> {}", previous, Role::MARKER));
    }

    /// Container-level steps, run once the children are repaired
    fn repair_children(&mut self, container: &mut Node) {
        self.promote_background(container);
        self.dedup_backgrounds(container);
        self.group_overlaps(container);
    }

    fn promote_background(&mut self, container: &mut Node) {
        let children = &container.children;
        if children.iter().any(|c| c.role.is_background()) {
            return;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, child) in children.iter().enumerate() {
            let shape = matches!(child.node_type, NodeType::Svg | NodeType::Image);
            if !shape || child.role != Role::DECORATION {
                continue;
            }
            let behind_text = children
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && is_text_bearing(other) && child.rect.overlaps(&other.rect));
            if !behind_text {
                continue;
            }
            let area = child.rect.area();
            if best.map_or(true, |(_, a)| area > a) {
                best = Some((i, area));
            }
        }

        if let Some((i, _)) = best {
            let child = &mut container.children[i];
            child.role = Role::BACKGROUND;
            let id = child.id.clone();
            self.record(
                RepairKind::PromoteBackground,
                &id,
                "largest decoration behind text promoted to Background".to_string(),
            );
        }
    }

    fn dedup_backgrounds(&mut self, container: &mut Node) {
        let backgrounds: Vec<usize> = container
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.role.is_background())
            .map(|(i, _)| i)
            .collect();
        if backgrounds.len() < 2 {
            return;
        }

        let mut keep = backgrounds[0];
        for &i in &backgrounds[1..] {
            if container.children[i].rect.area() > container.children[keep].rect.area() {
                keep = i;
            }
        }

        let kept_id = container.children[keep].id.clone();
        for i in backgrounds.into_iter().filter(|&i| i != keep) {
            let child = &mut container.children[i];
            child.role = Role::DECORATION;
            let id = child.id.clone();
            self.record(
                RepairKind::DemoteBackground,
                &id,
                format!("extra Background demoted; '{}' kept", kept_id),
            );
        }
    }

    fn group_overlaps(&mut self, container: &mut Node) {
        let components: Vec<Vec<usize>> = self
            .overlap_components(&container.children)
            .into_iter()
            .filter(|members| {
                // A Group that is already exactly one cluster stays as it is.
                !(container.node_type == NodeType::Group
                    && members.len() == container.children.len())
            })
            .collect();
        if components.is_empty() {
            return;
        }

        let leaders: HashMap<usize, usize> = components
            .iter()
            .enumerate()
            .map(|(ci, members)| (members[0], ci))
            .collect();

        let mut slots: Vec<Option<Node>> = std::mem::take(&mut container.children)
            .into_iter()
            .map(Some)
            .collect();
        let mut children = Vec::with_capacity(slots.len());

        for i in 0..slots.len() {
            if let Some(&ci) = leaders.get(&i) {
                let members: Vec<Node> = components[ci]
                    .iter()
                    .filter_map(|&m| slots[m].take())
                    .collect();
                let mut group = self.make_group(members);
                self.repair_children(&mut group);
                children.push(group);
            } else if let Some(node) = slots[i].take() {
                children.push(node);
            }
        }

        container.children = children;
    }

    /// Clusters of overlapping Decoration/Marker leaves, size two or more,
    /// ordered by their first member
    fn overlap_components(&self, children: &[Node]) -> Vec<Vec<usize>> {
        let eligible: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_layout_container() && c.role.is_decoration_or_marker())
            .map(|(i, _)| i)
            .collect();
        if eligible.len() < 2 {
            return Vec::new();
        }

        let mut set = DisjointSet::new(eligible.len());
        for a in 0..eligible.len() {
            for b in (a + 1)..eligible.len() {
                let (ra, rb) = (&children[eligible[a]].rect, &children[eligible[b]].rect);
                if self.rule.test(ra, rb) {
                    set.union(a, b);
                }
            }
        }

        set.groups()
            .into_iter()
            .filter(|g| g.len() >= 2)
            .map(|g| g.into_iter().map(|k| eligible[k]).collect())
            .collect()
    }

    fn make_group(&mut self, members: Vec<Node>) -> Node {
        let first = members[0].id.clone();
        let id = self.fresh_group_id(&first);
        let rect = bounding_box(members.iter().map(|m| &m.rect)).unwrap_or(Rect::default());

        let member_ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
        let description = format!("grouped {}", member_ids.join(", "));
        self.record(RepairKind::CreateGroup, &id, description);

        Node::new(id, Role::DECORATION_GROUP, NodeType::Group, rect).with_children(members)
    }

    fn fresh_group_id(&mut self, first: &NodeId) -> NodeId {
        let mut attempt = 0;
        loop {
            let candidate = NodeId::synthetic_group(first, attempt);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            attempt += 1;
        }
    }
}

/// Whether a node shows text. Backgrounds, decorations, markers and
/// decoration groups never count, and neither does anything beneath them.
fn is_text_bearing(node: &Node) -> bool {
    let role = node.role;
    if role.is_background() || role.is_decoration_or_marker() || role == Role::DECORATION_GROUP {
        return false;
    }
    node.node_type == NodeType::Text || role.is_text() || node.children.iter().any(is_text_bearing)
}
