//! Validate and fix entry points

use crate::classifier::{classify, composition_of, Verdict};
use crate::config::RulesConfig;
use crate::fixer::StructureFixer;
use crate::layout::infer_layout;
use crate::report::{
    Classification, ContainerReport, RepairReport, StructureWarning, ValidationReport,
};
use tessera_tree::{CoordSpace, ElementRole, Relative, Tree};

/// Classify every ZStack/Group in the tree.
///
/// The tree is `no_container` when it has no ZStack/Group at all, `invalid`
/// when any of them is invalid, and `valid` otherwise.
pub fn validate_structure<S: CoordSpace>(tree: &Tree<S>) -> ValidationReport {
    let mut containers = Vec::new();
    let mut warnings = Vec::new();

    tree.root().walk(|node, depth| {
        let titles = node
            .children
            .iter()
            .filter(|c| c.role.is_element(ElementRole::Title))
            .count();
        if titles > 1 {
            warnings.push(StructureWarning::TitleDuplicate {
                parent: node.id.clone(),
                count: titles,
            });
        }

        let verdict = classify(node);
        if verdict == Verdict::NoContainer {
            return;
        }
        log::debug!("classified '{}' ({}): {:?}", node.id.short(), node.node_type, verdict);
        containers.push(ContainerReport {
            id: node.id.clone(),
            node_type: node.node_type,
            depth,
            verdict,
            composition: composition_of(node),
        });
    });

    let classification = if containers.is_empty() {
        Classification::NoContainer
    } else if containers.iter().any(|c| c.verdict.is_invalid()) {
        Classification::Invalid
    } else {
        Classification::Valid
    };

    ValidationReport {
        classification,
        containers,
        warnings,
    }
}

/// Run the full repair pipeline.
///
/// Converts to absolute coordinates, repairs, converts back, infers layout
/// attributes and classifies the result. Containers that are still invalid
/// are reported, not repaired again.
pub fn fix_structure(
    tree: Tree<Relative>,
    config: &RulesConfig,
) -> (Tree<Relative>, RepairReport) {
    let mut absolute = tree.into_absolute();
    let actions = StructureFixer::new(&config.repair).repair(&mut absolute);

    let mut fixed = absolute.into_relative();
    infer_layout(&mut fixed);

    let validation = validate_structure(&fixed);
    if !actions.is_empty() {
        log::debug!(
            "'{}': {} repair action(s), now {}",
            fixed.root().id.short(),
            actions.len(),
            validation.classification
        );
    }

    (fixed, RepairReport { actions, validation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CompositionPattern, InvalidReason};
    use tessera_core::Rect;
    use tessera_tree::{ContainerRole, Node, NodeType, Role};

    fn title(id: &str) -> Node {
        Node::new(id, Role::Element(ElementRole::Title), NodeType::Text, Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_no_container() {
        let root = Node::new(
            "v",
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::VStack,
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .with_children(vec![title("t")]);
        let report = validate_structure(&Tree::relative(root));
        assert_eq!(report.classification, Classification::NoContainer);
        assert!(report.containers.is_empty());
    }

    #[test]
    fn test_invalid_if_any_container_invalid() {
        let good = Node::new("good", Role::DECORATION_GROUP, NodeType::Group, Rect::new(0.0, 0.0, 50.0, 50.0))
            .with_children(vec![
                Node::new("bg", Role::BACKGROUND, NodeType::Svg, Rect::new(0.0, 0.0, 50.0, 50.0)),
                title("t"),
            ]);
        let bad = Node::new("bad", Role::DECORATION_GROUP, NodeType::ZStack, Rect::new(0.0, 60.0, 50.0, 50.0))
            .with_children(vec![title("t2"), title("t3")]);
        let root = Node::new(
            "root",
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::VStack,
            Rect::new(0.0, 0.0, 100.0, 200.0),
        )
        .with_children(vec![good, bad]);

        let report = validate_structure(&Tree::relative(root));
        assert_eq!(report.classification, Classification::Invalid);
        assert_eq!(report.valid_count(), 1);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.containers[0].depth, 2);
        assert_eq!(
            report.containers[0].verdict,
            Verdict::Valid(CompositionPattern::BackgroundElement)
        );
        assert_eq!(
            report.reason_counts().get(&InvalidReason::CompositionMismatch),
            Some(&1)
        );
        assert_eq!(
            report.warnings,
            vec![StructureWarning::TitleDuplicate {
                parent: "bad".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_fix_structure_restores_relative_space() {
        let root = Node::new(
            "z",
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::ZStack,
            Rect::new(100.0, 100.0, 200.0, 200.0),
        )
        .with_children(vec![
            Node::new("bg", Role::BACKGROUND, NodeType::Svg, Rect::new(0.0, 0.0, 200.0, 200.0)),
            Node::new("a", Role::DECORATION, NodeType::Svg, Rect::new(20.0, 20.0, 40.0, 40.0)),
            Node::new("b", Role::MARKER, NodeType::Svg, Rect::new(50.0, 50.0, 40.0, 40.0)),
        ]);
        let (fixed, report) = fix_structure(Tree::relative(root), &RulesConfig::default());

        let group = &fixed.root().children[1];
        assert_eq!(group.rect, Rect::new(20.0, 20.0, 70.0, 70.0));
        assert_eq!(group.children[0].rect, Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(group.children[1].rect, Rect::new(30.0, 30.0, 40.0, 40.0));
        assert!(group.layout.padding.is_some());
        assert!(report.changed());

        // The outer container is fixed; the new group has no Background of its own.
        assert_eq!(
            report.validation.containers[0].verdict,
            Verdict::Valid(CompositionPattern::BackgroundElement)
        );
        let residual: Vec<&str> = report.residual().map(|c| c.id.as_str()).collect();
        assert_eq!(residual, vec!["group_a"]);
    }
}
