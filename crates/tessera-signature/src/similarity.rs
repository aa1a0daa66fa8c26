//! Positional structural similarity

use crate::skeleton::SkeletonSignature;
use tessera_core::DisjointSet;

/// Similarity of two skeletons in [0, 1].
///
/// Nodes with different role or type score 0. Two leaves score 1. Otherwise
/// child shapes are aligned by position and
/// `(1 + sum of child scores) / (1 + longer child list)` is returned, so
/// extra or missing children pull the score down. Truncated subtrees match
/// anything.
pub fn similarity(a: &SkeletonSignature, b: &SkeletonSignature) -> f64 {
    use SkeletonSignature::{Node, Truncated};

    match (a, b) {
        (Truncated, _) | (_, Truncated) => 1.0,
        (
            Node {
                role: ra,
                node_type: ta,
                children: ca,
            },
            Node {
                role: rb,
                node_type: tb,
                children: cb,
            },
        ) => {
            if ra != rb || ta != tb {
                return 0.0;
            }
            if ca.is_empty() && cb.is_empty() {
                return 1.0;
            }
            let matched: f64 = ca
                .iter()
                .zip(cb.iter())
                .map(|((x, _), (y, _))| similarity(x, y))
                .sum();
            (1.0 + matched) / (1.0 + ca.len().max(cb.len()) as f64)
        }
    }
}

/// Group indices whose pairwise similarity reaches `threshold`.
///
/// Pairs are joined transitively; only groups with two or more members are
/// returned, each sorted, ordered by their smallest index.
pub fn similar_groups(signatures: &[SkeletonSignature], threshold: f64) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(signatures.len());
    for i in 0..signatures.len() {
        for j in i + 1..signatures.len() {
            if similarity(&signatures[i], &signatures[j]) >= threshold {
                sets.union(i, j);
            }
        }
    }
    sets.groups().into_iter().filter(|g| g.len() >= 2).collect()
}

/// Mean similarity over all pairs of `members` (1.0 for fewer than two)
pub fn mean_pairwise_similarity(signatures: &[SkeletonSignature], members: &[usize]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (n, &i) in members.iter().enumerate() {
        for &j in &members[n + 1..] {
            total += similarity(&signatures[i], &signatures[j]);
            pairs += 1;
        }
    }
    if pairs == 0 {
        1.0
    } else {
        total / pairs as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tessera_core::Rect;
    use tessera_tree::{ContainerRole, ElementRole, Node, NodeType, Role};

    fn text(role: ElementRole) -> Node {
        Node::new("t", Role::Element(role), NodeType::Text, Rect::default())
    }

    fn card(children: Vec<Node>) -> SkeletonSignature {
        let node = Node::new(
            "c",
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::VStack,
            Rect::default(),
        )
        .with_children(children);
        SkeletonSignature::of(&node, 2)
    }

    #[test]
    fn test_identical_shapes() {
        let a = card(vec![text(ElementRole::Title), text(ElementRole::Description)]);
        let b = card(vec![text(ElementRole::Title), text(ElementRole::Description)]);
        assert_eq!(similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_root_mismatch() {
        let a = card(vec![]);
        let b = SkeletonSignature::of(&text(ElementRole::Title), 2);
        assert_eq!(similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_missing_child_decays() {
        let a = card(vec![text(ElementRole::Title), text(ElementRole::Description)]);
        let b = card(vec![text(ElementRole::Title)]);
        // (1 + 1) / (1 + 2)
        assert!((similarity(&a, &b) - 2.0 / 3.0).abs() < 1e-9);

        let c = card(vec![text(ElementRole::Title), text(ElementRole::Subtitle), text(ElementRole::Description)]);
        let d = card(vec![text(ElementRole::Title), text(ElementRole::Highlight), text(ElementRole::Description)]);
        assert!((similarity(&c, &d) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_groups() {
        let sigs = vec![
            card(vec![text(ElementRole::Title), text(ElementRole::Description)]),
            SkeletonSignature::of(&text(ElementRole::Title), 2),
            card(vec![text(ElementRole::Title), text(ElementRole::Description)]),
            card(vec![text(ElementRole::Title), text(ElementRole::Description), text(ElementRole::Subtitle)]),
        ];
        let groups = similar_groups(&sigs, 0.7);
        assert_eq!(groups, vec![vec![0, 2, 3]]);
        // 1.0, 0.75, 0.75
        let mean = mean_pairwise_similarity(&sigs, &groups[0]);
        assert!((mean - 2.5 / 3.0).abs() < 1e-9);
    }

    fn arb_role() -> impl Strategy<Value = ElementRole> {
        prop_oneof![
            Just(ElementRole::Title),
            Just(ElementRole::Description),
            Just(ElementRole::Subtitle),
        ]
    }

    proptest! {
        #[test]
        fn prop_similarity_bounded_and_symmetric(
            left in proptest::collection::vec(arb_role(), 0..5),
            right in proptest::collection::vec(arb_role(), 0..5),
        ) {
            let a = card(left.into_iter().map(text).collect());
            let b = card(right.into_iter().map(text).collect());
            let ab = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert!((ab - similarity(&b, &a)).abs() < 1e-12);
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }
    }
}
