//! Layout attribute inference on relative coordinates

use tessera_core::{bounding_box, Sides};
use tessera_tree::{Direction, Node, Relative, Tree};

/// Fill in `direction`, `padding` and `gap` for every layout container.
///
/// Stacks get their direction and the mean spacing between consecutive
/// children along the axis (overlaps count as zero). Grid, ZStack and Group
/// have no direction or gap. Every container with children and a non-empty
/// box gets padding from the union of its children. Leaves are untouched.
pub fn infer_layout(tree: &mut Tree<Relative>) {
    infer_node(tree.root_mut());
}

fn infer_node(node: &mut Node) {
    for child in &mut node.children {
        infer_node(child);
    }

    if !node.is_layout_container() {
        return;
    }

    node.layout.direction = node.node_type.direction();
    node.layout.gap = node
        .node_type
        .direction()
        .map(|direction| stack_gap(&node.children, direction));

    if let Some(padding) = padding_of(node) {
        node.layout.padding = Some(padding);
    }
}

fn padding_of(node: &Node) -> Option<Sides> {
    let (w, h) = (node.rect.width, node.rect.height);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let bounds = bounding_box(node.children.iter().map(|c| &c.rect))?;
    Some(Sides::new(
        round2(bounds.y.max(0.0)),
        round2((w - bounds.right()).max(0.0)),
        round2((h - bounds.bottom()).max(0.0)),
        round2(bounds.x.max(0.0)),
    ))
}

fn stack_gap(children: &[Node], direction: Direction) -> f64 {
    if children.len() < 2 {
        return 0.0;
    }

    let mut spans: Vec<(f64, f64)> = children
        .iter()
        .map(|c| match direction {
            Direction::Horizontal => (c.rect.x, c.rect.right()),
            Direction::Vertical => (c.rect.y, c.rect.bottom()),
        })
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total: f64 = spans
        .windows(2)
        .map(|pair| (pair[1].0 - pair[0].1).max(0.0))
        .sum();
    round2(total / (spans.len() - 1) as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Rect;
    use tessera_tree::{ContainerRole, ElementRole, NodeType, Role};

    fn leaf(id: &str, rect: Rect) -> Node {
        Node::new(id, Role::Element(ElementRole::Description), NodeType::Text, rect)
    }

    fn container(node_type: NodeType, rect: Rect, children: Vec<Node>) -> Node {
        Node::new("c", Role::LayoutContainer(ContainerRole::Content), node_type, rect)
            .with_children(children)
    }

    fn infer(root: Node) -> Node {
        let mut tree = Tree::relative(root);
        infer_layout(&mut tree);
        tree.into_root()
    }

    #[test]
    fn test_vstack_direction_padding_gap() {
        let root = infer(container(
            NodeType::VStack,
            Rect::new(0.0, 0.0, 200.0, 100.0),
            vec![
                leaf("a", Rect::new(10.0, 10.0, 100.0, 20.0)),
                leaf("b", Rect::new(10.0, 40.0, 100.0, 20.0)),
            ],
        ));
        assert_eq!(root.layout.direction, Some(Direction::Vertical));
        assert_eq!(root.layout.padding, Some(Sides::new(10.0, 90.0, 40.0, 10.0)));
        assert_eq!(root.layout.gap, Some(10.0));
    }

    #[test]
    fn test_hstack_sorts_children_along_axis() {
        let root = infer(container(
            NodeType::HStack,
            Rect::new(0.0, 0.0, 300.0, 50.0),
            vec![
                leaf("right", Rect::new(200.0, 0.0, 50.0, 50.0)),
                leaf("left", Rect::new(0.0, 0.0, 50.0, 50.0)),
                leaf("mid", Rect::new(70.0, 0.0, 50.0, 50.0)),
            ],
        ));
        // gaps 20 and 80
        assert_eq!(root.layout.direction, Some(Direction::Horizontal));
        assert_eq!(root.layout.gap, Some(50.0));
    }

    #[test]
    fn test_overlapping_children_clamp_to_zero() {
        let root = infer(container(
            NodeType::VStack,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            vec![
                leaf("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
                leaf("b", Rect::new(0.0, 40.0, 100.0, 20.0)),
                leaf("c", Rect::new(0.0, 70.0, 100.0, 10.0)),
            ],
        ));
        // -10 clamps to 0, then 10
        assert_eq!(root.layout.gap, Some(5.0));
    }

    #[test]
    fn test_single_child_stack_gap_zero() {
        let root = infer(container(
            NodeType::HStack,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            vec![leaf("a", Rect::new(0.0, 0.0, 10.0, 10.0))],
        ));
        assert_eq!(root.layout.gap, Some(0.0));
    }

    #[test]
    fn test_overlay_containers_have_no_direction_or_gap() {
        let mut root = container(
            NodeType::ZStack,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            vec![leaf("a", Rect::new(5.0, 5.0, 10.0, 10.0))],
        );
        root.layout.gap = Some(3.0);
        root.layout.direction = Some(Direction::Vertical);
        let root = infer(root);
        assert_eq!(root.layout.direction, None);
        assert_eq!(root.layout.gap, None);
        assert_eq!(root.layout.padding, Some(Sides::new(5.0, 85.0, 85.0, 5.0)));
    }

    #[test]
    fn test_padding_clamped_and_rounded() {
        let root = infer(container(
            NodeType::Grid,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            vec![leaf("a", Rect::new(-5.0, 3.333, 120.0, 10.0))],
        ));
        assert_eq!(root.layout.padding, Some(Sides::new(3.33, 0.0, 86.67, 0.0)));
    }

    #[test]
    fn test_zero_size_container_gets_no_padding() {
        let root = infer(container(
            NodeType::VStack,
            Rect::new(0.0, 0.0, 0.0, 100.0),
            vec![leaf("a", Rect::new(0.0, 0.0, 10.0, 10.0))],
        ));
        assert_eq!(root.layout.padding, None);
        assert_eq!(root.layout.direction, Some(Direction::Vertical));
    }

    #[test]
    fn test_leaves_untouched() {
        let root = infer(leaf("solo", Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(root.layout.is_empty());
    }

    #[test]
    fn test_nested_containers() {
        let inner = Node::new(
            "inner",
            Role::LayoutContainer(ContainerRole::Content),
            NodeType::HStack,
            Rect::new(10.0, 10.0, 80.0, 30.0),
        )
        .with_children(vec![leaf("x", Rect::new(0.0, 0.0, 30.0, 30.0))]);
        let root = infer(container(NodeType::VStack, Rect::new(0.0, 0.0, 100.0, 100.0), vec![inner]));
        assert_eq!(root.children[0].layout.direction, Some(Direction::Horizontal));
        assert_eq!(root.children[0].layout.padding, Some(Sides::new(0.0, 50.0, 0.0, 0.0)));
    }
}
