//! Composition classifier for overlay containers
//!
//! A ZStack or Group is valid when it holds exactly one Background (an SVG
//! or Image tagged `Role.Element.Background`) plus exactly one content
//! child: a VStack, an HStack, or a node whose role names a single element
//! (Title, Subtitle, Highlight, Description, Separator, Marker, Decoration).

use serde::Serialize;
use std::collections::BTreeSet;
use tessera_tree::{Node, NodeType};

/// Role names accepted as the single content child
const ELEMENT_ROLE_NAMES: [&str; 7] = [
    "Title",
    "Subtitle",
    "Highlight",
    "Description",
    "Separator",
    "Marker",
    "Decoration",
];

/// Accepted Background + content shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompositionPattern {
    #[serde(rename = "valid_vstack_bg")]
    BackgroundVStack,
    #[serde(rename = "valid_hstack_bg")]
    BackgroundHStack,
    #[serde(rename = "valid_element_bg")]
    BackgroundElement,
}

impl CompositionPattern {
    pub fn code(&self) -> &'static str {
        match self {
            CompositionPattern::BackgroundVStack => "valid_vstack_bg",
            CompositionPattern::BackgroundHStack => "valid_hstack_bg",
            CompositionPattern::BackgroundElement => "valid_element_bg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    BackgroundDuplicate,
    CompositionMismatch,
    ExtraChildren,
}

impl InvalidReason {
    pub fn code(&self) -> &'static str {
        match self {
            InvalidReason::BackgroundDuplicate => "background_duplicate",
            InvalidReason::CompositionMismatch => "composition_mismatch",
            InvalidReason::ExtraChildren => "extra_children",
        }
    }
}

/// Outcome of classifying one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Valid(CompositionPattern),
    Invalid(Vec<InvalidReason>),
    /// The node is not a ZStack or Group
    NoContainer,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Verdict::Invalid(_))
    }
}

/// Whether a child counts as the container's Background
pub fn is_background_child(node: &Node) -> bool {
    node.role.is_background() && matches!(node.node_type, NodeType::Svg | NodeType::Image)
}

/// Classify a node from its direct children
pub fn classify(node: &Node) -> Verdict {
    if !node.node_type.is_overlay() {
        return Verdict::NoContainer;
    }

    let (backgrounds, others): (Vec<&Node>, Vec<&Node>) =
        node.children.iter().partition(|c| is_background_child(c));

    let mut reasons = BTreeSet::new();
    match backgrounds.len() {
        0 => {
            reasons.insert(InvalidReason::CompositionMismatch);
        }
        1 => {}
        _ => {
            reasons.insert(InvalidReason::BackgroundDuplicate);
        }
    }

    let pattern = match others.as_slice() {
        [] => {
            reasons.insert(InvalidReason::CompositionMismatch);
            None
        }
        [only] => {
            let pattern = content_pattern(only);
            if pattern.is_none() {
                reasons.insert(InvalidReason::CompositionMismatch);
            }
            pattern
        }
        _ => {
            reasons.insert(InvalidReason::ExtraChildren);
            None
        }
    };

    match pattern {
        Some(pattern) if reasons.is_empty() => Verdict::Valid(pattern),
        _ => Verdict::Invalid(reasons.into_iter().collect()),
    }
}

fn content_pattern(child: &Node) -> Option<CompositionPattern> {
    match child.node_type {
        NodeType::VStack => Some(CompositionPattern::BackgroundVStack),
        NodeType::HStack => Some(CompositionPattern::BackgroundHStack),
        // Matches by leaf name in any namespace, so LayoutContainer.Title counts too
        _ if ELEMENT_ROLE_NAMES.contains(&child.role.leaf_name()) => {
            Some(CompositionPattern::BackgroundElement)
        }
        _ => None,
    }
}

/// Fingerprint of a container's direct children, e.g.
/// `ZStack:[types=[SVG, VStack], roles=[Background, Content]]`
pub fn composition_of(node: &Node) -> String {
    let types: BTreeSet<&str> = node.children.iter().map(|c| c.node_type.name()).collect();
    let roles: BTreeSet<&str> = node.children.iter().map(|c| c.role.leaf_name()).collect();
    format!(
        "{}:[types=[{}], roles=[{}]]",
        node.node_type,
        types.into_iter().collect::<Vec<_>>().join(", "),
        roles.into_iter().collect::<Vec<_>>().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Rect;
    use tessera_tree::{ContainerRole, ElementRole, Role};

    fn node(id: &str, role: Role, node_type: NodeType) -> Node {
        Node::new(id, role, node_type, Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    fn background(id: &str) -> Node {
        node(id, Role::BACKGROUND, NodeType::Svg)
    }

    fn zstack(children: Vec<Node>) -> Node {
        node("z", Role::LayoutContainer(ContainerRole::Content), NodeType::ZStack)
            .with_children(children)
    }

    fn content_stack(t: NodeType) -> Node {
        node("s", Role::LayoutContainer(ContainerRole::Content), t)
    }

    #[test]
    fn test_background_with_vstack() {
        let verdict = classify(&zstack(vec![background("bg"), content_stack(NodeType::VStack)]));
        assert_eq!(verdict, Verdict::Valid(CompositionPattern::BackgroundVStack));
    }

    #[test]
    fn test_background_with_hstack() {
        let verdict = classify(&zstack(vec![content_stack(NodeType::HStack), background("bg")]));
        assert_eq!(verdict, Verdict::Valid(CompositionPattern::BackgroundHStack));
    }

    #[test]
    fn test_background_with_element() {
        let title = node("t", Role::Element(ElementRole::Title), NodeType::Text);
        assert_eq!(
            classify(&zstack(vec![background("bg"), title])),
            Verdict::Valid(CompositionPattern::BackgroundElement)
        );

        let group = node("g", Role::DECORATION_GROUP, NodeType::Group);
        assert_eq!(
            classify(&zstack(vec![background("bg"), group])),
            Verdict::Valid(CompositionPattern::BackgroundElement)
        );

        let titled = node("tc", Role::LayoutContainer(ContainerRole::Title), NodeType::Group);
        assert_eq!(
            classify(&zstack(vec![background("bg"), titled])),
            Verdict::Valid(CompositionPattern::BackgroundElement)
        );
    }

    #[test]
    fn test_duplicate_background() {
        let verdict = classify(&zstack(vec![
            background("a"),
            background("b"),
            content_stack(NodeType::VStack),
        ]));
        assert_eq!(verdict, Verdict::Invalid(vec![InvalidReason::BackgroundDuplicate]));
    }

    #[test]
    fn test_missing_background() {
        let verdict = classify(&zstack(vec![content_stack(NodeType::VStack)]));
        assert_eq!(verdict, Verdict::Invalid(vec![InvalidReason::CompositionMismatch]));
        assert!(classify(&zstack(vec![])).is_invalid());
    }

    #[test]
    fn test_extra_children() {
        let verdict = classify(&zstack(vec![
            background("bg"),
            content_stack(NodeType::VStack),
            node("d", Role::DECORATION, NodeType::Svg),
        ]));
        assert_eq!(verdict, Verdict::Invalid(vec![InvalidReason::ExtraChildren]));
    }

    #[test]
    fn test_unaccepted_content() {
        let grid = node("g", Role::LayoutContainer(ContainerRole::Content), NodeType::Grid);
        let verdict = classify(&zstack(vec![background("bg"), grid]));
        assert_eq!(verdict, Verdict::Invalid(vec![InvalidReason::CompositionMismatch]));
    }

    #[test]
    fn test_text_background_is_not_background() {
        let fake = node("bg", Role::BACKGROUND, NodeType::Text);
        let verdict = classify(&zstack(vec![fake, content_stack(NodeType::VStack)]));
        assert!(verdict.is_invalid());
    }

    #[test]
    fn test_non_overlay_is_no_container() {
        assert_eq!(classify(&content_stack(NodeType::VStack)), Verdict::NoContainer);
        assert_eq!(
            classify(&node("t", Role::Element(ElementRole::Title), NodeType::Text)),
            Verdict::NoContainer
        );
    }

    #[test]
    fn test_composition_string() {
        let z = zstack(vec![background("bg"), content_stack(NodeType::VStack)]);
        assert_eq!(
            composition_of(&z),
            "ZStack:[types=[SVG, VStack], roles=[Background, Content]]"
        );
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_value(Verdict::Valid(CompositionPattern::BackgroundVStack)).unwrap();
        assert_eq!(json["verdict"], "valid");
        assert_eq!(json["detail"], "valid_vstack_bg");

        let json = serde_json::to_value(Verdict::Invalid(vec![InvalidReason::ExtraChildren])).unwrap();
        assert_eq!(json["detail"][0], "extra_children");
    }
}
