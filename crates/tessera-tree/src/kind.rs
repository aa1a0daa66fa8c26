//! Node types and stack direction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tessera_core::TesseraError;

/// The `type` of a node: a layout container or an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    HStack,
    VStack,
    ZStack,
    Group,
    Grid,
    #[serde(rename = "SVG")]
    Svg,
    Image,
    Text,
    Frame,
}

impl NodeType {
    pub const ALL: [NodeType; 9] = [
        NodeType::HStack,
        NodeType::VStack,
        NodeType::ZStack,
        NodeType::Group,
        NodeType::Grid,
        NodeType::Svg,
        NodeType::Image,
        NodeType::Text,
        NodeType::Frame,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::HStack => "HStack",
            NodeType::VStack => "VStack",
            NodeType::ZStack => "ZStack",
            NodeType::Group => "Group",
            NodeType::Grid => "Grid",
            NodeType::Svg => "SVG",
            NodeType::Image => "Image",
            NodeType::Text => "Text",
            NodeType::Frame => "Frame",
        }
    }

    /// HStack, VStack, ZStack, Group or Grid
    pub fn is_layout_container(&self) -> bool {
        matches!(
            self,
            NodeType::HStack | NodeType::VStack | NodeType::ZStack | NodeType::Group | NodeType::Grid
        )
    }

    /// SVG, Image, Text or Frame. Frames may still own a clipped Image.
    pub fn is_element(&self) -> bool {
        !self.is_layout_container()
    }

    /// HStack or VStack
    pub fn is_stack(&self) -> bool {
        matches!(self, NodeType::HStack | NodeType::VStack)
    }

    /// ZStack or Group, the containers subject to composition rules
    pub fn is_overlay(&self) -> bool {
        matches!(self, NodeType::ZStack | NodeType::Group)
    }

    /// Fixed direction of a linear stack
    pub fn direction(&self) -> Option<Direction> {
        match self {
            NodeType::HStack => Some(Direction::Horizontal),
            NodeType::VStack => Some(Direction::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeType {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| TesseraError::UnknownNodeType(s.to_string()))
    }
}

/// Main axis of a linear stack
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}
