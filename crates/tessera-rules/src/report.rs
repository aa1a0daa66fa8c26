//! Validation and repair report types

use crate::classifier::{InvalidReason, Verdict};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tessera_core::NodeId;
use tessera_tree::NodeType;

/// Aggregate classification of a whole tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Valid,
    Invalid,
    /// No ZStack or Group anywhere in the tree
    NoContainer,
}

impl Classification {
    pub fn code(&self) -> &'static str {
        match self {
            Classification::Valid => "valid",
            Classification::Invalid => "invalid",
            Classification::NoContainer => "no_container",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict for one ZStack/Group in the tree
#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub id: NodeId,
    pub node_type: NodeType,
    pub depth: usize,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub composition: String,
}

/// Non-fatal findings that do not affect the classification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureWarning {
    /// More than one `Role.Element.Title` under one parent
    TitleDuplicate { parent: NodeId, count: usize },
}

impl fmt::Display for StructureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureWarning::TitleDuplicate { parent, count } => {
                write!(f, "title_duplicate: {} titles under '{}'", count, parent)
            }
        }
    }
}

/// Result of validating a tree
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub classification: Classification,
    pub containers: Vec<ContainerReport>,
    pub warnings: Vec<StructureWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.classification == Classification::Valid
    }

    pub fn valid_count(&self) -> usize {
        self.containers.iter().filter(|c| c.verdict.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.containers.iter().filter(|c| c.verdict.is_invalid()).count()
    }

    pub fn invalid_containers(&self) -> impl Iterator<Item = &ContainerReport> {
        self.containers.iter().filter(|c| c.verdict.is_invalid())
    }

    /// How often each reason occurs across all containers
    pub fn reason_counts(&self) -> BTreeMap<InvalidReason, usize> {
        let mut counts = BTreeMap::new();
        for container in &self.containers {
            if let Verdict::Invalid(reasons) = &container.verdict {
                for reason in reasons {
                    *counts.entry(*reason).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.containers.is_empty() {
            return "No ZStack/Group containers found.".to_string();
        }
        format!(
            "{}: {} container(s), {} valid, {} invalid, {} warning(s)",
            self.classification,
            self.containers.len(),
            self.valid_count(),
            self.invalid_count(),
            self.warnings.len(),
        )
    }
}

/// What kind of change a repair made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    /// Frame retagged as Marker
    NormalizeFrame,
    /// Image outside a layout container retagged as Marker
    NormalizeImage,
    /// Decoration promoted to Background
    PromoteBackground,
    /// Extra Background demoted to Decoration
    DemoteBackground,
    /// Overlapping decorations wrapped in a new Group
    CreateGroup,
}

/// A single change applied by the repair engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairAction {
    pub kind: RepairKind,
    pub node_id: NodeId,
    pub description: String,
}

/// Report of a repair run
#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub actions: Vec<RepairAction>,
    /// Classification of the repaired tree
    pub validation: ValidationReport,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn count(&self, kind: RepairKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }

    /// Containers still invalid after repair
    pub fn residual(&self) -> impl Iterator<Item = &ContainerReport> {
        self.validation.invalid_containers()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} repair action(s); {}",
            self.actions.len(),
            self.validation.summary()
        )
    }
}
