//! Tessera Rules - composition validation and structural repair
//!
//! This crate checks whether overlay containers hold an accepted
//! composition, repairs the common structural mistakes (duplicate
//! backgrounds, loose overlapping decorations, mis-tagged frames), infers
//! layout attributes, and drives all of it over batches of records.

pub mod batch;
mod candidates;
mod classifier;
mod config;
mod diff;
mod filter;
mod fixer;
mod layout;
mod pipeline;
mod report;

pub use batch::{BatchMode, BatchRecord, BatchRunner, BatchSummary, RecordOutcome};
pub use candidates::{find_candidates, BackgroundRef, CandidateIssue, CandidateReport, OverlapPair};
pub use classifier::{classify, composition_of, CompositionPattern, InvalidReason, Verdict};
pub use config::{BatchConfig, CandidateConfig, RepairConfig, RulesConfig};
pub use diff::compute_tree_diff;
pub use filter::{ScanFilter, SkipReason};
pub use fixer::StructureFixer;
pub use layout::infer_layout;
pub use pipeline::{fix_structure, validate_structure};
pub use report::{
    Classification, ContainerReport, RepairAction, RepairKind, RepairReport, StructureWarning,
    ValidationReport,
};
