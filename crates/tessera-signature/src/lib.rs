//! Tessera Signature - structural fingerprints
//!
//! This crate turns subtrees into comparable fingerprints and uses them to
//! find repeated blocks:
//! - `ExactSignature` - role/type structure down to a fixed depth
//! - `SkeletonSignature` - the same with repeated children collapsed
//! - `similarity` - positional structural similarity in [0, 1]
//! - `evaluate_smartblock` - scores how well a tree suits a repeatable block

mod config;
mod signature;
mod similarity;
mod skeleton;
mod smartblock;

pub use config::SignatureConfig;
pub use signature::ExactSignature;
pub use similarity::{mean_pairwise_similarity, similar_groups, similarity};
pub use skeleton::SkeletonSignature;
pub use smartblock::{
    count_leaf_elements, evaluate_smartblock, find_repeating_containers, MatchKind, PatternKind,
    RepeatingContainer, SmartBlockResult,
};
