//! Tessera Core - Foundational types for the Tessera layout tools
//!
//! This crate provides the core types that all other Tessera crates depend on:
//! - `NodeId` - Stable node identifiers
//! - `ContentHash` - short SHA-256 digests of signature text
//! - `Rect`, `Sides`, `OverlapRule` - Geometry kernel
//! - `DisjointSet` - Union-find used for overlap and similarity clustering
//! - Error types and Result alias

mod disjoint;
mod error;
pub mod geometry;
mod hash;
mod id;

pub use disjoint::DisjointSet;
pub use error::{Result, TesseraError};
pub use geometry::{bounding_box, OverlapRule, Rect, Sides};
pub use hash::ContentHash;
pub use id::NodeId;
