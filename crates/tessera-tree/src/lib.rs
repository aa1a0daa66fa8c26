//! Tessera Tree - design object trees
//!
//! This crate provides the tree model the validator and repair engine work on:
//! - `Role` and `NodeType` closed enumerations
//! - `Node` with owned children and a `TreeIndex` for upward navigation
//! - `Tree<Relative>` / `Tree<Absolute>` coordinate-space tagged trees
//! - JSON loading and saving with unknown fields preserved

pub mod format;
mod kind;
pub mod loader;
mod node;
mod role;
pub mod saver;
mod space;

pub use kind::{Direction, NodeType};
pub use loader::{load_forest, load_forest_string, load_tree, load_tree_string, load_tree_value};
pub use node::{LayoutAttrs, Node, PreOrder, TreeIndex};
pub use role::{ContainerRole, ElementRole, PageRole, Role};
pub use saver::{save_tree, save_tree_string, tree_to_value};
pub use space::{Absolute, CoordSpace, Relative, Tree};
