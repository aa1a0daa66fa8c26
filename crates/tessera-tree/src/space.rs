//! Coordinate spaces as types
//!
//! A tree is either parent-relative (the persisted form) or absolute (the
//! form geometric repair works on). The marker type makes it impossible to
//! hand a relative tree to code that compares rectangles across levels.

use crate::node::Node;
use std::fmt;
use std::marker::PhantomData;
use tessera_core::Rect;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Absolute {}
    impl Sealed for super::Relative {}
}

/// Marker trait for coordinate spaces
pub trait CoordSpace: sealed::Sealed {
    const NAME: &'static str;
}

/// Every rectangle is relative to the page origin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Absolute;

/// Every rectangle is relative to its parent's origin (the root's parent is
/// the page origin)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relative;

impl CoordSpace for Absolute {
    const NAME: &'static str = "absolute";
}

impl CoordSpace for Relative {
    const NAME: &'static str = "relative";
}

/// A design object tree tagged with its coordinate space
pub struct Tree<S: CoordSpace> {
    root: Node,
    _space: PhantomData<S>,
}

impl<S: CoordSpace> Tree<S> {
    fn wrap(root: Node) -> Self {
        Self {
            root,
            _space: PhantomData,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}

impl<S: CoordSpace> Clone for Tree<S> {
    fn clone(&self) -> Self {
        Self::wrap(self.root.clone())
    }
}

impl<S: CoordSpace> PartialEq for Tree<S> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<S: CoordSpace> fmt::Debug for Tree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("space", &S::NAME)
            .field("root", &self.root)
            .finish()
    }
}

impl Tree<Relative> {
    /// Wrap a root whose rectangles are parent-relative
    pub fn relative(root: Node) -> Self {
        Self::wrap(root)
    }

    pub fn into_absolute(self) -> Tree<Absolute> {
        let mut root = self.root;
        absolutize(&mut root, &Rect::default());
        Tree::wrap(root)
    }
}

impl Tree<Absolute> {
    /// Wrap a root whose rectangles are page-absolute
    pub fn absolute(root: Node) -> Self {
        Self::wrap(root)
    }

    pub fn into_relative(self) -> Tree<Relative> {
        let mut root = self.root;
        relativize(&mut root, &Rect::default());
        Tree::wrap(root)
    }
}

fn absolutize(node: &mut Node, parent_abs: &Rect) {
    node.rect = node.rect.to_absolute(parent_abs);
    let abs = node.rect;
    for child in &mut node.children {
        absolutize(child, &abs);
    }
}

fn relativize(node: &mut Node, parent_abs: &Rect) {
    let abs = node.rect;
    node.rect = abs.to_relative(parent_abs);
    for child in &mut node.children {
        relativize(child, &abs);
    }
}
