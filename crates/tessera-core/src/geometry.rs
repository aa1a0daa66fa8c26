//! Axis-aligned rectangle kernel and coordinate-space transforms
//!
//! Rectangles use a top-left origin with `y` growing downwards, matching
//! the slide coordinate system. All functions here are pure.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its edges
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True unless one rectangle lies entirely to one side of the other.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies inside this rectangle (edges may touch)
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The overlapping region, or `None` when the rectangles do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::from_edges(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Area of the overlapping region (0 when disjoint)
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        self.intersection(other).map(|r| r.area()).unwrap_or(0.0)
    }

    /// The smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Express this (absolute) rectangle relative to `parent_abs`'s origin
    pub fn to_relative(&self, parent_abs: &Rect) -> Rect {
        Rect::new(
            self.x - parent_abs.x,
            self.y - parent_abs.y,
            self.width,
            self.height,
        )
    }

    /// Express this (parent-relative) rectangle in absolute coordinates
    pub fn to_absolute(&self, parent_abs: &Rect) -> Rect {
        Rect::new(
            self.x + parent_abs.x,
            self.y + parent_abs.y,
            self.width,
            self.height,
        )
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Rect, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

/// Four independent edge values (used for padding)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

pub fn contains(a: &Rect, b: &Rect) -> bool {
    a.contains(b)
}

pub fn area(a: &Rect) -> f64 {
    a.area()
}

pub fn to_relative(child_abs: &Rect, parent_abs: &Rect) -> Rect {
    child_abs.to_relative(parent_abs)
}

pub fn to_absolute(child_rel: &Rect, parent_abs: &Rect) -> Rect {
    child_rel.to_absolute(parent_abs)
}

/// Union of all rectangles, or `None` for an empty input
pub fn bounding_box<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| match acc {
            Some(b) => Some(b.union(r)),
            None => Some(*r),
        })
}

/// How strict an overlap test is.
///
/// Plain mode compares the intersection area against `threshold`; with the
/// default threshold of 0.0 any overlap counts. Ratio mode divides the
/// intersection by the smaller rectangle's area first (0.1 is the usual
/// threshold there).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapRule {
    pub use_ratio: bool,
    pub threshold: f64,
}

impl Default for OverlapRule {
    fn default() -> Self {
        Self::any()
    }
}

impl OverlapRule {
    /// Default threshold used in ratio mode
    pub const DEFAULT_RATIO_THRESHOLD: f64 = 0.1;

    /// Any overlap counts
    pub const fn any() -> Self {
        Self {
            use_ratio: false,
            threshold: 0.0,
        }
    }

    /// Overlap must cover more than `threshold` of the smaller rectangle
    pub const fn ratio(threshold: f64) -> Self {
        Self {
            use_ratio: true,
            threshold,
        }
    }

    pub fn test(&self, a: &Rect, b: &Rect) -> bool {
        if !a.overlaps(b) {
            return false;
        }

        let inter = a.intersection_area(b);
        if self.use_ratio {
            let smaller = a.area().min(b.area());
            if smaller <= 0.0 {
                return false;
            }
            inter / smaller > self.threshold
        } else {
            self.threshold <= 0.0 || inter > self.threshold
        }
    }
}
