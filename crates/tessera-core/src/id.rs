//! Stable node identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix given to containers created by the repair engine
const SYNTHETIC_GROUP_PREFIX: &str = "group_";

/// A stable node identifier that persists across repair.
///
/// Ids come from the external tree and are opaque. Repair only ever adds
/// new ids (for synthetic groups); it never rewrites existing ones.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic id for a group wrapping `first` and its overlapping siblings.
    ///
    /// `attempt` disambiguates collisions: 0 gives `group_<first>`, n gives
    /// `group_<first>_<n+1>`.
    pub fn synthetic_group(first: &NodeId, attempt: usize) -> Self {
        if attempt == 0 {
            Self(format!("{}{}", SYNTHETIC_GROUP_PREFIX, first.0))
        } else {
            Self(format!("{}{}_{}", SYNTHETIC_GROUP_PREFIX, first.0, attempt + 1))
        }
    }

    /// Whether this id looks like one produced by `synthetic_group`
    pub fn is_synthetic(&self) -> bool {
        self.0.starts_with(SYNTHETIC_GROUP_PREFIX)
    }

    /// A shortened form for log lines
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(20) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
