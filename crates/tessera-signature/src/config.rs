//! Signature engine settings

use serde::{Deserialize, Serialize};
use tessera_core::{Result, TesseraError};

/// Tuning for signatures and smart-block detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Deepest level rendered in an exact signature (root is 0)
    pub exact_max_depth: usize,
    /// Deepest level rendered in a skeleton signature
    pub skeleton_max_depth: usize,
    /// Minimum similarity for two blocks to count as repeats
    pub similarity_threshold: f64,
    /// Children with fewer leaf elements are ignored
    pub min_leaf_count: usize,
    pub use_similarity: bool,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            exact_max_depth: 3,
            skeleton_max_depth: 2,
            similarity_threshold: 0.7,
            min_leaf_count: 3,
            use_similarity: true,
        }
    }
}

impl SignatureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(TesseraError::ConfigError(format!(
                "signature.similarity_threshold must be within 0..=1, got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}
