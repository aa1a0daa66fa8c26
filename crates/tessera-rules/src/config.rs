//! Rules configuration loaded from TOML

use crate::filter::ScanFilter;
use serde::{Deserialize, Serialize};
use tessera_core::{OverlapRule, Result, TesseraError};

/// Settings for the repair engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Rule deciding when two decorations belong in one group
    pub overlap: OverlapRule,
}

/// Settings for the fix-candidate finder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub overlap: OverlapRule,
}

/// Settings for the batch driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; 0 picks one less than the CPU count
    pub workers: usize,
    /// Records read and processed per chunk
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            batch_size: 5000,
        }
    }
}

impl BatchConfig {
    /// Worker count after resolving the automatic setting
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            num_cpus::get().saturating_sub(1).max(1)
        }
    }
}

/// Everything the rules crate can be tuned with.
///
/// Passed explicitly into every entry point; there is no global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub repair: RepairConfig,
    pub candidates: CandidateConfig,
    pub scan: ScanFilter,
    pub batch: BatchConfig,
}

impl RulesConfig {
    /// Load configuration from a TOML string
    pub fn load_string(content: &str) -> Result<Self> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no entry point can work with
    pub fn validate(&self) -> Result<()> {
        for (name, rule) in [
            ("repair.overlap", &self.repair.overlap),
            ("candidates.overlap", &self.candidates.overlap),
        ] {
            if !rule.threshold.is_finite() || rule.threshold < 0.0 {
                return Err(TesseraError::ConfigError(format!(
                    "{}.threshold must be a non-negative number, got {}",
                    name, rule.threshold
                )));
            }
        }
        if self.scan.min_depth > self.scan.max_depth {
            return Err(TesseraError::ConfigError(format!(
                "scan.min_depth ({}) exceeds scan.max_depth ({})",
                self.scan.min_depth, self.scan.max_depth
            )));
        }
        if self.batch.batch_size == 0 {
            return Err(TesseraError::ConfigError(
                "batch.batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_tree::NodeType;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.repair.overlap, OverlapRule::any());
        assert_eq!(config.scan.min_depth, 4);
        assert_eq!(config.scan.max_depth, 8);
        assert_eq!(config.batch.batch_size, 5000);
        assert!(config.batch.effective_workers() >= 1);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_string_is_default() {
        assert_eq!(RulesConfig::load_string("").unwrap(), RulesConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config = RulesConfig::load_string(
            r#"
[candidates.overlap]
use_ratio = true
threshold = 0.1

[scan]
excluded_types = ["Grid"]
max_depth = 10

[batch]
workers = 3

[signature]
min_leaf_count = 2
"#,
        )
        .unwrap();
        assert_eq!(config.candidates.overlap, OverlapRule::ratio(0.1));
        assert_eq!(config.repair.overlap, OverlapRule::any());
        assert_eq!(config.scan.excluded_types, vec![NodeType::Grid]);
        assert_eq!(config.scan.min_depth, 4);
        assert_eq!(config.scan.max_depth, 10);
        assert_eq!(config.batch.effective_workers(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RulesConfig::load_string("[repair.overlap]\nthreshold = -1.0\n").unwrap_err();
        assert!(matches!(err, TesseraError::ConfigError(_)));

        let err = RulesConfig::load_string("[scan]\nmin_depth = 9\nmax_depth = 3\n").unwrap_err();
        assert!(matches!(err, TesseraError::ConfigError(_)));

        let err = RulesConfig::load_string("[batch]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, TesseraError::ConfigError(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = RulesConfig::load_string("[scan\n").unwrap_err();
        assert!(matches!(err, TesseraError::TomlParseError(_)));
    }
}
