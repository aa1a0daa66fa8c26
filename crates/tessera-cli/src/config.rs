//! `tessera.toml` loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use tessera_rules::RulesConfig;
use tessera_signature::SignatureConfig;

/// Everything a command may need, read from one TOML file
#[derive(Debug, Clone, Default)]
pub struct TesseraConfig {
    pub rules: RulesConfig,
    pub signature: SignatureConfig,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SignatureSection {
    signature: SignatureConfig,
}

impl TesseraConfig {
    /// Defaults when no path is given
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        Self::parse(&content).with_context(|| format!("in config {}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let rules = RulesConfig::load_string(content)?;
        let SignatureSection { signature } = toml::from_str(content)?;
        signature.validate()?;
        Ok(Self { rules, signature })
    }
}
