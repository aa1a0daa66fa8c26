//! Fix-candidate report command

use crate::config::TesseraConfig;
use anyhow::Result;
use tessera_core::OverlapRule;
use tessera_rules::find_candidates;
use tessera_tree::load_tree;

pub fn run(file: &str, ratio: bool, threshold: Option<f64>, config: &TesseraConfig) -> Result<()> {
    let tree = load_tree(file)?;

    let mut candidates = config.rules.candidates.clone();
    if ratio {
        candidates.overlap =
            OverlapRule::ratio(threshold.unwrap_or(OverlapRule::DEFAULT_RATIO_THRESHOLD));
    } else if let Some(threshold) = threshold {
        candidates.overlap.threshold = threshold;
    }

    let report = find_candidates(tree.root(), &candidates);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
