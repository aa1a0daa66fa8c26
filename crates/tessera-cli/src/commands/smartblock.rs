//! Smart-block eligibility command

use crate::config::TesseraConfig;
use anyhow::Result;
use tessera_signature::{evaluate_smartblock, SmartBlockResult};
use tessera_tree::{load_forest, Tree};

pub fn run(files: &[String], format: &str, config: &TesseraConfig) -> Result<()> {
    let result = evaluate_files(files, config)?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result_text(&result);
    }
    Ok(())
}

/// Evaluate every tree from `files` as one forest
fn evaluate_files(files: &[String], config: &TesseraConfig) -> Result<SmartBlockResult> {
    let mut trees = Vec::new();
    for file in files {
        trees.extend(load_forest(file)?);
    }
    log::info!("evaluating {} tree(s) from {} file(s)", trees.len(), files.len());

    let roots: Vec<_> = trees.iter().map(Tree::root).collect();
    Ok(evaluate_smartblock(&roots, &config.signature))
}

fn print_result_text(result: &SmartBlockResult) {
    let verdict = if result.eligible { "ELIGIBLE" } else { "NOT ELIGIBLE" };
    println!("{}: {}", verdict, result.summary());

    for container in &result.repeating {
        println!(
            "  {} {} ({}): {}/{} children, {} match, {:.2} similarity",
            container.path,
            container.container,
            container.container_type,
            container.repeating_count,
            container.total_children,
            container.match_kind,
            container.similarity
        );
        println!("      [{}] {}", container.sample_hash, container.sample_signature);
    }
}
