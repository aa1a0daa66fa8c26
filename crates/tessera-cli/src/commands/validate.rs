//! Tree validation command

use anyhow::Result;
use tessera_rules::{validate_structure, Classification, ValidationReport, Verdict};
use tessera_tree::load_tree;

pub fn run(file: &str, format: &str) -> Result<()> {
    let tree = load_tree(file)?;
    let report = validate_structure(&tree);

    if format == "json" {
        print_report_json(&report)?;
    } else {
        print_report_text(&report);
    }

    if report.classification == Classification::Invalid {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(report: &ValidationReport) {
    println!("{}", report.summary());
    if report.containers.is_empty() && report.warnings.is_empty() {
        return;
    }
    println!();

    for container in &report.containers {
        let (status, detail) = match &container.verdict {
            Verdict::Valid(pattern) => ("VALID  ", pattern.code().to_string()),
            Verdict::Invalid(reasons) => (
                "INVALID",
                reasons
                    .iter()
                    .map(|r| r.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Verdict::NoContainer => continue,
        };
        let origin = if container.id.is_synthetic() { ", synthetic" } else { "" };
        println!(
            "  [{}] {} ({}, depth {}{}): {}",
            status, container.id, container.node_type, container.depth, origin, detail
        );
        println!("            {}", container.composition);
    }

    for warning in &report.warnings {
        println!("  [WARN   ] {}", warning);
    }
}

fn print_report_json(report: &ValidationReport) -> Result<()> {
    let output = serde_json::json!({
        "valid": report.is_valid(),
        "classification": report.classification,
        "summary": report.summary(),
        "valid_containers": report.valid_count(),
        "invalid_containers": report.invalid_count(),
        "reasons": report.reason_counts(),
        "containers": report.containers,
        "warnings": report.warnings,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
