//! Tree repair command

use crate::config::TesseraConfig;
use anyhow::Result;
use tessera_rules::{compute_tree_diff, fix_structure, RepairAction, StructureFixer};
use tessera_tree::{load_tree, save_tree, save_tree_string};

pub struct FixArgs {
    pub file: String,
    pub output: Option<String>,
    pub dry_run: bool,
    pub output_diff: bool,
}

pub fn run(args: FixArgs, config: &TesseraConfig) -> Result<()> {
    let tree = load_tree(&args.file)?;

    if args.dry_run {
        let absolute = tree.into_absolute();
        let actions = StructureFixer::new(&config.rules.repair).dry_run(&absolute);
        println!("Dry run results:");
        if actions.is_empty() {
            println!("  No repairs would be applied.");
        } else {
            for action in &actions {
                println!("  {}", describe(action));
            }
        }
        return Ok(());
    }

    let before = args.output_diff.then(|| tree.clone());
    let (fixed, report) = fix_structure(tree, &config.rules);
    if !report.changed() {
        log::info!("'{}' needed no repairs", args.file);
    }

    match &args.output {
        Some(path) => {
            save_tree(path, &fixed)?;
            eprintln!("{}", report.summary());
            for action in &report.actions {
                eprintln!("  {}", describe(action));
            }
            eprintln!("Fixed tree saved to {}", path);
        }
        None => println!("{}", save_tree_string(&fixed)?),
    }

    for container in report.residual() {
        log::warn!(
            "'{}' is still invalid after repair: {}",
            container.id,
            container.composition
        );
    }

    if let Some(before) = before {
        let diff = compute_tree_diff(&before, &fixed)?;
        eprintln!("\nDiff:");
        eprint!("{}", diff);
    }

    Ok(())
}

fn describe(action: &RepairAction) -> String {
    format!("[{:?}] {}: {}", action.kind, action.node_id, action.description)
}
