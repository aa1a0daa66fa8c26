//! Record batch command

use crate::config::TesseraConfig;
use anyhow::{Context, Result};
use tessera_rules::{BatchMode, BatchRunner, ScanFilter};

pub struct BatchArgs {
    pub input: String,
    pub output: String,
    pub mode: BatchMode,
    pub workers: Option<usize>,
    pub no_filter: bool,
}

pub fn run(args: BatchArgs, config: TesseraConfig) -> Result<()> {
    let mut rules = config.rules;
    if let Some(workers) = args.workers {
        rules.batch.workers = workers;
    }
    if args.no_filter {
        rules.scan = ScanFilter::accept_all();
    }

    let runner = BatchRunner::new(&rules, args.mode)?;
    let summary = runner
        .run_files(&args.input, &args.output)
        .with_context(|| format!("processing {}", args.input))?;

    println!("{}", summary.summary());
    for sample in &summary.malformed_samples {
        println!("  malformed: {}", sample);
    }
    println!("Records written to {}", args.output);
    Ok(())
}
