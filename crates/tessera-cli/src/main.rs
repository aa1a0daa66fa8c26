//! Tessera CLI - validate, repair and fingerprint slide design trees

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{batch, candidates, fix, layout, signature, smartblock, validate};
use config::TesseraConfig;
use tessera_rules::BatchMode;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Structural validator and repair engine for slide design trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a tessera.toml
    #[arg(long, global = true)]
    config: Option<String>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every ZStack/Group in a tree
    Validate {
        /// Path to tree JSON
        file: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Repair a tree and infer its layout attributes
    Fix {
        /// Path to tree JSON
        file: String,

        /// Where to write the fixed tree (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Preview repairs without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Show diff of changes
        #[arg(long)]
        output_diff: bool,
    },

    /// Infer direction, padding and gap only
    Layout {
        /// Path to tree JSON
        file: String,

        /// Where to write the result (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Report containers that need repair
    Candidates {
        /// Path to tree JSON
        file: String,

        /// Compare overlap against the smaller rectangle's area
        #[arg(long)]
        ratio: bool,

        /// Overlap threshold (area, or fraction with --ratio)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the structural signature of a tree
    Signature {
        /// Path to tree JSON
        file: String,

        /// Collapse repeated children
        #[arg(long)]
        skeleton: bool,
    },

    /// Score trees for repeatable-block treatment
    Smartblock {
        /// Tree or forest JSON files, evaluated together
        #[arg(required = true)]
        files: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate or fix a JSON-lines record file
    Batch {
        /// Input records, one JSON object per line
        input: String,

        /// Output records
        #[arg(short, long)]
        output: String,

        /// What to do with each record
        #[arg(long, value_parser = parse_mode, default_value = "validate")]
        mode: BatchMode,

        /// Worker threads (0 = one less than the CPU count)
        #[arg(long)]
        workers: Option<usize>,

        /// Process every record, ignoring the [scan] filters
        #[arg(long)]
        no_filter: bool,
    },
}

fn parse_mode(s: &str) -> Result<BatchMode, String> {
    match s {
        "validate" => Ok(BatchMode::Validate),
        "fix" => Ok(BatchMode::Fix),
        _ => Err(format!("unknown mode '{}'; valid values: validate, fix", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = TesseraConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { file, format } => validate::run(&file, &format),
        Commands::Fix {
            file,
            output,
            dry_run,
            output_diff,
        } => fix::run(
            fix::FixArgs {
                file,
                output,
                dry_run,
                output_diff,
            },
            &config,
        ),
        Commands::Layout { file, output } => layout::run(&file, output.as_deref()),
        Commands::Candidates {
            file,
            ratio,
            threshold,
        } => candidates::run(&file, ratio, threshold, &config),
        Commands::Signature { file, skeleton } => signature::run(&file, skeleton, &config),
        Commands::Smartblock { files, format } => smartblock::run(&files, &format, &config),
        Commands::Batch {
            input,
            output,
            mode,
            workers,
            no_filter,
        } => batch::run(
            batch::BatchArgs {
                input,
                output,
                mode,
                workers,
                no_filter,
            },
            config,
        ),
    }
}
