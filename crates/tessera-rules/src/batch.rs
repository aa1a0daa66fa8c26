//! Batch driver over JSON-lines record files
//!
//! Each input line is a record `{"id": <u64>, "structure_json": <tree>, ...}`.
//! Records are filtered, then validated or fixed on a worker pool. One bad
//! record never stops the batch; it is counted and logged instead.

use crate::config::RulesConfig;
use crate::filter::SkipReason;
use crate::pipeline::{fix_structure, validate_structure};
use crate::report::Classification;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tessera_core::{Result, TesseraError};
use tessera_tree::{load_tree_string, load_tree_value, tree_to_value, Relative, Tree};

/// Malformed-record messages kept in a summary
const MAX_MALFORMED_SAMPLES: usize = 5;

/// What the batch does with each accepted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    #[default]
    Validate,
    Fix,
}

/// One line of a record file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: u64,
    pub structure_json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_json_fixed: Option<Value>,
    /// Other columns, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BatchRecord {
    /// Parse the stored tree; it may be an object or a string holding JSON
    pub fn structure(&self) -> Result<Tree<Relative>> {
        match &self.structure_json {
            Value::String(text) => load_tree_string(text),
            Value::Null => Err(TesseraError::RecordError(format!(
                "record {} has no structure_json",
                self.id
            ))),
            other => load_tree_value(other.clone()),
        }
    }
}

/// What happened to one record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Classified(Classification),
    Skipped(SkipReason),
    Malformed(String),
}

impl RecordOutcome {
    /// Summary bucket: `valid`, `invalid`, `no_container`,
    /// `skipped:<reason>` or `malformed`
    pub fn bucket(&self) -> String {
        match self {
            RecordOutcome::Classified(c) => c.code().to_string(),
            RecordOutcome::Skipped(reason) => format!("skipped:{}", reason.code()),
            RecordOutcome::Malformed(_) => "malformed".to_string(),
        }
    }
}

/// Per-record result, in input order
#[derive(Debug, Clone)]
pub struct RecordResult {
    /// `None` when the line itself could not be parsed as a record
    pub id: Option<u64>,
    pub outcome: RecordOutcome,
    pub repair_actions: usize,
    /// Line to write to the output file
    pub output: Option<Value>,
}

/// Counts per outcome bucket
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
    /// Records that needed at least one repair action
    pub repaired: usize,
    pub malformed_samples: Vec<String>,
}

impl BatchSummary {
    pub fn add(&mut self, result: &RecordResult) {
        self.total += 1;
        *self.counts.entry(result.outcome.bucket()).or_insert(0) += 1;
        if result.repair_actions > 0 {
            self.repaired += 1;
        }
        if let RecordOutcome::Malformed(reason) = &result.outcome {
            if self.malformed_samples.len() < MAX_MALFORMED_SAMPLES {
                let who = result
                    .id
                    .map(|id| format!("record {}", id))
                    .unwrap_or_else(|| "unparsed line".to_string());
                self.malformed_samples.push(format!("{}: {}", who, reason));
            }
        }
    }

    pub fn count(&self, bucket: &str) -> usize {
        self.counts.get(bucket).copied().unwrap_or(0)
    }

    /// Sum over every `skipped:*` bucket
    pub fn skipped(&self) -> usize {
        self.counts
            .iter()
            .filter(|(k, _)| k.starts_with("skipped:"))
            .map(|(_, v)| *v)
            .sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} record(s): {} valid, {} invalid, {} no_container, {} skipped, {} malformed, {} repaired",
            self.total,
            self.count("valid"),
            self.count("invalid"),
            self.count("no_container"),
            self.skipped(),
            self.count("malformed"),
            self.repaired,
        )
    }
}

/// Runs validate or fix over many records on a worker pool
pub struct BatchRunner<'a> {
    config: &'a RulesConfig,
    mode: BatchMode,
    pool: rayon::ThreadPool,
}

impl<'a> BatchRunner<'a> {
    /// Create a runner sized from `config.batch`
    pub fn new(config: &'a RulesConfig, mode: BatchMode) -> Result<Self> {
        let workers = config.batch.effective_workers();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| TesseraError::ConfigError(format!("worker pool: {}", e)))?;
        log::debug!("batch pool with {} worker(s), mode {:?}", workers, mode);
        Ok(Self { config, mode, pool })
    }

    /// Process one record
    pub fn process(&self, record: &BatchRecord) -> RecordResult {
        let mut output = record.clone();
        let outcome = match record.structure() {
            Err(err) => {
                log::warn!("record {}: malformed structure: {}", record.id, err);
                return RecordResult {
                    id: Some(record.id),
                    outcome: RecordOutcome::Malformed(err.to_string()),
                    repair_actions: 0,
                    output: annotate(output, "malformed"),
                };
            }
            Ok(tree) => match self.config.scan.check(tree.root()) {
                Err(reason) => {
                    log::warn!("record {}: skipped ({})", record.id, reason);
                    RecordOutcome::Skipped(reason)
                }
                Ok(()) => match self.mode {
                    BatchMode::Validate => {
                        RecordOutcome::Classified(validate_structure(&tree).classification)
                    }
                    BatchMode::Fix => {
                        let (fixed, report) = fix_structure(tree, self.config);
                        match tree_to_value(&fixed) {
                            Ok(value) => {
                                output.structure_json_fixed = Some(value);
                                let bucket = RecordOutcome::Classified(report.validation.classification);
                                return RecordResult {
                                    id: Some(record.id),
                                    output: annotate(output, &bucket.bucket()),
                                    outcome: bucket,
                                    repair_actions: report.actions.len(),
                                };
                            }
                            Err(err) => RecordOutcome::Malformed(err.to_string()),
                        }
                    }
                },
            },
        };

        RecordResult {
            id: Some(record.id),
            output: annotate(output, &outcome.bucket()),
            outcome,
            repair_actions: 0,
        }
    }

    fn process_line(&self, line_no: usize, line: &str) -> RecordResult {
        match serde_json::from_str::<BatchRecord>(line) {
            Ok(record) => self.process(&record),
            Err(err) => {
                log::warn!("line {}: not a record: {}", line_no, err);
                RecordResult {
                    id: None,
                    outcome: RecordOutcome::Malformed(format!("line {}: {}", line_no, err)),
                    repair_actions: 0,
                    output: None,
                }
            }
        }
    }

    /// Process every non-empty line of `input`, writing one line per record
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        let chunk_size = self.config.batch.batch_size.max(1);
        let mut chunk: Vec<(usize, String)> = Vec::with_capacity(chunk_size);

        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            chunk.push((i + 1, line));
            if chunk.len() == chunk_size {
                self.run_chunk(&chunk, output, &mut summary)?;
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            self.run_chunk(&chunk, output, &mut summary)?;
        }

        output.flush()?;
        log::info!("batch done: {}", summary.summary());
        Ok(summary)
    }

    fn run_chunk<W: Write>(
        &self,
        chunk: &[(usize, String)],
        output: &mut W,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        let results: Vec<RecordResult> = self.pool.install(|| {
            chunk
                .par_iter()
                .map(|(line_no, line)| self.process_line(*line_no, line))
                .collect()
        });

        for result in &results {
            summary.add(result);
            if let Some(value) = &result.output {
                serde_json::to_writer(&mut *output, value)?;
                output.write_all(b"\n")?;
            }
        }
        log::info!("processed {} record(s)", summary.total);
        Ok(())
    }

    /// Read a record file and write the processed records to `output_path`
    pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<BatchSummary> {
        let input = BufReader::new(File::open(input_path)?);
        let mut output = BufWriter::new(File::create(output_path)?);
        self.run(input, &mut output)
    }
}

fn annotate(record: BatchRecord, outcome: &str) -> Option<Value> {
    let mut value = serde_json::to_value(record).ok()?;
    if let Value::Object(map) = &mut value {
        map.insert("outcome".to_string(), Value::from(outcome));
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ScanFilter;
    use std::io::Cursor;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config(workers: usize) -> RulesConfig {
        let mut config = RulesConfig::default();
        config.scan = ScanFilter::accept_all();
        config.batch.workers = workers;
        config.batch.batch_size = 2;
        config
    }

    const BROKEN_ZSTACK: &str = r#"{"id": "z", "role": "Role.LayoutContainer.Content", "type": "ZStack",
        "position": {"x": 0, "y": 0, "width": 100, "height": 100},
        "children": [
          {"id": "a", "role": "Role.Element.Background", "type": "SVG", "position": {"x": 0, "y": 0, "width": 100, "height": 40}},
          {"id": "b", "role": "Role.Element.Background", "type": "SVG", "position": {"x": 0, "y": 40, "width": 100, "height": 60}}
        ]}"#;

    fn record_line(id: u64, structure: &str) -> String {
        let value: Value = serde_json::from_str(structure).unwrap();
        serde_json::json!({"id": id, "structure_json": value, "source": "test"}).to_string()
    }

    #[test]
    fn test_validate_mode_counts() {
        init_logging();
        let input = [
            record_line(1, BROKEN_ZSTACK),
            String::new(),
            r#"{"id": 2, "structure_json": {"id": "x", "role": "Role.Element.Nope", "type": "Text", "position": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#.to_string(),
            "not json".to_string(),
            r#"{"id": 3, "structure_json": null}"#.to_string(),
        ]
        .join("\n");

        let config = config(2);
        let runner = BatchRunner::new(&config, BatchMode::Validate).unwrap();
        let mut out = Vec::new();
        let summary = runner.run(Cursor::new(input), &mut out).unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.count("invalid"), 1);
        assert_eq!(summary.count("malformed"), 3);
        assert_eq!(summary.malformed_samples.len(), 3);

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["outcome"], "invalid");
        assert_eq!(lines[0]["source"], "test");
        assert!(lines[0].get("structure_json_fixed").is_none());
    }

    #[test]
    fn test_fix_mode_writes_fixed_structure() {
        init_logging();
        let config = config(1);
        let runner = BatchRunner::new(&config, BatchMode::Fix).unwrap();

        let as_string = serde_json::json!({"id": 8, "structure_json": BROKEN_ZSTACK}).to_string();
        let input = format!("{}\n{}\n", record_line(7, BROKEN_ZSTACK), as_string);
        let mut out = Vec::new();
        let summary = runner.run(Cursor::new(input), &mut out).unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.repaired, 2);
        assert_eq!(summary.count("valid"), 2);

        let text = String::from_utf8(out).unwrap();
        let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        let fixed = &first["structure_json_fixed"];
        assert_eq!(fixed["children"][0]["role"], "Role.Element.Decoration");
        assert_eq!(fixed["children"][1]["role"], "Role.Element.Background");
        assert_eq!(first["structure_json"]["children"][0]["role"], "Role.Element.Background");
    }

    #[test]
    fn test_filter_buckets() {
        let config = RulesConfig::default();
        let runner = BatchRunner::new(&config, BatchMode::Validate).unwrap();
        let record: BatchRecord = serde_json::from_str(&record_line(5, BROKEN_ZSTACK)).unwrap();
        let result = runner.process(&record);
        assert_eq!(result.outcome.bucket(), "skipped:depth_out_of_range");
    }

    #[test]
    fn test_run_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.jsonl");
        let output = dir.path().join("out.jsonl");
        std::fs::write(&input, format!("{}\n", record_line(1, BROKEN_ZSTACK))).unwrap();

        let config = config(1);
        let runner = BatchRunner::new(&config, BatchMode::Fix).unwrap();
        let summary = runner.run_files(&input, &output).unwrap();
        assert_eq!(summary.total, 1);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
