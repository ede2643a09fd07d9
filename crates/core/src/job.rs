//! Batch jobs.
//!
//! Each job reads its inputs, runs one pipeline and writes one JSON output.
//! Jobs run one after another and are independent: a failure is recorded in
//! that job's report and the batch moves on.

use crate::collapse::{DEFAULT_LIST_FIELD, DEFAULT_TAG_START};
use crate::defaults::{apply_defaults, DefaultPolicy};
use crate::error::{JobError, JobResult};
use crate::extract::{extract_book, record_count};
use crate::marker::MarkerSet;
use crate::merge::{merge_record_sets, FieldRename, RecordSet};
use crate::stats::{StatsOptions, StatsTable};
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{write_json, Book, CsvOptions, JsonStyle, Sheet, TextEncoding};
use std::path::{Path, PathBuf};

/// Directories that relative job paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Layout {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn input(&self, path: &Path) -> PathBuf {
        resolve(&self.input_dir, path)
    }

    pub fn output(&self, path: &Path) -> PathBuf {
        resolve(&self.output_dir, path)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(".", ".")
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Sectioned ranking workbook → `{sheet: {section: [record]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsJob {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub markers: MarkerSet,
}

/// Wide statistics CSV → `[record]` with a derived tag list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatsJob {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default = "TextEncoding::cp950")]
    pub encoding: TextEncoding,
    #[serde(default = "default_tag_start")]
    pub start_column: usize,
    #[serde(default = "default_list_field")]
    pub list_field: String,
    #[serde(default)]
    pub defaults: DefaultPolicy,
    #[serde(default = "default_true")]
    pub infer_types: bool,
}

/// Several list CSVs → one concatenated `[record]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfoJob {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    #[serde(default = "default_encodings")]
    pub encodings: Vec<TextEncoding>,
    #[serde(default = "default_renames")]
    pub renames: Vec<FieldRename>,
    #[serde(default = "default_merge_policy")]
    pub defaults: DefaultPolicy,
    #[serde(default = "default_true")]
    pub infer_types: bool,
}

fn default_tag_start() -> usize {
    DEFAULT_TAG_START
}

fn default_list_field() -> String {
    DEFAULT_LIST_FIELD.to_string()
}

fn default_true() -> bool {
    true
}

fn default_encodings() -> Vec<TextEncoding> {
    vec![TextEncoding::cp950(), TextEncoding::utf8()]
}

fn default_renames() -> Vec<FieldRename> {
    vec![FieldRename::stock_code()]
}

fn default_merge_policy() -> DefaultPolicy {
    DefaultPolicy::EmptyText
}

/// One job of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobSpec {
    Rankings(RankingsJob),
    RawStats(RawStatsJob),
    StockInfo(StockInfoJob),
}

/// What a successful job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub output: PathBuf,
    pub records: usize,
    /// Inputs that did not exist and were left out.
    pub skipped_inputs: Vec<PathBuf>,
}

/// Outcome of one job.
#[derive(Debug)]
pub struct JobReport {
    pub label: String,
    pub outcome: JobResult<JobSummary>,
}

/// Outcomes of a batch, in run order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<JobReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &JobSummary)> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|s| (r.label.as_str(), s)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &JobError)> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.label.as_str(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

impl JobSpec {
    /// Output path as configured (unresolved).
    pub fn output(&self) -> &Path {
        match self {
            JobSpec::Rankings(job) => &job.output,
            JobSpec::RawStats(job) => &job.output,
            JobSpec::StockInfo(job) => &job.output,
        }
    }

    /// Name used in logs and summaries: the output file name.
    pub fn label(&self) -> String {
        let output = self.output();
        output
            .file_name()
            .map_or_else(|| output.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    pub fn run(&self, layout: &Layout) -> JobResult<JobSummary> {
        match self {
            JobSpec::Rankings(job) => job.run(layout),
            JobSpec::RawStats(job) => job.run(layout),
            JobSpec::StockInfo(job) => job.run(layout),
        }
    }
}

impl RankingsJob {
    pub fn run(&self, layout: &Layout) -> JobResult<JobSummary> {
        let input = layout.input(&self.input);
        let output = layout.output(&self.output);
        tracing::info!(input = %input.display(), "processing rankings");

        let book = Book::from_workbook(&input).map_err(|e| JobError::input(&input, e))?;
        let result = extract_book(&book, &self.markers);

        write_json(&output, &result, JsonStyle::Pretty).map_err(|e| JobError::output(&output, e))?;
        tracing::info!(output = %output.display(), "saved rankings");

        Ok(JobSummary {
            records: record_count(&result),
            output,
            skipped_inputs: Vec::new(),
        })
    }
}

impl RawStatsJob {
    pub fn run(&self, layout: &Layout) -> JobResult<JobSummary> {
        let input = layout.input(&self.input);
        let output = layout.output(&self.output);
        tracing::info!(input = %input.display(), encoding = %self.encoding, "processing raw stats");

        let options = CsvOptions::default()
            .with_headers(true)
            .with_type_inference(self.infer_types)
            .with_encoding(self.encoding.clone());
        let sheet = Sheet::from_csv_with_options(&input, options).map_err(|e| JobError::input(&input, e))?;
        require_header(&sheet, &input)?;

        let table = StatsTable::from_sheet(
            &sheet,
            &StatsOptions {
                tag_start: self.start_column,
                list_field: self.list_field.clone(),
                defaults: self.defaults,
            },
        );

        write_json(&output, &table, JsonStyle::Compact).map_err(|e| JobError::output(&output, e))?;
        tracing::info!(output = %output.display(), rows = table.len(), "saved raw stats");

        Ok(JobSummary {
            records: table.len(),
            output,
            skipped_inputs: Vec::new(),
        })
    }
}

impl StockInfoJob {
    pub fn run(&self, layout: &Layout) -> JobResult<JobSummary> {
        let output = layout.output(&self.output);
        let options = CsvOptions::default()
            .with_headers(true)
            .with_type_inference(self.infer_types);

        let mut sets = Vec::with_capacity(self.inputs.len());
        let mut skipped_inputs = Vec::new();

        for path in &self.inputs {
            let input = layout.input(path);
            if !input.exists() {
                tracing::warn!(input = %input.display(), "input missing, skipped");
                skipped_inputs.push(input);
                continue;
            }

            tracing::info!(input = %input.display(), "processing stock info");
            let sheet = Sheet::from_csv_with_fallback(&input, options.clone(), &self.encodings)
                .map_err(|e| JobError::input(&input, e))?;
            require_header(&sheet, &input)?;

            let mut set = RecordSet::from_sheet(&sheet);
            apply_defaults(&mut set.records, self.defaults);
            sets.push(set);
        }

        let merged = merge_record_sets(sets, &self.renames);

        write_json(&output, &merged, JsonStyle::Pretty).map_err(|e| JobError::output(&output, e))?;
        tracing::info!(output = %output.display(), records = merged.len(), "saved stock info");

        Ok(JobSummary {
            records: merged.len(),
            output,
            skipped_inputs,
        })
    }
}

fn require_header(sheet: &Sheet, path: &Path) -> JobResult<()> {
    if sheet.column_names().is_some_and(|names| !names.is_empty()) {
        Ok(())
    } else {
        Err(JobError::Structure {
            path: path.to_path_buf(),
            message: "no header row".to_string(),
        })
    }
}

/// Run every job in order and collect their outcomes.
pub fn run_batch(jobs: &[JobSpec], layout: &Layout) -> BatchReport {
    let mut report = BatchReport::default();

    for job in jobs {
        let label = job.label();
        let outcome = job.run(layout);
        if let Err(err) = &outcome {
            tracing::error!(job = %label, kind = err.kind(), "job failed: {err}");
        }
        report.reports.push(JobReport { label, outcome });
    }

    report
}
