//! Batch configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sheetsift_core::collapse::{DEFAULT_LIST_FIELD, DEFAULT_TAG_START};
use sheetsift_core::{
    DefaultPolicy, FieldRename, JobSpec, Layout, MarkerSet, RankingsJob, RawStatsJob, StockInfoJob,
};
use sheetsift_sheet::TextEncoding;
use std::path::{Path, PathBuf};

/// Where inputs are read from, where outputs go, and what to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_jobs")]
    pub jobs: Vec<JobSpec>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            jobs: default_jobs(),
        }
    }
}

impl Config {
    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Replace the configured directories with any given on the command line.
    pub fn with_overrides(mut self, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.input_dir, &self.output_dir)
    }
}

/// The standard batch: two ranking workbooks, two statistics tables and
/// the stock list merge.
fn default_jobs() -> Vec<JobSpec> {
    let rankings = |years: u8| {
        JobSpec::Rankings(RankingsJob {
            input: format!("Stock_Analysis_Report_{years}Year.xlsx").into(),
            output: format!("rankings_{years}y.json").into(),
            markers: MarkerSet::rankings(),
        })
    };
    let raw_stats = |years: u8| {
        JobSpec::RawStats(RawStatsJob {
            input: format!("漲跌幅統計(近{years}年).csv").into(),
            output: format!("raw_stats_{years}y.json").into(),
            encoding: TextEncoding::cp950(),
            start_column: DEFAULT_TAG_START,
            list_field: DEFAULT_LIST_FIELD.to_string(),
            defaults: DefaultPolicy::Zero,
            infer_types: true,
        })
    };

    vec![
        rankings(3),
        rankings(5),
        raw_stats(3),
        raw_stats(5),
        JobSpec::StockInfo(StockInfoJob {
            inputs: (1..=3).map(|n| PathBuf::from(format!("StockList ({n}).csv"))).collect(),
            output: "stock_info.json".into(),
            encodings: vec![TextEncoding::cp950(), TextEncoding::utf8()],
            renames: vec![FieldRename::stock_code()],
            defaults: DefaultPolicy::EmptyText,
            infer_types: true,
        }),
    ]
}
