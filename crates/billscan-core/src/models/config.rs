//! Configuration structures for the extraction pipeline and its outputs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BillscanError, Result};

/// Main configuration for billscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillscanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output file configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading characters of the source kept as `raw_text_excerpt`.
    pub excerpt_len: usize,

    /// Additional vendors, scanned after the built-in table.
    pub extra_vendors: Vec<VendorEntry>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excerpt_len: 500,
            extra_vendors: Vec::new(),
        }
    }
}

/// A user-supplied vendor pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    /// Regular expression, matched case-insensitively anywhere in the text.
    pub pattern: String,

    /// Canonical vendor name reported on a match.
    pub name: String,
}

/// Output file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the batch command writes to.
    pub out_dir: PathBuf,

    /// File name of the run result JSON.
    pub json_file: String,

    /// File name of the Markdown report.
    pub report_file: String,

    /// File name of the per-file summary CSV.
    pub summary_file: String,

    /// Write the report on every batch run.
    pub report: bool,

    /// Write the summary CSV on every batch run.
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            json_file: "invoices.json".to_string(),
            report_file: "report.md".to_string(),
            summary_file: "summary.csv".to_string(),
            report: false,
            summary: false,
        }
    }
}

impl BillscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.output.json_file.trim().is_empty() {
            return Err(BillscanError::Config("output.json_file is empty".to_string()));
        }
        for entry in &self.extraction.extra_vendors {
            if entry.name.trim().is_empty() {
                return Err(BillscanError::Config(format!(
                    "vendor pattern {:?} has an empty name",
                    entry.pattern
                )));
            }
        }
        Ok(())
    }

    /// Path of the run result JSON inside `out_dir`.
    pub fn json_path(&self) -> PathBuf {
        self.output.out_dir.join(&self.output.json_file)
    }

    /// Path of the Markdown report inside `out_dir`.
    pub fn report_path(&self) -> PathBuf {
        self.output.out_dir.join(&self.output.report_file)
    }

    /// Path of the summary CSV inside `out_dir`.
    pub fn summary_path(&self) -> PathBuf {
        self.output.out_dir.join(&self.output.summary_file)
    }
}
