//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use billscan_core::models::config::BillscanConfig;
use billscan_core::models::document::Document;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billscan")
        .join("config.json")
}

/// Load the configuration named by `--config`, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BillscanConfig> {
    match config_path {
        Some(path) => BillscanConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Ok(BillscanConfig::default()),
    }
}

/// Read a text file as a document named after its file name.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_document(path: &Path) -> anyhow::Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(Document::new(source, String::from_utf8_lossy(&bytes)))
}
