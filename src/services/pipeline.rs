use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::MergeConfig;
use crate::console::StatusSink;
use crate::error::{MergeError, Result};
use crate::model::document;
use crate::services::{loader, merge, pairs, writer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    /// Distinct keys in the translation source.
    pub translation_entries: usize,
    pub baseline_pairs: usize,
    pub replaced: usize,
    pub unmatched_translation_keys: usize,
    pub output_path: PathBuf,
}

/// Loads both tables, merges and writes the result. Any failure aborts before output.
pub fn run(cfg: &MergeConfig, status: &mut dyn StatusSink) -> Result<MergeReport> {
    status.line("=== LocStringValues merge ===");
    status.line(&format!("translation source: {}", cfg.translation_path.display()));
    status.line(&format!("baseline:           {}", cfg.baseline_path.display()));
    status.line(&format!("output:             {}", cfg.output_path.display()));
    status.line("");

    ensure_exists(&cfg.translation_path, "translation source", status)?;
    ensure_exists(&cfg.baseline_path, "baseline", status)?;

    let translation_doc = loader::load_document(&cfg.translation_path, cfg.input_encoding)?;
    let mut baseline_doc = loader::load_document(&cfg.baseline_path, cfg.input_encoding)?;

    let translation_values = document::loc_string_values(&translation_doc, &cfg.translation_path)?;
    let translation = pairs::build_translation_map(translation_values, &cfg.translation_path);
    status.line(&format!(
        "translation source holds {} entries",
        translation.len()
    ));

    let baseline_values = document::loc_string_values(&baseline_doc, &cfg.baseline_path)?;
    let baseline_pairs = baseline_values.len() / 2;
    debug!(pairs = baseline_pairs, "baseline loaded");

    let outcome = merge::merge(&translation, baseline_values, &cfg.baseline_path);
    for key in &outcome.replaced_keys {
        status.line(&format!("replaced: '{key}' -> [new value]"));
    }
    status.line(&format!("replaced {} entries in total", outcome.replaced()));

    let report = MergeReport {
        translation_entries: translation.len(),
        baseline_pairs,
        replaced: outcome.replaced(),
        unmatched_translation_keys: outcome.unmatched_translation_keys,
        output_path: cfg.output_path.clone(),
    };

    document::replace_loc_string_values(&mut baseline_doc, &cfg.baseline_path, outcome.values)?;

    writer::write_document(&cfg.output_path, &baseline_doc)?;
    status.line(&format!("saved to: {}", cfg.output_path.display()));

    info!(
        replaced = report.replaced,
        unmatched = report.unmatched_translation_keys,
        output = %report.output_path.display(),
        "merge finished"
    );

    Ok(report)
}

fn ensure_exists(path: &Path, role: &str, status: &mut dyn StatusSink) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    status.line(&format!("error: {role} does not exist: {}", path.display()));
    Err(MergeError::FileNotFound {
        path: path.to_path_buf(),
    })
}
