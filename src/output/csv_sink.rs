//! `site,version` CSV result store
//!
//! In append mode the sites already present in the store form a seen-set
//! and are never written twice; in create mode the store is rewritten.

use crate::fingerprint::FingerprintResult;
use crate::output::traits::{OutputError, OutputResult, PersistSummary, ResultSink, WriteMode};
use crate::progress::ProgressSink;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const HEADER: [&str; 2] = ["site", "version"];

/// Result sink writing a `site,version` CSV file
pub struct CsvResultSink {
    path: PathBuf,
    mode: WriteMode,
    progress: Arc<dyn ProgressSink>,
}

impl CsvResultSink {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            path: path.into(),
            mode,
            progress,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvResultSink {
    fn persist(&self, results: &[FingerprintResult]) -> PersistSummary {
        persist_results(results, &self.path, self.mode, self.progress.as_ref())
    }
}

/// Writes fingerprint results to a CSV store
///
/// # Behavior
///
/// | Mode | Store exists | Action |
/// |------|--------------|--------|
/// | Append | yes | Read existing sites, append unseen rows |
/// | Append | no | Create with header |
/// | Create | either | Truncate, write header and all rows |
///
/// A site is written at most once, even if it appears twice in `results`.
/// An unreadable store is reported and treated as empty; a write failure is
/// reported and leaves the rows written so far in place.
pub fn persist_results(
    results: &[FingerprintResult],
    path: &Path,
    mode: WriteMode,
    progress: &dyn ProgressSink,
) -> PersistSummary {
    let append = mode == WriteMode::Append && path.exists();

    let mut seen = HashSet::new();
    if append {
        match read_existing_sites(path) {
            Ok(sites) => seen = sites,
            Err(e) => progress.emit(&format!("Error reading existing CSV file: {}", e)),
        }
    }

    let mut summary = PersistSummary::default();
    match write_rows(results, path, append, &mut seen, &mut summary) {
        Ok(()) => {
            tracing::info!(
                "Persisted {} new rows to {} ({} already present)",
                summary.written,
                path.display(),
                summary.skipped
            );
            progress.emit(&format!("WordPress versions saved to {}", path.display()));
        }
        Err(e) => progress.emit(&format!("Error writing to CSV file: {}", e)),
    }

    summary
}

/// Reads the `site` column of an existing store
pub fn read_existing_sites(path: &Path) -> OutputResult<HashSet<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    // An empty file has no header yet
    if reader.headers()?.is_empty() {
        return Ok(HashSet::new());
    }

    let site_column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == "site")
        .ok_or_else(|| OutputError::Format(format!("{} has no 'site' column", path.display())))?;

    let mut sites = HashSet::new();
    for record in reader.records() {
        if let Some(site) = record?.get(site_column) {
            sites.insert(site.to_string());
        }
    }

    Ok(sites)
}

fn write_rows(
    results: &[FingerprintResult],
    path: &Path,
    append: bool,
    seen: &mut HashSet<String>,
    summary: &mut PersistSummary,
) -> OutputResult<()> {
    let mut file = if append {
        OpenOptions::new().read(true).append(true).open(path)?
    } else {
        File::create(path)?
    };
    let len = file.metadata()?.len();
    let needs_header = len == 0;

    // Rows must start on a fresh line
    if len > 0 && !ends_with_newline(&mut file)? {
        file.write_all(b"\n")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        writer.write_record(HEADER)?;
    }

    for result in results {
        if !seen.insert(result.site.clone()) {
            summary.skipped += 1;
            continue;
        }

        let version = result.version.to_string();
        if let Err(e) = writer.write_record([result.site.as_str(), version.as_str()]) {
            let _ = writer.flush();
            return Err(e.into());
        }
        summary.written += 1;
    }

    writer.flush()?;
    Ok(())
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
