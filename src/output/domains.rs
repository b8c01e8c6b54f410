//! Plain-text domain list
//!
//! One hostname per line, sorted ascending, overwritten on every write.

use crate::output::traits::OutputResult;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a domain set to `path`, one domain per line in sorted order
pub fn write_domain_list(domains: &BTreeSet<String>, path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for domain in domains {
        writeln!(writer, "{}", domain)?;
    }
    writer.flush()?;
    Ok(())
}
