//! Groups the merged table by path and writes it out as JSON.

use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::schema::{self, Date};
use crate::settings::Settings;
use crate::table::FrequencyMap;

/// Visits per date, per path.
///
/// Paths keep the order in which they first appear in the table they were
/// grouped from. Dates are kept sorted; for `YYYY-MM-DD` that is
/// chronological order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GroupedReport {
    paths: IndexMap<Vec<u8>, BTreeMap<Date, u64>, FxBuildHasher>,
}

impl GroupedReport {
    pub fn from_map(table: &FrequencyMap) -> Self {
        let mut paths: IndexMap<Vec<u8>, BTreeMap<Date, u64>, FxBuildHasher> = IndexMap::default();
        for (key, &count) in table {
            // every key in a table passed schema::is_valid_key on the way in
            let Some((path, date)) = schema::split_key(key) else {
                debug_assert!(false, "unsplittable key in table");
                continue;
            };
            let idx = match paths.get_index_of(path) {
                Some(i) => i,
                None => paths.insert_full(path.to_vec(), BTreeMap::new()).0,
            };
            let dates = &mut paths[idx];
            // same path and date behind a different separator byte
            *dates.entry(date).or_insert(0) += count;
        }
        GroupedReport { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn dates(&self, path: &[u8]) -> Option<&BTreeMap<Date, u64>> {
        self.paths.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &[u8]> {
        self.paths.keys().map(|p| p.as_slice())
    }

    pub fn total(&self) -> u64 {
        self.paths.values().flat_map(|d| d.values()).sum()
    }
}

/// Collects output in memory and hands it to the sink in large pieces.
///
/// Nothing reaches the sink until the buffer grows past `threshold`, or
/// [`ChunkedWriter::finish`] is called.
pub struct ChunkedWriter<W: Write> {
    sink: W,
    buf: Vec<u8>,
    threshold: usize,
}

impl<W: Write> ChunkedWriter<W> {
    pub fn new(sink: W, threshold: usize) -> Self {
        ChunkedWriter {
            sink,
            buf: Vec::with_capacity(threshold.saturating_add(4096).min(1 << 24)),
            threshold,
        }
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        if self.buf.len() > self.threshold {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Bytes held back so far.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Writes out whatever is left and flushes the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.write_all(&self.buf)?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}

fn escape_into(out: &mut Vec<u8>, s: &[u8]) {
    for &b in s {
        match b {
            b'/' => out.extend_from_slice(b"\\/"),
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            _ => out.push(b),
        }
    }
}

/// Writes the report in its fixed layout:
///
/// ```text
/// {
///     "\/blog\/a": {
///         "2024-01-02": 1,
///         "2024-01-05": 3
///     }
/// }
/// ```
pub fn write_report<W: Write>(report: &GroupedReport, out: &mut ChunkedWriter<W>) -> io::Result<()> {
    let mut entry = Vec::with_capacity(1024);
    out.write_all(b"{\n")?;
    for (i, (path, dates)) in report.paths.iter().enumerate() {
        entry.clear();
        if i > 0 {
            entry.extend_from_slice(b",\n");
        }
        entry.extend_from_slice(b"    \"");
        escape_into(&mut entry, path);
        entry.extend_from_slice(b"\": {\n");
        for (j, (date, count)) in dates.iter().enumerate() {
            if j > 0 {
                entry.extend_from_slice(b",\n");
            }
            entry.extend_from_slice(b"        \"");
            entry.extend_from_slice(date);
            write!(entry, "\": {count}")?;
        }
        entry.extend_from_slice(b"\n    }");
        out.write_all(&entry)?;
    }
    out.write_all(b"\n}")
}

fn destination_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Writes the report to `path`.
///
/// The text goes to a temporary file next to `path` and is renamed into
/// place once complete. If anything fails the temporary file is deleted
/// and `path` is left untouched.
pub fn write_report_file(report: &GroupedReport, path: &Path, settings: &Settings) -> Result<PathBuf> {
    let tmp = NamedTempFile::new_in(destination_dir(path))?;
    let sink = BufWriter::with_capacity(settings.write_buffer, tmp);
    let mut out = ChunkedWriter::new(sink, settings.flush_threshold);

    write_report(report, &mut out)?;

    let tmp = out.finish()?.into_inner().map_err(|e| e.into_error())?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(path.to_path_buf())
}
