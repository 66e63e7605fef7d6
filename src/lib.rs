//! Counts page visits in a fixed-width access log and writes them out
//! grouped by path and date.
//!
//! The input is split in two at a line boundary, each half is counted on
//! its own thread, the two tables are merged and the result is written as a
//! JSON object of `path -> date -> visits`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

pub mod count;
pub mod error;
pub mod handoff;
pub mod report;
pub mod schema;
pub mod settings;
pub mod split;
pub mod table;
pub mod workers;

pub use error::{Error, Result};
pub use report::GroupedReport;
pub use settings::Settings;
pub use table::{merge, merge_all, FrequencyMap};

/// What a run saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub split_at: u64,
    pub size: u64,
    pub lines: u64,
    pub skipped: u64,
    pub keys: usize,
    pub paths: usize,
}

/// Counts `input` and writes the grouped report to `output`.
pub fn parse(input: &Path, output: &Path) -> Result<Summary> {
    parse_with(input, output, &Settings::default())
}

pub fn parse_with(input: &Path, output: &Path, settings: &Settings) -> Result<Summary> {
    let start = Instant::now();

    let size = fs::metadata(input)?.len();
    let split_at = split::split_point_of(input)?;
    info!("{}: {} bytes, second half starts at {}", input.display(), size, split_at);

    let (left, right) = workers::count_halves(input, split_at, size, settings)?;
    let merged = merge(left, right);
    info!("counted {} keys in {:?}", merged.len(), start.elapsed());
    if merged.skipped() > 0 {
        warn!("skipped {} lines too short to carry a key", merged.skipped());
    }

    let grouped = GroupedReport::from_map(&merged);
    report::write_report_file(&grouped, output, settings)?;
    info!("wrote {} paths to {} in {:?}", grouped.len(), output.display(), start.elapsed());

    Ok(Summary {
        split_at,
        size,
        lines: merged.total(),
        skipped: merged.skipped(),
        keys: merged.len(),
        paths: grouped.len(),
    })
}
