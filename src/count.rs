use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use log::debug;

use crate::table::FrequencyMap;

/// Counts the lines of `path` that start inside `range`.
///
/// `range.end` is a soft limit: reading stops once it has been reached, but
/// a line that straddles it is still read to its end and counted. With the
/// end placed on a line boundary by [`crate::split::split_point`] no line is
/// seen by both halves.
pub fn count_range(path: &Path, range: Range<u64>, read_buffer: usize) -> io::Result<FrequencyMap> {
    let mut f = File::open(path)?;
    if range.start > 0 {
        f.seek(SeekFrom::Start(range.start))?;
    }
    let len = range.end.saturating_sub(range.start);
    let table = count_lines(BufReader::with_capacity(read_buffer, f), len)?;
    debug!(
        "counted {}..{}: {} lines, {} keys, {} skipped",
        range.start,
        range.end,
        table.total(),
        table.len(),
        table.skipped()
    );
    Ok(table)
}

/// Takes a reader positioned on a line start and counts lines until at
/// least `budget` bytes have been consumed or the input runs out.
pub fn count_lines<T: Read>(mut reader: BufReader<T>, budget: u64) -> io::Result<FrequencyMap> {
    let mut table = FrequencyMap::with_capacity(10_000);
    let mut line = Vec::with_capacity(256);
    let mut consumed = 0u64;

    while consumed < budget {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }
        consumed += n as u64;
        table.record(&line);
    }

    Ok(table)
}
