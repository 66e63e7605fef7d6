use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Finds the offset where the second half of the file starts.
///
/// Seeks to the middle and skips forward past the next `\n`, so the result
/// is always the start of a line or the end of the file. Reading `[0, split)`
/// and `[split, size)` as separate line streams sees every line exactly once.
pub fn split_point<R: Read + Seek>(f: &mut R) -> io::Result<u64> {
    let size = f.seek(SeekFrom::End(0))?;
    if size == 0 {
        return Ok(0);
    }

    let mid = size / 2;
    f.seek(SeekFrom::Start(mid))?;
    let mut reader = BufReader::with_capacity(4096, f);
    let mut partial = Vec::with_capacity(256);
    let skipped = reader.read_until(b'\n', &mut partial)? as u64;

    // no newline after the middle: the rest of the file is one line
    Ok((mid + skipped).min(size))
}

pub fn split_point_of(path: &Path) -> io::Result<u64> {
    let mut f = File::open(path)?;
    split_point(&mut f)
}
