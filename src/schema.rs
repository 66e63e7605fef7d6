//! Fixed-width layout of a visit log line.
//!
//! A line looks like
//!
//! ```text
//! https://stitcher.io/blog/some-post,2024-01-05T12:34:56+00:00
//! |<------ 19 ----->||<--- key ------------->||<---- 15 ---->|
//! ```
//!
//! The key is the path, one separator byte and the ten byte date.

/// Site origin preceding the path.
pub const LEADING_WIDTH: usize = 19;
/// Time-of-day and UTC offset following the date.
pub const TRAILING_WIDTH: usize = 15;
pub const SEPARATOR_WIDTH: usize = 1;
/// `YYYY-MM-DD`
pub const DATE_WIDTH: usize = 10;

/// Shortest key that still splits into a (possibly empty) path and a date.
pub const MIN_KEY_LEN: usize = SEPARATOR_WIDTH + DATE_WIDTH;
/// Shortest line, terminator excluded, that yields a key.
pub const MIN_LINE_LEN: usize = LEADING_WIDTH + MIN_KEY_LEN + TRAILING_WIDTH;

const _: () = assert!(MIN_KEY_LEN == 11);
const _: () = assert!(MIN_LINE_LEN == 45);
// trailing field plus '\n' is the 16 byte framing the format is defined by
const _: () = assert!(TRAILING_WIDTH + 1 == 16);

pub type Date = [u8; DATE_WIDTH];

/// Strips the line terminator, if any.
fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Returns the key of a line, or `None` if the line is too short to carry one.
pub fn extract_key(line: &[u8]) -> Option<&[u8]> {
    let line = trim_terminator(line);
    if line.len() < MIN_LINE_LEN {
        return None;
    }
    Some(&line[LEADING_WIDTH..line.len() - TRAILING_WIDTH])
}

pub fn is_valid_key(key: &[u8]) -> bool {
    key.len() >= MIN_KEY_LEN
}

/// Splits a key into its path and date, dropping the separator.
pub fn split_key(key: &[u8]) -> Option<(&[u8], Date)> {
    if !is_valid_key(key) {
        return None;
    }
    let (rest, date) = key.split_at(key.len() - DATE_WIDTH);
    let path = &rest[..rest.len() - SEPARATOR_WIDTH];
    Some((path, Date::try_from(date).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &[u8] = b"https://stitcher.io/blog/some-post,2024-01-05T12:34:56+00:00\n";

    #[test]
    fn extracts_key_between_framing() {
        assert_eq!(extract_key(LINE), Some(&b"/blog/some-post,2024-01-05"[..]));
    }

    #[test]
    fn unterminated_line_gives_same_key() {
        let bare = &LINE[..LINE.len() - 1];
        assert_eq!(extract_key(bare), extract_key(LINE));

        let crlf = b"https://stitcher.io/blog/some-post,2024-01-05T12:34:56+00:00\r\n";
        assert_eq!(extract_key(crlf), extract_key(LINE));
    }

    #[test]
    fn short_lines_have_no_key() {
        assert_eq!(extract_key(b""), None);
        assert_eq!(extract_key(b"\n"), None);
        // 44 bytes: one short of the minimum
        let short = b"https://stitcher.io2024-01-0,T12:34:56+00:00\n";
        assert_eq!(short.len() - 1, MIN_LINE_LEN - 1);
        assert_eq!(extract_key(short), None);
    }

    #[test]
    fn minimal_line_has_empty_path() {
        let line = b"https://stitcher.io,2024-01-05T12:34:56+00:00";
        let key = extract_key(line).unwrap();
        assert_eq!(key, b",2024-01-05");
        let (path, date) = split_key(key).unwrap();
        assert!(path.is_empty());
        assert_eq!(&date, b"2024-01-05");
    }

    #[test]
    fn splits_path_and_date() {
        let (path, date) = split_key(b"/blog/foo/bar,2024-01-02").unwrap();
        assert_eq!(path, b"/blog/foo/bar");
        assert_eq!(&date, b"2024-01-02");
        assert_eq!(split_key(b"2024-01-02"), None);
    }
}
