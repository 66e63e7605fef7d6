use std::fs;
use std::io::Write;

use pagetally::count::count_range;
use pagetally::split::split_point_of;
use pagetally::{merge, merge_all, FrequencyMap, GroupedReport};
use proptest::prelude::*;
use tempfile::NamedTempFile;

/// A log line, or `None` for a line too short to carry a key.
fn arb_line() -> impl Strategy<Value = Option<(String, String)>> {
    let good = ("/[a-c]{0,3}(/[a-c]{1,2})?", 1u32..=4, 1u32..=9)
        .prop_map(|(path, m, d)| Some((path, format!("2024-{m:02}-{d:02}"))));
    prop_oneof![9 => good, 1 => Just(None)]
}

fn render(lines: &[Option<(String, String)>], trailing_newline: bool) -> String {
    let mut text: String = lines
        .iter()
        .map(|l| match l {
            Some((path, date)) => format!("https://stitcher.io{path},{date}T08:15:00+00:00\n"),
            None => "short\n".to_string(),
        })
        .collect();
    if !trailing_newline {
        text.pop();
    }
    text
}

fn file_with(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f
}

fn table_from(lines: &[Option<(String, String)>]) -> FrequencyMap {
    let mut t = FrequencyMap::default();
    for l in lines.iter().flatten() {
        t.record(format!("https://stitcher.io{},{}T00:00:00+00:00", l.0, l.1).as_bytes());
    }
    t
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn split_then_merge_equals_single_pass(
        lines in prop::collection::vec(arb_line(), 0..40),
        trailing_newline in any::<bool>(),
    ) {
        let text = render(&lines, trailing_newline);
        let input = file_with(&text);
        let size = fs::metadata(input.path()).unwrap().len();

        let mid = split_point_of(input.path()).unwrap();
        prop_assert!(mid <= size);
        prop_assert!(mid == 0 || mid == size || text.as_bytes()[mid as usize - 1] == b'\n');

        let whole = count_range(input.path(), 0..size, 4096).unwrap();
        let left = count_range(input.path(), 0..mid, 4096).unwrap();
        let right = count_range(input.path(), mid..size, 4096).unwrap();
        prop_assert_eq!(merge(left, right), whole);
    }

    #[test]
    fn counts_are_conserved(lines in prop::collection::vec(arb_line(), 0..40)) {
        let text = render(&lines, true);
        let input = file_with(&text);
        let dir = tempfile::tempdir().unwrap();
        let summary = pagetally::parse(input.path(), &dir.path().join("out.json")).unwrap();

        let good = lines.iter().filter(|l| l.is_some()).count() as u64;
        prop_assert_eq!(summary.lines, good);
        prop_assert_eq!(summary.skipped, lines.len() as u64 - good);
    }

    #[test]
    fn merge_is_commutative_and_associative(
        a in prop::collection::vec(arb_line(), 0..15),
        b in prop::collection::vec(arb_line(), 0..15),
        c in prop::collection::vec(arb_line(), 0..15),
    ) {
        let (a, b, c) = (table_from(&a), table_from(&b), table_from(&c));

        prop_assert_eq!(merge(a.clone(), b.clone()), merge(b.clone(), a.clone()));
        prop_assert_eq!(
            merge(merge(a.clone(), b.clone()), c.clone()),
            merge(a.clone(), merge(b.clone(), c.clone()))
        );
        prop_assert_eq!(
            merge_all(vec![c.clone(), a.clone(), b.clone()]),
            merge(merge(a, b), c)
        );
    }

    #[test]
    fn report_follows_first_seen_path_order(lines in prop::collection::vec(arb_line(), 0..40)) {
        let table = table_from(&lines);
        let report = GroupedReport::from_map(&table);

        let mut first_seen: Vec<&[u8]> = Vec::new();
        for (path, _) in lines.iter().flatten() {
            if !first_seen.contains(&path.as_bytes()) {
                first_seen.push(path.as_bytes());
            }
        }
        let paths: Vec<&[u8]> = report.paths().collect();
        prop_assert_eq!(paths, first_seen);

        for path in report.paths() {
            let dates: Vec<_> = report.dates(path).unwrap().keys().collect();
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert_eq!(report.total(), table.total());
    }
}
