use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

const ORIGIN: &str = "https://stitcher.io";

const SECTIONS: &[&str] = &["blog", "docs", "talks", "newsletter", "tags"];

const WORDS: &[&str] = &[
    "rust", "php", "generics", "enums", "traits", "async", "readonly", "attributes",
    "closures", "iterators", "performance", "typed", "properties", "match", "fibers",
    "static", "analysis", "testing", "parsing", "lifetimes",
];

/// One generated visit: page path and ISO timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub path: String,
    pub timestamp: String,
}

impl Visit {
    pub fn line(&self) -> String {
        format!("{ORIGIN}{},{}", self.path, self.timestamp)
    }
}

/// Deterministic catalogue of `n` page paths.
pub fn pages(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let section = SECTIONS[i % SECTIONS.len()];
            let a = WORDS[(i / SECTIONS.len()) % WORDS.len()];
            let b = WORDS[(i * 7 + 3) % WORDS.len()];
            format!("/{section}/{a}-{b}-{i}")
        })
        .collect()
}

fn timestamp<R: Rng>(rng: &mut R) -> String {
    let year = rng.gen_range(2020..=2025);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let hour = rng.gen_range(0..24);
    let minute = rng.gen_range(0..60);
    let second = rng.gen_range(0..60);
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}+00:00")
}

/// `count` visits over `page_count` pages with Zipf-distributed popularity.
pub fn gen(count: usize, page_count: usize, seed: u64) -> impl Iterator<Item = Visit> {
    let pages = pages(page_count.max(1));
    let popularity = Zipf::new(pages.len() as u64, 1.1).expect("zipf parameters are valid");
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count).map(move |_| {
        let idx = popularity.sample(&mut rng) as usize - 1;
        Visit {
            path: pages[idx.min(pages.len() - 1)].clone(),
            timestamp: timestamp(&mut rng),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_have_fixed_framing() {
        for v in gen(200, 50, 7) {
            let line = v.line();
            assert!(line.starts_with(ORIGIN));
            // ",YYYY-MM-DD" + "THH:MM:SS+00:00"
            let tail = &line[line.len() - 26..];
            assert_eq!(&tail[..1], ",");
            assert_eq!(&tail[11..12], "T");
            assert!(tail.ends_with("+00:00"));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let a: Vec<_> = gen(50, 10, 42).collect();
        let b: Vec<_> = gen(50, 10, 42).collect();
        assert_eq!(a, b);
    }
}
