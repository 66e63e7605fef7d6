use std::env::args;
use std::io::{BufWriter, Write};
use std::process::exit;
use gen;

fn main() {
    let argv = args().collect::<Vec<_>>();
    let (count, pages, seed): (usize, usize, u64) = match &argv[..] {
        [_, count] => (count.parse().expect("invalid count"), 1000, 0),
        [_, count, pages] => (count.parse().expect("invalid count"), pages.parse().expect("invalid page count"), 0),
        [_, count, pages, seed] => (
            count.parse().expect("invalid count"),
            pages.parse().expect("invalid page count"),
            seed.parse().expect("invalid seed"),
        ),
        _ => {
            println!("Usage: gen <count> [pages] [seed]");
            exit(1);
        }
    };

    let stdlock = std::io::stdout().lock();

    let mut bufout = BufWriter::new(stdlock);
    gen::gen(count, pages, seed)
        .for_each(|visit| {
            writeln!(bufout, "{}", visit.line()).unwrap();
        })
}
