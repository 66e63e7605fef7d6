use std::env::args;
use std::path::Path;
use std::process::exit;

use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let [_, input, output] = &args().collect::<Vec<_>>()[..] {
        match pagetally::parse(Path::new(input), Path::new(output)) {
            Ok(summary) => {
                info!(
                    "{} lines, {} skipped, {} paths",
                    summary.lines,
                    summary.skipped,
                    summary.paths
                );
            }
            Err(e) => {
                error!("{e}");
                exit(1);
            }
        }
    } else {
        eprintln!("Usage: pagetally <input> <output>");
        exit(1);
    }
}
