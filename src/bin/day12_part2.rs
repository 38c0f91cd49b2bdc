use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use day12_24::hill;

#[derive(Debug, Parser)]
struct Args {
    input_path: PathBuf,
    /// Climb from every lowest position in parallel instead of searching backward from the end.
    #[arg(long)]
    exhaustive: bool,
}

fn main() -> Result<()> {
    day12_24::init_tracing()?;
    let args = Args::parse();
    let map = hill::read_height_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read height map from given file({}).",
            args.input_path.display()
        )
    })?;
    let found = if args.exhaustive {
        map.fewest_steps_from_lowest_exhaustive()
    } else {
        map.fewest_steps_from_lowest()
    };
    let steps_n = found.with_context(|| {
        format!(
            "There's no path from any lowest position to {}.",
            map.end_pos()
        )
    })?;
    println!("{}", steps_n);

    Ok(())
}
