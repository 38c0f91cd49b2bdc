use anyhow::{Context, Result};
use clap::Parser;
use day12_24::{hill, CLIArgs};

fn main() -> Result<()> {
    day12_24::init_tracing()?;
    let args = CLIArgs::parse();
    let map = hill::read_height_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read height map from given file({}).",
            args.input_path.display()
        )
    })?;
    let steps_n = map.fewest_steps_to_top().with_context(|| {
        format!(
            "There's no path climbing from {} to {}.",
            map.start_pos(),
            map.end_pos()
        )
    })?;
    println!("{}", steps_n);

    Ok(())
}
