use anyhow::{Context, Result};
use clap::Parser;
use day12_24::{valley, CLIArgs};

fn main() -> Result<()> {
    day12_24::init_tracing()?;
    let args = CLIArgs::parse();
    let valley = valley::read_valley(&args.input_path).with_context(|| {
        format!(
            "Failed to read valley from given file({}).",
            args.input_path.display()
        )
    })?;
    let minutes = valley.fewest_minutes_with_return().with_context(|| {
        format!(
            "There's no way through blizzards between {} and {} for all three trips.",
            valley.entrance(),
            valley.exit()
        )
    })?;
    println!("{}", minutes);

    Ok(())
}
