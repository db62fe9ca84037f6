use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use keymaze::Grid;

/// Fewest total steps for the bots in a maze to collect every key
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Maze file; reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Replace the single entrance with four bots before solving
    #[arg(long)]
    split: bool,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = read_input(cli.input.as_ref())?;
    let mut grid = Grid::parse(&input).context("malformed maze")?;
    if cli.split {
        grid = grid.split_entrance()?;
    }
    log::info!(
        "{} bots, {} keys",
        grid.entrances().len(),
        grid.keys().len()
    );

    match keymaze::solve(&grid)? {
        Some(steps) => println!("{}", steps),
        None => println!("No solution found"),
    }
    Ok(())
}
