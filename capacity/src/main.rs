use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use capacity::{Request, check_capacity};
use clap::Parser;

/// Checks that overlapping hotel stays never exceed the room limit
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Request file; reads stdin when absent or `-`
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = match &cli.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let request = Request::parse(&input).context("malformed request")?;
    log::info!(
        "{} guests, capacity {}",
        request.guests.len(),
        request.capacity
    );

    let fits = check_capacity(request.capacity, &request.guests);
    println!("{}", if fits { "True" } else { "False" });
    Ok(())
}
