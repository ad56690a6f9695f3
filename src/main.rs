//! # Autoviz command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load config (--config FILE, or defaults)
//!   ├─> Initialise logging (env_logger, RUST_LOG)
//!   └─> Load the CSV into a Workspace and run the command
//! ```
//!
//! ```bash
//! autoviz inspect data.csv
//! autoviz chart data.csv --kind bar --x Department --y Profit
//! autoviz --json regress data.csv --x Revenue --y Profit
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.load_config()?;
    autoviz::logging::init(&config)?;

    cli::run(cli, config)
}
