//! modviz - Go module dependency visualizer
//!
//! Turns the `module requirement` pairs printed by `go mod graph` into a
//! dependency graph, works out which version of every module is selected,
//! and renders the result.
//!
//! ## Architecture
//!
//! ```text
//! input lines → graph/ (build + version selection) → render/ (templates) → output
//! ```

mod cli;
mod config;
mod error;
mod graph;
mod render;
mod utils;
mod version;
mod visualizer;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use utils::TerminalLogger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = TerminalLogger::new(cli.verbose);

    match cli.execute(&logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.display_with_hints();
            ExitCode::FAILURE
        }
    }
}
