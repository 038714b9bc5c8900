//! aria command-line application.
//!
//! Breaks project goals into plans with the help of a language model, and
//! helps view, walk through and generate code from them.

mod args;
mod cli;
mod dashboard;
mod logging;
mod progress;
mod prompt;
mod renderer;

use std::io::{self, IsTerminal};

use anyhow::Result;
use args::{Args, Commands};
use aria_core::Config;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    logging::init(config.logs_dir.as_deref())?;

    let Args { no_color, command } = Args::parse();
    let renderer = TerminalRenderer::new(!no_color && io::stdout().is_terminal());
    let cli = Cli::new(renderer, config);

    info!("aria started");

    match command {
        Version => cli.version(),
        Decompose(args) => cli.decompose(&args),
        View(args) => cli.view(&args),
        Analyze(args) => cli.analyze(&args),
        New(args) => cli.new_project(&args),
        Run(args) => cli.run(&args),
        Review(args) => cli.review(&args),
    }
}
