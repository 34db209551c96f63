use clap::Parser;

mod app;
mod catalog;
mod cli;
mod config;
mod mpris;
mod playback;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run(cli::Cli::parse())
}
