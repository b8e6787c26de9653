//! Freight Planner - transport company fleet registry and cargo distribution
//!
//! A CLI tool that keeps clients and vehicles in a state file and packs
//! client cargo into the fleet, VIP clients first.

mod cli;
mod commands;
mod logging;
mod menu;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
