mod args;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::args::{Cli, Command};

fn main() {
    if let Err(e) = run() {
        ui::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Setup) {
        Command::Setup => commands::setup::run(),
        Command::Show => commands::show::run(),
    }
}
