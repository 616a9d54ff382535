use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "boxdock",
    version,
    about = "Configure the Boxdock desktop wrapper for a Homebox instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive setup wizard (default)
    Setup,
    /// Print the current configuration
    Show,
}
