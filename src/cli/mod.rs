//! CLI module for devops-blue

pub mod serve;

use clap::{Parser, Subcommand};

/// DevOps demo service that chains calls to its yellow and white peers
#[derive(Parser)]
#[command(name = "devops-blue")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
