//! CLI module for the URL reputation service

pub mod serve;

use clap::{Parser, Subcommand};

/// URL reputation service - answers whether a URL is known to be malicious
#[derive(Parser)]
#[command(name = "url-reputation")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the lookup API server
    Serve,
}
