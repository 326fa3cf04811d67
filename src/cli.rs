use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "bubblescan")]
#[command(about = "Token holder concentration lookup", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a token: `lookup [chain] <address>` (chain defaults to eth)
    Lookup {
        /// Free-text arguments, same shape as the chat command
        args: Vec<String>,

        /// User id used for rate limiting
        #[arg(long, default_value_t = 0)]
        user: u64,

        /// Where to write the captured bubble-map screenshot
        #[arg(short, long, default_value = "bubblemap.jpg")]
        output: PathBuf,
    },
    /// List supported chains
    Chains,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup { args, user, output } => {
            commands::lookup::run(&args.join(" "), user, output).await;
        }
        Commands::Chains => {
            commands::chains::run();
        }
    }
}
