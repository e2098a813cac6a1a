use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod extract;
mod process;
mod storage;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: CardsmithCommand,
}

#[derive(Parser)]
struct ExtractArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "cardsmith.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ProcessArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "cardsmith.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "cardsmith.yaml")]
    config_file: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum CardsmithCommand {
    /// Extract card blocks from the HTML template into markdown card documents
    Extract(ExtractArgs),

    /// Build JSON card documents and hashed images from the markdown cards
    Process(ProcessArgs),

    /// Delete the processor output directory
    Clean(CleanArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        CardsmithCommand::Extract(args) => {
            commands::extract::run(&args)?;
        }
        CardsmithCommand::Process(args) => {
            commands::process::run(&args)?;
        }
        CardsmithCommand::Clean(args) => {
            commands::clean::run(&args)?;
        }
    }

    Ok(())
}
