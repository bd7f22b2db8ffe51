//! CLI entry point for budgetville
//!
//! Plays a single NPC interaction from a town file in the terminal, or lints
//! the town's scripts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "budgetville", about = "Budgetville cutscene engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Talk to one NPC of a town file
    Play {
        /// Town JSON file
        town: PathBuf,
        /// NPC to talk to
        #[arg(long)]
        npc: String,
        /// Engine config JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Persistent flag file (in-memory when omitted)
        #[arg(long)]
        flags: Option<PathBuf>,
        /// Directory for progress saves
        #[arg(long)]
        save_dir: Option<PathBuf>,
        /// Show interpreter state after each step
        #[arg(long)]
        debug: bool,
    },
    /// Check a town file's scripts
    Lint {
        /// Town JSON file
        town: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play {
            town,
            npc,
            config,
            flags,
            save_dir,
            debug,
        } => budgetville::cli::play::run_play(&budgetville::cli::play::PlayOptions {
            town,
            npc,
            config,
            flags,
            save_dir,
            debug,
        }),
        Command::Lint { town } => match budgetville::cli::run_lint(&town) {
            Ok(false) => Ok(()),
            Ok(true) => process::exit(1),
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
