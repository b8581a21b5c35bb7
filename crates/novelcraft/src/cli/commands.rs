//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Novelcraft - co-write a staged novel with an LLM
#[derive(Parser, Debug)]
#[command(name = "novelcraft")]
#[command(about = "Co-write a staged novel with an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file merged over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story setting card and print it as JSON
    Setting {
        /// Free-text story idea
        #[arg(long)]
        prompt: String,
    },

    /// Generate a prologue from a setting JSON file
    Prologue {
        /// Path to a setting JSON file (as printed by `setting`)
        #[arg(long)]
        setting: PathBuf,
    },

    /// Generate one chapter with fresh memory and print it as JSON
    Chapter {
        /// Zero-based chapter number
        #[arg(long)]
        chapter: usize,

        /// Story prompt for the chapter
        #[arg(long)]
        prompt: String,
    },

    /// Write a whole story, following one recommendation each turn
    Write {
        /// Free-text story idea
        #[arg(long)]
        prompt: String,

        /// Number of chapters to write
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(1..=9))]
        chapters: u8,

        /// Which recommendation to follow each turn
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
        pick: u8,
    },
}
