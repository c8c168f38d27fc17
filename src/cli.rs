//! Command-line interface for strictly_duel.

use clap::{Parser, Subcommand};

/// Strictly Duel - turn-synchronized two-player board games over a relay room
#[derive(Parser, Debug)]
#[command(name = "strictly_duel")]
#[command(about = "Two-player board games kept in sync over a relay room", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults apply if it is missing)
    #[arg(short, long, global = true, default_value = "strictly_duel.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the registered games
    Games,

    /// Print the room name for a game and title
    RoomName {
        /// Game id used as the room tag
        #[arg(short, long)]
        game: String,

        /// Human-readable title
        #[arg(short, long)]
        title: String,
    },

    /// Split a room name into game id and title
    ParseRoom {
        /// Full room name
        name: String,
    },

    /// Play a game between a host and a guest on an in-memory relay
    Simulate {
        /// Game id to play
        #[arg(short, long)]
        game: String,

        /// Scripted moves, applied by whichever side is to move
        /// (e.g. "1 1" or "top 0 0"). Without moves, both sides autoplay.
        #[arg(short, long, num_args = 1..)]
        moves: Vec<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
