use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "swiss", author, version, about = "Swiss-system tournament standings and pairings")]
pub struct Cli {
    /// SQLite database file (defaults to $DATABASE_PATH or swiss_tournament.db)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Create the database schema
    Init {
        /// Drop all existing data first
        #[arg(long)]
        reset: bool,
    },
    /// Start a new tournament; it becomes the current one
    CreateTournament { name: String },
    /// Register a player in the current tournament
    Register { name: String },
    /// Number of players in the current tournament
    Count,
    /// Record a match result; without a loser the winner gets a bye
    Report {
        winner: i32,
        #[arg(short, long)]
        loser: Option<i32>,
        /// The match was drawn (winner and loser are arbitrary)
        #[arg(long, requires = "loser")]
        draw: bool,
    },
    /// Show the current standings
    Standings {
        #[arg(long)]
        json: bool,
    },
    /// Compute pairings for the next round
    Pairings {
        /// Seed for the bye draw
        #[arg(long)]
        seed: Option<u64>,
        /// Store the bye match for the selected player
        #[arg(long)]
        record_bye: bool,
        #[arg(long)]
        json: bool,
    },
    /// Remove all match records
    DeleteMatches,
    /// Remove all player records
    DeletePlayers,
    /// Print shell completions
    Completions { shell: Shell },
}
