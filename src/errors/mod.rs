use thiserror::Error;

use crate::domain::PlayerId;

/// Failures raised by the standings and pairing engines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// No tournament has been created yet
    #[error("No active tournament")]
    NoActiveTournament,

    #[error("Cannot pair an empty standings list")]
    EmptyStandings,

    #[error("Standings still odd after bye removal ({remaining} players)")]
    OddAfterByeRemoval { remaining: usize },

    /// Every player already received a bye
    #[error("No player eligible for a bye among {players} players")]
    NoEligibleByeCandidate { players: usize },

    #[error("Player {0} is not registered in the tournament")]
    UnknownPlayer(PlayerId),

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    #[error("Bye for player {0} cannot be a draw")]
    DrawnBye(PlayerId),
}

/// Add context to query errors
pub fn query_context(operation: &str, table: &str) -> String {
    format!("Failed to {} {}", operation, table)
}

/// Add context to tournament-scoped errors
pub fn tournament_context(operation: &str, tournament_id: i32) -> String {
    format!("Failed to {} for tournament {}", operation, tournament_id)
}
