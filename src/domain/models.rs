use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type PlayerId = i32;
pub type TournamentId = i32;

/// Registered competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a single round for one or two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Match {
    /// Two players met. When `draw` is set, winner and loser are arbitrary.
    Decisive {
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    },
    /// Free win for a player left without an opponent
    Bye { winner: PlayerId },
}

impl Match {
    pub fn decisive(winner: PlayerId, loser: PlayerId) -> Self {
        Match::Decisive {
            winner,
            loser,
            draw: false,
        }
    }

    pub fn draw(first: PlayerId, second: PlayerId) -> Self {
        Match::Decisive {
            winner: first,
            loser: second,
            draw: true,
        }
    }

    pub fn bye(winner: PlayerId) -> Self {
        Match::Bye { winner }
    }

    pub fn winner(&self) -> PlayerId {
        match *self {
            Match::Decisive { winner, .. } | Match::Bye { winner } => winner,
        }
    }

    pub fn loser(&self) -> Option<PlayerId> {
        match *self {
            Match::Decisive { loser, .. } => Some(loser),
            Match::Bye { .. } => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Match::Decisive { draw: true, .. })
    }

    /// Player credited with a win, if any
    pub fn credited_winner(&self) -> Option<PlayerId> {
        if self.is_draw() {
            None
        } else {
            Some(self.winner())
        }
    }
}

/// A match as recorded for a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i32,
    pub tournament_id: TournamentId,
    pub outcome: Match,
    pub created_at: Option<NaiveDateTime>,
}

/// Public standings row. OMW only drives the ordering and is left out here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
}

/// Standings row together with its tie-break score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
    pub omw: u32,
}

impl From<RankedStanding> for StandingRow {
    fn from(ranked: RankedStanding) -> Self {
        Self {
            player_id: ranked.player_id,
            name: ranked.name,
            wins: ranked.wins,
            matches: ranked.matches,
        }
    }
}

/// Two players meeting in the next round, higher-ranked first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,
}

/// Next round: the pairings plus the player sitting out, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoundPairings {
    pub pairings: Vec<Pairing>,
    pub bye: Option<PlayerId>,
}
