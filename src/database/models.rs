use chrono::NaiveDateTime;

use crate::domain::{Match, MatchRecord, Player, PlayerId, TournamentId};
use crate::errors::TournamentError;

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct DbPlayer {
    pub id: PlayerId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbPlayer> for Player {
    fn from(row: DbPlayer) -> Self {
        Player::new(row.id, row.name)
    }
}

/// Raw `matches` row; a NULL loser marks a bye
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i32,
    pub tournament_id: TournamentId,
    pub winner_id: PlayerId,
    pub loser_id: Option<PlayerId>,
    pub is_draw: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl MatchRow {
    pub fn into_record(self) -> Result<MatchRecord, TournamentError> {
        let outcome = match self.loser_id {
            Some(loser) => Match::Decisive {
                winner: self.winner_id,
                loser,
                draw: self.is_draw,
            },
            None if self.is_draw => return Err(TournamentError::DrawnBye(self.winner_id)),
            None => Match::Bye {
                winner: self.winner_id,
            },
        };

        Ok(MatchRecord {
            id: self.id,
            tournament_id: self.tournament_id,
            outcome,
            created_at: self.created_at,
        })
    }
}
