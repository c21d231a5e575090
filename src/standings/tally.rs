use log::debug;

use super::types::{Tally, TallyMap};
use crate::domain::{Match, MatchRecord, Player, PlayerId, TournamentId};
use crate::errors::TournamentError;

/// Walks the match history once and aggregates wins, appearances and
/// opponents for every roster member.
pub fn build_tallies(
    roster: &[Player],
    matches: &[MatchRecord],
    tournament_id: TournamentId,
) -> Result<TallyMap, TournamentError> {
    let mut tallies: TallyMap = roster
        .iter()
        .map(|player| (player.id, Tally::default()))
        .collect();

    for record in matches {
        if record.tournament_id != tournament_id {
            debug!(
                "Skipping match {} from tournament {}",
                record.id, record.tournament_id
            );
            continue;
        }
        apply_match(&mut tallies, &record.outcome)?;
    }

    Ok(tallies)
}

fn apply_match(tallies: &mut TallyMap, outcome: &Match) -> Result<(), TournamentError> {
    match *outcome {
        Match::Decisive { winner, loser, .. } => {
            if winner == loser {
                return Err(TournamentError::SelfMatch(winner));
            }
            tally_mut(tallies, winner)?.record_appearance(Some(loser));
            tally_mut(tallies, loser)?.record_appearance(Some(winner));
        }
        Match::Bye { winner } => {
            tally_mut(tallies, winner)?.record_appearance(None);
        }
    }

    if let Some(winner) = outcome.credited_winner() {
        tally_mut(tallies, winner)?.record_win();
    }
    Ok(())
}

fn tally_mut(tallies: &mut TallyMap, player_id: PlayerId) -> Result<&mut Tally, TournamentError> {
    tallies
        .get_mut(&player_id)
        .ok_or(TournamentError::UnknownPlayer(player_id))
}
