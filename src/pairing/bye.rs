use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{PlayerId, StandingRow};
use crate::errors::TournamentError;

/// Players in `standings` who have not had a bye yet, in rank order
pub fn eligible_for_bye(standings: &[StandingRow], bye_history: &HashSet<PlayerId>) -> Vec<PlayerId> {
    standings
        .iter()
        .map(|row| row.player_id)
        .filter(|id| !bye_history.contains(id))
        .collect()
}

/// Picks the bye recipient uniformly at random among eligible players.
///
/// Candidates are gathered in rank order before the draw, so a seeded `rng`
/// always yields the same recipient for the same standings.
pub fn select_bye<R: Rng + ?Sized>(
    standings: &[StandingRow],
    bye_history: &HashSet<PlayerId>,
    rng: &mut R,
) -> Result<PlayerId, TournamentError> {
    let candidates = eligible_for_bye(standings, bye_history);
    debug!("{} of {} players eligible for a bye", candidates.len(), standings.len());

    candidates
        .choose(rng)
        .copied()
        .ok_or(TournamentError::NoEligibleByeCandidate {
            players: standings.len(),
        })
}
