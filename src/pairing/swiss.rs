use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use super::bye::select_bye;
use crate::domain::{Pairing, PlayerId, RoundPairings, StandingRow};
use crate::errors::TournamentError;

/// Computes the next round from ranked standings.
///
/// With an odd field one never-byed player is drawn at random and sits the
/// round out; the rest are paired with their neighbour in the standings,
/// (0, 1), (2, 3), ... The recipient is returned in `bye` and is never part of
/// `pairings`. Recording the bye match is left to the caller.
pub fn generate_pairings<R: Rng + ?Sized>(
    standings: &[StandingRow],
    bye_history: &HashSet<PlayerId>,
    rng: &mut R,
) -> Result<RoundPairings, TournamentError> {
    if standings.is_empty() {
        return Err(TournamentError::EmptyStandings);
    }

    let bye = if standings.len() % 2 == 1 {
        Some(select_bye(standings, bye_history, rng)?)
    } else {
        None
    };

    let remaining: Vec<&StandingRow> = standings
        .iter()
        .filter(|row| Some(row.player_id) != bye)
        .collect();

    if remaining.len() % 2 != 0 {
        return Err(TournamentError::OddAfterByeRemoval {
            remaining: remaining.len(),
        });
    }

    let pairings = pair_adjacent(&remaining);
    if let Some(player) = bye {
        info!("Player {} receives a bye", player);
    }
    info!("Generated {} pairings", pairings.len());

    Ok(RoundPairings { pairings, bye })
}

fn pair_adjacent(rows: &[&StandingRow]) -> Vec<Pairing> {
    rows.chunks_exact(2)
        .map(|pair| {
            let (first, second) = (pair[0], pair[1]);
            debug!("Pairing {} with {}", first.player_id, second.player_id);
            Pairing {
                player1_id: first.player_id,
                player1_name: first.name.clone(),
                player2_id: second.player_id,
                player2_name: second.name.clone(),
            }
        })
        .collect()
}
