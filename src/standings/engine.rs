use log::{debug, info};

use super::tally::build_tallies;
use super::types::TallyMap;
use crate::domain::{MatchRecord, Player, PlayerId, RankedStanding, StandingRow, TournamentId};
use crate::errors::TournamentError;

/// Ranks the roster by wins, then by opponent match wins (OMW).
///
/// Players still tied after both keys keep their roster order: the sort is
/// stable and the roster is not reshuffled, so repeated calls on the same
/// input always agree.
pub fn compute_ranking(
    roster: &[Player],
    matches: &[MatchRecord],
    tournament_id: Option<TournamentId>,
) -> Result<Vec<RankedStanding>, TournamentError> {
    let tournament_id = tournament_id.ok_or(TournamentError::NoActiveTournament)?;
    info!(
        "Computing standings for {} players over {} matches in tournament {}",
        roster.len(),
        matches.len(),
        tournament_id
    );

    // 1. Single pass over the history
    let tallies = build_tallies(roster, matches, tournament_id)?;

    // 2. Derive OMW from the in-memory aggregate
    let mut ranking = build_ranked_rows(roster, &tallies);

    // 3. Order by the precomputed keys
    ranking.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| b.omw.cmp(&a.omw)));

    debug!("Standings order: {:?}", ranking.iter().map(|r| r.player_id).collect::<Vec<_>>());
    Ok(ranking)
}

/// Public standings: the ranking without the tie-break column
pub fn compute_standings(
    roster: &[Player],
    matches: &[MatchRecord],
    tournament_id: Option<TournamentId>,
) -> Result<Vec<StandingRow>, TournamentError> {
    let ranking = compute_ranking(roster, matches, tournament_id)?;
    Ok(ranking.into_iter().map(StandingRow::from).collect())
}

fn build_ranked_rows(roster: &[Player], tallies: &TallyMap) -> Vec<RankedStanding> {
    roster
        .iter()
        .map(|player| {
            let tally = &tallies[&player.id];
            RankedStanding {
                player_id: player.id,
                name: player.name.clone(),
                wins: tally.wins,
                matches: tally.matches,
                omw: opponent_match_wins(&tally.opponents, tallies),
            }
        })
        .collect()
}

fn opponent_match_wins(opponents: &[PlayerId], tallies: &TallyMap) -> u32 {
    opponents
        .iter()
        .filter_map(|opponent| tallies.get(opponent))
        .map(|tally| tally.wins)
        .sum()
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::domain::Match;

    fn roster() -> Vec<Player> {
        vec![
            Player::new(1, "Ann"),
            Player::new(2, "Bob"),
            Player::new(3, "Cid"),
            Player::new(4, "Di"),
        ]
    }

    fn history(outcomes: &[Match]) -> Vec<MatchRecord> {
        outcomes
            .iter()
            .enumerate()
            .map(|(idx, &outcome)| MatchRecord {
                id: idx as i32 + 1,
                tournament_id: 1,
                outcome,
                created_at: None,
            })
            .collect()
    }

    fn by_player(ranking: &[RankedStanding]) -> HashMap<i32, (u32, u32, u32)> {
        ranking
            .iter()
            .map(|r| (r.player_id, (r.wins, r.matches, r.omw)))
            .collect()
    }

    #[test]
    fn test_no_matches_played() {
        let standings = compute_ranking(&roster(), &[], Some(1)).unwrap();

        assert_eq!(standings.len(), 4);
        assert!(standings.iter().all(|r| r.wins == 0 && r.matches == 0 && r.omw == 0));
        // Fully tied players keep roster order
        let ids: Vec<_> = standings.iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_first_round_results() {
        let matches = history(&[Match::decisive(1, 2), Match::decisive(3, 4)]);
        let ranking = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        let stats = by_player(&ranking);

        assert_eq!(stats[&1], (1, 1, 0));
        assert_eq!(stats[&2], (0, 1, 1));
        assert_eq!(stats[&3], (1, 1, 0));
        assert_eq!(stats[&4], (0, 1, 1));

        let top: HashSet<_> = ranking[..2].iter().map(|r| r.player_id).collect();
        let bottom: HashSet<_> = ranking[2..].iter().map(|r| r.player_id).collect();
        assert_eq!(top, HashSet::from([1, 3]));
        assert_eq!(bottom, HashSet::from([2, 4]));
    }

    #[test]
    fn test_omw_breaks_win_ties() {
        let matches = history(&[
            Match::decisive(1, 4),
            Match::decisive(3, 2),
            Match::decisive(2, 4),
        ]);
        let ranking = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        let stats = by_player(&ranking);

        assert_eq!(stats[&1], (1, 1, 0));
        assert_eq!(stats[&2], (1, 2, 1));
        assert_eq!(stats[&3], (1, 1, 1));
        assert_eq!(stats[&4], (0, 2, 2));

        let ids: Vec<_> = ranking.iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_full_ties_keep_roster_order() {
        let matches = history(&[
            Match::decisive(2, 1),
            Match::decisive(3, 4),
            Match::decisive(1, 4),
            Match::decisive(2, 3),
        ]);
        let ranking = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        let stats = by_player(&ranking);

        assert_eq!(stats[&1], (1, 2, 2));
        assert_eq!(stats[&3], (1, 2, 2));
        let ids: Vec<_> = ranking.iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_repeat_opponent_counted_per_meeting() {
        let matches = history(&[
            Match::decisive(1, 2),
            Match::decisive(1, 2),
            Match::decisive(3, 4),
        ]);
        let stats = by_player(&compute_ranking(&roster(), &matches, Some(1)).unwrap());

        assert_eq!(stats[&2], (0, 2, 4));
        assert_eq!(stats[&4], (0, 1, 1));
    }

    #[test]
    fn test_bye_and_draw_accounting() {
        let matches = history(&[Match::draw(1, 2), Match::bye(3), Match::decisive(4, 1)]);
        let ranking = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        let stats = by_player(&ranking);

        assert_eq!(stats[&1], (0, 2, 1));
        assert_eq!(stats[&2], (0, 1, 0));
        assert_eq!(stats[&3], (1, 1, 0));
        assert_eq!(stats[&4], (1, 1, 0));

        let total_wins: u32 = ranking.iter().map(|r| r.wins).sum();
        assert_eq!(total_wins, 2);
        assert!(ranking.iter().all(|r| r.matches >= r.wins));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let matches = history(&[Match::decisive(4, 3), Match::draw(1, 2)]);
        let first = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        let second = compute_ranking(&roster(), &matches, Some(1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_public_rows_match_ranking_order() {
        let matches = history(&[Match::decisive(4, 3)]);
        let standings = compute_standings(&roster(), &matches, Some(1)).unwrap();

        assert_eq!(standings[0].player_id, 4);
        assert_eq!(standings[0].name, "Di");
        assert_eq!(standings.len(), 4);
    }

    #[test]
    fn test_missing_tournament() {
        let result = compute_standings(&roster(), &[], None);
        assert_eq!(result, Err(TournamentError::NoActiveTournament));
    }
}
