use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool};
use crate::domain::{Match, MatchRecord, Player, PlayerId, RoundPairings, StandingRow, TournamentId};
use crate::errors::TournamentError;
use crate::pairing;
use crate::standings;

/// Runs the tournament operations against storage.
///
/// Every operation runs in its own transaction. Writers take the database
/// lock up front (`BEGIN IMMEDIATE`), so a read-then-write sequence such as
/// computing a round and storing its bye cannot interleave with another writer.
pub struct TournamentService {
    pool: DbPool,
    config: AppConfig,
}

impl TournamentService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    /// Opens the configured database, creating the schema if needed
    pub fn open(config: AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database.path)?;
        let conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&conn)?;
        drop(conn);
        Ok(Self::new(pool, config))
    }

    fn connection(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }

    fn in_transaction<T>(
        &self,
        behavior: TransactionBehavior,
        work: impl FnOnce(&Transaction) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction_with_behavior(behavior)
            .context("Failed to begin transaction")?;
        let value = work(&tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }

    fn read<T>(&self, work: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        self.in_transaction(TransactionBehavior::Deferred, work)
    }

    fn write<T>(&self, work: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        self.in_transaction(TransactionBehavior::Immediate, work)
    }

    pub fn reset(&self) -> Result<()> {
        let conn = self.connection()?;
        database::setup::reset_database(&conn)
    }

    pub fn create_tournament(&self, name: &str) -> Result<database::Tournament> {
        let tournament = self.write(|tx| database::tournaments::create_tournament(tx, name))?;
        info!("Created tournament {} ({})", tournament.name, tournament.id);
        Ok(tournament)
    }

    pub fn current_tournament(&self) -> Result<Option<database::Tournament>> {
        self.read(|tx| database::tournaments::current_tournament(tx))
    }

    /// Registers a player in the current tournament, creating the default
    /// tournament first when none exists.
    pub fn register_player(&self, name: &str) -> Result<Player> {
        self.write(|tx| {
            if database::tournaments::count_tournaments(tx)? == 0 {
                let default_name = &self.config.tournament.default_name;
                info!("No tournament yet, creating '{}'", default_name);
                database::tournaments::create_tournament(tx, default_name)?;
            }
            let tournament_id = require_tournament(tx)?;

            let player = database::players::insert_player(tx, name)?;
            database::players::register_in_tournament(tx, tournament_id, player.id)?;
            info!("Registered {} as player {} in tournament {}", player.name, player.id, tournament_id);
            Ok(player.into())
        })
    }

    /// Players registered in the current tournament
    pub fn count_players(&self) -> Result<i64> {
        self.read(|tx| match current_tournament_id(tx)? {
            Some(id) => database::players::count_by_tournament(tx, id),
            None => Ok(0),
        })
    }

    /// Records a result in the current tournament. A missing `loser` records a bye.
    pub fn report_match(&self, winner: PlayerId, loser: Option<PlayerId>, draw: bool) -> Result<MatchRecord> {
        let outcome = match loser {
            Some(loser) if loser == winner => return Err(TournamentError::SelfMatch(winner).into()),
            Some(loser) => Match::Decisive { winner, loser, draw },
            None if draw => return Err(TournamentError::DrawnBye(winner).into()),
            None => Match::Bye { winner },
        };

        self.write(|tx| {
            let tournament_id = require_tournament(tx)?;
            let roster = load_roster(tx, tournament_id)?;
            for player in std::iter::once(winner).chain(loser) {
                if !roster.iter().any(|p| p.id == player) {
                    return Err(TournamentError::UnknownPlayer(player).into());
                }
            }
            store_match(tx, tournament_id, &outcome)
        })
    }

    /// Records a bye outside of [`TournamentService::next_round`]
    pub fn record_bye(&self, player: PlayerId) -> Result<MatchRecord> {
        self.report_match(player, None, false)
    }

    pub fn delete_matches(&self) -> Result<usize> {
        let deleted = self.write(|tx| database::matches::delete_all(tx))?;
        info!("Deleted {} matches", deleted);
        Ok(deleted)
    }

    pub fn delete_players(&self) -> Result<usize> {
        let deleted = self.write(|tx| database::players::delete_all(tx))?;
        info!("Deleted {} players", deleted);
        Ok(deleted)
    }

    /// Ranked standings of the current tournament
    pub fn player_standings(&self) -> Result<Vec<StandingRow>> {
        self.read(|tx| standings_in(tx))
    }

    /// Pairings for the next round of the current tournament, without
    /// storing anything.
    pub fn swiss_pairings<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RoundPairings> {
        self.read(|tx| pairings_in(tx, rng))
    }

    /// Computes the next round and, when `record_bye` is set, stores the bye
    /// match for its recipient.
    ///
    /// Roster, match history and bye history are read and the bye is written
    /// inside one immediate transaction, so two concurrent callers can never
    /// both hand the same player a bye.
    pub fn next_round<R: Rng + ?Sized>(&self, rng: &mut R, record_bye: bool) -> Result<RoundPairings> {
        self.write(|tx| {
            let round = pairings_in(tx, rng)?;
            if let (true, Some(player)) = (record_bye, round.bye) {
                let tournament_id = require_tournament(tx)?;
                store_match(tx, tournament_id, &Match::bye(player))?;
            }
            Ok(round)
        })
    }
}

fn current_tournament_id(conn: &Connection) -> Result<Option<TournamentId>> {
    Ok(database::tournaments::current_tournament(conn)?.map(|t| t.id))
}

fn require_tournament(conn: &Connection) -> Result<TournamentId> {
    Ok(current_tournament_id(conn)?.ok_or(TournamentError::NoActiveTournament)?)
}

fn load_roster(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Player>> {
    let rows = database::players::list_by_tournament(conn, tournament_id)?;
    Ok(rows.into_iter().map(Player::from).collect())
}

fn store_match(conn: &Connection, tournament_id: TournamentId, outcome: &Match) -> Result<MatchRecord> {
    let record = database::matches::insert_match(conn, tournament_id, outcome)?;
    info!("Recorded match {} in tournament {}: {:?}", record.id, tournament_id, outcome);
    Ok(record)
}

fn standings_in(conn: &Connection) -> Result<Vec<StandingRow>> {
    let tournament_id = current_tournament_id(conn)?;
    let (roster, history) = match tournament_id {
        Some(id) => (
            load_roster(conn, id)?,
            database::matches::list_by_tournament(conn, id)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    Ok(standings::compute_standings(&roster, &history, tournament_id)?)
}

fn pairings_in<R: Rng + ?Sized>(conn: &Connection, rng: &mut R) -> Result<RoundPairings> {
    let standings = standings_in(conn)?;
    let tournament_id = require_tournament(conn)?;
    let bye_history = database::matches::list_bye_recipients(conn, tournament_id)?;

    match pairing::generate_pairings(&standings, &bye_history, rng) {
        Err(TournamentError::NoEligibleByeCandidate { players }) => {
            warn!("All {} players have already received a bye", players);
            Err(TournamentError::NoEligibleByeCandidate { players }.into())
        }
        other => Ok(other?),
    }
}
