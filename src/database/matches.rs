use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use super::models::MatchRow;
use crate::domain::{Match, MatchRecord, PlayerId};
use crate::errors::{query_context, tournament_context};

pub fn insert_match(conn: &Connection, tournament_id: i32, outcome: &Match) -> Result<MatchRecord> {
    let sql = "INSERT INTO matches (tournament_id, winner_id, loser_id, is_draw) VALUES (?1, ?2, ?3, ?4) RETURNING id, tournament_id, winner_id, loser_id, is_draw, created_at";

    let row = conn
        .query_row(
            sql,
            params![tournament_id, outcome.winner(), outcome.loser(), outcome.is_draw()],
            parse_match_row,
        )
        .context("Failed to insert match")?;

    Ok(row.into_record()?)
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        winner_id: row.get(2)?,
        loser_id: row.get(3)?,
        is_draw: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Match history of a tournament in recording order
pub fn list_by_tournament(conn: &Connection, tournament_id: i32) -> Result<Vec<MatchRecord>> {
    let sql = "SELECT id, tournament_id, winner_id, loser_id, is_draw, created_at FROM matches WHERE tournament_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| tournament_context("load matches", tournament_id))?;

    let records = rows
        .into_iter()
        .map(MatchRow::into_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Players who already received a bye in the tournament
pub fn list_bye_recipients(conn: &Connection, tournament_id: i32) -> Result<HashSet<PlayerId>> {
    let sql = "SELECT DISTINCT winner_id FROM matches WHERE tournament_id = ?1 AND loser_id IS NULL";

    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params![tournament_id], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<PlayerId>>>()
        .with_context(|| tournament_context("load bye history", tournament_id))?;

    Ok(ids)
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM matches", [])
        .with_context(|| query_context("delete", "matches"))
}
