use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use super::models::DbPlayer;
use crate::errors::{query_context, tournament_context};

pub fn insert_player(conn: &Connection, name: &str) -> Result<DbPlayer> {
    let sql = "INSERT INTO players (name) VALUES (?1) RETURNING id, name, created_at";

    conn.query_row(sql, params![name], parse_player_row)
        .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<DbPlayer> {
    Ok(DbPlayer {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn register_in_tournament(conn: &Connection, tournament_id: i32, player_id: i32) -> Result<()> {
    let sql = "INSERT INTO tournament_players (tournament_id, player_id) VALUES (?1, ?2)";

    conn.execute(sql, params![tournament_id, player_id])
        .with_context(|| tournament_context("register player", tournament_id))
        .map(|_| ())
}

/// Roster of a tournament, ordered by player id
pub fn list_by_tournament(conn: &Connection, tournament_id: i32) -> Result<Vec<DbPlayer>> {
    let sql = "SELECT p.id, p.name, p.created_at FROM players p JOIN tournament_players tp ON tp.player_id = p.id WHERE tp.tournament_id = ?1 ORDER BY p.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| tournament_context("load roster", tournament_id))?;

    Ok(rows)
}

pub fn count_by_tournament(conn: &Connection, tournament_id: i32) -> Result<i64> {
    let sql = "SELECT COUNT(*) FROM tournament_players WHERE tournament_id = ?1";

    conn.query_row(sql, params![tournament_id], |row| row.get(0))
        .with_context(|| tournament_context("count players", tournament_id))
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM players", [])
        .with_context(|| query_context("delete", "players"))
}
