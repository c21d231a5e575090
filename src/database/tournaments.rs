use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::Tournament;

pub fn create_tournament(conn: &Connection, name: &str) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (name) VALUES (?1) RETURNING id, name, created_at";

    conn.query_row(sql, params![name], parse_tournament_row)
        .context("Failed to insert new tournament")
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// The most recently created tournament
pub fn current_tournament(conn: &Connection) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments ORDER BY id DESC LIMIT 1";

    conn.query_row(sql, [], parse_tournament_row)
        .optional()
        .context("Failed to query current tournament")
}

pub fn count_tournaments(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM tournaments", [], |row| row.get(0))
        .context("Failed to count tournaments")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::reset_database;
    use crate::database::{create_memory_pool, get_connection};

    #[test]
    fn test_current_is_latest() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        reset_database(&conn).unwrap();

        assert!(current_tournament(&conn).unwrap().is_none());

        create_tournament(&conn, "Spring").unwrap();
        let autumn = create_tournament(&conn, "Autumn").unwrap();

        let current = current_tournament(&conn).unwrap().unwrap();
        assert_eq!(current.id, autumn.id);
        assert_eq!(current.name, "Autumn");
        assert_eq!(count_tournaments(&conn).unwrap(), 2);
    }
}
