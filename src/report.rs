use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::domain::{RoundPairings, StandingRow};

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

pub fn standings_table(rows: &[StandingRow]) -> String {
    let mut report = String::new();
    let header = format!("{:>4} {:>6} {:<24} {:>5} {:>7}", "Rank", "Id", "Player", "Wins", "Matches");
    report.push_str(&format!("{}\n", header.bold()));
    report.push_str(&"-".repeat(50));
    report.push('\n');

    for (idx, row) in rows.iter().enumerate() {
        report.push_str(&format!(
            "{:>4} {:>6} {:<24} {:>5} {:>7}\n",
            idx + 1,
            row.player_id,
            row.name,
            row.wins,
            row.matches
        ));
    }

    report
}

pub fn pairings_table(round: &RoundPairings) -> String {
    let mut report = String::new();
    let header = format!("{:>5} {:<30} {:<30}", "Board", "Player 1", "Player 2");
    report.push_str(&format!("{}\n", header.bold()));
    report.push_str(&"-".repeat(67));
    report.push('\n');

    for (idx, pairing) in round.pairings.iter().enumerate() {
        report.push_str(&format!(
            "{:>5} {:<30} {:<30}\n",
            idx + 1,
            format!("{} ({})", pairing.player1_name, pairing.player1_id),
            format!("{} ({})", pairing.player2_name, pairing.player2_id),
        ));
    }

    if let Some(player) = round.bye {
        let line = format!("Bye: player {}", player);
        report.push_str(&format!("{}\n", line.yellow()));
    }

    report
}
