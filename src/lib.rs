pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod pairing;
pub mod report;
pub mod services;
pub mod standings;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::services::TournamentService;

pub fn interpret() -> Cli {
    Cli::parse()
}

fn open_service(database: Option<&str>) -> Result<TournamentService> {
    let config = AppConfig::with_database_path(database);
    info!("Using database {}", config.database.path);
    TournamentService::open(config)
}

pub fn handle_init(database: Option<&str>, reset: bool) -> Result<()> {
    let service = open_service(database)?;
    if reset {
        service.reset()?;
    }
    println!("Database ready");
    Ok(())
}

pub fn handle_create_tournament(database: Option<&str>, name: &str) -> Result<()> {
    let tournament = open_service(database)?.create_tournament(name)?;
    println!("Created tournament {} ({})", tournament.name, tournament.id);
    Ok(())
}

pub fn handle_register(database: Option<&str>, name: &str) -> Result<()> {
    let player = open_service(database)?.register_player(name)?;
    println!("Registered {} with id {}", player.name, player.id);
    Ok(())
}

pub fn handle_count(database: Option<&str>) -> Result<()> {
    println!("{}", open_service(database)?.count_players()?);
    Ok(())
}

pub fn handle_report(database: Option<&str>, winner: i32, loser: Option<i32>, draw: bool) -> Result<()> {
    let record = open_service(database)?.report_match(winner, loser, draw)?;
    println!("Recorded match {}", record.id);
    Ok(())
}

pub fn handle_standings(database: Option<&str>, json: bool) -> Result<()> {
    let standings = open_service(database)?.player_standings()?;
    if json {
        println!("{}", report::to_json(&standings)?);
    } else {
        print!("{}", report::standings_table(&standings));
    }
    Ok(())
}

pub fn handle_pairings(database: Option<&str>, seed: Option<u64>, record_bye: bool, json: bool) -> Result<()> {
    let service = open_service(database)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let round = service.next_round(&mut rng, record_bye)?;

    if json {
        println!("{}", report::to_json(&round)?);
    } else {
        print!("{}", report::pairings_table(&round));
    }
    Ok(())
}

pub fn handle_delete_matches(database: Option<&str>) -> Result<()> {
    let deleted = open_service(database)?.delete_matches()?;
    println!("Deleted {} matches", deleted);
    Ok(())
}

pub fn handle_delete_players(database: Option<&str>) -> Result<()> {
    let deleted = open_service(database)?.delete_players()?;
    println!("Deleted {} players", deleted);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
