use anyhow::Result;

use swiss_tournament::cli::{Cli, Command};
use swiss_tournament::{
    handle_completions, handle_count, handle_create_tournament, handle_delete_matches,
    handle_delete_players, handle_init, handle_pairings, handle_register, handle_report,
    handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let database = cli.database.as_deref();
    match &cli.command {
        Command::Init { reset } => handle_init(database, *reset),
        Command::CreateTournament { name } => handle_create_tournament(database, name),
        Command::Register { name } => handle_register(database, name),
        Command::Count => handle_count(database),
        Command::Report { winner, loser, draw } => handle_report(database, *winner, *loser, *draw),
        Command::Standings { json } => handle_standings(database, *json),
        Command::Pairings { seed, record_bye, json } => {
            handle_pairings(database, *seed, *record_bye, *json)
        }
        Command::DeleteMatches => handle_delete_matches(database),
        Command::DeletePlayers => handle_delete_players(database),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
