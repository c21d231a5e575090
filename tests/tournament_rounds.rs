use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use swiss_tournament::config::AppConfig;
use swiss_tournament::database::create_memory_pool;
use swiss_tournament::domain::RoundPairings;
use swiss_tournament::errors::TournamentError;
use swiss_tournament::services::TournamentService;

fn service_with_players(names: &[&str]) -> (TournamentService, Vec<i32>) {
    let pool = create_memory_pool().unwrap();
    let service = TournamentService::new(pool, AppConfig::default());
    service.reset().unwrap();
    let ids = names
        .iter()
        .map(|name| service.register_player(name).unwrap().id)
        .collect();
    (service, ids)
}

/// Higher-ranked player of every pairing wins; the bye is recorded
fn play_round(service: &TournamentService, round: &RoundPairings) {
    for pairing in &round.pairings {
        service
            .report_match(pairing.player1_id, Some(pairing.player2_id), false)
            .unwrap();
    }
    if let Some(player) = round.bye {
        service.record_bye(player).unwrap();
    }
}

#[test]
fn eight_players_three_rounds() {
    let names = ["Ann", "Bob", "Cid", "Di", "Eve", "Fay", "Gus", "Hal"];
    let (service, ids) = service_with_players(&names);
    let mut rng = StdRng::seed_from_u64(42);

    for round_no in 1..=3 {
        let round = service.swiss_pairings(&mut rng).unwrap();
        assert_eq!(round.bye, None);
        assert_eq!(round.pairings.len(), 4);

        let seen: HashSet<_> = round
            .pairings
            .iter()
            .flat_map(|p| [p.player1_id, p.player2_id])
            .collect();
        assert_eq!(seen.len(), 8, "round {} covers everyone once", round_no);

        play_round(&service, &round);
    }

    let standings = service.player_standings().unwrap();
    assert_eq!(standings.len(), ids.len());
    assert!(standings.iter().all(|row| row.matches == 3));
    assert_eq!(standings.iter().map(|row| row.wins).sum::<u32>(), 12);
    // Exactly one player can go undefeated through three rounds
    assert_eq!(standings[0].wins, 3);
    assert_eq!(standings[1].wins, 2);
    assert_eq!(standings[7].wins, 0);
}

#[test]
fn five_players_each_get_one_bye() {
    let (service, ids) = service_with_players(&["Ann", "Bob", "Cid", "Di", "Eve"]);
    let mut rng = StdRng::seed_from_u64(7);
    let mut byes = Vec::new();

    for _ in 0..5 {
        let round = service.swiss_pairings(&mut rng).unwrap();
        assert_eq!(round.pairings.len(), 2);
        let bye = round.bye.unwrap();
        assert!(!byes.contains(&bye));
        byes.push(bye);
        play_round(&service, &round);
    }

    byes.sort_unstable();
    assert_eq!(byes, ids);

    let err = service.swiss_pairings(&mut rng).unwrap_err();
    assert_eq!(
        err.downcast::<TournamentError>().unwrap(),
        TournamentError::NoEligibleByeCandidate { players: 5 }
    );

    let standings = service.player_standings().unwrap();
    assert!(standings.iter().all(|row| row.matches == 5));
}

#[test]
fn seeded_pairings_are_reproducible() {
    let (first, _) = service_with_players(&["Ann", "Bob", "Cid", "Di", "Eve", "Fay", "Gus"]);
    let (second, _) = service_with_players(&["Ann", "Bob", "Cid", "Di", "Eve", "Fay", "Gus"]);

    let a = first.swiss_pairings(&mut StdRng::seed_from_u64(99)).unwrap();
    let b = second.swiss_pairings(&mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

fn temp_database(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("swiss_{}_{}.db", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn open_shared(path: &Path) -> TournamentService {
    TournamentService::open(AppConfig::with_database_path(path.to_str())).unwrap()
}

fn bye_count(service: &TournamentService) -> u32 {
    service.player_standings().unwrap().iter().map(|row| row.matches).sum()
}

#[test]
fn two_services_never_repeat_a_bye() {
    let path = temp_database("sequential");
    let first = open_shared(&path);
    for name in ["Ann", "Bob", "Cid", "Di", "Eve"] {
        first.register_player(name).unwrap();
    }
    let second = open_shared(&path);

    let a = first.next_round(&mut StdRng::seed_from_u64(1), true).unwrap();
    let b = second.next_round(&mut StdRng::seed_from_u64(1), true).unwrap();

    assert_ne!(a.bye.unwrap(), b.bye.unwrap());
    assert_eq!(bye_count(&first), 2);
    assert!(first.player_standings().unwrap().iter().all(|row| row.matches <= 1));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn concurrent_rounds_never_repeat_a_bye() {
    let path = temp_database("concurrent");
    let setup = open_shared(&path);
    for name in ["Ann", "Bob", "Cid", "Di", "Eve"] {
        setup.register_player(name).unwrap();
    }
    let services = [open_shared(&path), open_shared(&path), open_shared(&path)];

    let byes: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = services
            .iter()
            .map(|service| {
                scope.spawn(move || {
                    service
                        .next_round(&mut StdRng::seed_from_u64(1), true)
                        .unwrap()
                        .bye
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let distinct: HashSet<_> = byes.iter().collect();
    assert_eq!(distinct.len(), 3);
    assert_eq!(bye_count(&setup), 3);
    assert!(setup.player_standings().unwrap().iter().all(|row| row.matches <= 1));

    let _ = std::fs::remove_file(&path);
}
