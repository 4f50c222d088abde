//! End-to-end scouting runs.
//!
//! Feeds a small round of fixtures through `Scout` with the mock roster
//! source and checks the rankings, partial-failure handling, manual
//! outcomes and the written report.

use std::sync::Arc;

use scoutbot::config::{AppConfig, AppMode};
use scoutbot::engine::game_sorter::MANUAL_BOOKMAKER;
use scoutbot::engine::squad::SquadEntry;
use scoutbot::engine::{Scout, ScoutReport};
use scoutbot::storage;
use scoutbot::types::*;

use crate::mock_roster::MockRoster;

fn team(id: u32) -> Team {
    let names = [
        "", "Paris", "Lorient", "Lens", "Brest", "Nice", "Toulouse", "Rennes", "Nantes", "Monaco",
        "Lyon",
    ];
    Team::new(id, names[id as usize])
}

fn make_fixture(
    id: u64,
    home: u32,
    away: u32,
    winner: Option<(&str, &str, &str)>,
    scores: &[(&str, &str)],
) -> Fixture {
    let odds = winner.map(|(h, d, a)| Bookmaker {
        name: "Bet365".into(),
        bets: vec![
            BetMarket {
                label: MATCH_WINNER_MARKET.into(),
                values: vec![
                    BetValue::new("Home", h),
                    BetValue::new("Draw", d),
                    BetValue::new("Away", a),
                ],
            },
            BetMarket {
                label: EXACT_SCORE_MARKET.into(),
                values: scores.iter().map(|(s, o)| BetValue::new(*s, *o)).collect(),
            },
        ],
    });
    Fixture {
        id,
        round: "Regular Season - 14".into(),
        event_date: None,
        home_team: team(home),
        away_team: team(away),
        odds,
        prediction: None,
    }
}

/// Four priced games and one without odds.
fn make_round() -> Vec<Fixture> {
    vec![
        // gap 4.75, home win
        make_fixture(1, 1, 2, Some(("1.25", "6.0", "11.0")), &[("2:0", "5.5"), ("1:0", "6.0"), ("3:0", "7.0"), ("2:1", "8.0")]),
        // gap 1.8, away win
        make_fixture(2, 3, 4, Some(("4.2", "3.6", "1.8")), &[("0:1", "6.5"), ("0:2", "7.0"), ("1:2", "9.0"), ("1:1", "9.5")]),
        // gap 0.6, home or draw
        make_fixture(3, 5, 6, Some(("2.4", "3.1", "3.0")), &[("1:1", "5.5"), ("1:0", "6.5"), ("0:0", "7.5")]),
        // gap 1.5, home win
        make_fixture(4, 7, 8, Some(("1.9", "3.4", "4.0")), &[("1:0", "6.0"), ("2:1", "7.5"), ("1:1", "8.0")]),
        make_fixture(5, 9, 10, None, &[]),
    ]
}

fn make_source() -> MockRoster {
    (1..=10).fold(MockRoster::new(), |source, id| source.with_club(&team(id)))
}

fn make_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    // Four teams queried
    cfg.players.desired_players = 8;
    cfg
}

fn run(cfg: &AppConfig, source: Arc<MockRoster>, squad: &[SquadEntry]) -> ScoutReport {
    let scout = Scout::from_config(cfg, source).unwrap();
    tokio_test::block_on(scout.run(make_round(), squad))
}

#[test]
fn test_games_ranked_by_gap() {
    let report = run(&make_config(), Arc::new(make_source()), &[]);

    let ids: Vec<u64> = report.fixtures.iter().map(|f| f.fixture.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 3, 5]);

    let tiers: Vec<Option<GapTier>> = report
        .fixtures
        .iter()
        .map(|f| f.strategy.as_ref().map(|s| s.tier))
        .collect();
    assert_eq!(
        tiers,
        vec![
            Some(GapTier::Trusted),
            Some(GapTier::Trusted),
            Some(GapTier::Trusted),
            Some(GapTier::Risky),
            None
        ]
    );

    let first = report.fixtures[0].strategy.as_ref().unwrap();
    assert_eq!(first.match_winner, MatchWinner::HomeWin);
    assert_eq!(first.confidence, 100);
    assert_eq!(first.primary_score().unwrap().to_string(), "2:0");

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, WarningKind::MissingOdds);
    assert_eq!(report.warnings[0].subject, "Monaco - Lyon");
}

#[test]
fn test_teams_ranked_and_best_four_queried() {
    let source = Arc::new(make_source());
    let report = run(&make_config(), source.clone(), &[]);

    let top: Vec<&str> = report.teams.iter().take(4).map(|t| t.team.name.as_str()).collect();
    assert_eq!(top, vec!["Brest", "Paris", "Rennes", "Nice"]);
    assert!(report.teams[8..].iter().all(|t| t.potential_score().is_none()));

    let mut fetched = source.fetched();
    fetched.sort();
    assert_eq!(fetched, vec![1, 4, 5, 7]);
}

#[test]
fn test_player_pools_trimmed_and_sorted() {
    let report = run(&make_config(), Arc::new(make_source()), &[]);
    let pools = &report.players;

    // Nice plays a risky game: its keeper is dropped
    assert_eq!(pools.keepers.len(), 3);
    assert!(pools.keepers.iter().all(|k| k.player.club != "Nice"));

    // 4 teams x 5 backs/midfields, capped at 4 per team
    assert_eq!(pools.backs.len(), 16);
    assert_eq!(pools.midfields.len(), 16);
    // 4 teams x 4 strikers, capped at 3 per team
    assert_eq!(pools.strikers.len(), 12);

    for pool in [&pools.keepers, &pools.backs, &pools.midfields] {
        let averages: Vec<f64> = pool
            .iter()
            .map(|p| p.potential_score.unwrap().average)
            .collect();
        assert!(averages.windows(2).all(|w| w[0] >= w[1]));
    }
    let maxima: Vec<f64> = pools
        .strikers
        .iter()
        .map(|p| p.potential_score.unwrap().max)
        .collect();
    assert!(maxima.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_scores_are_well_formed() {
    let report = run(&make_config(), Arc::new(make_source()), &[]);

    for t in &report.teams {
        if let Some(s) = t.potential_score() {
            assert!(s.min <= s.max);
            assert_eq!(s.average, (s.min + s.max) / 2.0);
        }
    }
    for position in Position::ALL {
        for p in report.players.pool(position) {
            let s = p.potential_score.unwrap();
            assert!(s.min <= s.max, "{}", p.player.name);
            assert_eq!(s.average, (s.min + s.max) / 2.0);
        }
    }
    for f in &report.fixtures {
        if let Some(s) = &f.strategy {
            assert!(s.confidence <= 100);
            assert!(s.odd_gap >= 0.0);
        }
    }
}

#[test]
fn test_failed_team_excluded_and_reported() {
    let source = Arc::new(make_source());
    source.fail_team(1);
    let report = run(&make_config(), source, &[]);

    let failures: Vec<&RankingWarning> = report
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::SourceFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].subject, "Paris");
    assert!(failures[0].message.contains("connection reset"));
    assert!(matches!(
        failures[0].source_error,
        Some(SourceError::Transport { .. })
    ));

    let json = serde_json::to_value(failures[0]).unwrap();
    assert_eq!(json["source_error"]["error"], "transport");
    assert_eq!(json["source_error"]["source_name"], "mock");

    assert!(report.players.find(100).is_none());
    assert_eq!(report.players.keepers.len(), 2);
    assert_eq!(report.players.backs.len(), 15);
}

#[test]
fn test_manual_outcome_in_interactive_mode() {
    let mut cfg = make_config();
    cfg.app.interactive = true;
    cfg.manual_outcomes.insert("5".into(), "2".into());

    let report = run(&cfg, Arc::new(make_source()), &[]);
    assert!(report.warnings.is_empty());

    let manual = report.fixtures.iter().find(|f| f.fixture.id == 5).unwrap();
    assert_eq!(manual.fixture.odds.as_ref().unwrap().name, MANUAL_BOOKMAKER);
    let strategy = manual.strategy.as_ref().unwrap();
    assert_eq!(strategy.match_winner, MatchWinner::AwayWin);

    // Lyon: away win 12, plus one expected goal
    let lyon = report.teams.iter().find(|t| t.team.name == "Lyon").unwrap();
    assert_eq!(lyon.potential_score().unwrap().max, 14.0);
    assert_eq!(report.teams[1].team.name, "Lyon");
}

#[test]
fn test_squad_review_flags_losers() {
    let squad = vec![
        // Brest keeper: ranked
        SquadEntry {
            player_id: 400,
            name: "Brest Keeper 0".into(),
            club: "Brest".into(),
            position: Position::Keeper,
        },
        // Lorient keeper: team not queried
        SquadEntry {
            player_id: 200,
            name: "Lorient Keeper 0".into(),
            club: "Lorient".into(),
            position: Position::Keeper,
        },
    ];
    let report = run(&make_config(), Arc::new(make_source()), &squad);
    let review = report.squad.unwrap();
    assert_eq!(review.slots.len(), 2);
    assert_eq!(review.likely_losers.len(), 1);
    assert_eq!(review.likely_losers[0].player_id, 200);
}

#[test]
fn test_report_written_as_json() {
    let report = run(&make_config(), Arc::new(make_source()), &[]);
    assert_eq!(report.mode, AppMode::Dev);

    let mut path = std::env::temp_dir();
    path.push(format!("scoutbot_report_{}.json", uuid::Uuid::new_v4()));
    let path = path.to_string_lossy().to_string();

    storage::save_report(&report, Some(&path)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["mode"], "dev");
    assert_eq!(json["fixtures"].as_array().unwrap().len(), 5);
    assert_eq!(json["teams"][0]["team"]["name"], "Brest");
    assert_eq!(json["teams"][0]["venue"], "Away");
    assert!(json["players"]["keepers"].is_array());
    assert!(json["squad"].is_null());

    storage::delete_file(&path).unwrap();
}
