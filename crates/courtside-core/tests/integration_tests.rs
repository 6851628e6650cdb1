// Integration tests for the courtside library.
//
// These load the JSON fixtures under tests/fixtures and run the public API
// end-to-end: team resolution, metric aggregation, box-score totals, the four
// factors, comparisons, the timeline and the shot chart.

use std::path::{Path, PathBuf};

use courtside_core::config::ShotChartConfig;
use courtside_core::fixtures::{load_game, FixtureError, GameFixtures, TeamRef};
use courtside_core::pbp::{EventSide, Substitution};
use courtside_core::report::{build_report, GameReport};
use courtside_core::roster::write_box_score_csv;
use courtside_core::stats::aggregate::aggregate;
use courtside_core::stats::compare::Better;
use courtside_core::stats::four_factors::FourFactors;
use courtside_core::stats::resolver::resolve_teams;
use courtside_core::stats::Side;

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn game() -> GameFixtures {
    let dir = fixtures_dir();
    load_game(&dir.join("boxscore.json"), &dir.join("playbyplay.json"))
        .expect("fixtures should load")
}

fn report() -> GameReport {
    build_report(&game(), &ShotChartConfig::default()).expect("report should derive")
}

// ===========================================================================
// Teams and summary
// ===========================================================================

#[test]
fn teams_resolve_from_row_order() {
    let report = report();
    assert_eq!(report.teams.local, TeamRef::new("T_101"));
    assert_eq!(report.teams.away, TeamRef::new("T_202"));
    assert_eq!(report.teams.local_name(), "Club Norte");
    assert_eq!(report.teams.away_name(), "Deportivo Sur");
}

#[test]
fn summary_score_is_sum_of_points() {
    let summary = report().summary;
    assert_eq!(summary.local_score, 37);
    assert_eq!(summary.away_score, 35);
    assert_eq!(summary.winner(), Some(Side::Local));
}

// ===========================================================================
// Derived metrics
// ===========================================================================

#[test]
fn derived_metrics_from_zone_tags() {
    let metrics = report().metrics;

    assert_eq!(metrics.local.fast_break_points, 5);
    assert_eq!(metrics.local.second_chance_points, 5);
    assert_eq!(metrics.local.points_off_turnovers, 1);
    assert_eq!(metrics.local.bench_points, 9);

    assert_eq!(metrics.away.fast_break_points, 5);
    assert_eq!(metrics.away.second_chance_points, 3);
    assert_eq!(metrics.away.points_off_turnovers, 6);
    assert_eq!(metrics.away.bench_points, 8);
}

#[test]
fn aggregation_is_independent_of_row_and_event_order() {
    let mut game = game();
    let teams = resolve_teams(&game.box_score.rows).unwrap();
    let first = aggregate(&game.box_score.rows, &game.play_by_play, &teams).unwrap();

    // Keep the first row in place so the local team does not change.
    game.box_score.rows[1..].reverse();
    for actions in game.play_by_play.game_actions.values_mut() {
        actions.items.reverse();
    }
    let second = aggregate(&game.box_score.rows, &game.play_by_play, &teams).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rerunning_the_pass_gives_identical_output() {
    let game = game();
    let a = build_report(&game, &ShotChartConfig::default()).unwrap();
    let b = build_report(&game, &ShotChartConfig::default()).unwrap();
    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.four_factors, b.four_factors);
    assert_eq!(
        serde_json::to_string(&a.timeline).unwrap(),
        serde_json::to_string(&b.timeline).unwrap()
    );
}

// ===========================================================================
// Totals and four factors
// ===========================================================================

#[test]
fn totals_include_team_rows() {
    let totals = report().totals;
    assert_eq!(totals.local.offensive_rebounds, 5);
    assert_eq!(totals.local.defensive_rebounds, 12);
    assert_eq!(totals.local.turnovers, 7);
    assert_eq!(totals.away.defensive_rebounds, 11);
    assert_eq!(totals.away.turnovers, 8);
    assert_eq!(totals.away.efficiency, 32);
}

#[test]
fn four_factors_use_opponent_rebounds() {
    let report = report();
    assert_eq!(
        report.four_factors.local,
        FourFactors { efg: 50, tov_percentage: 16, reb_percentage: 31, ftf: 9 }
    );
    assert_eq!(
        report.four_factors.away,
        FourFactors { efg: 53, tov_percentage: 20, reb_percentage: 29, ftf: 10 }
    );

    let by_name = report.four_factors.by_name(&report.teams);
    assert_eq!(by_name["Club Norte"].reb_percentage, 31);
    let by_team = report.four_factors.by_team(&report.teams);
    assert_eq!(by_team[&TeamRef::new("T_202")].efg, 53);
}

#[test]
fn comparisons_cover_basic_and_advanced_views() {
    let report = report();
    assert_eq!(report.basic_comparisons.len(), 22);
    assert_eq!(report.advanced_comparisons.len(), 8);

    let turnovers = report
        .basic_comparisons
        .iter()
        .find(|c| c.label == "Pérdidas")
        .unwrap();
    assert_eq!(turnovers.better, Better::Lower);
    assert_eq!(turnovers.leader(), Some(Side::Local));

    let off_turnovers = &report.advanced_comparisons[2];
    assert_eq!(off_turnovers.label, "Puntos tras pérdida");
    assert_eq!(off_turnovers.leader(), Some(Side::Away));
}

// ===========================================================================
// Timeline and shot chart
// ===========================================================================

#[test]
fn timeline_orders_periods_and_events() {
    let timeline = report().timeline;
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].key, "Q1");
    assert_eq!(timeline[0].entries.len(), 12);

    let q2 = &timeline[1].entries;
    let orders: Vec<_> = q2.iter().filter_map(|e| e.sort_order).collect();
    assert_eq!(orders, vec![100, 99, 98, 97, 96, 95]);
    assert_eq!(q2[0].substitution, Some(Substitution::In));
    assert_eq!(q2[1].substitution, Some(Substitution::Out));
    assert_eq!(q2[2].badge, Some("+3"));
    assert_eq!(q2[2].label, "Triple anotado");
    assert_eq!(q2[2].meta(), "Gala Roca · Deportivo Sur");
}

#[test]
fn steal_without_team_is_attributed_through_player() {
    let timeline = report().timeline;
    let steal = timeline[0]
        .entries
        .iter()
        .find(|e| e.sort_order == Some(114))
        .unwrap();
    assert_eq!(steal.label, "Robo");
    assert_eq!(steal.side, EventSide::Local);
    assert_eq!(steal.team.as_deref(), Some("Club Norte"));
}

#[test]
fn shot_chart_keeps_field_goals_with_coordinates() {
    let shots = report().shots;
    assert_eq!(shots.local.len(), 2);
    assert_eq!(shots.away.len(), 3);
    assert_eq!(shots.away.iter().filter(|s| s.made).count(), 2);
    assert!(shots.local.iter().all(|s| s.shooter != "N/D"));
}

// ===========================================================================
// Output and errors
// ===========================================================================

#[test]
fn report_serializes_to_json() {
    let json = serde_json::to_value(report()).unwrap();
    assert_eq!(json["summary"]["local_score"], 37);
    assert_eq!(json["metrics"]["away"]["puntosTrasPerdida"], 6);
    assert_eq!(json["four_factors"]["local"]["tovPercentage"], 16);
    assert_eq!(json["teams"]["names"]["T_101"], "Club Norte");
}

#[test]
fn csv_export_lists_every_player() {
    let report = report();
    let mut out = Vec::new();
    write_box_score_csv(&report.rosters, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1 + 7);
    assert!(text.lines().nth(1).unwrap().starts_with("Club Norte,4,A. Ruiz,true,30:00,18,"));
}

#[test]
fn missing_fixture_is_reported_before_derivation() {
    let dir = fixtures_dir();
    let err = load_game(&dir.join("boxscore.json"), &dir.join("missing.json")).unwrap_err();
    match err {
        FixtureError::Io { path, .. } => assert!(path.ends_with("missing.json")),
        other => panic!("expected Io error, got: {other}"),
    }
}
