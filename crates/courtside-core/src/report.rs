// Full derivation pass over one game's fixtures.

use serde::Serialize;
use tracing::info;

use crate::config::ShotChartConfig;
use crate::fixtures::GameFixtures;
use crate::pbp::{build_timeline, extract_shots, PeriodLog, ShotChart};
use crate::roster::{team_rosters, Roster};
use crate::stats::aggregate::{aggregate, AdvancedMetrics};
use crate::stats::compare::{advanced_comparisons, basic_comparisons, game_summary, Comparison, GameSummary};
use crate::stats::four_factors::{four_factors, FourFactorsReport};
use crate::stats::resolver::{resolve_teams, ResolvedTeams};
use crate::stats::totals::{accumulate_totals, TeamTotalsByTeam};
use crate::stats::DerivationError;

/// Everything derived from one box score and play-by-play pair.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub teams: ResolvedTeams,
    pub summary: GameSummary,
    pub totals: TeamTotalsByTeam,
    pub metrics: AdvancedMetrics,
    pub four_factors: FourFactorsReport,
    pub basic_comparisons: Vec<Comparison>,
    pub advanced_comparisons: Vec<Comparison>,
    pub rosters: Vec<Roster>,
    pub timeline: Vec<PeriodLog>,
    pub shots: ShotChart,
}

/// Resolve the teams, then derive every view from the loaded fixtures.
/// Each call starts from fresh accumulators.
pub fn build_report(
    fixtures: &GameFixtures,
    canvas: &ShotChartConfig,
) -> Result<GameReport, DerivationError> {
    let rows = &fixtures.box_score.rows;
    let teams = resolve_teams(rows)?;

    let totals = accumulate_totals(rows, &teams)?;
    let metrics = aggregate(rows, &fixtures.play_by_play, &teams)?;
    let four_factors = four_factors(&totals);
    let summary = game_summary(&totals, &teams);
    info!(
        "{} {} - {} {}",
        summary.local, summary.local_score, summary.away_score, summary.away
    );

    let rosters = team_rosters(&fixtures.box_score, &teams)?;
    let timeline = build_timeline(&fixtures.play_by_play, &fixtures.box_score, &teams);
    let shots = extract_shots(&fixtures.play_by_play, &fixtures.box_score, &teams, canvas);
    info!(
        "derived report: {} periods, {} shots",
        timeline.len(),
        shots.local.len() + shots.away.len()
    );

    Ok(GameReport {
        basic_comparisons: basic_comparisons(&totals),
        advanced_comparisons: advanced_comparisons(&metrics, &four_factors),
        teams,
        summary,
        totals,
        metrics,
        four_factors,
        rosters,
        timeline,
        shots,
    })
}
