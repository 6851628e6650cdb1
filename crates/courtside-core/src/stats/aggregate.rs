// Aggregation of the four derived team metrics: fast-break points,
// second-chance points, points off turnovers and bench points.

use serde::Serialize;
use tracing::{debug, trace};

use super::classify::{classify, Bucket};
use super::resolver::ResolvedTeams;
use super::{DerivationError, PerTeam};
use crate::fixtures::{PlayByPlay, PlayerBoxRow};

/// Derived metric counters for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamMetrics {
    #[serde(rename = "puntosContraataque")]
    pub fast_break_points: i32,
    #[serde(rename = "puntosSegundaOportunidad")]
    pub second_chance_points: i32,
    #[serde(rename = "puntosTrasPerdida")]
    pub points_off_turnovers: i32,
    #[serde(rename = "puntosBanquillo")]
    pub bench_points: i32,
}

impl TeamMetrics {
    pub fn credit(&mut self, bucket: Bucket, points: i32) {
        match bucket {
            Bucket::FastBreak => self.fast_break_points += points,
            Bucket::SecondChance => self.second_chance_points += points,
            Bucket::OffTurnover => self.points_off_turnovers += points,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> i32 {
        match bucket {
            Bucket::FastBreak => self.fast_break_points,
            Bucket::SecondChance => self.second_chance_points,
            Bucket::OffTurnover => self.points_off_turnovers,
        }
    }
}

pub type AdvancedMetrics = PerTeam<TeamMetrics>;

/// Fold the box score and the full play-by-play stream into per-team metrics.
///
/// Rows or scoring events naming a team outside the resolved pair fail the
/// pass with [`DerivationError::UnknownTeam`].
pub fn aggregate(
    rows: &[PlayerBoxRow],
    play_by_play: &PlayByPlay,
    teams: &ResolvedTeams,
) -> Result<AdvancedMetrics, DerivationError> {
    let mut metrics = AdvancedMetrics::default();
    accumulate_bench_points(&mut metrics, rows, teams)?;
    accumulate_scoring_events(&mut metrics, play_by_play, teams)?;
    debug!(
        "aggregated metrics: local={:?} away={:?}",
        metrics.local, metrics.away
    );
    Ok(metrics)
}

/// Add every non-starter player's points to their team's bench total.
/// Team rows are skipped, but every row's team must be one of the pair.
pub fn accumulate_bench_points(
    metrics: &mut AdvancedMetrics,
    rows: &[PlayerBoxRow],
    teams: &ResolvedTeams,
) -> Result<(), DerivationError> {
    for row in rows {
        let side = teams.ensure_known(&row.team_ref(), "box-score row")?;
        if row.is_team_row() || row.is_starter {
            continue;
        }
        metrics.get_mut(side).bench_points += row.points;
    }
    Ok(())
}

/// Credit each made shot's full point value to every bucket its zone names,
/// for the team in the event's own `T1`. The team is checked even when the
/// zone credits nothing.
pub fn accumulate_scoring_events(
    metrics: &mut AdvancedMetrics,
    play_by_play: &PlayByPlay,
    teams: &ResolvedTeams,
) -> Result<(), DerivationError> {
    for (period, event) in play_by_play.all_events() {
        let Some(scored) = classify(event) else {
            continue;
        };
        let side = match &scored.team {
            Some(team) => Some(teams.ensure_known(team, &format!("scoring event in {period}"))?),
            None => None,
        };
        let buckets = scored.buckets();
        if buckets.is_empty() {
            trace!(
                "made {} in {period} has no recognised zone",
                scored.shot.code()
            );
            continue;
        }
        let side = side.ok_or_else(|| DerivationError::UnattributedEvent {
            period: period.to_string(),
            sort_order: event.sort_order,
        })?;
        let team_metrics = metrics.get_mut(side);
        for bucket in buckets {
            team_metrics.credit(*bucket, scored.points);
        }
    }
    Ok(())
}
