// Dean Oliver's four factors from box-score totals.
//
// Offensive-rebound share uses the opponent's defensive rebounds, so both
// teams' totals must be complete before either side is computed.

use serde::Serialize;

use super::totals::{TeamTotals, TeamTotalsByTeam};
use super::{percentage, PerTeam};

/// Whole-number percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FourFactors {
    /// Effective field-goal percentage.
    pub efg: u32,
    pub tov_percentage: u32,
    /// Offensive-rebound percentage.
    pub reb_percentage: u32,
    /// Free-throw factor.
    pub ftf: u32,
}

/// Keyed by side; use [`PerTeam::by_team`] or [`PerTeam::by_name`] for
/// reference- or name-keyed views.
pub type FourFactorsReport = PerTeam<FourFactors>;

pub fn compute_four_factors(team: &TeamTotals, opponent: &TeamTotals) -> FourFactors {
    let fga = f64::from(team.field_goals_attempted);
    let fta = f64::from(team.free_throws_attempted);
    let tov = f64::from(team.turnovers);
    let orb = f64::from(team.offensive_rebounds);

    FourFactors {
        efg: percentage(
            f64::from(team.field_goals_made) + 0.5 * f64::from(team.three_points_made),
            fga,
        ),
        tov_percentage: percentage(tov, fga + 0.44 * fta + tov),
        reb_percentage: percentage(orb, orb + f64::from(opponent.defensive_rebounds)),
        ftf: percentage(f64::from(team.free_throws_made), fga),
    }
}

pub fn four_factors(totals: &TeamTotalsByTeam) -> FourFactorsReport {
    totals.map(|side, team| compute_four_factors(team, totals.get(side.opponent())))
}
