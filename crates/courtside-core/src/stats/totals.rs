// Per-team box-score totals. Every row counts, team rows included, so team
// rebounds and team turnovers reach the four factors.

use serde::Serialize;
use tracing::debug;

use super::resolver::ResolvedTeams;
use super::{percentage, DerivationError, PerTeam};
use crate::fixtures::PlayerBoxRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamTotals {
    pub points: i32,
    pub field_goals_made: i32,
    pub field_goals_attempted: i32,
    pub two_points_made: i32,
    pub two_points_attempted: i32,
    pub three_points_made: i32,
    pub three_points_attempted: i32,
    pub free_throws_made: i32,
    pub free_throws_attempted: i32,
    pub offensive_rebounds: i32,
    pub defensive_rebounds: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub personal_fouls: i32,
    pub turnovers: i32,
    pub steals: i32,
    pub blocked_shots: i32,
    pub efficiency: i32,
}

impl TeamTotals {
    pub fn add_row(&mut self, row: &PlayerBoxRow) {
        self.points += row.points;
        self.field_goals_made += row.field_goals_made;
        self.field_goals_attempted += row.field_goals_attempted;
        self.two_points_made += row.two_points_made;
        self.two_points_attempted += row.two_points_attempted;
        self.three_points_made += row.three_points_made;
        self.three_points_attempted += row.three_points_attempted;
        self.free_throws_made += row.free_throws_made;
        self.free_throws_attempted += row.free_throws_attempted;
        self.offensive_rebounds += row.offensive_rebounds;
        self.defensive_rebounds += row.defensive_rebounds;
        self.rebounds += row.rebounds;
        self.assists += row.assists;
        self.personal_fouls += row.personal_fouls;
        self.turnovers += row.turnovers;
        self.steals += row.steals;
        self.blocked_shots += row.blocked_shots;
        self.efficiency += row.efficiency;
    }

    pub fn field_goal_percentage(&self) -> u32 {
        shooting_percentage(self.field_goals_made, self.field_goals_attempted)
    }

    pub fn two_point_percentage(&self) -> u32 {
        shooting_percentage(self.two_points_made, self.two_points_attempted)
    }

    pub fn three_point_percentage(&self) -> u32 {
        shooting_percentage(self.three_points_made, self.three_points_attempted)
    }

    pub fn free_throw_percentage(&self) -> u32 {
        shooting_percentage(self.free_throws_made, self.free_throws_attempted)
    }
}

pub type TeamTotalsByTeam = PerTeam<TeamTotals>;

/// `round(100 * made / attempted)`, 0 with no attempts.
pub fn shooting_percentage(made: i32, attempted: i32) -> u32 {
    percentage(f64::from(made), f64::from(attempted))
}

/// Sum every box-score row into its team's totals.
pub fn accumulate_totals(
    rows: &[PlayerBoxRow],
    teams: &ResolvedTeams,
) -> Result<TeamTotalsByTeam, DerivationError> {
    let mut totals = TeamTotalsByTeam::default();
    for row in rows {
        let side = teams.ensure_known(&row.team_ref(), "box-score row")?;
        totals.get_mut(side).add_row(row);
    }
    debug!(
        "team totals: local {} pts, away {} pts",
        totals.local.points, totals.away.points
    );
    Ok(totals)
}
