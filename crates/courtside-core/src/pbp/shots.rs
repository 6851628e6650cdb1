// Shot chart extraction: field-goal attempts with court coordinates, split
// by team and scaled onto the configured canvas.

use serde::Serialize;
use tracing::{debug, warn};

use super::period::Period;
use crate::config::ShotChartConfig;
use crate::fixtures::{BoxScore, PlayByPlay, PlayByPlayEvent};
use crate::stats::classify::ShotType;
use crate::stats::resolver::ResolvedTeams;
use crate::stats::PerTeam;

/// Width of the feed's court coordinate space.
pub const COURT_WIDTH: f64 = 280.0;
/// Height of the feed's court coordinate space.
pub const COURT_HEIGHT: f64 = 261.0;

const UNKNOWN_PLAYER: &str = "N/D";
const UNKNOWN_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shot {
    pub period_key: String,
    pub period: Option<Period>,
    pub clock: Option<String>,
    pub shooter: String,
    pub shot: ShotType,
    pub made: bool,
    /// Canvas coordinates.
    pub x: f64,
    pub y: f64,
}

impl Shot {
    /// Hover text for the shot marker.
    pub fn tooltip(&self) -> String {
        let quarter = self.period_key.replace('Q', "");
        let quarter = if quarter.is_empty() { UNKNOWN_VALUE } else { quarter.as_str() };
        format!(
            "Cuarto: {quarter}\nTiempo restante: {}\nJugador: {}",
            self.clock.as_deref().unwrap_or(UNKNOWN_VALUE),
            self.shooter
        )
    }
}

pub type ShotChart = PerTeam<Vec<Shot>>;

/// Scale feed coordinates onto the canvas. Both spaces have a top-left
/// origin.
pub fn scale_to_canvas(x: f64, y: f64, canvas: &ShotChartConfig) -> (f64, f64) {
    (x / COURT_WIDTH * canvas.width, y / COURT_HEIGHT * canvas.height)
}

fn shooter_name(event: &PlayByPlayEvent, box_score: &BoxScore) -> String {
    event
        .player_id()
        .and_then(|id| box_score.player_name(id))
        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string())
}

/// Every two- or three-point attempt that carries both coordinates.
pub fn extract_shots(
    play_by_play: &PlayByPlay,
    box_score: &BoxScore,
    teams: &ResolvedTeams,
    canvas: &ShotChartConfig,
) -> ShotChart {
    let mut chart = ShotChart::default();
    for (key, event) in play_by_play.all_events() {
        let Some(shot) = ShotType::from_code(&event.action_code).filter(ShotType::is_field_goal)
        else {
            continue;
        };
        let (Some(sx), Some(sy)) = (event.shot_x, event.shot_y) else {
            continue;
        };
        let Some(side) = event.team_ref().and_then(|team| teams.side_of(&team)) else {
            warn!(
                "skipping {} in {key} for team {:?}: not one of the two teams",
                shot.code(),
                event.team
            );
            continue;
        };
        let (x, y) = scale_to_canvas(sx, sy, canvas);
        chart.get_mut(side).push(Shot {
            period_key: key.to_string(),
            period: Period::parse(key),
            clock: event.time.clone(),
            shooter: shooter_name(event, box_score),
            shot,
            made: event.is_success(),
            x,
            y,
        });
    }
    debug!(
        "shot chart: {} local, {} away",
        chart.local.len(),
        chart.away.len()
    );
    chart
}
