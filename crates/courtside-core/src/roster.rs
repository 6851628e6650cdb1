// Player box-score tables: per-team rosters, their default and summary
// orderings, display formatting and CSV export.

use std::io::Write;

use serde::Serialize;

use crate::fixtures::{BoxScore, PlayerBoxRow, TeamRef};
use crate::stats::resolver::ResolvedTeams;
use crate::stats::{DerivationError, Side};

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// One team's player rows, team rows excluded.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub team: TeamRef,
    pub name: String,
    pub side: Side,
    /// Starters first, then by playing time descending.
    pub players: Vec<PlayerBoxRow>,
}

impl Roster {
    /// Players by efficiency, highest first.
    pub fn summary(&self) -> Vec<&PlayerBoxRow> {
        summary_order(&self.players)
    }
}

/// Starters before bench, each group by seconds played descending. Ties keep
/// feed order.
pub fn sort_default(players: &mut [PlayerBoxRow]) {
    players.sort_by(|a, b| {
        b.is_starter
            .cmp(&a.is_starter)
            .then(b.play_duration_in_seconds.cmp(&a.play_duration_in_seconds))
    });
}

/// Efficiency descending. Ties keep input order.
pub fn summary_order(players: &[PlayerBoxRow]) -> Vec<&PlayerBoxRow> {
    let mut ordered: Vec<&PlayerBoxRow> = players.iter().collect();
    ordered.sort_by(|a, b| b.efficiency.cmp(&a.efficiency));
    ordered
}

/// Group player rows per team, local first.
pub fn team_rosters(box_score: &BoxScore, teams: &ResolvedTeams) -> Result<Vec<Roster>, DerivationError> {
    let mut rosters: Vec<Roster> = [Side::Local, Side::Away]
        .into_iter()
        .map(|side| Roster {
            team: teams.team(side).clone(),
            name: teams.name(side).to_string(),
            side,
            players: Vec::new(),
        })
        .collect();

    for row in box_score.rows.iter().filter(|r| !r.is_team_row()) {
        let side = teams.ensure_known(&row.team_ref(), "roster row")?;
        let index = match side {
            Side::Local => 0,
            Side::Away => 1,
        };
        rosters[index].players.push(row.clone());
    }

    for roster in &mut rosters {
        sort_default(&mut roster.players);
    }
    Ok(rosters)
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// `"F. Last"`; the initial is dropped when there is no first name.
pub fn format_player_name(first_name: &str, last_name: &str) -> String {
    let initial = first_name
        .trim()
        .chars()
        .next()
        .map(|c| format!("{}.", c.to_uppercase()))
        .unwrap_or_default();
    format!("{initial} {}", last_name.trim()).trim().to_string()
}

/// `M:SS` from seconds played. Zero or negative reads `0:00`.
pub fn format_minutes(seconds: i32) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One decimal place; empty when the feed has no value.
pub fn format_percent(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct BoxScoreLine<'a> {
    team: &'a str,
    number: &'a str,
    player: String,
    starter: bool,
    min: String,
    pts: i32,
    fgm: i32,
    fga: i32,
    fg_pct: String,
    two_pm: i32,
    two_pa: i32,
    two_pct: String,
    three_pm: i32,
    three_pa: i32,
    three_pct: String,
    ftm: i32,
    fta: i32,
    ft_pct: String,
    oreb: i32,
    dreb: i32,
    reb: i32,
    ast: i32,
    pf: i32,
    tov: i32,
    stl: i32,
    blk: i32,
    plus_minus: i32,
    eff: i32,
}

impl<'a> BoxScoreLine<'a> {
    fn new(team: &'a str, row: &'a PlayerBoxRow) -> Self {
        let (number, player) = match &row.player {
            Some(p) => (
                p.uniform_number.as_deref().unwrap_or_default(),
                format_player_name(&p.first_name, &p.last_name),
            ),
            None => ("", String::new()),
        };
        Self {
            team,
            number,
            player,
            starter: row.is_starter,
            min: format_minutes(row.play_duration_in_seconds),
            pts: row.points,
            fgm: row.field_goals_made,
            fga: row.field_goals_attempted,
            fg_pct: format_percent(row.field_goals_percentage),
            two_pm: row.two_points_made,
            two_pa: row.two_points_attempted,
            two_pct: format_percent(row.two_points_percentage),
            three_pm: row.three_points_made,
            three_pa: row.three_points_attempted,
            three_pct: format_percent(row.three_points_percentage),
            ftm: row.free_throws_made,
            fta: row.free_throws_attempted,
            ft_pct: format_percent(row.free_throws_percentage),
            oreb: row.offensive_rebounds,
            dreb: row.defensive_rebounds,
            reb: row.rebounds,
            ast: row.assists,
            pf: row.personal_fouls,
            tov: row.turnovers,
            stl: row.steals,
            blk: row.blocked_shots,
            plus_minus: row.plus_minus,
            eff: row.efficiency,
        }
    }
}

/// Write one CSV line per player, rosters in order.
pub fn write_box_score_csv<W: Write>(rosters: &[Roster], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for roster in rosters {
        for row in &roster.players {
            wtr.serialize(BoxScoreLine::new(&roster.name, row))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
