// Per-period play-by-play timeline with translated labels and team
// attribution.

use std::cmp::Reverse;

use serde::Serialize;
use tracing::{debug, warn};

use super::period::Period;
use super::translate::{translate_action, Substitution};
use crate::fixtures::{parse_team_reference, BoxScore, PlayByPlay, PlayByPlayEvent, TeamRef};
use crate::stats::classify::scoring_badge;
use crate::stats::resolver::ResolvedTeams;
use crate::stats::Side;

/// Which team an entry belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventSide {
    Local,
    Away,
    Neutral,
}

impl From<Option<Side>> for EventSide {
    fn from(side: Option<Side>) -> Self {
        match side {
            Some(Side::Local) => EventSide::Local,
            Some(Side::Away) => EventSide::Away,
            None => EventSide::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub sort_order: Option<i64>,
    /// Time remaining in the period, as in the feed.
    pub clock: String,
    pub label: String,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub side: EventSide,
    pub player: Option<String>,
    pub team: Option<String>,
    pub badge: Option<&'static str>,
    pub substitution: Option<Substitution>,
}

impl TimelineEntry {
    /// Running score as `A - B`; a missing side is left blank.
    pub fn score_line(&self) -> String {
        let show = |s: Option<i64>| s.map(|v| v.to_string()).unwrap_or_default();
        format!("{} - {}", show(self.score_a), show(self.score_b))
    }

    /// Player and team joined with a middle dot, skipping whichever is absent.
    pub fn meta(&self) -> String {
        [self.player.as_deref(), self.team.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodLog {
    pub period: Period,
    /// The `GameActions` key the entries came from.
    pub key: String,
    pub entries: Vec<TimelineEntry>,
}

/// Seconds from a `MM:SS` clock string; 0 when it does not parse.
pub fn clock_seconds(clock: &str) -> u32 {
    let mut parts = clock.trim().split(':');
    let (Some(m), Some(s)) = (parts.next(), parts.next()) else {
        return 0;
    };
    match (m.trim().parse::<u32>(), s.trim().parse::<u32>()) {
        (Ok(m), Ok(s)) => m * 60 + s,
        _ => 0,
    }
}

/// Organisation an event belongs to: its `T1` reference, or else the team of
/// the player named in `C1`.
pub fn event_organisation(event: &PlayByPlayEvent, box_score: &BoxScore) -> Option<i64> {
    event
        .team
        .as_deref()
        .and_then(parse_team_reference)
        .or_else(|| {
            event
                .player_id()
                .and_then(|id| box_score.find_player(id))
                .map(|row| row.team.organisation_id)
        })
}

fn build_entry(event: &PlayByPlayEvent, box_score: &BoxScore, teams: &ResolvedTeams) -> TimelineEntry {
    let organisation = event_organisation(event, box_score);
    let side = organisation.and_then(|org| teams.side_of_organisation(org));
    let team = organisation
        .and_then(|org| teams.name_of(&TeamRef::from_organisation(org)))
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let label = translate_action(event.action.as_deref().unwrap_or_default());

    TimelineEntry {
        sort_order: event.sort_order,
        clock: event.time.clone().unwrap_or_default(),
        substitution: Substitution::from_label(&label),
        label,
        score_a: event.score_a,
        score_b: event.score_b,
        side: side.into(),
        player: event.player_id().and_then(|id| box_score.player_name(id)),
        team,
        badge: scoring_badge(event),
    }
}

/// Build the per-period timeline. Keys that are not periods are skipped;
/// periods come out in numeric order and entries within a period by
/// `SORTORDER` descending.
pub fn build_timeline(
    play_by_play: &PlayByPlay,
    box_score: &BoxScore,
    teams: &ResolvedTeams,
) -> Vec<PeriodLog> {
    let mut logs: Vec<PeriodLog> = Vec::new();
    for (key, actions) in &play_by_play.game_actions {
        let Some(period) = Period::parse(key) else {
            warn!("skipping play-by-play key {key:?}: not a period");
            continue;
        };
        let mut entries: Vec<TimelineEntry> = actions
            .items
            .iter()
            .map(|event| build_entry(event, box_score, teams))
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.sort_order));
        debug!("{key}: {} timeline entries", entries.len());
        logs.push(PeriodLog {
            period,
            key: key.clone(),
            entries,
        });
    }
    logs.sort_by_key(|log| log.period);
    logs
}
