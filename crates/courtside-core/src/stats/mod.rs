// Statistical derivation: team resolution, event classification, metric
// aggregation, box-score totals and the four factors.

pub mod aggregate;
pub mod classify;
pub mod compare;
pub mod four_factors;
pub mod resolver;
pub mod totals;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fixtures::TeamRef;
use resolver::ResolvedTeams;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    #[error("box score names {found} distinct team(s); a game needs two")]
    TeamResolution { found: usize },

    #[error("{context} references team {team}, which is not one of the two teams in the box score")]
    UnknownTeam { team: TeamRef, context: String },

    #[error("scoring event in period {period} (sort order {sort_order:?}) has no team reference")]
    UnattributedEvent {
        period: String,
        sort_order: Option<i64>,
    },
}

// ---------------------------------------------------------------------------
// Sides and per-team containers
// ---------------------------------------------------------------------------

/// Which of the two resolved teams a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Side {
    Local,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Local => Side::Away,
            Side::Away => Side::Local,
        }
    }
}

/// A value held once per team, addressed by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerTeam<T> {
    pub local: T,
    pub away: T,
}

impl<T> PerTeam<T> {
    pub fn new(local: T, away: T) -> Self {
        Self { local, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Local => &self.local,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Local => &mut self.local,
            Side::Away => &mut self.away,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> PerTeam<U> {
        PerTeam {
            local: f(Side::Local, &self.local),
            away: f(Side::Away, &self.away),
        }
    }

    /// Look a value up by team reference.
    pub fn for_team(&self, teams: &ResolvedTeams, team: &TeamRef) -> Option<&T> {
        teams.side_of(team).map(|side| self.get(side))
    }
}

impl<T: Clone> PerTeam<T> {
    /// The values keyed by team reference.
    pub fn by_team(&self, teams: &ResolvedTeams) -> BTreeMap<TeamRef, T> {
        BTreeMap::from([
            (teams.local.clone(), self.local.clone()),
            (teams.away.clone(), self.away.clone()),
        ])
    }

    /// The values keyed by the teams' official names.
    pub fn by_name(&self, teams: &ResolvedTeams) -> BTreeMap<String, T> {
        BTreeMap::from([
            (teams.local_name().to_string(), self.local.clone()),
            (teams.away_name().to_string(), self.away.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// Rounded percentages
// ---------------------------------------------------------------------------

/// Whole-number percentage `round(100 * numerator / denominator)`; 0 when the
/// denominator is not positive.
pub fn percentage(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 {
        return 0;
    }
    ((numerator / denominator) * 100.0).round().max(0.0) as u32
}
