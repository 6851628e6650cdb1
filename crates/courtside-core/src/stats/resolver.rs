// Team identity resolution from box-score row order.
//
// The feed carries no home/away flag. The first team to appear in the box
// score is treated as local and the first different team after it as away.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::{DerivationError, Side};
use crate::fixtures::{PlayerBoxRow, TeamRef};

/// The two teams of a game plus their official names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTeams {
    pub local: TeamRef,
    pub away: TeamRef,
    /// Team reference to official name. First occurrence wins per team.
    pub names: BTreeMap<TeamRef, String>,
}

impl ResolvedTeams {
    pub fn side_of(&self, team: &TeamRef) -> Option<Side> {
        if *team == self.local {
            Some(Side::Local)
        } else if *team == self.away {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Like [`side_of`](Self::side_of) but reports a team outside the pair
    /// as a cross-reference error.
    pub fn ensure_known(&self, team: &TeamRef, context: &str) -> Result<Side, DerivationError> {
        self.side_of(team).ok_or_else(|| DerivationError::UnknownTeam {
            team: team.clone(),
            context: context.to_string(),
        })
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Local => &self.local,
            Side::Away => &self.away,
        }
    }

    pub fn opponent_of(&self, team: &TeamRef) -> Option<&TeamRef> {
        self.side_of(team).map(|side| self.team(side.opponent()))
    }

    pub fn name_of(&self, team: &TeamRef) -> Option<&str> {
        self.names.get(team).map(String::as_str)
    }

    pub fn name(&self, side: Side) -> &str {
        self.name_of(self.team(side)).unwrap_or_default()
    }

    pub fn local_name(&self) -> &str {
        self.name(Side::Local)
    }

    pub fn away_name(&self) -> &str {
        self.name(Side::Away)
    }

    /// Side of a feed organisation id.
    pub fn side_of_organisation(&self, organisation_id: i64) -> Option<Side> {
        self.side_of(&TeamRef::from_organisation(organisation_id))
    }
}

/// Determine the local and away teams from box-score row order.
///
/// Fails with [`DerivationError::TeamResolution`] when fewer than two distinct
/// teams appear.
pub fn resolve_teams(rows: &[PlayerBoxRow]) -> Result<ResolvedTeams, DerivationError> {
    let mut local: Option<TeamRef> = None;
    let mut away: Option<TeamRef> = None;

    for row in rows {
        let team = row.team_ref();
        if local.is_none() {
            local = Some(team);
        } else if local.as_ref() != Some(&team) {
            away = Some(team);
            break;
        }
    }

    let mut names = BTreeMap::new();
    for row in rows {
        names
            .entry(row.team_ref())
            .or_insert_with(|| row.team.official_name.clone());
    }

    match (local, away) {
        (Some(local), Some(away)) => {
            debug!("resolved teams: local={local} away={away}");
            Ok(ResolvedTeams { local, away, names })
        }
        (local, _) => Err(DerivationError::TeamResolution {
            found: usize::from(local.is_some()),
        }),
    }
}
