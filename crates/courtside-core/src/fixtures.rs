// Fixture loading: box-score rows and play-by-play actions from JSON.
//
// Both documents come from the league's stats feed. Numeric fields are not
// always typed consistently (SORTORDER and the running score sometimes arrive
// as strings, counting stats sometimes as null), so the raw structs go through
// lenient deserializers that fall back to zero or `None`.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Stable team identifier, `"T_" + organisationId`.
///
/// The same form is used by the play-by-play `T1` field, so events can be
/// matched to box-score teams by plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRef(String);

static TEAM_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)T[_-]?(\d+)").expect("team reference pattern is valid"));

static PLAYER_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)P[_-]?(\d+)").expect("player reference pattern is valid"));

impl TeamRef {
    pub fn from_organisation(organisation_id: i64) -> Self {
        TeamRef(format!("T_{organisation_id}"))
    }

    pub fn new(raw: impl Into<String>) -> Self {
        TeamRef(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Organisation id embedded in the reference. Accepts `T_123`, `T-123`
    /// and `T123`.
    pub fn organisation_id(&self) -> Option<i64> {
        parse_team_reference(&self.0)
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the organisation id out of a `T1`-style reference.
pub fn parse_team_reference(raw: &str) -> Option<i64> {
    TEAM_REF_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse the player id out of a `C1`-style reference (`P_123`, `P-123`, `P123`).
pub fn parse_player_reference(raw: &str) -> Option<i64> {
    PLAYER_REF_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    #[serde(deserialize_with = "lenient::required_i64")]
    pub organisation_id: i64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub official_name: String,
}

impl TeamInfo {
    pub fn team_ref(&self) -> TeamRef {
        TeamRef::from_organisation(self.organisation_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub uniform_number: Option<String>,
}

impl PlayerInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// One box-score row. `player` is `None` for team-level rows (team rebounds,
/// team turnovers and the like).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBoxRow {
    pub team: TeamInfo,
    #[serde(default)]
    pub player: Option<PlayerInfo>,
    #[serde(default)]
    pub is_starter: bool,
    #[serde(default, deserialize_with = "lenient::count")]
    pub points: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub field_goals_made: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub field_goals_attempted: i32,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub field_goals_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub two_points_made: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub two_points_attempted: i32,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub two_points_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub three_points_made: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub three_points_attempted: i32,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub three_points_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub free_throws_made: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub free_throws_attempted: i32,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub free_throws_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub offensive_rebounds: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub defensive_rebounds: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub rebounds: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub assists: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub personal_fouls: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub turnovers: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub steals: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub blocked_shots: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub plus_minus: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub efficiency: i32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub play_duration_in_seconds: i32,
}

impl PlayerBoxRow {
    pub fn team_ref(&self) -> TeamRef {
        self.team.team_ref()
    }

    pub fn is_team_row(&self) -> bool {
        self.player.is_none()
    }
}

/// The box-score document: rows in feed order. Row order matters, it decides
/// which team is local.
#[derive(Debug, Clone, Default)]
pub struct BoxScore {
    pub rows: Vec<PlayerBoxRow>,
}

impl BoxScore {
    pub fn new(rows: Vec<PlayerBoxRow>) -> Self {
        Self { rows }
    }

    /// Look up a player's row by feed player id.
    pub fn find_player(&self, player_id: i64) -> Option<&PlayerBoxRow> {
        self.rows.iter().find(|row| {
            row.player
                .as_ref()
                .is_some_and(|p| p.player_id == Some(player_id))
        })
    }

    /// Full name for a player id, `None` when the player is unknown or has no
    /// name on file.
    pub fn player_name(&self, player_id: i64) -> Option<String> {
        self.find_player(player_id)
            .and_then(|row| row.player.as_ref())
            .map(PlayerInfo::full_name)
            .filter(|name| !name.is_empty())
    }
}

/// One play-by-play action as it appears in the feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayByPlayEvent {
    #[serde(rename = "AC", default, deserialize_with = "lenient::string_or_empty")]
    pub action_code: String,
    #[serde(rename = "SU", default, deserialize_with = "lenient::opt_string")]
    pub success: Option<String>,
    #[serde(rename = "T1", default, deserialize_with = "lenient::opt_string")]
    pub team: Option<String>,
    #[serde(rename = "C1", default, deserialize_with = "lenient::opt_string")]
    pub player: Option<String>,
    #[serde(rename = "SORTORDER", default, deserialize_with = "lenient::opt_i64")]
    pub sort_order: Option<i64>,
    #[serde(rename = "Time", default, deserialize_with = "lenient::opt_string")]
    pub time: Option<String>,
    #[serde(rename = "SA", default, deserialize_with = "lenient::opt_i64")]
    pub score_a: Option<i64>,
    #[serde(rename = "SB", default, deserialize_with = "lenient::opt_i64")]
    pub score_b: Option<i64>,
    #[serde(rename = "SX", default, deserialize_with = "lenient::opt_f64")]
    pub shot_x: Option<f64>,
    #[serde(rename = "SY", default, deserialize_with = "lenient::opt_f64")]
    pub shot_y: Option<f64>,
    #[serde(rename = "Z2", default, deserialize_with = "lenient::opt_string")]
    pub field_goal_zone: Option<String>,
    #[serde(rename = "Z3", default, deserialize_with = "lenient::opt_string")]
    pub free_throw_zone: Option<String>,
    #[serde(rename = "Action", default, deserialize_with = "lenient::opt_string")]
    pub action: Option<String>,
}

impl PlayByPlayEvent {
    /// Team the event names in `T1`, if any.
    pub fn team_ref(&self) -> Option<TeamRef> {
        self.team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(TeamRef::new)
    }

    /// Player id parsed from `C1`.
    pub fn player_id(&self) -> Option<i64> {
        self.player.as_deref().and_then(parse_player_reference)
    }

    pub fn is_success(&self) -> bool {
        self.success.as_deref() == Some("+")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodActions {
    #[serde(rename = "Items", default)]
    pub items: Vec<PlayByPlayEvent>,
}

/// The play-by-play document: period key (`Q1`, `Q2`, ...) to its actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayByPlay {
    #[serde(rename = "GameActions", default)]
    pub game_actions: BTreeMap<String, PeriodActions>,
}

impl PlayByPlay {
    /// Every event of every period key, including keys that do not parse as
    /// a period. Derived metrics are computed over this full stream.
    pub fn all_events(&self) -> impl Iterator<Item = (&str, &PlayByPlayEvent)> {
        self.game_actions
            .iter()
            .flat_map(|(key, actions)| actions.items.iter().map(move |ev| (key.as_str(), ev)))
    }

    pub fn event_count(&self) -> usize {
        self.game_actions.values().map(|a| a.items.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

pub fn box_score_from_reader<R: Read>(rdr: R) -> Result<BoxScore, serde_json::Error> {
    let rows: Vec<PlayerBoxRow> = serde_json::from_reader(rdr)?;
    debug!("parsed {} box-score rows", rows.len());
    Ok(BoxScore::new(rows))
}

pub fn play_by_play_from_reader<R: Read>(rdr: R) -> Result<PlayByPlay, serde_json::Error> {
    let pbp: PlayByPlay = serde_json::from_reader(rdr)?;
    if pbp.game_actions.is_empty() {
        warn!("play-by-play document has no GameActions");
    }
    debug!(
        "parsed {} play-by-play events across {} period keys",
        pbp.event_count(),
        pbp.game_actions.len()
    );
    Ok(pbp)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load the box-score document from a JSON file.
pub fn load_box_score(path: &Path) -> Result<BoxScore, FixtureError> {
    let file = std::fs::File::open(path).map_err(|e| FixtureError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let box_score = box_score_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        FixtureError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    if box_score.rows.is_empty() {
        return Err(FixtureError::Validation(format!(
            "box score {} has no rows",
            path.display()
        )));
    }
    Ok(box_score)
}

/// Load the play-by-play document from a JSON file.
pub fn load_play_by_play(path: &Path) -> Result<PlayByPlay, FixtureError> {
    let file = std::fs::File::open(path).map_err(|e| FixtureError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    play_by_play_from_reader(std::io::BufReader::new(file)).map_err(|e| FixtureError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Both documents of one game. Derivation only starts once both are loaded.
#[derive(Debug, Clone)]
pub struct GameFixtures {
    pub box_score: BoxScore,
    pub play_by_play: PlayByPlay,
}

pub fn load_game(box_score: &Path, play_by_play: &Path) -> Result<GameFixtures, FixtureError> {
    Ok(GameFixtures {
        box_score: load_box_score(box_score)?,
        play_by_play: load_play_by_play(play_by_play)?,
    })
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Counting stat: number, numeric string, null or missing (0).
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value
            .as_ref()
            .and_then(as_f64)
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i32)
            .unwrap_or(0))
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_f64).filter(|v| v.is_finite()))
    }

    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_i64))
    }

    pub fn required_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(d)?;
        as_i64(&value).ok_or_else(|| D::Error::custom(format!("expected an integer id, got {value}")))
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
