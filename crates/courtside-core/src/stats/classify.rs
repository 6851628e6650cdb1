// Event classification: shot type, point value and the derived-metric
// buckets a made shot feeds.
//
// Field goals carry their scoring context in `Z2`, free throws in `Z3`. The
// zone-to-bucket table below follows the feed's own coding; it has not been
// checked against the FIBA definitions of these statistics.

use serde::Serialize;

use crate::fixtures::{PlayByPlayEvent, TeamRef};

// ---------------------------------------------------------------------------
// Shot types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShotType {
    TwoPoint,
    ThreePoint,
    FreeThrow,
}

impl ShotType {
    /// Parse a feed action code. Non-shooting codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "P2" => Some(ShotType::TwoPoint),
            "P3" => Some(ShotType::ThreePoint),
            "FT" => Some(ShotType::FreeThrow),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ShotType::TwoPoint => "P2",
            ShotType::ThreePoint => "P3",
            ShotType::FreeThrow => "FT",
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
            ShotType::FreeThrow => 1,
        }
    }

    pub fn is_field_goal(&self) -> bool {
        matches!(self, ShotType::TwoPoint | ShotType::ThreePoint)
    }

    /// The zone field this shot type is tagged with.
    pub fn zone_code<'a>(&self, event: &'a PlayByPlayEvent) -> Option<&'a str> {
        match self {
            ShotType::TwoPoint | ShotType::ThreePoint => event.field_goal_zone.as_deref(),
            ShotType::FreeThrow => event.free_throw_zone.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Zones and buckets
// ---------------------------------------------------------------------------

/// Derived metric a made shot can be credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    FastBreak,
    SecondChance,
    OffTurnover,
}

/// Scoring context attached to a made shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    /// `FB`
    FastBreak,
    /// `SC`
    SecondChance,
    /// `TO`
    OffTurnover,
    /// `SF`
    SecondChanceFastBreak,
    /// `ST`
    OffTurnoverSecondChance,
    /// `FT`
    FreeThrowContext,
    /// `AL`
    AllThree,
}

impl Zone {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "FB" => Some(Zone::FastBreak),
            "SC" => Some(Zone::SecondChance),
            "TO" => Some(Zone::OffTurnover),
            "SF" => Some(Zone::SecondChanceFastBreak),
            "ST" => Some(Zone::OffTurnoverSecondChance),
            "FT" => Some(Zone::FreeThrowContext),
            "AL" => Some(Zone::AllThree),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Zone::FastBreak => "FB",
            Zone::SecondChance => "SC",
            Zone::OffTurnover => "TO",
            Zone::SecondChanceFastBreak => "SF",
            Zone::OffTurnoverSecondChance => "ST",
            Zone::FreeThrowContext => "FT",
            Zone::AllThree => "AL",
        }
    }

    pub fn buckets(&self) -> &'static [Bucket] {
        match self {
            Zone::FastBreak => &[Bucket::FastBreak],
            Zone::SecondChance => &[Bucket::SecondChance],
            Zone::OffTurnover => &[Bucket::OffTurnover],
            Zone::SecondChanceFastBreak => &[Bucket::FastBreak, Bucket::SecondChance],
            Zone::OffTurnoverSecondChance => &[Bucket::OffTurnover, Bucket::SecondChance],
            Zone::FreeThrowContext => &[Bucket::OffTurnover, Bucket::FastBreak],
            Zone::AllThree => &[Bucket::OffTurnover, Bucket::FastBreak, Bucket::SecondChance],
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A made shot, ready to be credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringEvent {
    pub team: Option<TeamRef>,
    pub shot: ShotType,
    pub points: i32,
    pub zone: Option<Zone>,
}

impl ScoringEvent {
    /// Buckets credited by this event; empty when the zone is missing or
    /// unrecognised.
    pub fn buckets(&self) -> &'static [Bucket] {
        self.zone.map(|z| z.buckets()).unwrap_or(&[])
    }
}

/// Classify one play-by-play event. Returns `None` for anything but a made
/// two-pointer, three-pointer or free throw.
pub fn classify(event: &PlayByPlayEvent) -> Option<ScoringEvent> {
    let shot = ShotType::from_code(&event.action_code)?;
    if !event.is_success() {
        return None;
    }
    Some(ScoringEvent {
        team: event.team_ref(),
        shot,
        points: shot.points(),
        zone: shot.zone_code(event).and_then(Zone::from_code),
    })
}

/// `+1`, `+2` or `+3` for a made shot.
pub fn scoring_badge(event: &PlayByPlayEvent) -> Option<&'static str> {
    classify(event).map(|scored| match scored.shot {
        ShotType::FreeThrow => "+1",
        ShotType::TwoPoint => "+2",
        ShotType::ThreePoint => "+3",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: &str, success: &str, z2: Option<&str>, z3: Option<&str>) -> PlayByPlayEvent {
        PlayByPlayEvent {
            action_code: code.into(),
            success: Some(success.into()),
            team: Some("T_1".into()),
            field_goal_zone: z2.map(Into::into),
            free_throw_zone: z3.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn made_shots_are_scoring_events() {
        let three = classify(&event("P3", "+", Some("FB"), None)).unwrap();
        assert_eq!(three.shot, ShotType::ThreePoint);
        assert_eq!(three.points, 3);
        assert_eq!(three.zone, Some(Zone::FastBreak));
        assert_eq!(three.buckets(), &[Bucket::FastBreak]);
        assert_eq!(three.team, Some(TeamRef::new("T_1")));

        assert_eq!(classify(&event("P2", "+", None, None)).unwrap().points, 2);
        assert_eq!(classify(&event("FT", "+", None, None)).unwrap().points, 1);
    }

    #[test]
    fn misses_and_other_actions_are_skipped() {
        assert!(classify(&event("P2", "-", Some("FB"), None)).is_none());
        assert!(classify(&event("FT", "", None, Some("AL"))).is_none());
        for code in ["REB", "FOUL", "TO", "SUBST", "TOUT", "STARTPER", "ENDPER", "??"] {
            assert!(classify(&event(code, "+", Some("FB"), None)).is_none(), "{code}");
        }
    }

    #[test]
    fn field_goals_read_z2_and_free_throws_read_z3() {
        let fg = classify(&event("P2", "+", Some("SC"), Some("TO"))).unwrap();
        assert_eq!(fg.zone, Some(Zone::SecondChance));

        let ft = classify(&event("FT", "+", Some("SC"), Some("TO"))).unwrap();
        assert_eq!(ft.zone, Some(Zone::OffTurnover));
    }

    #[test]
    fn zone_bucket_table() {
        use Bucket::*;
        let cases: &[(&str, &[Bucket])] = &[
            ("FB", &[FastBreak]),
            ("SC", &[SecondChance]),
            ("TO", &[OffTurnover]),
            ("SF", &[FastBreak, SecondChance]),
            ("ST", &[OffTurnover, SecondChance]),
            ("FT", &[OffTurnover, FastBreak]),
            ("AL", &[OffTurnover, FastBreak, SecondChance]),
        ];
        for (code, expected) in cases {
            let zone = Zone::from_code(code).unwrap();
            assert_eq!(zone.code(), *code);
            assert_eq!(zone.buckets(), *expected, "{code}");
        }
    }

    #[test]
    fn unknown_zone_credits_nothing() {
        let scored = classify(&event("P3", "+", Some("XX"), None)).unwrap();
        assert_eq!(scored.zone, None);
        assert!(scored.buckets().is_empty());

        let untagged = classify(&event("P2", "+", None, None)).unwrap();
        assert!(untagged.buckets().is_empty());
    }

    #[test]
    fn badges_follow_shot_value() {
        assert_eq!(scoring_badge(&event("P3", "+", None, None)), Some("+3"));
        assert_eq!(scoring_badge(&event("P2", "+", None, None)), Some("+2"));
        assert_eq!(scoring_badge(&event("FT", "+", None, None)), Some("+1"));
        assert_eq!(scoring_badge(&event("P3", "-", None, None)), None);
    }
}
