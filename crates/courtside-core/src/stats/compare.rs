// Side-by-side team comparisons and the game summary.
//
// Labels are the Spanish captions the game report is published with.

use serde::Serialize;

use super::aggregate::AdvancedMetrics;
use super::four_factors::FourFactorsReport;
use super::resolver::ResolvedTeams;
use super::totals::{TeamTotals, TeamTotalsByTeam};
use super::Side;

// ---------------------------------------------------------------------------
// Comparison rows
// ---------------------------------------------------------------------------

/// Which direction wins a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Better {
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Count,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub label: &'static str,
    pub local: f64,
    pub away: f64,
    pub better: Better,
    pub unit: Unit,
}

impl Comparison {
    fn count(label: &'static str, local: i32, away: i32, better: Better) -> Self {
        Self {
            label,
            local: f64::from(local),
            away: f64::from(away),
            better,
            unit: Unit::Count,
        }
    }

    fn percent(label: &'static str, local: u32, away: u32, better: Better) -> Self {
        Self {
            label,
            local: f64::from(local),
            away: f64::from(away),
            better,
            unit: Unit::Percent,
        }
    }

    /// The side with the better value, `None` on a tie.
    pub fn leader(&self) -> Option<Side> {
        let (better, worse) = match self.better {
            Better::Higher => (self.local > self.away, self.away > self.local),
            Better::Lower => (self.local < self.away, self.away < self.local),
        };
        if better {
            Some(Side::Local)
        } else if worse {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Bar lengths as a percentage of the larger value.
    pub fn bar_widths(&self) -> (f64, f64) {
        let max = self.local.max(self.away);
        if max > 0.0 {
            (self.local / max * 100.0, self.away / max * 100.0)
        } else {
            (0.0, 0.0)
        }
    }

    pub fn value(&self, side: Side) -> f64 {
        match side {
            Side::Local => self.local,
            Side::Away => self.away,
        }
    }

    /// Display form of one side's value, with a `%` suffix for percentages.
    pub fn display(&self, side: Side) -> String {
        let value = self.value(side);
        match self.unit {
            Unit::Count => format!("{value}"),
            Unit::Percent => format!("{value}%"),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn basic_comparisons(totals: &TeamTotalsByTeam) -> Vec<Comparison> {
    let (l, a) = (&totals.local, &totals.away);
    let count = |label: &'static str, f: fn(&TeamTotals) -> i32, better: Better| {
        Comparison::count(label, f(l), f(a), better)
    };
    let pct = |label: &'static str, f: fn(&TeamTotals) -> u32| {
        Comparison::percent(label, f(l), f(a), Better::Higher)
    };

    vec![
        count("Puntos", |t| t.points, Better::Higher),
        count("Tiros de campo anotados", |t| t.field_goals_made, Better::Higher),
        count("Tiros de campo intentados", |t| t.field_goals_attempted, Better::Higher),
        pct("Porcentaje de tiros de campo", TeamTotals::field_goal_percentage),
        count("Tiros de 2 anotados", |t| t.two_points_made, Better::Higher),
        count("Tiros de 2 intentados", |t| t.two_points_attempted, Better::Higher),
        pct("Porcentaje de tiros de 2", TeamTotals::two_point_percentage),
        count("Triples anotados", |t| t.three_points_made, Better::Higher),
        count("Triples intentados", |t| t.three_points_attempted, Better::Higher),
        pct("Porcentaje de triples", TeamTotals::three_point_percentage),
        count("Tiros libres anotados", |t| t.free_throws_made, Better::Higher),
        count("Tiros libres intentados", |t| t.free_throws_attempted, Better::Higher),
        pct("Porcentaje de tiros libres", TeamTotals::free_throw_percentage),
        count("Rebotes ofensivos", |t| t.offensive_rebounds, Better::Higher),
        count("Rebotes defensivos", |t| t.defensive_rebounds, Better::Higher),
        count("Rebotes totales", |t| t.rebounds, Better::Higher),
        count("Asistencias", |t| t.assists, Better::Higher),
        count("Faltas personales", |t| t.personal_fouls, Better::Lower),
        count("Pérdidas", |t| t.turnovers, Better::Lower),
        count("Robos", |t| t.steals, Better::Higher),
        count("Tapones", |t| t.blocked_shots, Better::Higher),
        count("Eficiencia total", |t| t.efficiency, Better::Higher),
    ]
}

/// The four derived metrics followed by the four factors.
pub fn advanced_comparisons(
    metrics: &AdvancedMetrics,
    factors: &FourFactorsReport,
) -> Vec<Comparison> {
    let (ml, ma) = (&metrics.local, &metrics.away);
    let (fl, fa) = (&factors.local, &factors.away);

    vec![
        Comparison::count(
            "Puntos al contraataque",
            ml.fast_break_points,
            ma.fast_break_points,
            Better::Higher,
        ),
        Comparison::count(
            "Puntos de segunda oportunidad",
            ml.second_chance_points,
            ma.second_chance_points,
            Better::Higher,
        ),
        Comparison::count(
            "Puntos tras pérdida",
            ml.points_off_turnovers,
            ma.points_off_turnovers,
            Better::Higher,
        ),
        Comparison::count("Puntos del banquillo", ml.bench_points, ma.bench_points, Better::Higher),
        Comparison::percent("Porcentaje de tiro efectivo", fl.efg, fa.efg, Better::Higher),
        Comparison::percent(
            "Porcentaje de pérdidas",
            fl.tov_percentage,
            fa.tov_percentage,
            Better::Lower,
        ),
        Comparison::percent(
            "Porcentaje de rebotes ofensivos capturados",
            fl.reb_percentage,
            fa.reb_percentage,
            Better::Higher,
        ),
        Comparison::percent("Factor de tiros libres", fl.ftf, fa.ftf, Better::Higher),
    ]
}

// ---------------------------------------------------------------------------
// Game summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub local: String,
    pub away: String,
    pub local_score: i32,
    pub away_score: i32,
}

impl GameSummary {
    pub fn winner(&self) -> Option<Side> {
        match self.local_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(Side::Local),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn score(&self, side: Side) -> i32 {
        match side {
            Side::Local => self.local_score,
            Side::Away => self.away_score,
        }
    }
}

/// Team names and final score. The score is the sum of row points per team.
pub fn game_summary(totals: &TeamTotalsByTeam, teams: &ResolvedTeams) -> GameSummary {
    GameSummary {
        local: teams.local_name().to_string(),
        away: teams.away_name().to_string(),
        local_score: totals.local.points,
        away_score: totals.away.points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate::TeamMetrics;
    use crate::stats::four_factors::FourFactors;
    use crate::stats::PerTeam;

    fn totals() -> TeamTotalsByTeam {
        PerTeam::new(
            TeamTotals {
                points: 80,
                field_goals_made: 30,
                field_goals_attempted: 60,
                personal_fouls: 18,
                turnovers: 10,
                ..Default::default()
            },
            TeamTotals {
                points: 74,
                field_goals_made: 28,
                field_goals_attempted: 70,
                personal_fouls: 15,
                turnovers: 10,
                ..Default::default()
            },
        )
    }

    fn find<'a>(rows: &'a [Comparison], label: &str) -> &'a Comparison {
        rows.iter().find(|c| c.label == label).unwrap()
    }

    #[test]
    fn basic_rows_keep_order_and_direction() {
        let rows = basic_comparisons(&totals());
        assert_eq!(rows.len(), 22);
        assert_eq!(rows[0].label, "Puntos");
        assert_eq!(rows.last().unwrap().label, "Eficiencia total");

        let fouls = find(&rows, "Faltas personales");
        assert_eq!(fouls.better, Better::Lower);
        assert_eq!(fouls.leader(), Some(Side::Away));

        let points = find(&rows, "Puntos");
        assert_eq!(points.leader(), Some(Side::Local));

        let turnovers = find(&rows, "Pérdidas");
        assert_eq!(turnovers.leader(), None);

        let fg = find(&rows, "Porcentaje de tiros de campo");
        assert_eq!(fg.unit, Unit::Percent);
        assert!((fg.local - 50.0).abs() < f64::EPSILON);
        assert!((fg.away - 40.0).abs() < f64::EPSILON);
        assert_eq!(fg.display(Side::Local), "50%");
        assert_eq!(points.display(Side::Away), "74");
    }

    #[test]
    fn bar_widths_scale_to_the_larger_value() {
        let rows = basic_comparisons(&totals());
        let (local, away) = find(&rows, "Tiros de campo intentados").bar_widths();
        assert!((away - 100.0).abs() < f64::EPSILON);
        assert!((local - 60.0 / 70.0 * 100.0).abs() < f64::EPSILON);

        let (l, a) = find(&rows, "Robos").bar_widths();
        assert!(l.abs() < f64::EPSILON && a.abs() < f64::EPSILON);
    }

    #[test]
    fn advanced_rows_end_with_four_factors() {
        let metrics = PerTeam::new(
            TeamMetrics {
                fast_break_points: 12,
                bench_points: 20,
                ..Default::default()
            },
            TeamMetrics {
                fast_break_points: 8,
                bench_points: 25,
                ..Default::default()
            },
        );
        let factors = PerTeam::new(
            FourFactors { efg: 49, tov_percentage: 13, reb_percentage: 25, ftf: 21 },
            FourFactors { efg: 48, tov_percentage: 18, reb_percentage: 26, ftf: 15 },
        );
        let rows = advanced_comparisons(&metrics, &factors);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].leader(), Some(Side::Local));
        assert_eq!(rows[3].leader(), Some(Side::Away));

        let tov = find(&rows, "Porcentaje de pérdidas");
        assert_eq!(tov.better, Better::Lower);
        assert_eq!(tov.leader(), Some(Side::Local));
        assert_eq!(find(&rows, "Factor de tiros libres").display(Side::Away), "15%");
    }

    #[test]
    fn winner_follows_score() {
        let mut summary = GameSummary {
            local: "A".into(),
            away: "B".into(),
            local_score: 80,
            away_score: 74,
        };
        assert_eq!(summary.winner(), Some(Side::Local));
        summary.away_score = 90;
        assert_eq!(summary.winner(), Some(Side::Away));
        summary.local_score = 90;
        assert_eq!(summary.winner(), None);
        assert_eq!(summary.score(Side::Local), 90);
    }
}
