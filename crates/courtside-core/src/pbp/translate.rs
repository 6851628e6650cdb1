// English action descriptions to Spanish labels.
//
// Rules are tried in order against the lower-cased, whitespace-collapsed text
// and the first match wins, so specific patterns sit above general ones
// (`personal foul; two free throws awarded` before `personal foul`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const RULE_TABLE: &[(&str, &str)] = &[
    (r"start of (period|quarter)", "Inicio del cuarto"),
    (r"end of (period|quarter)", "Fin del cuarto"),
    (r"start of game", "Inicio del partido"),
    (r"end of game", "Final del partido"),
    // rebounds
    (r"defensive rebound", "Rebote defensivo"),
    (r"offensive rebound", "Rebote ofensivo"),
    // field goals
    (r"3pt.*made", "Triple anotado"),
    (r"3pt.*miss(ed)?", "Triple fallado"),
    (r"2pt.*made", "Tiro de 2 anotado"),
    (r"2pt.*miss(ed)?", "Tiro de 2 fallado"),
    (r"layup.*made", "Bandeja anotada"),
    (r"layup.*miss(ed)?", "Bandeja fallada"),
    (r"dunk.*made", "Mate anotado"),
    (r"dunk.*miss(ed)?", "Mate fallado"),
    (r"jump shot.*made", "Tiro anotado"),
    (r"jump shot.*miss(ed)?", "Tiro fallado"),
    (r"free throw.*made", "Tiro libre anotado"),
    (r"free throw.*miss(ed)?", "Tiro libre fallado"),
    // fouls
    (r"personal foul.*two free throws awarded", "Falta personal; 2 tiros libres"),
    (r"personal foul", "Falta personal"),
    (r"(shooting|shoot) foul", "Falta de tiro"),
    (r"blocking foul", "Falta en defensa (bloqueo)"),
    (r"(offensive|charging) foul", "Falta en ataque"),
    (r"double foul", "Doble falta"),
    (r"unsportsmanlike foul", "Falta antideportiva"),
    (r"technical foul", "Falta técnica"),
    (r"foul drawn", "Falta recibida"),
    // possession
    (r"jump ball.*won", "Salto entre dos (ganado)"),
    (r"jump ball.*lost", "Salto entre dos (perdido)"),
    (r"jump ball", "Salto entre dos"),
    (r"block(ed)?", "Tapón"),
    (r"steal", "Robo"),
    (r"assist", "Asistencia"),
    // turnovers
    (r"turnover.*travel", "Pérdida: pasos"),
    (r"turnover.*bad pass", "Pérdida: mal pase"),
    (r"turnover.*lost ball", "Pérdida: balón perdido"),
    (r"turnover.*out of bounds", "Pérdida: fuera de banda"),
    (r"turnover.*double dribble", "Pérdida: dobles"),
    (r"turnover.*carry", "Pérdida: acompañamiento"),
    (r"turnover.*5 second", "Pérdida: 5 segundos"),
    (r"turnover.*8 second", "Pérdida: 8 segundos"),
    (r"turnover.*backcourt", "Pérdida: campo atrás"),
    (r"turnover.*shot clock", "Pérdida: 24 segundos"),
    (r"turnover.*3 second", "Pérdida: 3 segundos"),
    (r"turnover.*ball handling", "Pérdida: mal manejo de balón"),
    (r"offensive goaltending", "Interferencia ofensiva"),
    (r"defensive goaltending", "Interferencia defensiva"),
    // bench
    (r"timeout", "Tiempo muerto"),
    (r"substitution.*\bin\b", SUBSTITUTION_IN),
    (r"substitution.*\bout\b", SUBSTITUTION_OUT),
];

const SUBSTITUTION_IN: &str = "Cambio (entra)";
const SUBSTITUTION_OUT: &str = "Cambio (sale)";

struct Rule {
    pattern: Regex,
    label: &'static str,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(pattern, label)| Rule {
            pattern: Regex::new(pattern).expect("action rule pattern is valid"),
            label,
        })
        .collect()
});

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Spanish label for an English action description. Unmatched text comes
/// back as-is with its first letter capitalised.
pub fn translate_action(text: &str) -> String {
    let normalized = normalize(text);
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map(|rule| rule.label.to_string())
        .unwrap_or_else(|| capitalize(text))
}

/// Player entering or leaving the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Substitution {
    In,
    Out,
}

impl Substitution {
    /// Detect a substitution from a translated label.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        if lower.contains(&SUBSTITUTION_IN.to_lowercase()) {
            Some(Substitution::In)
        } else if lower.contains(&SUBSTITUTION_OUT.to_lowercase()) {
            Some(Substitution::Out)
        } else {
            None
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Substitution::In => ">>",
            Substitution::Out => "<<",
        }
    }
}
