// Report output: stanza text tables, pretty JSON and the player CSV.

use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use courtside_core::pbp::Shot;
use courtside_core::report::GameReport;
use courtside_core::roster::write_box_score_csv;
use courtside_core::stats::compare::Comparison;
use courtside_core::stats::Side;

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn leader_mark(comparison: &Comparison, side: Side) -> &'static str {
    if comparison.leader() == Some(side) {
        "*"
    } else {
        ""
    }
}

fn comparison_table(rows: &[Comparison], local: &str, away: &str) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(30)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["".into(), local.to_string().into(), away.to_string().into()],
        ));
    table.push_rows(rows.iter().map(|c| {
        Row::new(
            Styles::default(),
            vec![
                c.label.into(),
                format!("{}{}", c.display(Side::Local), leader_mark(c, Side::Local)).into(),
                format!("{}{}", c.display(Side::Away), leader_mark(c, Side::Away)).into(),
            ],
        )
    }));
    table
}

fn timeline_table(report: &GameReport) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Periodo".into(),
                "Eventos".into(),
                "Canastas".into(),
                "Marcador".into(),
            ],
        ));
    table.push_rows(report.timeline.iter().map(|log| {
        let scoring = log.entries.iter().filter(|e| e.badge.is_some()).count();
        // entries run earliest first, so the last carrying a score is the
        // period's closing score
        let closing = log
            .entries
            .iter()
            .rev()
            .find(|e| e.score_a.is_some() || e.score_b.is_some())
            .map(|e| e.score_line())
            .unwrap_or_default();
        Row::new(
            Styles::default(),
            vec![
                log.period.label().into(),
                log.entries.len().to_string().into(),
                scoring.to_string().into(),
                closing.into(),
            ],
        )
    }));
    table
}

fn shot_row(name: &str, shots: &[Shot]) -> Row {
    let made = shots.iter().filter(|s| s.made).count();
    let pct = if shots.is_empty() {
        0.0
    } else {
        made as f64 / shots.len() as f64 * 100.0
    };
    Row::new(
        Styles::default(),
        vec![
            name.to_string().into(),
            shots.len().to_string().into(),
            made.to_string().into(),
            format!("{pct:.1}").into(),
        ],
    )
}

fn shots_table(report: &GameReport) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Equipo".into(), "Intentos".into(), "Anotados".into(), "%".into()],
        ));
    table.push_row(shot_row(report.teams.local_name(), &report.shots.local));
    table.push_row(shot_row(report.teams.away_name(), &report.shots.away));
    table
}

pub fn write_text(report: &GameReport, out: &mut dyn Write) -> anyhow::Result<()> {
    let summary = &report.summary;
    let console = Console::default();

    writeln!(
        out,
        "{} {} - {} {}",
        summary.local, summary.local_score, summary.away_score, summary.away
    )?;
    if let Some(side) = summary.winner() {
        let winner = match side {
            Side::Local => &summary.local,
            Side::Away => &summary.away,
        };
        writeln!(out, "Ganador: {winner}")?;
    }

    writeln!(out, "\nComparativa básica")?;
    writeln!(
        out,
        "{}",
        console.render(&comparison_table(&report.basic_comparisons, &summary.local, &summary.away))
    )?;

    writeln!(out, "\nComparativa avanzada")?;
    writeln!(
        out,
        "{}",
        console.render(&comparison_table(
            &report.advanced_comparisons,
            &summary.local,
            &summary.away
        ))
    )?;

    writeln!(out, "\nJugada a jugada")?;
    writeln!(out, "{}", console.render(&timeline_table(report)))?;

    writeln!(out, "\nMapa de tiros")?;
    writeln!(out, "{}", console.render(&shots_table(report)))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a GameReport,
}

pub fn write_json(report: &GameReport, out: &mut dyn Write) -> anyhow::Result<()> {
    let doc = JsonReport {
        generated_at: Utc::now(),
        report,
    };
    serde_json::to_writer_pretty(&mut *out, &doc).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

pub fn write_csv(report: &GameReport, out: &mut dyn Write) -> anyhow::Result<()> {
    write_box_score_csv(&report.rosters, out).context("failed to write box-score CSV")
}
