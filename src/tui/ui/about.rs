//! About view: model provenance and constant tables.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::model::INTERCEPT_TABLE;
use crate::domain::{Feature, ROM_EXPONENT, ROM_OFFSET_HOURS};
use crate::tui::styles::MedicalTheme;

use super::{MODEL_CITATION, WEIGHTS_CITATION};

/// Render the about screen
pub fn render_about(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Model description
            Constraint::Min(0),    // Tables
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_description(f, chunks[0]);

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_intercepts(f, tables[0]);
    render_coefficients(f, tables[1]);
    render_about_footer(f, chunks[2]);
}

/// Who built the calculator and for what occasion.
pub const ATTRIBUTION: &str =
    "Created by Alex Brown for the London School of Paediatrics AI Teaching Day";

/// `(heading, text)` pairs for the model description panel.
#[must_use]
pub fn description_lines() -> Vec<(&'static str, String)> {
    vec![
        (
            "",
            "Logistic regression model for neonatal early-onset sepsis.".to_string(),
        ),
        (
            "",
            format!(
                "logit = intercept(incidence) + Σ weight × feature;  ROM feature = (hours + {ROM_OFFSET_HOURS})^{ROM_EXPONENT}"
            ),
        ),
        ("", "risk = 1 / (1 + e^-logit)".to_string()),
        ("Model derived in: ", MODEL_CITATION.to_string()),
        ("Complete weights reported in: ", WEIGHTS_CITATION.to_string()),
        ("", ATTRIBUTION.to_string()),
    ]
}

fn render_description(f: &mut Frame, area: Rect) {
    let text: Vec<Line> = description_lines()
        .into_iter()
        .map(|(heading, body)| {
            if heading.is_empty() {
                Line::from(Span::styled(body, MedicalTheme::text_secondary()))
            } else {
                Line::from(vec![
                    Span::styled(heading, MedicalTheme::text_secondary()),
                    Span::styled(body, MedicalTheme::focused()),
                ])
            }
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" About the Model ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_intercepts(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = INTERCEPT_TABLE
        .iter()
        .map(|(incidence, intercept)| {
            Line::from(vec![
                Span::styled(format!("  {incidence:.1} / 1000  "), MedicalTheme::text_secondary()),
                Span::styled(format!("{intercept}"), MedicalTheme::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Intercept by EOS Incidence ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_coefficients(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = Feature::ALL
        .iter()
        .map(|feature| {
            Line::from(vec![
                Span::styled(format!("  {:<28}", feature.name()), MedicalTheme::text_secondary()),
                Span::styled(format!("{}", feature.coefficient()), MedicalTheme::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Coefficients ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_about_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Back ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
