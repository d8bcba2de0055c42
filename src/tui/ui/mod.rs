//! UI module: View components for the TUI.

pub mod about;
pub mod calculator;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Study the model was derived in.
pub const MODEL_CITATION: &str = "Puopolo et al. 2011, doi:10.1542/peds.2010-3464";

/// Study reporting the complete set of weights.
pub const WEIGHTS_CITATION: &str =
    "van der Weijden et al. 2024, doi:10.1016/S2589-7500(23)00253-4";

/// Footer text shown under every screen.
#[must_use]
pub fn disclaimer_lines() -> [String; 2] {
    [
        "DISCLAIMER: This tool provides indicative estimates and does not replace clinical judgement."
            .to_string(),
        format!("Model: {MODEL_CITATION}. Weights: {WEIGHTS_CITATION}."),
    ]
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text: Vec<Line> = disclaimer_lines()
        .into_iter()
        .map(|line| Line::from(Span::styled(line, MedicalTheme::text_muted())))
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
