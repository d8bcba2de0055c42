//! Calculator view: inputs, transformed and weighted values, and the result.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::domain::{
    format_gestational_age, ClinicalInputs, Feature, FieldControl, InputField, RiskEvaluation,
    RiskResult, SliderBounds,
};
use crate::tui::styles::MedicalTheme;

const SLIDER_WIDTH: usize = 12;

/// Risk per 1000 births shown as a full risk gauge.
pub const GAUGE_FULL_SCALE_PER_1000: f64 = 10.0;

/// Which input row has focus.
#[derive(Debug, Default)]
pub struct CalculatorViewState {
    pub selected: usize,
}

impl CalculatorViewState {
    #[must_use]
    pub fn selected_field(&self) -> InputField {
        InputField::ALL[self.selected % InputField::ALL.len()]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % InputField::ALL.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = InputField::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// One display row of the calculator table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Editable input behind the row; `None` for derived rows
    pub field: Option<InputField>,
    pub label: &'static str,
    pub input: String,
    pub transformed: String,
    pub weighted: String,
}

/// Model feature weighted from an input (the incidence feeds the intercept instead).
fn feature_for(field: InputField) -> Option<Feature> {
    match field {
        InputField::EosIncidence => None,
        InputField::MaternalTemp => Some(Feature::TemperatureF),
        InputField::RuptureOfMembranes => Some(Feature::RuptureOfMembranes),
        InputField::GestationalAge => Some(Feature::GestationalAge),
        InputField::AntibioticsGivenEarly => Some(Feature::AntibioticsGivenEarly),
        InputField::Antibiotics2To4hPrior => Some(Feature::Antibiotics2To4hPrior),
        InputField::GbsPositive => Some(Feature::GbsPositive),
        InputField::GbsUnknown => Some(Feature::GbsUnknown),
    }
}

fn is_indicator(feature: Feature) -> bool {
    matches!(
        feature,
        Feature::AntibioticsGivenEarly
            | Feature::Antibiotics2To4hPrior
            | Feature::GbsPositive
            | Feature::GbsUnknown
    )
}

fn format_transformed(feature: Feature, value: f64) -> String {
    match feature {
        Feature::RuptureOfMembranes => format!("{value:.3}"),
        Feature::GestationalAgeSquared => format!("{value:.0}"),
        f if is_indicator(f) => format!("{value:.0}"),
        _ => format!("{value:.1}"),
    }
}

fn format_weighted(feature: Feature, value: f64) -> String {
    match feature {
        Feature::RuptureOfMembranes => format!("{value:.3}"),
        // Indicators show the raw weight, or a plain 0 when off.
        f if is_indicator(f) => {
            if value == 0.0 {
                "0".to_string()
            } else {
                value.to_string()
            }
        }
        _ => format!("{value:.1}"),
    }
}

/// Text slider such as `[=====-------]`.
#[must_use]
pub fn slider_bar(bounds: &SliderBounds, value: f64) -> String {
    let span = bounds.max - bounds.min;
    let fraction = if span > 0.0 {
        ((value - bounds.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * SLIDER_WIDTH as f64).round() as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(SLIDER_WIDTH - filled))
}

fn display_value(field: InputField, value: f64) -> String {
    match field {
        InputField::GestationalAge => format_gestational_age(value),
        InputField::RuptureOfMembranes => format!("{value:.0}"),
        _ => format!("{value:.1}"),
    }
}

fn input_cell(field: InputField, inputs: &ClinicalInputs) -> String {
    match field.control() {
        FieldControl::Slider(bounds) => {
            let value = inputs.numeric(field).unwrap_or(bounds.min);
            format!("{} {}", slider_bar(&bounds, value), display_value(field, value))
        }
        FieldControl::Checkbox => {
            if inputs.flag(field).unwrap_or(false) {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
    }
}

/// Build the table rows for the current inputs and evaluation.
#[must_use]
pub fn table_rows(inputs: &ClinicalInputs, evaluation: &RiskEvaluation) -> Vec<RowView> {
    let mut rows = Vec::with_capacity(InputField::ALL.len() + 1);

    for field in InputField::ALL {
        let (transformed, weighted) = match feature_for(field) {
            Some(feature) => (
                format_transformed(feature, evaluation.transformed.get(feature)),
                format_weighted(feature, evaluation.weighted.get(feature)),
            ),
            None => (
                format!("{:.1}", evaluation.transformed.intercept),
                format!("{:.1}", evaluation.weighted.intercept),
            ),
        };

        rows.push(RowView {
            field: Some(field),
            label: field.label(),
            input: input_cell(field, inputs),
            transformed,
            weighted,
        });

        if field == InputField::GestationalAge {
            let feature = Feature::GestationalAgeSquared;
            rows.push(RowView {
                field: None,
                label: "Gestational Age (weeks), squared",
                input: String::new(),
                transformed: format_transformed(feature, evaluation.transformed.get(feature)),
                weighted: format_weighted(feature, evaluation.weighted.get(feature)),
            });
        }
    }

    rows
}

/// Explanatory text for an input row.
#[must_use]
pub fn field_details(field: InputField) -> Vec<String> {
    let weighting = |feature: Feature| format!("Weighting: {}", feature.coefficient());

    match field {
        InputField::EosIncidence => vec![
            "This value comes from a lookup table;".to_string(),
            "it's different for each specific incidence.".to_string(),
            "Weighting: 1".to_string(),
        ],
        InputField::MaternalTemp => vec![
            "Temperature converted to degrees F (C * 1.8 + 32).".to_string(),
            weighting(Feature::TemperatureF),
        ],
        InputField::RuptureOfMembranes => vec![
            "ROM transformed using (ROM + 0.05)^0.2".to_string(),
            weighting(Feature::RuptureOfMembranes),
        ],
        InputField::GestationalAge => vec![
            "GA in weeks.".to_string(),
            weighting(Feature::GestationalAge),
            "Squared term: (GA in weeks)^2".to_string(),
            weighting(Feature::GestationalAgeSquared),
        ],
        _ => {
            let mut lines = vec!["1 if true; 0 if false.".to_string()];
            if let Some(feature) = feature_for(field) {
                lines.push(weighting(feature));
            }
            lines
        }
    }
}

/// `(label, value, explanation)` for each result line.
#[must_use]
pub fn result_lines(result: &RiskResult) -> [(&'static str, String, &'static str); 3] {
    [
        (
            "Logit",
            format!("{:.4}", result.logit),
            "Sum of all the weighted individual scores",
        ),
        (
            "Sepsis Risk",
            format!("{:.5}", result.probability),
            "Logistic transform 1/(1+e^-logit) of the logit",
        ),
        (
            "Risk per 1000 births",
            format!("{:.2}", result.per_1000_births()),
            "Risk per birth x1000",
        ),
    ]
}

/// Gauge ratio and label for a result.
///
/// EOS risks are far below 1%, so the gauge spans 0 to
/// `GAUGE_FULL_SCALE_PER_1000` cases per 1000 births and saturates above it.
#[must_use]
pub fn risk_gauge(result: &RiskResult) -> (f64, String) {
    let per_1000 = result.per_1000_births();
    let ratio = per_1000 / GAUGE_FULL_SCALE_PER_1000;
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    (
        ratio,
        format!("{per_1000:.2} / 1000 (scale 0-{GAUGE_FULL_SCALE_PER_1000})"),
    )
}

/// Render the calculator screen
pub fn render_calculator(
    f: &mut Frame,
    area: Rect,
    state: &CalculatorViewState,
    inputs: &ClinicalInputs,
    evaluation: &RiskEvaluation,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_table(f, columns[0], state, inputs, evaluation);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(columns[1]);

    render_results(f, side[0], &evaluation.result);
    render_details(f, side[1], state.selected_field());
    render_footer(f, chunks[2], state.selected_field());
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Neonatal Sepsis Risk Calculator", MedicalTheme::title()),
        Span::styled(" │ Early-Onset Sepsis", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    state: &CalculatorViewState,
    inputs: &ClinicalInputs,
    evaluation: &RiskEvaluation,
) {
    let selected = state.selected_field();

    let rows: Vec<Row> = table_rows(inputs, evaluation)
        .into_iter()
        .map(|row| {
            let style = if row.field == Some(selected) {
                MedicalTheme::selected()
            } else if row.field.is_none() {
                MedicalTheme::text_muted()
            } else {
                MedicalTheme::text()
            };
            Row::new(vec![
                Cell::from(row.label),
                Cell::from(row.input),
                Cell::from(row.transformed),
                Cell::from(row.weighted),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["", "Input", "Transformed", "Weighted"])
        .style(MedicalTheme::header())
        .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(38),
            Constraint::Percentage(34),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(Span::styled(" Model Inputs ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );

    f.render_widget(table, area);
}

fn render_results(f: &mut Frame, area: Rect, result: &RiskResult) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Length(3)])
        .split(area);

    let mut lines = Vec::new();
    for (label, value, explanation) in result_lines(result) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), MedicalTheme::text_secondary()),
            Span::styled(value, MedicalTheme::result_value()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {explanation}"),
            MedicalTheme::text_muted(),
        )));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(lines).block(block), parts[0]);

    let (ratio, label) = risk_gauge(result);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Sepsis Risk ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::result_value())
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, parts[1]);
}

fn render_details(f: &mut Frame, area: Rect, field: InputField) {
    let lines: Vec<Line> = std::iter::once(Line::from(Span::styled(
        field.label(),
        MedicalTheme::focused(),
    )))
    .chain(
        field_details(field)
            .into_iter()
            .map(|text| Line::from(Span::styled(text, MedicalTheme::text()))),
    )
    .collect();

    let block = Block::default()
        .title(Span::styled(" Details ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_footer(f: &mut Frame, area: Rect, field: InputField) {
    let edit_hint = match field.control() {
        FieldControl::Slider(_) => vec![
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Adjust ", MedicalTheme::key_desc()),
            Span::styled("[PgUp/PgDn] ", MedicalTheme::key_hint()),
            Span::styled("x10 ", MedicalTheme::key_desc()),
        ],
        FieldControl::Checkbox => vec![
            Span::styled("[Space] ", MedicalTheme::key_hint()),
            Span::styled("Toggle ", MedicalTheme::key_desc()),
        ],
    };

    let mut spans = vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
    ];
    spans.extend(edit_hint);
    spans.extend([
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Reset ", MedicalTheme::key_desc()),
        Span::styled("[A] ", MedicalTheme::key_hint()),
        Span::styled("About ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskCalculator;

    fn default_rows() -> Vec<RowView> {
        let inputs = ClinicalInputs::default();
        table_rows(&inputs, &RiskCalculator::evaluate(&inputs))
    }

    #[test]
    fn test_rows_include_squared_term() {
        let rows = default_rows();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[4].field, None);
        assert_eq!(rows[3].field, Some(InputField::GestationalAge));
    }

    #[test]
    fn test_default_row_formatting() {
        let rows = default_rows();
        assert_eq!(rows[0].transformed, "41.0");
        assert_eq!(rows[0].weighted, "41.0");
        assert_eq!(rows[1].transformed, "98.6");
        assert_eq!(rows[1].weighted, "85.6");
        assert_eq!(rows[2].transformed, "1.645");
        assert_eq!(rows[2].weighted, "2.016");
        assert_eq!(rows[3].transformed, "40.0");
        assert_eq!(rows[3].weighted, "-277.3");
        assert_eq!(rows[4].transformed, "1600");
        assert_eq!(rows[4].weighted, "140.3");
        assert!(rows[3].input.ends_with("40 weeks 0 days"));
        for row in &rows[5..] {
            assert_eq!(row.input, "[ ]");
            assert_eq!(row.transformed, "0");
            assert_eq!(row.weighted, "0");
        }
    }

    #[test]
    fn test_checked_flag_shows_weight() {
        let inputs = ClinicalInputs {
            antibiotics_given_early: true,
            ..Default::default()
        };
        let rows = table_rows(&inputs, &RiskCalculator::evaluate(&inputs));
        assert_eq!(rows[5].input, "[x]");
        assert_eq!(rows[5].transformed, "1");
        assert_eq!(rows[5].weighted, "-1.1861");
    }

    #[test]
    fn test_slider_bar_extremes() {
        let bounds = SliderBounds::new(0.0, 240.0, 1.0);
        assert_eq!(slider_bar(&bounds, 0.0), "[------------]");
        assert_eq!(slider_bar(&bounds, 240.0), "[============]");
        assert_eq!(slider_bar(&bounds, 120.0), "[======------]");
    }

    #[test]
    fn test_result_precision() {
        let lines = result_lines(&RiskResult::from_logit(0.0));
        assert_eq!(lines[0].1, "0.0000");
        assert_eq!(lines[1].1, "0.50000");
        assert_eq!(lines[2].1, "500.00");
    }

    #[test]
    fn test_risk_gauge_is_scaled_and_clamped() {
        let inputs = ClinicalInputs::default();
        let (ratio, label) = risk_gauge(&RiskCalculator::score(&inputs));
        assert!((ratio - 0.02386).abs() < 1e-4);
        assert!(label.starts_with("0.24 / 1000"));

        let (ratio, _) = risk_gauge(&RiskResult::from_logit(0.0));
        assert_eq!(ratio, 1.0);

        let (ratio, _) = risk_gauge(&RiskResult {
            logit: f64::NAN,
            probability: f64::NAN,
        });
        assert_eq!(ratio, 0.0);
    }

    #[test]
    fn test_details_quote_coefficients() {
        assert!(field_details(InputField::MaternalTemp).contains(&"Weighting: 0.868".to_string()));
        assert!(field_details(InputField::GbsUnknown).contains(&"Weighting: 0.0427".to_string()));
        assert_eq!(field_details(InputField::GestationalAge).len(), 4);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = CalculatorViewState::default();
        state.prev_field();
        assert_eq!(state.selected_field(), InputField::GbsUnknown);
        state.next_field();
        assert_eq!(state.selected_field(), InputField::EosIncidence);
    }
}
