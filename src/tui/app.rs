//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Driving the calculator session

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::TracingObserver;
use crate::application::CalculatorSession;
use crate::config::AppConfig;
use crate::domain::{FieldControl, InputField};

use super::ui::{
    about::render_about,
    calculator::{render_calculator, CalculatorViewState},
    render_disclaimer,
};

/// Slider steps moved by PgUp / PgDn.
const PAGE_STEPS: i64 = 10;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calculator,
    About,
}

/// Main application state
pub struct App {
    screen: Screen,

    should_quit: bool,

    /// The one mutable input record and its live evaluation
    session: CalculatorSession,

    calculator_state: CalculatorViewState,
}

impl App {
    /// Create an application starting from the configured baseline inputs.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let mut session = CalculatorSession::new(config.initial_inputs());
        session.subscribe(Box::new(TracingObserver::new()));
        Self::with_session(session)
    }

    /// Create an application around an existing session.
    #[must_use]
    pub fn with_session(session: CalculatorSession) -> Self {
        Self {
            screen: Screen::Calculator,
            should_quit: false,
            session,
            calculator_state: CalculatorViewState::default(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    #[must_use]
    pub fn selected_field(&self) -> InputField {
        self.calculator_state.selected_field()
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(4)])
                    .split(f.area());

                match self.screen {
                    Screen::Calculator => render_calculator(
                        f,
                        chunks[0],
                        &self.calculator_state,
                        self.session.inputs(),
                        self.session.evaluation(),
                    ),
                    Screen::About => render_about(f, chunks[0]),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            // Redraw only on input (or resize); nothing changes on its own.
            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Raw mode swallows SIGINT, so Ctrl-C quits too.
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Calculator => self.handle_calculator_key(key),
            Screen::About => self.handle_about_key(key),
        }
    }

    fn handle_calculator_key(&mut self, key: KeyCode) {
        let field = self.calculator_state.selected_field();

        match key {
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
                self.calculator_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
                self.calculator_state.next_field();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.session.step(field, -1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.session.step(field, 1);
            }
            KeyCode::PageDown => {
                self.session.step(field, -PAGE_STEPS);
            }
            KeyCode::PageUp => {
                self.session.step(field, PAGE_STEPS);
            }
            KeyCode::Home | KeyCode::End => {
                if let FieldControl::Slider(bounds) = field.control() {
                    let target = if key == KeyCode::Home {
                        bounds.min
                    } else {
                        bounds.max
                    };
                    self.session.set_numeric(field, target);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.toggle(field);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('?') => {
                self.screen = Screen::About;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.screen = Screen::Calculator;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClinicalInputs, RiskCalculator};

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn test_app() -> App {
        App::new(&AppConfig::default())
    }

    #[test]
    fn test_starts_on_calculator_with_defaults() {
        let app = test_app();
        assert_eq!(app.screen(), Screen::Calculator);
        assert_eq!(app.session().inputs(), &ClinicalInputs::default());
        assert_eq!(app.selected_field(), InputField::EosIncidence);
    }

    #[test]
    fn test_arrow_keys_move_slider_and_rescore() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down); // maternal temperature
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().inputs().maternal_temp_c, 37.2);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.session().inputs().maternal_temp_c, 36.2);

        let expected = RiskCalculator::evaluate(app.session().inputs());
        assert_eq!(app.session().evaluation(), &expected);
    }

    #[test]
    fn test_home_and_end_jump_to_bounds() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down); // rupture of membranes
        press(&mut app, KeyCode::End);
        assert_eq!(app.session().inputs().rupture_of_membranes_hours, 240.0);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.session().inputs().rupture_of_membranes_hours, 0.0);
    }

    #[test]
    fn test_space_toggles_checkbox_only() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session().inputs(), &ClinicalInputs::default());

        press(&mut app, KeyCode::Up); // wraps to GBS unknown
        assert_eq!(app.selected_field(), InputField::GbsUnknown);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session().inputs().gbs_unknown);
        press(&mut app, KeyCode::Enter);
        assert!(!app.session().inputs().gbs_unknown);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = test_app();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().inputs().eos_incidence, 0.6);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().inputs(), &ClinicalInputs::default());
    }

    #[test]
    fn test_about_screen_navigation() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen(), Screen::About);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().inputs(), &ClinicalInputs::default());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Calculator);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_configured_baseline_incidence() {
        let config = AppConfig {
            baseline_incidence: 0.4,
            ..Default::default()
        };
        let mut app = App::new(&config);
        assert_eq!(app.session().inputs().eos_incidence, 0.4);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().inputs().eos_incidence, 0.4);
    }
}
