//! Application state and event loop

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
    DefaultTerminal, Frame,
};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::services::{
    evaluate, Aggregator, DashboardQuery, DashboardView, DataLoaderService, LoadStage, Question,
    UserTypeFilter,
};
use crate::types::{Dataset, DatasetSummary, Language, Result};

use super::theme::Theme;
use super::widgets::{
    explanation::ExplanationPopup, help::HelpPopup, hourly::HourlyPage, seasons::SeasonsPage,
    slider::SliderHandle, spinner::Spinner, users::UsersPage,
};

/// Application state
pub enum AppState {
    /// Loading data with spinner animation
    Loading {
        spinner_frame: usize,
        stage: LoadStage,
    },
    /// Ready with loaded data
    Ready { data: Box<AppData> },
    /// Loading failed; nothing to show but the reason
    Error { message: String },
}

/// Loaded dataset plus the view for the current selections
pub struct AppData {
    pub dataset: Dataset,
    pub summary: DatasetSummary,
    pub view: DashboardView,
}

/// Messages from the loader thread
enum LoadMessage {
    Stage(LoadStage),
    Done(Result<Dataset>),
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    query: DashboardQuery,
    handle: SliderHandle,
    show_help: bool,
    show_explanation: bool,
    theme: Theme,
    language: Language,
}

impl App {
    /// Create a new app in loading state
    pub fn new(theme: Theme, language: Language) -> Self {
        Self {
            state: AppState::Loading {
                spinner_frame: 0,
                stage: LoadStage::Reading,
            },
            should_quit: false,
            query: DashboardQuery::default(),
            handle: SliderHandle::default(),
            show_help: false,
            show_explanation: false,
            theme,
            language,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let before = self.query;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.select_question(self.query.question.next()),
            KeyCode::BackTab => self.select_question(self.query.question.prev()),
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(question) = Question::from_number(c as u8 - b'0') {
                    self.select_question(question);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.shift_slider(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_slider(1),
            KeyCode::Char('[') => self.handle = SliderHandle::Lo,
            KeyCode::Char(']') => self.handle = SliderHandle::Hi,
            KeyCode::Up | KeyCode::Char('k')
                if self.query.question == Question::SeasonWeatherPattern =>
            {
                self.query.season = self.query.season.prev();
            }
            KeyCode::Down | KeyCode::Char('j')
                if self.query.question == Question::SeasonWeatherPattern =>
            {
                self.query.season = self.query.season.next();
            }
            KeyCode::Char('b') if self.query.question == Question::UserTypeComparison => {
                self.query.user_type = UserTypeFilter::Both;
            }
            KeyCode::Char('c') if self.query.question == Question::UserTypeComparison => {
                self.query.user_type = UserTypeFilter::Casual;
            }
            KeyCode::Char('r') if self.query.question == Question::UserTypeComparison => {
                self.query.user_type = UserTypeFilter::Registered;
            }
            KeyCode::Char('e') => {
                self.show_explanation = !self.show_explanation;
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            _ => {}
        }

        if self.query != before {
            self.refresh_view();
        }
    }

    fn select_question(&mut self, question: Question) {
        self.query.question = question;
        self.handle = SliderHandle::default();
    }

    /// Move the active handle of the page's range slider
    fn shift_slider(&mut self, delta: i16) {
        let range = match self.query.question {
            Question::HourlyPattern => &mut self.query.hours,
            Question::UserTypeComparison => &mut self.query.months,
            Question::SeasonWeatherPattern => return,
        };
        *range = match self.handle {
            SliderHandle::Lo => range.shift_lo(delta),
            SliderHandle::Hi => range.shift_hi(delta),
        };
    }

    /// Re-evaluate the current query against the loaded dataset
    fn refresh_view(&mut self) {
        let AppState::Ready { data } = &mut self.state else {
            return;
        };
        match evaluate(&data.dataset, &self.query) {
            Ok(view) => data.view = view,
            Err(e) => warn!(error = %e, "keeping previous view"),
        }
    }

    fn apply_message(&mut self, message: LoadMessage) {
        match message {
            LoadMessage::Stage(stage) => {
                if let AppState::Loading { spinner_frame, .. } = self.state {
                    self.state = AppState::Loading {
                        spinner_frame,
                        stage,
                    };
                }
            }
            LoadMessage::Done(result) => self.apply_load_result(result),
        }
    }

    /// Apply data loading result to app state
    fn apply_load_result(&mut self, result: Result<Dataset>) {
        let ready = result.and_then(|dataset| {
            let view = evaluate(&dataset, &self.query)?;
            let summary = Aggregator::summary(&dataset);
            info!(
                hourly_rows = summary.hourly_rows,
                daily_rows = summary.daily_rows,
                "dataset loaded"
            );
            Ok(AppData {
                dataset,
                summary,
                view,
            })
        });

        self.state = match ready {
            Ok(data) => AppState::Ready {
                data: Box::new(data),
            },
            Err(e) => {
                error!(error = %e, "failed to load dataset");
                AppState::Error {
                    message: e.to_string(),
                }
            }
        };
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading {
            spinner_frame,
            stage,
        } = &self.state
        {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
                stage: *stage,
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading {
                spinner_frame,
                stage,
            } => {
                Spinner::new(*spinner_frame, *stage, self.theme).render(area, buf);
            }
            AppState::Ready { data } => {
                match &data.view {
                    DashboardView::HourlyPattern(view) => {
                        HourlyPage::new(view, self.handle, self.theme).render(area, buf);
                    }
                    DashboardView::SeasonWeatherPattern(view) => {
                        SeasonsPage::new(view, self.language, self.theme).render(area, buf);
                    }
                    DashboardView::UserTypeComparison(view) => {
                        UsersPage::new(view, self.handle, self.language, self.theme)
                            .render(area, buf);
                    }
                }

                if self.show_explanation {
                    let popup_area = ExplanationPopup::centered_area(area);
                    ExplanationPopup::new(data.view.question(), self.theme).render(popup_area, buf);
                }
                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme)
                        .with_summary(&data.summary)
                        .render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Error: {}", message);
                let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
                buf.set_string(
                    x,
                    y,
                    &text,
                    Style::default()
                        .fg(self.theme.error())
                        .add_modifier(Modifier::BOLD),
                );

                let hint = "Press q to quit";
                if y + 2 < area.y + area.height {
                    let x = area.x + (area.width.saturating_sub(hint.len() as u16)) / 2;
                    buf.set_string(x, y + 2, hint, Style::default().fg(self.theme.muted()));
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run(config: Config) -> anyhow::Result<()> {
    // Probe the background before raw mode swallows the reply
    let theme = Theme::from_choice(config.theme);
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &config, theme);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, config: &Config, theme: Theme) -> anyhow::Result<()> {
    let mut app = App::new(theme, config.language);

    let loader = DataLoaderService::from_config(config);
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stage_tx = tx.clone();
        let result = loader.load_with_progress(|stage| {
            let _ = stage_tx.send(LoadMessage::Stage(stage));
        });
        let _ = tx.send(LoadMessage::Done(result));
    });

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Drain loader messages (non-blocking)
        while let Ok(message) = rx.try_recv() {
            app.apply_message(message);
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            app.handle_event(ev);
        } else {
            app.tick();
        }
    }

    debug!("tui exited");
    Ok(())
}
