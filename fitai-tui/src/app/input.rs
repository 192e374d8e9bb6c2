// src/app/input.rs
use super::{
    navigation_helpers::{list_next, list_previous, wrap_next, wrap_previous},
    state::{settings_items, ActiveModal, App, ProgressTab, SettingsItem},
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use fitai_lib::{Route, SessionPhase, WizardError};
use std::time::Instant;
use tracing::debug;

// Main key event handler method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            self.handle_modal_input(key);
            return Ok(());
        }

        if let KeyCode::F(n) = key.code {
            let route = match n {
                1 => Some(Route::Dashboard),
                2 => Some(Route::Workout),
                3 => Some(Route::Chat),
                4 => Some(Route::Progress),
                5 => Some(Route::Settings),
                _ => None,
            };
            if let Some(route) = route {
                if self.onboarded {
                    self.navigate(route);
                }
            }
            return Ok(());
        }

        // The chat input line takes every other key
        if self.route == Route::Chat {
            self.handle_chat_input(key);
            return Ok(());
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            _ => match self.route {
                Route::Landing => self.handle_landing_input(key),
                Route::Onboarding => self.handle_onboarding_input(key),
                Route::Dashboard => self.handle_dashboard_input(key),
                Route::Workout => self.handle_workout_input(key),
                Route::Progress => self.handle_progress_input(key),
                Route::Settings => self.handle_settings_input(key),
                Route::Chat => {}
            },
        }
        Ok(())
    }

    // --- Modal Input Handling ---
    fn handle_modal_input(&mut self, key: KeyEvent) {
        match (self.active_modal, key.code) {
            (ActiveModal::Help, KeyCode::Char('?')) => self.active_modal = ActiveModal::None,
            (_, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) => {
                self.active_modal = ActiveModal::None;
            }
            _ => {} // Ignore other keys in modals
        }
    }

    // --- Screen-Specific Input Handling ---
    fn handle_landing_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.navigate(Route::Onboarding);
        }
    }

    fn handle_onboarding_input(&mut self, key: KeyEvent) {
        let step_before = self.wizard.state().current_step;
        let option_count = self.wizard.current_step().options.len();
        let preview = self.wizard.preview_shown();

        let result: Result<Option<Route>, WizardError> = match key.code {
            KeyCode::Char('k') | KeyCode::Up if !preview => {
                list_previous(&mut self.option_list_state, option_count);
                Ok(None)
            }
            KeyCode::Char('j') | KeyCode::Down if !preview => {
                list_next(&mut self.option_list_state, option_count);
                Ok(None)
            }
            KeyCode::Char(' ') if !preview => match self.option_list_state.selected() {
                Some(index) => self.wizard.select_index(index).map(|()| None),
                None => Ok(None),
            },
            KeyCode::Enter if preview => self.wizard.finish(),
            // Inert until something is selected
            KeyCode::Enter => self.wizard.advance(),
            KeyCode::Esc | KeyCode::Backspace => self.wizard.retreat(),
            _ => Ok(None),
        };

        if self.wizard.state().current_step != step_before {
            self.option_list_state.select(Some(0));
        }
        match result {
            Ok(Some(route)) => self.navigate(route),
            Ok(None) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn handle_dashboard_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') => self.navigate(Route::Workout),
            KeyCode::Char('c') => self.navigate(Route::Chat),
            KeyCode::Char('p') => self.navigate(Route::Progress),
            _ => {}
        }
    }

    fn handle_workout_input(&mut self, key: KeyEvent) {
        if self.session.phase() == SessionPhase::Complete {
            match key.code {
                KeyCode::Enter => {
                    let route = self.session.finish();
                    self.navigate(route);
                }
                KeyCode::Char('c') => {
                    let route = self.session.ask_coach();
                    self.navigate(route);
                }
                _ => {}
            }
            return;
        }

        let current = Some(self.session.state().current_index);
        let len = self.session.state().exercises.len();
        let selected = match key.code {
            KeyCode::Char('s') => {
                self.session.start();
                None
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.session.toggle_pause();
                None
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                self.session.toggle_current();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => wrap_previous(current, len),
            KeyCode::Char('j') | KeyCode::Down => wrap_next(current, len),
            KeyCode::Char('n') => {
                self.session.advance_to_next();
                None
            }
            KeyCode::Char('t') => {
                self.session.toggle_timer();
                None
            }
            KeyCode::Char('r') => {
                self.session.reset_timer();
                None
            }
            KeyCode::Esc => {
                self.navigate(Route::Dashboard);
                None
            }
            _ => None,
        };
        if let Some(index) = selected {
            if let Err(e) = self.session.select_index(index) {
                self.set_error(e.to_string());
            }
        }
    }

    fn handle_chat_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc if self.chip_index.is_some() => self.chip_index = None,
            KeyCode::Esc => self.navigate(Route::Dashboard),
            KeyCode::Tab => {
                let chips = self.conversation.latest_suggestions().len();
                self.chip_index = wrap_next(self.chip_index, chips);
            }
            KeyCode::BackTab => {
                let chips = self.conversation.latest_suggestions().len();
                self.chip_index = wrap_previous(self.chip_index, chips);
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Enter => self.submit_chat(),
            KeyCode::Char(c) => {
                self.chip_index = None;
                self.chat_input.push(c);
            }
            _ => {}
        }
    }

    /// Sends the highlighted chip, or the typed text if no chip is highlighted.
    fn submit_chat(&mut self) {
        if self.conversation.is_typing() {
            return;
        }
        let text = match self.chip_index {
            Some(index) => match self.conversation.latest_suggestions().get(index) {
                Some(chip) => chip.clone(),
                None => return,
            },
            None => self.chat_input.clone(),
        };
        if text.trim().is_empty() {
            return;
        }
        match self
            .conversation
            .send(&text, Instant::now(), &mut rand::thread_rng())
        {
            Ok(delay) => {
                debug!(?delay, "coach reply queued");
                self.chat_input.clear();
                self.chip_index = None;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn handle_progress_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.progress_tab = self.progress_tab.next(),
            KeyCode::Char('w') => self.progress_tab = ProgressTab::Week,
            KeyCode::Esc => self.navigate(Route::Dashboard),
            _ => {}
        }
    }

    fn handle_settings_input(&mut self, key: KeyEvent) {
        let len = settings_items().len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => list_previous(&mut self.settings_list_state, len),
            KeyCode::Char('j') | KeyCode::Down => list_next(&mut self.settings_list_state, len),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_setting(),
            KeyCode::Char('u') => self.active_modal = ActiveModal::Pricing,
            KeyCode::Esc => self.navigate(Route::Dashboard),
            _ => {}
        }
    }

    fn toggle_selected_setting(&mut self) {
        let result = match self.selected_settings_item() {
            Some(SettingsItem::Notification(kind)) => {
                self.service.toggle_notification(kind).map(|_| ())
            }
            Some(SettingsItem::DarkMode) => {
                let enabled = !self.service.config.dark_mode;
                self.service.set_dark_mode(enabled)
            }
            None => Ok(()),
        };
        if let Err(e) = result {
            self.set_error(format!("Failed to save settings: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitai_lib::{ChatSettings, CoachService, Config};
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_app() -> (App, TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config {
            chat: ChatSettings {
                min_delay_ms: 0,
                jitter_ms: 0,
            },
            ..Config::default()
        };
        let service = CoachService::with_config(config, dir.path().join("config.toml"));
        (App::new(service).expect("app"), dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code)).expect("key handled");
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn onboard(app: &mut App) {
        press(app, KeyCode::Enter);
        for _ in 0..5 {
            press(app, KeyCode::Char(' '));
            press(app, KeyCode::Enter);
        }
        assert!(app.wizard.preview_shown());
        press(app, KeyCode::Enter);
    }

    #[test]
    fn starts_on_landing_and_quits() {
        let (mut app, _dir) = create_app();
        assert_eq!(app.route, Route::Landing);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn screen_keys_wait_for_onboarding() {
        let (mut app, _dir) = create_app();
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.route, Route::Landing);

        onboard(&mut app);
        assert_eq!(app.route, Route::Dashboard);
        assert!(app.onboarded);
        press(&mut app, KeyCode::F(4));
        assert_eq!(app.route, Route::Progress);
    }

    #[test]
    fn onboarding_enter_is_inert_without_selection() {
        let (mut app, _dir) = create_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Onboarding);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.state().current_step, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.wizard.state().selected("goals"), ["gain".to_string()]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.state().current_step, 1);
        assert_eq!(app.option_list_state.selected(), Some(0));
    }

    #[test]
    fn escape_on_first_question_returns_to_landing() {
        let (mut app, _dir) = create_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Landing);

        // Coming back starts fresh
        press(&mut app, KeyCode::Enter);
        assert!(app.wizard.state().selections.is_empty());
    }

    #[test]
    fn workout_keys_complete_the_session() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.phase(), SessionPhase::Active);

        for _ in 0..7 {
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.session.phase(), SessionPhase::Complete);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Dashboard);

        // Opening the screen again starts a fresh session
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn leaving_workout_discards_progress() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.state().completed_count(), 1);

        press(&mut app, KeyCode::F(1));
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.session.phase(), SessionPhase::NotStarted);
        assert_eq!(app.session.state().completed_count(), 0);
    }

    #[test]
    fn workout_cursor_wraps() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.session.state().current_index, 6);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.state().current_index, 0);
    }

    #[test]
    fn chat_typing_does_not_quit() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(3));
        type_text(&mut app, "quit?");
        assert!(!app.should_quit);
        assert_eq!(app.chat_input, "quit?");

        press(&mut app, KeyCode::Enter);
        assert!(app.chat_input.is_empty());
        assert!(app.conversation.is_typing());

        // No second send while the coach is typing
        type_text(&mut app, "again");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.chat_input, "again");

        app.on_tick(Instant::now() + Duration::from_millis(10));
        assert!(!app.conversation.is_typing());
        assert_eq!(app.conversation.messages().len(), 3);
    }

    #[test]
    fn chat_chips_cycle_and_send() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(3));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.conversation.messages().len(), 1, "blank input is ignored");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.chip_index, Some(1));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.conversation.messages()[1].content, "Show my plan");
        assert_eq!(app.chip_index, None);
    }

    #[test]
    fn reopening_chat_starts_a_new_conversation() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(3));
        type_text(&mut app, "What about nutrition?");
        press(&mut app, KeyCode::Enter);
        assert!(app.conversation.is_typing());

        press(&mut app, KeyCode::F(1));
        app.on_tick(Instant::now() + Duration::from_millis(10));
        press(&mut app, KeyCode::F(3));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::F(1));
        press(&mut app, KeyCode::F(3));
        assert_eq!(app.conversation.messages().len(), 1);
        assert!(!app.conversation.is_typing());
        assert!(app.chat_input.is_empty());
        assert_eq!(app.chip_index, None);

        // The dropped reply never shows up later
        app.on_tick(Instant::now() + Duration::from_millis(20));
        assert_eq!(app.conversation.messages().len(), 1);
    }

    #[test]
    fn settings_toggle_is_saved() {
        let (mut app, dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(5));
        assert!(app.service.config.notifications.workout_reminders);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.service.config.notifications.workout_reminders);
        assert!(dir.path().join("config.toml").exists());

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.active_modal, ActiveModal::Pricing);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_modal, ActiveModal::None);
    }

    #[test]
    fn progress_tabs_cycle() {
        let (mut app, _dir) = create_app();
        onboard(&mut app);
        press(&mut app, KeyCode::F(4));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.progress_tab, ProgressTab::Month);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.progress_tab, ProgressTab::Week);
    }

    #[test]
    fn help_modal_swallows_keys() {
        let (mut app, _dir) = create_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_modal, ActiveModal::Help);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Landing);
        assert_eq!(app.active_modal, ActiveModal::None);
    }
}
