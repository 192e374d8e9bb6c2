// src/app/state.rs
use anyhow::{Context, Result};
use fitai_lib::{
    ChatConversation, CoachService, NotificationKind, Route, Wizard, WorkoutSession,
};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const ERROR_DISPLAY: Duration = Duration::from_secs(5);

// Sub-tabs of the progress screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTab {
    Week,
    Month,
    All,
}

impl ProgressTab {
    pub fn next(self) -> Self {
        match self {
            ProgressTab::Week => ProgressTab::Month,
            ProgressTab::Month => ProgressTab::All,
            ProgressTab::All => ProgressTab::Week,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ProgressTab::Week => 0,
            ProgressTab::Month => 1,
            ProgressTab::All => 2,
        }
    }
}

// Rows of the settings list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsItem {
    Notification(NotificationKind),
    DarkMode,
}

pub fn settings_items() -> Vec<SettingsItem> {
    NotificationKind::ALL
        .into_iter()
        .map(SettingsItem::Notification)
        .chain(std::iter::once(SettingsItem::DarkMode))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveModal {
    None,
    Help,
    Pricing,
}

// Holds the application state
pub struct App {
    pub service: CoachService,
    pub route: Route,
    pub onboarded: bool,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    pub last_error: Option<String>, // For status bar errors
    pub error_clear_time: Option<Instant>,
    last_tick: Instant,

    // === Onboarding ===
    pub wizard: Wizard,
    pub option_list_state: ListState,

    // === Workout ===
    pub session: WorkoutSession,

    // === Chat ===
    pub conversation: ChatConversation,
    pub chat_input: String,
    pub chip_index: Option<usize>,

    // === Progress / Settings ===
    pub progress_tab: ProgressTab,
    pub settings_list_state: ListState,
}

impl App {
    pub fn new(service: CoachService) -> Result<Self> {
        let wizard = service
            .new_wizard()
            .context("Failed to load onboarding questions")?;
        let session = service.new_workout_session();
        let conversation = service.new_conversation();
        let mut app = App {
            route: Route::Landing,
            onboarded: false,
            should_quit: false,
            active_modal: ActiveModal::None,
            last_error: None,
            error_clear_time: None,
            last_tick: Instant::now(),
            wizard,
            option_list_state: ListState::default(),
            session,
            conversation,
            chat_input: String::new(),
            chip_index: None,
            progress_tab: ProgressTab::Week,
            settings_list_state: ListState::default(),
            service,
        };
        app.option_list_state.select(Some(0));
        app.settings_list_state.select(Some(0));
        Ok(app)
    }

    // Method to set status bar errors
    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
        self.error_clear_time = Some(Instant::now() + ERROR_DISPLAY);
    }

    // Clears expired error messages (called every tick)
    pub(crate) fn clear_expired_error(&mut self, now: Instant) {
        if let Some(clear_time) = self.error_clear_time {
            if now >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }
    }

    /// Advances timers and delivers due coach replies.
    pub fn on_tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.session.tick(elapsed);
        if self.route == Route::Chat && self.conversation.poll(now) > 0 {
            self.chip_index = None;
        }
        self.clear_expired_error(now);
    }

    /// Switches screens. Screens other than landing and onboarding need a finished onboarding.
    pub fn navigate(&mut self, route: Route) {
        if route == Route::Dashboard {
            self.onboarded = true;
        }
        if !self.onboarded && !matches!(route, Route::Landing | Route::Onboarding) {
            self.set_error("Finish onboarding first".to_string());
            return;
        }
        debug!(from = %self.route, to = %route, "navigate");
        match route {
            Route::Onboarding if self.route != Route::Onboarding => {
                // Each visit starts the questions over
                match self.service.new_wizard() {
                    Ok(wizard) => self.wizard = wizard,
                    Err(e) => {
                        self.set_error(e.to_string());
                        return;
                    }
                }
                self.option_list_state.select(Some(0));
            }
            Route::Workout if self.route != Route::Workout => {
                info!("starting a fresh workout session");
                self.session = self.service.new_workout_session();
            }
            Route::Chat if self.route != Route::Chat => {
                // Replacing the conversation drops any reply still pending
                self.conversation = self.service.new_conversation();
                self.chat_input.clear();
                self.chip_index = None;
            }
            _ => {}
        }
        self.route = route;
    }

    pub fn selected_settings_item(&self) -> Option<SettingsItem> {
        self.settings_list_state
            .selected()
            .and_then(|i| settings_items().get(i).copied())
    }
}
