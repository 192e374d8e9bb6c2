// src/lib.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

// --- Declare modules ---
pub mod catalog;
pub mod chat;
mod config;
pub mod navigation;
pub mod onboarding;
pub mod progress;
pub mod session;

// --- Expose public types ---
pub use catalog::{
    Difficulty, Exercise, FitnessLevel, Milestone, OnboardingStep, PricingPlan, StepOption,
    UserProfile, WeeklyStat, WorkoutPlan,
};
pub use chat::{ChatConversation, ChatError, ChatMessage, Responder, Role};
pub use config::{
    get_config_path as get_config_path_util,
    load as load_config_util,
    parse_color,
    save as save_config_util,
    ChatSettings,
    Config,
    Error as ConfigError,
    NotificationKind,
    NotificationSettings,
    StandardColor,
    Theme,
};
pub use navigation::Route;
pub use onboarding::{PlanPreview, Wizard, WizardError, WizardState};
pub use progress::WeeklySummary;
pub use session::{ExerciseTimer, SessionError, SessionPhase, SessionState, WorkoutSession};

/// Headline numbers for the dashboard and progress screens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub week: WeeklySummary,
    pub weekly_goal: u32,
    pub weekly_goal_fraction: f64,
    pub program_fraction: f64,
    pub current_streak: u32,
    pub total_workouts: u32,
    pub calories_burned: u32,
}

pub struct CoachService {
    pub config: Config,
    pub config_path: PathBuf,
    pub user: UserProfile,
}

impl CoachService {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config path determination or loading fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        Ok(Self::with_config(config, config_path))
    }

    pub fn with_config(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            user: catalog::default_user(),
        }
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn set_notification(
        &mut self,
        kind: NotificationKind,
        enabled: bool,
    ) -> Result<(), ConfigError> {
        self.config.notifications.set(kind, enabled);
        self.save_config()
    }

    /// Flips a notification switch and returns its new value.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn toggle_notification(&mut self, kind: NotificationKind) -> Result<bool, ConfigError> {
        let enabled = !self.config.notifications.get(kind);
        self.set_notification(kind, enabled)?;
        Ok(enabled)
    }

    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.config.dark_mode = enabled;
        self.save_config()
    }

    /// # Errors
    /// - `ConfigError::InvalidColor` if the name is not a known color.
    /// - `ConfigError` variants if saving fails.
    pub fn set_header_color(&mut self, color_name: &str) -> Result<StandardColor, ConfigError> {
        let color = parse_color(color_name)?;
        self.config.theme.header_color = format!("{color:?}");
        self.save_config()?;
        Ok(color)
    }

    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn set_chat_delay(&mut self, min_delay_ms: u64, jitter_ms: u64) -> Result<(), ConfigError> {
        self.config.chat = ChatSettings {
            min_delay_ms,
            jitter_ms,
        };
        self.save_config()
    }

    /// Header color from the theme, falling back to green on a bad value.
    pub fn header_color(&self) -> StandardColor {
        parse_color(&self.config.theme.header_color).unwrap_or(StandardColor::Green)
    }

    // --- Static content ---

    pub fn todays_workout(&self) -> WorkoutPlan {
        catalog::todays_workout()
    }

    pub fn weekly_plan(&self) -> Vec<WorkoutPlan> {
        catalog::weekly_plan()
    }

    pub fn weekly_stats(&self) -> Vec<WeeklyStat> {
        catalog::weekly_stats()
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        catalog::milestones()
    }

    pub fn pricing_plans(&self) -> Vec<PricingPlan> {
        catalog::pricing_plans()
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        let week = WeeklySummary::from_stats(&self.weekly_stats());
        DashboardStats {
            week,
            weekly_goal: self.user.weekly_goal,
            weekly_goal_fraction: progress::weekly_goal_fraction(
                week.active_days,
                self.user.weekly_goal,
            ),
            program_fraction: progress::program_fraction(self.user.total_workouts),
            current_streak: self.user.current_streak,
            total_workouts: self.user.total_workouts,
            calories_burned: self.user.calories_burned,
        }
    }

    // --- Fresh UI-local state ---

    /// # Errors
    /// Returns `WizardError::NoSteps` if the question bank is empty.
    pub fn new_wizard(&self) -> Result<Wizard, WizardError> {
        Wizard::new(catalog::onboarding_steps())
    }

    pub fn new_workout_session(&self) -> WorkoutSession {
        WorkoutSession::new(self.todays_workout())
    }

    /// Starts a session for any plan in this week's schedule.
    /// # Errors
    /// Returns an error if no planned workout has the given id.
    pub fn workout_session_for(&self, workout_id: &str) -> Result<WorkoutSession> {
        let plan = self
            .weekly_plan()
            .into_iter()
            .find(|w| w.id == workout_id)
            .with_context(|| format!("No workout with id '{workout_id}' in this week's plan"))?;
        debug!(workout = %plan.title, "starting session");
        Ok(WorkoutSession::new(plan))
    }

    pub fn new_conversation(&self) -> ChatConversation {
        ChatConversation::new(&self.user, Responder::default(), self.config.chat)
    }
}
