//src/config.rs
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "fitai-coach";
const CONFIG_ENV_VAR: &str = "FITAI_CONFIG_DIR"; // Environment variable name

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Unknown notification setting '{0}'. Expected one of: workout-reminders, progress-updates, ai-tips, marketing.")]
    UnknownNotification(String),
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

// Helper to convert our enum to comfy_table::Color
impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Self::Black,
            StandardColor::Red => Self::Red,
            StandardColor::Green => Self::Green,
            StandardColor::Yellow => Self::Yellow,
            StandardColor::Blue => Self::Blue,
            StandardColor::Magenta => Self::Magenta,
            StandardColor::Cyan => Self::Cyan,
            StandardColor::White => Self::White,
            StandardColor::DarkGrey => Self::DarkGrey,
            StandardColor::DarkRed => Self::DarkRed,
            StandardColor::DarkGreen => Self::DarkGreen,
            StandardColor::DarkYellow => Self::DarkYellow,
            StandardColor::DarkBlue => Self::DarkBlue,
            StandardColor::DarkMagenta => Self::DarkMagenta,
            StandardColor::DarkCyan => Self::DarkCyan,
            StandardColor::Grey => Self::Grey,
        }
    }
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, Error> {
    StandardColor::iter()
        .find(|color| format!("{color:?}").eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| Error::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Theme {
    pub header_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_color: "Green".to_string(),
        }
    }
}

/// Which notification switch on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum NotificationKind {
    WorkoutReminders,
    ProgressUpdates,
    AiTips,
    Marketing,
}

impl NotificationKind {
    /// Settings page order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::WorkoutReminders,
        NotificationKind::ProgressUpdates,
        NotificationKind::AiTips,
        NotificationKind::Marketing,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            NotificationKind::WorkoutReminders => "Workout Reminders",
            NotificationKind::ProgressUpdates => "Progress Updates",
            NotificationKind::AiTips => "AI Coach Tips",
            NotificationKind::Marketing => "Marketing",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            NotificationKind::WorkoutReminders => "Daily reminder before your scheduled workout",
            NotificationKind::ProgressUpdates => "Weekly summary of your achievements",
            NotificationKind::AiTips => "Personalized suggestions from your AI coach",
            NotificationKind::Marketing => "News and offers",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            NotificationKind::WorkoutReminders => "workout-reminders",
            NotificationKind::ProgressUpdates => "progress-updates",
            NotificationKind::AiTips => "ai-tips",
            NotificationKind::Marketing => "marketing",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        NotificationKind::iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| Error::UnknownNotification(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationSettings {
    pub workout_reminders: bool,
    pub progress_updates: bool,
    pub ai_tips: bool,
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            workout_reminders: true,
            progress_updates: true,
            ai_tips: true,
            marketing: false,
        }
    }
}

impl NotificationSettings {
    pub fn get(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::WorkoutReminders => self.workout_reminders,
            NotificationKind::ProgressUpdates => self.progress_updates,
            NotificationKind::AiTips => self.ai_tips,
            NotificationKind::Marketing => self.marketing,
        }
    }

    pub fn set(&mut self, kind: NotificationKind, enabled: bool) {
        let slot = match kind {
            NotificationKind::WorkoutReminders => &mut self.workout_reminders,
            NotificationKind::ProgressUpdates => &mut self.progress_updates,
            NotificationKind::AiTips => &mut self.ai_tips,
            NotificationKind::Marketing => &mut self.marketing,
        };
        *slot = enabled;
    }
}

/// Simulated "thinking" time before a scripted coach reply shows up.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ChatSettings {
    pub min_delay_ms: u64,
    pub jitter_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            jitter_ms: 500,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    pub dark_mode: bool,
    pub theme: Theme,
    pub notifications: NotificationSettings,
    pub chat: ChatSettings,
}

/// Determines the path to the configuration file.
/// Exposed at crate root as get_config_path_util
pub fn get_config_path() -> Result<PathBuf, Error> {
    let config_dir_override = std::env::var(CONFIG_ENV_VAR).ok();

    let config_dir_path = if let Some(path_str) = config_dir_override {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            warn!(
                "{} points to '{}', which is not a directory. Trying to create it.",
                CONFIG_ENV_VAR,
                path.display()
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(Error::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path,
/// writing the defaults there first if it does not exist yet.
pub fn load(config_path: &Path) -> Result<Config, Error> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        info!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
pub fn save(config_path: &Path, config: &Config) -> Result<(), Error> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    info!(path = %config_path.display(), "saved config");
    Ok(())
}
