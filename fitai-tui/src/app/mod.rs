// src/app/mod.rs
mod input;
mod navigation_helpers;
pub mod state;

pub use state::{settings_items, ActiveModal, App, ProgressTab, SettingsItem};
