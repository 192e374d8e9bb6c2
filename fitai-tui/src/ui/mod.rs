mod chat;
mod dashboard;
mod landing;
mod layout;
mod modals;
mod onboarding;
mod progress;
mod settings;
mod status_bar;
mod workout;

// Re-export the main render function
pub use layout::render_ui;
