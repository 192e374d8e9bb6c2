// src/ui/status_bar.rs
use crate::app::{ActiveModal, App};
use fitai_lib::{Route, SessionPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.active_modal {
        ActiveModal::None => match app.route {
            Route::Landing => " [Enter] Get Started | [?] Help | [Q]uit ",
            Route::Onboarding if app.wizard.preview_shown() => {
                " [Enter] Start My Journey | [Esc] Back | [?] Help | [Q]uit "
            }
            Route::Onboarding => {
                " [↑↓/jk] Nav | [Space] Select | [Enter] Continue | [Esc] Back | [Q]uit "
            }
            Route::Dashboard => {
                " [Enter] Start Workout | [c]hat | [p]rogress | [F1-F5] Screens | [?] Help | [Q]uit "
            }
            Route::Workout if app.session.phase() == SessionPhase::Complete => {
                " [Enter] Back to Dashboard | [c] Chat with AI Coach "
            }
            Route::Workout => {
                " [s]tart | [p]ause | [c/Enter] Done | [↑↓] Select | [n]ext | [t]imer | [r]eset | [Q]uit "
            }
            Route::Chat => " [Enter] Send | [Tab] Suggestions | [Esc] Dashboard | [F1-F5] Screens ",
            Route::Progress => " [Tab] Week/Month/All | [F1-F5] Screens | [?] Help | [Q]uit ",
            Route::Settings => {
                " [↑↓/jk] Nav | [Space] Toggle | [u]pgrade | [F1-F5] Screens | [Q]uit "
            }
        },
        ActiveModal::Help => " [Esc/Enter/?] Close Help ",
        ActiveModal::Pricing => " [Esc/Enter] Close ",
    };

    let error_text = app.last_error.as_deref().unwrap_or("");

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
        .split(area);

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, status_chunks[0]);

    let error_paragraph = Paragraph::new(error_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::Red))
        .alignment(Alignment::Right);
    f.render_widget(error_paragraph, status_chunks[1]);
}
