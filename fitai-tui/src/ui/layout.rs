// src/ui/layout.rs
use crate::{
    app::{ActiveModal, App},
    ui::{
        chat::render_chat, dashboard::render_dashboard, landing::render_landing,
        modals::render_modal, onboarding::render_onboarding, progress::render_progress,
        settings::render_settings, status_bar::render_status_bar, workout::render_workout,
    },
};
use fitai_lib::{Route, StandardColor};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

// Screens reachable with F1-F5, in key order
const TAB_ROUTES: [Route; 5] = [
    Route::Dashboard,
    Route::Workout,
    Route::Chat,
    Route::Progress,
    Route::Settings,
];

// Main UI rendering function
pub fn render_ui(f: &mut Frame, app: &mut App) {
    let size = f.size();

    // Landing and onboarding are full screen, the rest get the tab bar
    let with_tabs = app.onboarded && TAB_ROUTES.contains(&app.route);
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if with_tabs { 3 } else { 0 }), // Tabs
            Constraint::Min(0),                                 // Content
            Constraint::Length(1),                              // Status Bar
        ])
        .split(size);

    if with_tabs {
        render_tabs(f, app, main_chunks[0]);
    }
    render_main_content(f, app, main_chunks[1]);
    render_status_bar(f, app, main_chunks[2]);

    // Render modal last if active
    if app.active_modal != ActiveModal::None {
        render_modal(f, app);
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_ROUTES
        .iter()
        .enumerate()
        .map(|(i, route)| Line::from(format!("F{} {}", i + 1, route.title())))
        .collect();
    let selected = TAB_ROUTES.iter().position(|r| *r == app.route).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("FitAI Coach - {}", app.service.user.name)),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(accent(app))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

// Render the content area based on the active screen
fn render_main_content(f: &mut Frame, app: &mut App, area: Rect) {
    match app.route {
        Route::Landing => render_landing(f, app, area),
        Route::Onboarding => render_onboarding(f, app, area),
        Route::Dashboard => render_dashboard(f, app, area),
        Route::Workout => render_workout(f, app, area),
        Route::Chat => render_chat(f, app, area),
        Route::Progress => render_progress(f, app, area),
        Route::Settings => render_settings(f, app, area),
    }
}

/// Accent color from the configured theme.
pub fn accent(app: &App) -> Color {
    tui_color(app.service.header_color())
}

/// Muted text color for the current light/dark setting.
pub fn muted(app: &App) -> Color {
    if app.service.config.dark_mode {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

fn tui_color(color: StandardColor) -> Color {
    match color {
        StandardColor::Black => Color::Black,
        StandardColor::Red => Color::LightRed,
        StandardColor::Green => Color::LightGreen,
        StandardColor::Yellow => Color::LightYellow,
        StandardColor::Blue => Color::LightBlue,
        StandardColor::Magenta => Color::LightMagenta,
        StandardColor::Cyan => Color::LightCyan,
        StandardColor::White => Color::White,
        StandardColor::DarkGrey => Color::DarkGray,
        StandardColor::DarkRed => Color::Red,
        StandardColor::DarkGreen => Color::Green,
        StandardColor::DarkYellow => Color::Yellow,
        StandardColor::DarkBlue => Color::Blue,
        StandardColor::DarkMagenta => Color::Magenta,
        StandardColor::DarkCyan => Color::Cyan,
        StandardColor::Grey => Color::Gray,
    }
}

/// Helper function to create a centered rectangle for modals
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
