// src/ui/settings.rs
use crate::{
    app::{settings_items, App, SettingsItem},
    ui::layout::{accent, muted},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_settings(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Profile
            Constraint::Min(0),    // Switches
            Constraint::Length(4), // Subscription
        ])
        .split(area);

    let user = &app.service.user;
    let muted_style = Style::default().fg(muted(app));
    let profile = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", user.initial()),
                Style::default().fg(Color::Black).bg(accent(app)),
            ),
            Span::styled(
                format!(" {}", user.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", user.email), muted_style),
        ]),
        Line::from(format!("Fitness Level: {}", user.level)),
        Line::from(format!("Fitness Goal: {}", user.goal)),
        Line::from(format!("Sessions per Week: {} days", user.sessions_per_week)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(profile, chunks[0]);

    let config = &app.service.config;
    let items: Vec<ListItem> = settings_items()
        .into_iter()
        .map(|item| {
            let (label, description, enabled) = match item {
                SettingsItem::Notification(kind) => {
                    (kind.label(), kind.description(), config.notifications.get(kind))
                }
                SettingsItem::DarkMode => ("Dark Mode", "Switch the colour scheme", config.dark_mode),
            };
            let switch = if enabled {
                Span::styled("[ON ]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                Span::styled("[OFF]", muted_style)
            };
            ListItem::new(vec![
                Line::from(vec![switch, Span::raw(format!(" {label}"))]),
                Line::from(Span::styled(format!("      {description}"), muted_style)),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Notifications & Display"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let subscription = Paragraph::new(vec![
        Line::from(Span::styled("Free Plan", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "[u] Upgrade to Pro for unlimited workouts and advanced coaching",
            Style::default().fg(accent(app)),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Subscription"));
    f.render_widget(subscription, chunks[2]);

    f.render_stateful_widget(list, chunks[1], &mut app.settings_list_state);
}
