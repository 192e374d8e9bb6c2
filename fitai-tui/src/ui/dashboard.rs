// src/ui/dashboard.rs
use crate::{app::App, ui::layout::{accent, muted}};
use fitai_lib::{catalog::PLANNED_PROGRAM_WORKOUTS, progress};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};

pub fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Greeting
            Constraint::Length(5), // Stat cards
            Constraint::Length(6), // Today's workout
            Constraint::Min(0),    // Week
        ])
        .split(area);

    let user = &app.service.user;
    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {}! 💪", user.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Goal: {} | {}", user.goal, user.level),
            Style::default().fg(muted(app)),
        )),
    ]);
    f.render_widget(greeting, chunks[0]);

    render_stat_cards(f, app, chunks[1]);
    render_todays_workout(f, app, chunks[2]);
    render_week(f, app, chunks[3]);
}

fn render_stat_cards(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.service.dashboard_stats();
    let accent = accent(app);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let card = |title: &str, value: String| {
        Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    };
    f.render_widget(card("🔥 Streak", format!("{} days", stats.current_streak)), cards[0]);
    f.render_widget(card("🏋 Workouts", stats.total_workouts.to_string()), cards[1]);

    let weekly = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("This Week"))
        .gauge_style(Style::default().fg(accent))
        .percent(progress::percent(stats.weekly_goal_fraction))
        .label(format!("{}/{} workouts", stats.week.active_days, stats.weekly_goal));
    f.render_widget(weekly, cards[2]);

    let program = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("12-Week Goal"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(progress::percent(stats.program_fraction))
        .label(format!("{}/{}", stats.total_workouts, PLANNED_PROGRAM_WORKOUTS));
    f.render_widget(program, cards[3]);
}

fn render_todays_workout(f: &mut Frame, app: &App, area: Rect) {
    let workout = app.service.todays_workout();
    let accent = accent(app);
    let equipment: Vec<String> = workout
        .exercises
        .iter()
        .flat_map(|e| e.equipment.iter().cloned())
        .collect();
    let lines = vec![
        Line::from(Span::styled(
            workout.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "⏱ {} min   🔥 {} kcal   {}   {} exercises",
            workout.duration_minutes,
            workout.est_calories,
            workout.difficulty,
            workout.exercises.len()
        )),
        Line::from(Span::styled(
            if equipment.is_empty() {
                "No equipment needed".to_string()
            } else {
                format!("Equipment: {}", equipment.join(", "))
            },
            Style::default().fg(muted(app)),
        )),
        Line::from(Span::styled(
            "[Enter] Start Workout   [c] Ask the coach",
            Style::default().fg(accent),
        )),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Today's Workout")
            .border_style(Style::default().fg(accent)),
    );
    f.render_widget(card, area);
}

fn render_week(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .service
        .weekly_plan()
        .into_iter()
        .map(|w| {
            let status = if w.completed { "✓" } else { "" };
            let style = if w.is_rest_day() {
                Style::default().fg(muted(app))
            } else {
                Style::default()
            };
            Row::new(vec![
                w.day,
                w.title,
                format!("{} min", w.duration_minutes),
                w.difficulty.to_string(),
                status.to_string(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(3),
        ],
    )
    .header(
        Row::new(vec!["Day", "Workout", "Time", "Level", ""])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("This Week's Plan"));
    f.render_widget(table, area);
}
