// src/ui/progress.rs
use crate::{
    app::{App, ProgressTab},
    ui::layout::{accent, muted},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(vec!["Week", "Month", "All Time"])
        .block(Block::default().borders(Borders::ALL).title("Progress [Tab]"))
        .select(app.progress_tab.index())
        .highlight_style(Style::default().fg(accent(app)).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.progress_tab {
        ProgressTab::Week => render_week(f, app, chunks[1]),
        ProgressTab::Month => render_placeholder(
            f,
            app,
            "📊 Monthly Analytics",
            "Complete more workouts to see your monthly trends",
            chunks[1],
        ),
        ProgressTab::All => render_placeholder(
            f,
            app,
            "🏆 All Time Stats",
            "Your complete fitness history will appear here",
            chunks[1],
        ),
    }
}

fn render_week(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Summary
            Constraint::Percentage(50), // Chart
            Constraint::Min(0),         // Milestones
        ])
        .split(area);

    let stats = app.service.dashboard_stats();
    let accent = accent(app);
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" 🔥 {} kcal ", stats.week.total_calories),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("⏱ {} min ", stats.week.total_minutes),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("🏋 {} workouts ", stats.week.total_workouts),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Streak {} days", stats.current_streak),
            Style::default().fg(muted(app)),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("This Week"));
    f.render_widget(summary, chunks[0]);

    let weekly = app.service.weekly_stats();
    let data: Vec<(&str, u64)> = weekly
        .iter()
        .map(|s| (s.day.as_str(), u64::from(s.calories)))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Calories Burned"))
        .data(&data)
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(accent))
        .value_style(Style::default().fg(Color::Black).bg(accent));
    f.render_widget(chart, chunks[1]);

    let items: Vec<ListItem> = app
        .service
        .milestones()
        .into_iter()
        .map(|m| {
            let status = match (m.achieved, m.date) {
                (true, Some(date)) => format!("Unlocked {}", date.format("%b %-d, %Y")),
                (true, None) => "Unlocked".to_string(),
                (false, _) => "Locked".to_string(),
            };
            let style = if m.achieved {
                Style::default()
            } else {
                Style::default().fg(muted(app))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}", m.icon, m.title), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!(" - {} ", m.description), style),
                Span::styled(status, Style::default().fg(muted(app))),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Milestones"));
    f.render_widget(list, chunks[2]);
}

fn render_placeholder(f: &mut Frame, app: &App, title: &str, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message.to_string(), Style::default().fg(muted(app)))),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
