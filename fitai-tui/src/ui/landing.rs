// src/ui/landing.rs
use crate::{app::App, ui::layout::{accent, centered_rect, muted}};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FEATURES: [(&str, &str); 3] = [
    ("🧠 AI-Powered Plans", "Workouts that adapt to your goals, level and schedule"),
    ("💬 24/7 Coaching", "Ask anything about training, recovery or nutrition"),
    ("📈 Track Progress", "Streaks, milestones and weekly stats in one place"),
];

pub fn render_landing(f: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect(70, 70, area);
    let accent = accent(app);

    let mut lines = vec![
        Line::from(Span::styled(
            "FitAI Coach",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your Personal AI Fitness Coach",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Get a personalized 12-week plan built around you in under 2 minutes.",
            Style::default().fg(muted(app)),
        )),
        Line::from(""),
    ];
    for (title, description) in FEATURES {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(description, Style::default().fg(muted(app)))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[ Get Started - press Enter ]",
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
