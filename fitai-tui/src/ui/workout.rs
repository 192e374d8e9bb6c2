// src/ui/workout.rs
use crate::{app::App, ui::layout::{accent, centered_rect, muted}};
use fitai_lib::{progress, session::format_clock, SessionPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render_workout(f: &mut Frame, app: &App, area: Rect) {
    if app.session.phase() == SessionPhase::Complete {
        render_complete(f, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let state = app.session.state();
    let plan = app.session.plan();
    let phase_label = match app.session.phase() {
        SessionPhase::NotStarted => "Not started",
        SessionPhase::Active => "In progress",
        SessionPhase::Paused => "Paused",
        SessionPhase::Complete => "Complete",
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} - {}", plan.title, phase_label)),
        )
        .gauge_style(Style::default().fg(accent(app)))
        .percent(progress::percent(state.progress_fraction()))
        .label(format!(
            "{}/{} exercises",
            state.completed_count(),
            state.exercises.len()
        ));
    f.render_widget(gauge, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_exercise_list(f, app, body[0]);
    render_current_exercise(f, app, body[1]);
}

fn render_exercise_list(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();
    let accent = accent(app);
    let items: Vec<ListItem> = state
        .exercises
        .iter()
        .enumerate()
        .map(|(index, exercise)| {
            let check = if exercise.completed { "✓" } else { "○" };
            let style = if exercise.completed {
                Style::default().fg(muted(app)).add_modifier(Modifier::CROSSED_OUT)
            } else if state.is_active(index) {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{check} {}", exercise.name), style),
                Span::styled(format!("  {}", exercise.reps), Style::default().fg(muted(app))),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Exercises"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    // Highlight tracks the session cursor
    let mut list_state = ListState::default();
    list_state.select(Some(state.current_index).filter(|_| !state.exercises.is_empty()));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_current_exercise(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();
    let accent = accent(app);
    let mut lines = Vec::new();

    if app.session.phase() == SessionPhase::NotStarted {
        let plan = app.session.plan();
        lines.push(Line::from(Span::styled(
            "Ready to start?",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "{} exercises - {} minutes",
            state.exercises.len(),
            plan.duration_minutes
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[s] Start Workout",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(exercise) = state.current_exercise() {
        lines.push(Line::from(Span::styled(
            exercise.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(exercise.reps.clone()));
        if !exercise.equipment.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Equipment: {}", exercise.equipment.join(", ")),
                Style::default().fg(muted(app)),
            )));
        }
        lines.push(Line::from(""));

        let timer = app.session.timer();
        let timer_style = if timer.is_running() {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(muted(app))
        };
        lines.push(Line::from(vec![
            Span::raw("⏱ "),
            Span::styled(format_clock(timer.remaining_seconds()), timer_style),
            Span::styled(
                if timer.is_running() { "  [t] stop" } else { "  [t] start" },
                Style::default().fg(muted(app)),
            ),
        ]));
        if app.session.phase() == SessionPhase::Paused {
            lines.push(Line::from(Span::styled(
                "⏸ Paused - [p] to resume",
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if exercise.completed { "[c] Mark not done" } else { "[c] Mark done" },
            Style::default().fg(accent),
        )));
        if let Some(tip) = state.coach_tip() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "🤖 AI Coach Tip",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(tip.to_string()));
        }
    } else {
        lines.push(Line::from("This workout has no exercises."));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Current Exercise"))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_complete(f: &mut Frame, app: &App, area: Rect) {
    let plan = app.session.plan();
    let accent = accent(app);
    let lines = vec![
        Line::from(Span::styled(
            "Workout Complete! 🎉",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Great job! You crushed {} and burned approximately {} calories.",
            plan.title, plan.est_calories
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Back to Dashboard",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from("[c] Chat with AI Coach"),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, centered_rect(60, 40, area));
}
