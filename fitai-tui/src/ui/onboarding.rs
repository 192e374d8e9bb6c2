// src/ui/onboarding.rs
use crate::{app::App, ui::layout::{accent, muted}};
use fitai_lib::{progress, PlanPreview};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_onboarding(f: &mut Frame, app: &mut App, area: Rect) {
    if app.wizard.preview_shown() {
        let preview = app.wizard.plan_preview(&app.service.user);
        render_plan_preview(f, app, &preview, area);
    } else {
        render_question(f, app, area);
    }
}

fn render_question(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Title + subtitle
            Constraint::Min(0),    // Options
            Constraint::Length(1), // Continue hint
        ])
        .split(area);

    let accent = accent(app);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(accent))
        .percent(progress::percent(app.wizard.progress_fraction()))
        .label(app.wizard.step_label());
    f.render_widget(gauge, chunks[0]);

    let step = app.wizard.current_step();
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            step.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(step.subtitle.as_str(), Style::default().fg(muted(app)))),
    ]);
    f.render_widget(heading, chunks[1]);

    let items: Vec<ListItem> = step
        .options
        .iter()
        .map(|option| {
            let selected = app.wizard.is_selected(&option.id);
            let marker = match (step.multi_select, selected) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let icon = option.icon.as_deref().map(|i| format!("{i} ")).unwrap_or_default();
            let style = if selected {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut lines = vec![Line::from(Span::styled(
                format!("{marker} {icon}{}", option.label),
                style,
            ))];
            if let Some(description) = &option.description {
                lines.push(Line::from(Span::styled(
                    format!("    {description}"),
                    Style::default().fg(muted(app)),
                )));
            }
            ListItem::new(lines)
        })
        .collect();
    let title = if step.multi_select {
        "Select all that apply"
    } else {
        "Select one"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let continue_style = if app.wizard.can_proceed() {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(muted(app))
    };
    let hint = Paragraph::new(Line::from(vec![
        Span::styled(format!("[Enter] {}", app.wizard.continue_label()), continue_style),
        Span::raw("   [Esc] Back"),
    ]));
    f.render_widget(hint, chunks[3]);

    f.render_stateful_widget(list, chunks[2], &mut app.option_list_state);
}

fn render_plan_preview(f: &mut Frame, app: &App, preview: &PlanPreview, area: Rect) {
    let accent = accent(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Length(8), // Journey summary
            Constraint::Min(0),    // Week preview
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Your AI Plan is Ready! 🎉",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Based on your goals, here's your personalized 4-week preview",
            Style::default().fg(muted(app)),
        )),
    ]);
    f.render_widget(heading, chunks[0]);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<18}"), Style::default().fg(muted(app))),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    let mut summary = vec![
        row("Weekly Sessions", preview.weekly_sessions.clone()),
        row("Session Duration", preview.session_length.clone()),
        row("Primary Goal", preview.goals.join(", ")),
        row("Difficulty", preview.level.clone()),
    ];
    if !preview.equipment.is_empty() {
        summary.push(row("Equipment", preview.equipment.join(", ")));
    }
    let summary = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL).title("Your 12-Week Journey"))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, chunks[1]);

    let week: Vec<ListItem> = preview
        .week
        .iter()
        .map(|(day, workout)| {
            let line = match workout {
                Some(title) => Line::from(vec![
                    Span::styled(format!("{day:<5}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(title.as_str()),
                ]),
                None => Line::from(vec![
                    Span::styled(format!("{day:<5}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled("Rest Day", Style::default().fg(muted(app))),
                ]),
            };
            ListItem::new(line)
        })
        .collect();
    let list = List::new(week).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Week 1 Preview - [Enter] Start My Journey"),
    );
    f.render_widget(list, chunks[2]);
}
