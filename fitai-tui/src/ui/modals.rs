// src/ui/modals.rs
use crate::{
    app::{ActiveModal, App},
    ui::layout::{accent, centered_rect},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_modal(f: &mut Frame, app: &App) {
    match app.active_modal {
        ActiveModal::Help => render_help_modal(f),
        ActiveModal::Pricing => render_pricing_modal(f, app),
        ActiveModal::None => {} // Should not happen if called correctly
    }
}

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 80, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Global ---").style(Style::new().bold().underlined()),
        Line::from(" Q: Quit Application (not while in Chat)"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(" F1-F5: Dashboard, Workout, Chat, Progress, Settings"),
        Line::from(""),
        Line::from("--- Onboarding ---").style(Style::new().bold().underlined()),
        Line::from(" k/j / ↑/↓: Move Between Options"),
        Line::from(" Space: Select Option (toggle on multi-select questions)"),
        Line::from(" Enter: Continue / Create My Plan / Start My Journey"),
        Line::from(" Esc / Backspace: Previous Question"),
        Line::from(""),
        Line::from("--- Workout (F2) ---").style(Style::new().bold().underlined()),
        Line::from(" s: Start   p / Space: Pause or Resume"),
        Line::from(" c / Enter: Mark Highlighted Exercise Done/Not Done"),
        Line::from(" k/j / ↑/↓: Select Exercise   n: Next Exercise"),
        Line::from(" t: Start/Stop Exercise Timer   r: Reset Timer"),
        Line::from(""),
        Line::from("--- Chat (F3) ---").style(Style::new().bold().underlined()),
        Line::from(" Type and press Enter to send"),
        Line::from(" Tab / Shift+Tab: Pick a Suggestion, Enter sends it"),
        Line::from(" Esc: Back to Dashboard"),
        Line::from(""),
        Line::from("--- Progress (F4) / Settings (F5) ---").style(Style::new().bold().underlined()),
        Line::from(" Tab: Week > Month > All Time"),
        Line::from(" k/j / ↑/↓, Space: Choose and Flip a Setting"),
        Line::from(" u: View Plans"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, ?, or Enter to close ",
            Style::new().italic().yellow(),
        )),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn render_pricing_modal(f: &mut Frame, app: &App) {
    let block = Block::default()
        .title("Choose Your Plan")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(80, 60, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let plans = app.service.pricing_plans();
    let inner = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, plans.len().max(1) as u32); plans.len()])
        .split(inner);

    for (plan, column) in plans.iter().zip(columns.iter()) {
        let border = if plan.popular {
            Style::default().fg(accent(app))
        } else {
            Style::default()
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("${}/{}", plan.price, plan.period),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(plan.features.iter().map(|feature| {
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(feature.as_str()),
            ])
        }));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[ {} ]", plan.cta),
            Style::default().fg(accent(app)),
        )));

        let title = if plan.popular {
            format!("{} - Most Popular", plan.name)
        } else {
            plan.name.clone()
        };
        let card = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(card, *column);
    }
}
