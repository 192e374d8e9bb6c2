// src/ui/chat.rs
use crate::{app::App, ui::layout::{accent, muted}};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Messages
            Constraint::Length(1), // Suggestion chips
            Constraint::Length(3), // Input
        ])
        .split(area);

    render_messages(f, app, chunks[0]);
    render_chips(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let accent = accent(app);
    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        let (name, style) = if message.is_user() {
            ("You", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            ("🤖 AI Coach", Style::default().fg(accent).add_modifier(Modifier::BOLD))
        };
        lines.push(Line::from(vec![
            Span::styled(name, style),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                Style::default().fg(muted(app)),
            ),
        ]));
        // Bold markers are not rendered in the terminal
        for text in message.content.replace("**", "").lines() {
            lines.push(Line::from(text.to_string()));
        }
        lines.push(Line::from(""));
    }
    if app.conversation.is_typing() {
        lines.push(Line::from(Span::styled(
            "🤖 AI Coach is typing...",
            Style::default().fg(muted(app)).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest message in view
    let inner_width = usize::from(area.width.saturating_sub(2)).max(1);
    let inner_height = usize::from(area.height.saturating_sub(2));
    let wrapped: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();
    let scroll = u16::try_from(wrapped.saturating_sub(inner_height)).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("AI Coach"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_chips(f: &mut Frame, app: &App, area: Rect) {
    let accent = accent(app);
    let mut spans = vec![Span::styled(" Suggestions: ", Style::default().fg(muted(app)))];
    for (index, chip) in app.conversation.latest_suggestions().iter().enumerate() {
        let style = if app.chip_index == Some(index) {
            Style::default().fg(Color::Black).bg(accent)
        } else {
            Style::default().fg(accent)
        };
        spans.push(Span::styled(format!("[{chip}]"), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let typing = app.conversation.is_typing();
    let title = if typing {
        "Ask your coach... (waiting for reply)"
    } else {
        "Ask your coach... [Enter] Send"
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.chat_input.as_str()),
        Span::styled("█", Style::default().fg(muted(app))),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(if typing { muted(app) } else { accent(app) })),
    );
    f.render_widget(input, area);
}
