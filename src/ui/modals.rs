use super::centered_rect;
use crate::app::{App, Speaker};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn help_section(title: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("─── {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("─────────────────", Style::default().fg(Color::DarkGray)),
    ])
}

fn help_binding(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::default().fg(Color::Cyan)),
        Span::raw(desc.to_string()),
    ])
}

fn help_content() -> Vec<Line<'static>> {
    vec![
        help_section("General"),
        help_binding("q", "Quit"),
        help_binding("?", "Show this help"),
        help_binding("r", "Refresh every watchlist quote"),
        help_binding("↑ / k", "Move cursor up"),
        help_binding("↓ / j", "Move cursor down"),
        help_binding("Enter", "Select the card under the cursor"),
        Line::from(""),
        help_section("Analysis"),
        help_binding("w", "Edit watchlist (comma-separated)"),
        help_binding("/", "Analyze any symbol"),
        help_binding("f", "Forecast selected stock (1-30 days)"),
        help_binding("g", "Glossary lookup"),
        help_binding("c", "Chat with the assistant"),
        Line::from(""),
        help_section("Portfolio"),
        help_binding("a", "Add shares"),
        help_binding("d", "Remove holding for selection"),
    ]
}

fn modal_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black))
}

pub fn draw_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);
    let block = modal_block("Help - Keyboard Shortcuts", Color::Yellow);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(help_content()).alignment(Alignment::Left),
        inner_area,
    );
}

pub fn draw_glossary(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);
    let block = modal_block("Glossary", Color::Cyan);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::raw("Term: "),
        Span::styled(app.input_buffer.clone(), Style::default().fg(Color::Cyan)),
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ])];
    lines.push(Line::from(""));
    if let Some(view) = &app.glossary {
        lines.push(Line::from(Span::styled(
            view.term.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let style = if view.loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(view.text.clone(), style)));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner_area,
    );
}

fn speaker_style(speaker: Speaker) -> (&'static str, Style) {
    match speaker {
        Speaker::User => ("you", Style::default().fg(Color::Cyan)),
        Speaker::Assistant => ("bot", Style::default().fg(Color::Green)),
        Speaker::System => ("", Style::default().fg(Color::DarkGray)),
    }
}

pub fn draw_chat(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);
    let block = modal_block("Chat", Color::Green);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = app
        .chat_log
        .iter()
        .map(|line| {
            let (who, style) = speaker_style(line.speaker);
            if who.is_empty() {
                Line::from(Span::styled(format!("  {}", line.text), style))
            } else {
                Line::from(vec![
                    Span::styled(format!("{}> ", who), style.add_modifier(Modifier::BOLD)),
                    Span::raw(line.text.clone()),
                ])
            }
        })
        .collect();

    // Keep the tail visible.
    let room = inner_area.height.saturating_sub(2) as usize;
    if lines.len() > room {
        lines.drain(..lines.len() - room);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(app.input_buffer.clone(), Style::default().fg(Color::Green)),
        Span::styled("█", Style::default().fg(Color::Green)),
    ]));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        inner_area,
    );
}
