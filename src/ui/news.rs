use super::formatters::{format_relative_time, truncate_str};
use crate::api::{Headline, Impact};
use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn impact_color(impact: Impact) -> Color {
    match impact {
        Impact::Positive => Color::Green,
        Impact::Negative => Color::Red,
        Impact::Neutral => Color::Gray,
    }
}

fn headline_lines(item: &Headline, width: usize) -> Vec<Line<'static>> {
    let time = format_relative_time(item.published_at);
    let meta = if time.is_empty() {
        format!("{} | {}", item.publisher, item.impact.label())
    } else {
        format!("{} - {} | {}", item.publisher, time, item.impact.label())
    };
    vec![
        Line::from(Span::styled(
            truncate_str(&item.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(meta, Style::default().fg(impact_color(item.impact)))),
    ]
}

pub fn draw_news(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    for item in app.news.visible() {
        lines.extend(headline_lines(item, width));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No news available",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let title = format!(" News ({}) ", app.news.len());
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(widget, area);
}
