mod detail;
pub mod formatters;
mod modals;
mod news;
mod tables;

use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    tables::draw_cards(frame, body[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(body[1]);
    detail::draw_detail(frame, right[0], app);
    detail::draw_history_chart(frame, right[1], app);
    detail::draw_live_chart(frame, right[2], app);

    let strip = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);
    news::draw_news(frame, strip[0], app);
    tables::draw_portfolio(frame, strip[1], app);

    draw_footer(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Help => modals::draw_help(frame),
        InputMode::Glossary => modals::draw_glossary(frame, app),
        InputMode::Chat => modals::draw_chat(frame, app),
        _ => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let current_time = chrono::Local::now().format("%H:%M:%S").to_string();
    let live_style = if app.board.live.is_flashing(Instant::now()) {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(
            " Tickerboard ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" LIVE ", live_style),
        Span::styled(
            format!(" [{}] ", app.feed_label()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
    ];
    for tile in &app.board.indices {
        spans.push(Span::styled(
            format!("{} ", tile.name),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!("{} ", tile.value_text)));
        spans.push(Span::styled(
            format!("{}  ", tile.change_text),
            Style::default().fg(tables::tone_color(tile.tone)),
        ));
    }
    spans.push(Span::styled(
        format!("[{}]", current_time),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn prompt_line<'a>(label: String, input: &'a str, color: Color, hint: &'static str) -> Line<'a> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(input, Style::default().fg(color)),
        Span::styled("█", Style::default().fg(color)),
        Span::raw(hint),
    ])
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Normal => {
            let help = " [Enter] Select [w] Watchlist [/] Analyze [f] Forecast [r] Refresh [g] Glossary [c] Chat [a/d] Portfolio [?] Help [q] Quit ";
            if let Some(msg) = &app.status_message {
                Line::from(vec![
                    Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)),
                    Span::raw(" | "),
                    Span::styled(help, Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
            }
        }
        InputMode::Watchlist => prompt_line(
            " Watchlist: ".to_string(),
            &app.input_buffer,
            Color::Cyan,
            " | [Enter] Apply | [Esc] Cancel",
        ),
        InputMode::Analyze => prompt_line(
            " Analyze symbol: ".to_string(),
            &app.input_buffer,
            Color::Cyan,
            " | [Enter] Analyze | [Esc] Cancel",
        ),
        InputMode::Forecast => prompt_line(
            " Forecast days (1-30): ".to_string(),
            &app.input_buffer,
            Color::Yellow,
            " | [Enter] Forecast | [Esc] Cancel",
        ),
        InputMode::PortfolioSymbol => prompt_line(
            " Symbol: ".to_string(),
            &app.input_buffer,
            Color::Magenta,
            " | [Enter] Next | [Esc] Cancel",
        ),
        InputMode::PortfolioShares => prompt_line(
            format!(" {} shares: ", app.pending_symbol.as_deref().unwrap_or("")),
            &app.input_buffer,
            Color::Magenta,
            " | [Enter] Add | [Esc] Cancel",
        ),
        InputMode::Glossary => Line::from(Span::styled(
            " [Enter] Look up | [Esc] Close ",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Chat => Line::from(Span::styled(
            " [Enter] Send | [Esc] Close ",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Help => Line::from(Span::styled(
            " [?/Enter/Esc] Close help ",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
