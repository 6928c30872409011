use crate::app::App;
use crate::view::{CardNode, Freshness, PortfolioRow, Tone};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

pub(super) struct ColumnDef {
    pub name: &'static str,
    pub width: u16,
    pub priority: u8,
}

const CARD_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "Symbol",
        width: 8,
        priority: 1,
    },
    ColumnDef {
        name: "Price",
        width: 12,
        priority: 1,
    },
    ColumnDef {
        name: "Change",
        width: 18,
        priority: 1,
    },
    ColumnDef {
        name: "Updated",
        width: 12,
        priority: 2,
    },
];

const PORTFOLIO_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "Symbol",
        width: 8,
        priority: 1,
    },
    ColumnDef {
        name: "Shares",
        width: 8,
        priority: 2,
    },
    ColumnDef {
        name: "Day Gain",
        width: 12,
        priority: 1,
    },
];

pub(super) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::Gray,
    }
}

pub(super) fn visible_columns(columns: &[ColumnDef], available_width: u16) -> Vec<usize> {
    let max_priority = columns.iter().map(|c| c.priority).max().unwrap_or(1);
    let mut visible: Vec<usize> = Vec::new();
    for priority_cutoff in 1..=max_priority {
        let candidate: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.priority <= priority_cutoff)
            .map(|(i, _)| i)
            .collect();
        let total_width: u16 = candidate.iter().map(|&i| columns[i].width).sum();
        if total_width <= available_width {
            visible = candidate;
        } else {
            break;
        }
    }
    if visible.is_empty() {
        visible = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.priority == 1)
            .map(|(i, _)| i)
            .collect();
    }
    visible
}

fn column_constraints(columns: &[ColumnDef], vis: &[usize], available_width: u16) -> Vec<Constraint> {
    let total_vis_width: u16 = vis.iter().map(|&i| columns[i].width).sum();
    let mut constraints: Vec<Constraint> = vis
        .iter()
        .map(|&i| Constraint::Length(columns[i].width))
        .collect();
    if available_width > total_vis_width {
        constraints.push(Constraint::Min(0));
    }
    constraints
}

fn header_row(columns: &[ColumnDef], vis: &[usize], color: Color) -> Row<'static> {
    let cells: Vec<Cell> = vis
        .iter()
        .map(|&i| {
            Cell::from(columns[i].name)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        })
        .collect();
    Row::new(cells).height(1)
}

fn card_row(card: &CardNode, vis: &[usize], is_cursor: bool) -> Row<'static> {
    let tone = tone_color(card.tone);
    let base = match card.freshness {
        Freshness::Stale => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    };
    let symbol_style = if card.highlighted {
        base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        base.add_modifier(Modifier::BOLD)
    };
    let last_style = match card.freshness {
        Freshness::Unavailable => Style::default().fg(Color::Red),
        Freshness::Stale => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::DarkGray),
    };

    let cells: Vec<Cell> = vis
        .iter()
        .map(|&col| match col {
            0 => {
                let marker = if card.highlighted { "▶ " } else { "  " };
                Cell::from(format!("{}{}", marker, card.symbol)).style(symbol_style)
            }
            1 => Cell::from(card.price_text.clone()).style(base.add_modifier(Modifier::BOLD)),
            2 => Cell::from(card.change_text.clone()).style(Style::default().fg(tone)),
            3 => Cell::from(card.last_text.clone()).style(last_style),
            _ => Cell::from(""),
        })
        .collect();

    let row_style = if is_cursor {
        Style::default().bg(Color::Rgb(40, 80, 120))
    } else {
        Style::default()
    };
    Row::new(cells).style(row_style)
}

pub fn draw_cards(frame: &mut Frame, area: Rect, app: &App) {
    let available_width = area.width.saturating_sub(2);
    let vis = visible_columns(CARD_COLUMNS, available_width);
    let header = header_row(CARD_COLUMNS, &vis, Color::Yellow);

    let rows: Vec<Row> = app
        .board
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| card_row(card, &vis, i == app.cursor))
        .collect();

    let title = format!(" Watchlist ({}) ", app.board.cards.len());
    let table = Table::new(rows, column_constraints(CARD_COLUMNS, &vis, available_width))
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = TableState::default();
    if !app.board.cards.is_empty() {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn portfolio_row(row: &PortfolioRow, vis: &[usize]) -> Row<'static> {
    let cells: Vec<Cell> = vis
        .iter()
        .map(|&col| match col {
            0 => Cell::from(row.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            1 => Cell::from(row.shares.to_string()),
            2 => Cell::from(row.gain_text.clone()).style(
                Style::default()
                    .fg(tone_color(row.tone))
                    .add_modifier(Modifier::BOLD),
            ),
            _ => Cell::from(""),
        })
        .collect();
    Row::new(cells)
}

pub fn draw_portfolio(frame: &mut Frame, area: Rect, app: &App) {
    let available_width = area.width.saturating_sub(2);
    let vis = visible_columns(PORTFOLIO_COLUMNS, available_width);
    let header = header_row(PORTFOLIO_COLUMNS, &vis, Color::Magenta);
    let rows: Vec<Row> = app
        .board
        .portfolio
        .iter()
        .map(|row| portfolio_row(row, &vis))
        .collect();

    let table = Table::new(rows, column_constraints(PORTFOLIO_COLUMNS, &vis, available_width))
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Portfolio "));
    frame.render_widget(table, area);
}
