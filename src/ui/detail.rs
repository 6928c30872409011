use super::tables::tone_color;
use crate::app::App;
use crate::chart::{ChartModel, SeriesKind};
use crate::view::{DetailPanel, Freshness};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

fn section_divider<'a>(title: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("─── {} ", title), Style::default().fg(Color::Yellow)),
        Span::styled("───────────────", Style::default().fg(Color::DarkGray)),
    ])
}

fn detail_lines(panel: &DetailPanel) -> Vec<Line<'static>> {
    let last_style = match panel.freshness {
        Freshness::Unavailable => Style::default().fg(Color::Red),
        Freshness::Stale => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::DarkGray),
    };
    vec![
        Line::from(Span::styled(
            panel.company.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(panel.sector.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled(
                panel.price_text.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                panel.change_text.clone(),
                Style::default()
                    .fg(tone_color(panel.tone))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        section_divider("Fundamentals"),
        Line::from(vec![
            Span::raw("Market Cap: "),
            Span::styled(panel.market_cap.clone(), Style::default().fg(Color::Cyan)),
            Span::raw("  Volume: "),
            Span::raw(panel.volume.clone()),
            Span::raw("  P/E: "),
            Span::raw(panel.pe_text.clone()),
        ]),
        Line::from(vec![
            Span::raw("Last update: "),
            Span::styled(panel.last_text.clone(), last_style),
        ]),
    ]
}

pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let panel = &app.board.detail;
    let title = match &panel.symbol {
        Some(symbol) => format!(" {} ", symbol),
        None => " Detail ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let content = if panel.symbol.is_some() {
        detail_lines(panel)
    } else {
        vec![Line::from(Span::styled(
            "Select a stock to see details",
            Style::default().fg(Color::DarkGray),
        ))]
    };
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn series_style(kind: SeriesKind) -> (Color, GraphType) {
    match kind {
        SeriesKind::History => (Color::Cyan, GraphType::Line),
        SeriesKind::Forecast => (Color::Yellow, GraphType::Line),
        SeriesKind::UpperBand | SeriesKind::LowerBand => (Color::DarkGray, GraphType::Line),
        SeriesKind::Live => (Color::Green, GraphType::Line),
    }
}

fn axis_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.clone())],
        [first, .., last] => {
            let mid = &labels[labels.len() / 2];
            vec![
                Span::raw(first.clone()),
                Span::raw(mid.clone()),
                Span::raw(last.clone()),
            ]
        }
    }
}

const BAND_FILL_STEPS: usize = 6;

/// Plot a chart model. Gaps (`None` points) are simply not drawn. The
/// forecast band is shaded with a dot scatter beneath the lines.
fn draw_model(frame: &mut Frame, area: Rect, model: &ChartModel, title: String) {
    let plotted: Vec<(SeriesKind, String, Vec<(f64, f64)>)> = model
        .series
        .iter()
        .map(|s| (s.kind, s.name.clone(), s.plotted()))
        .collect();
    let fill = model.band_fill(BAND_FILL_STEPS);

    let mut datasets: Vec<Dataset> = Vec::with_capacity(plotted.len() + 1);
    if !fill.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::DarkGray))
                .data(&fill),
        );
    }
    datasets.extend(plotted.iter().map(|(kind, name, points)| {
        let (color, graph) = series_style(*kind);
        Dataset::default()
            .name(name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(graph)
            .style(Style::default().fg(color))
            .data(points)
    }));

    let (lo, hi) = model.bounds().unwrap_or((0.0, 1.0));
    let pad = ((hi - lo) * 0.05).max(0.01);
    let (lo, hi) = (lo - pad, hi + pad);
    let x_max = model.labels.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(axis_labels(&model.labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([lo, hi])
                .labels(vec![
                    Span::raw(format!("{:.2}", lo)),
                    Span::raw(format!("{:.2}", hi)),
                ]),
        );
    frame.render_widget(chart, area);
}

pub fn draw_history_chart(frame: &mut Frame, area: Rect, app: &App) {
    match app.chart.model() {
        Some(model) => {
            let title = match &app.predict_status {
                Some(status) => format!(" {} | {} ", model.title, status),
                None => format!(" {} ", model.title),
            };
            draw_model(frame, area, model, title);
        }
        None => {
            let text = app
                .chart_status
                .clone()
                .unwrap_or_else(|| "Chart data unavailable".to_string());
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Daily "));
            frame.render_widget(placeholder, area);
        }
    }
}

pub fn draw_live_chart(frame: &mut Frame, area: Rect, app: &App) {
    let model = app.live_chart.model();
    let title = match app.live_chart.last_value() {
        Some(value) => format!(" {} live: {:.2} ", model.title, value),
        None => format!(" {} live ", model.title),
    };
    draw_model(frame, area, model, title);
}
