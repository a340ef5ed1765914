//! Terminal rendering of the chart payloads.
//!
//! Dates are plotted by index so that the price and volume panels share one
//! x mapping; axis labels show the first, middle and last date.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Axis, Block, Borders, Chart, Dataset, GraphType,
    },
    Frame,
};

use crate::ui::components::format_large_number;
use crate::views::charts::{CandlestickSpec, LineChartSpec};

/// Chart colour names to terminal colours, `fallback` for anything unknown
pub fn parse_color(name: &str, fallback: Color) -> Color {
    name.parse::<Color>().unwrap_or(fallback)
}

/// First, middle and last date as axis labels
pub fn date_labels(dates: &[NaiveDate]) -> Vec<String> {
    match dates {
        [] => Vec::new(),
        [only] => vec![only.to_string()],
        [first, .., last] => vec![
            first.to_string(),
            dates[dates.len() / 2].to_string(),
            last.to_string(),
        ],
    }
}

/// Padded y bounds so flat series still get a visible range
pub fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.05).max(max.abs() * 0.01).max(f64::EPSILON);
    [min - pad, max + pad]
}

pub fn render_line_chart(f: &mut Frame, area: Rect, spec: &LineChartSpec) {
    let points: Vec<(f64, f64)> = spec
        .series
        .y
        .iter()
        .enumerate()
        .map(|(i, close)| (i as f64, *close))
        .collect();
    let y_bounds = value_bounds(spec.series.y.iter().copied());
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name(spec.series.name.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let x_labels: Vec<Span> = date_labels(&spec.series.x).into_iter().map(Span::raw).collect();
    let y_labels: Vec<Span> = [y_bounds[0], (y_bounds[0] + y_bounds[1]) / 2.0, y_bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{:.2}", v)))
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(spec.title.clone()))
        .x_axis(
            Axis::default()
                .title(spec.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub fn render_candlestick(f: &mut Frame, area: Rect, spec: &CandlestickSpec) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let count = spec.candles.len().max(1) as f64;
    let y_bounds = match spec.price_bounds() {
        Some((low, high)) => value_bounds([low, high].into_iter()),
        None => [0.0, 1.0],
    };
    let up = parse_color(&spec.increasing_color, Color::Green);
    let down = parse_color(&spec.decreasing_color, Color::Red);
    let dates: Vec<NaiveDate> = spec.candles.iter().map(|c| c.date).collect();
    let axis_note = date_labels(&dates).join("  ..  ");

    let candles = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}  [{}]", spec.title, axis_note)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, count])
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (i, candle) in spec.candles.iter().enumerate() {
                let color = if candle.is_up() { up } else { down };
                let center = i as f64 + 0.5;
                ctx.draw(&CanvasLine {
                    x1: center,
                    y1: candle.low,
                    x2: center,
                    y2: candle.high,
                    color,
                });
                let (bottom, top) = if candle.open <= candle.close {
                    (candle.open, candle.close)
                } else {
                    (candle.close, candle.open)
                };
                for offset in [-0.3, -0.15, 0.15, 0.3] {
                    ctx.draw(&CanvasLine {
                        x1: center + offset,
                        y1: bottom,
                        x2: center + offset,
                        y2: top,
                        color,
                    });
                }
            }
        });
    f.render_widget(candles, chunks[0]);

    let max_volume = spec.max_volume();
    let volume_color = parse_color(&spec.volume_color, Color::Blue);
    let volume = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (max {})", spec.volume_title, format_large_number(max_volume))),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, count])
        .y_bounds([0.0, max_volume.max(1.0)])
        .paint(|ctx| {
            for (i, bar) in spec.volume.iter().enumerate() {
                let center = i as f64 + 0.5;
                ctx.draw(&CanvasLine {
                    x1: center,
                    y1: 0.0,
                    x2: center,
                    y2: bar.volume,
                    color: volume_color,
                });
            }
        });
    f.render_widget(volume, chunks[1]);
}
