/// Rendering helpers shared by the dashboard panels
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::views::TableView;

/// Render a bordered placeholder message
pub fn render_placeholder(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let placeholder = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(placeholder, area);
}

/// Render a block of text whose first line is emphasised
pub fn render_text_block(f: &mut Frame, area: Rect, title: &str, text: &str, emphasise_first: bool) {
    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if emphasise_first && i == 0 {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(line.to_string())
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Render "Label: value" lines with the label highlighted
pub fn render_labelled_lines(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let lines: Vec<Line> = text
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((label, value)) => Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::Cyan)),
                Span::raw(value.to_string()),
            ]),
            None => Line::from(line.to_string()),
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);
}

/// Column widths sized to the longest cell, capped so wide tables still fit
pub fn column_widths(view: &TableView, max_width: u16) -> Vec<Constraint> {
    view.columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let longest = view
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Length((longest.min(max_width as usize) as u16).max(4))
        })
        .collect()
}

/// Render a company table starting at `offset`, with heading and caption
pub fn render_table_view(f: &mut Frame, area: Rect, view: &TableView, offset: usize, focused: bool) {
    let caption_height = view.caption.lines().count() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(caption_height), Constraint::Min(0)])
        .split(area);

    let caption = Paragraph::new(view.caption.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(caption, chunks[0]);

    let header_style = Style::default()
        .fg(Color::Rgb(0xed, 0xf3, 0xf5))
        .bg(Color::Rgb(0x38, 0x3c, 0x3d))
        .add_modifier(Modifier::BOLD);
    let header = Row::new(view.columns.iter().map(|c| Cell::from(c.clone()))).style(header_style);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .skip(offset)
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))))
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = format!(
        "{} ({}/{})",
        view.heading,
        (offset + 1).min(view.row_count()),
        view.row_count()
    );

    let table = Table::new(rows, column_widths(view, 24))
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .column_spacing(2);
    f.render_widget(table, chunks[1]);
}

/// Format large numbers with a magnitude suffix
pub fn format_large_number(value: f64) -> String {
    if value >= 1_000_000_000_000.0 {
        format!("{:.1}T", value / 1_000_000_000_000.0)
    } else if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}
