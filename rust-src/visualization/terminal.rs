//! ratatui widgets for the interactive dashboard.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block as WidgetBlock, BorderType, Borders, Paragraph, Row, Table, Widget, Wrap},
};

use crate::config::GRID_BREAKPOINTS;
use crate::dashboard::chart::{BarChartSpec, ChartSpec, Orientation, ProportionSpec};
use crate::dashboard::{Block, Document, Link, Panel};
use crate::format::{hex_to_rgb, wrap};


const PANEL_HEIGHT: u16 = 16;
const HEADER_BG: Color = Color::Rgb(17, 24, 39);
const ACCENT: Color = Color::Rgb(165, 180, 252);


/// One vertically stacked row of the scrollable body.
#[derive(Debug, Clone)]
enum BodyRow<'a> {
    Title(&'a str),
    Text(&'a str),
    Bullets(&'a [String]),
    Table(&'a [String; 2], &'a [[String; 2]]),
    Toggle(&'a str),
    Panels(&'a [Panel]),
    Embed(&'a str, Option<&'a str>),
    CallToAction(&'a Link),
}


/// Number of grid columns for a body width.
pub fn grid_columns(width: u16) -> usize {
    1 + GRID_BREAKPOINTS.iter().filter(|&&min| width >= min).count()
}


/// Flatten the document into body rows, splitting the grid by column count.
fn body_rows(doc: &Document, columns: usize) -> Vec<BodyRow<'_>> {
    let mut rows = Vec::new();

    for section in &doc.sections {
        if let Some(title) = &section.title {
            rows.push(BodyRow::Title(title));
        }
        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => rows.push(BodyRow::Text(text)),
                Block::Bullets(items) => rows.push(BodyRow::Bullets(items)),
                Block::Table { headers, rows: cells } => rows.push(BodyRow::Table(headers, cells)),
                Block::Toggle { label, .. } => rows.push(BodyRow::Toggle(label)),
                Block::PanelGrid(panels) => {
                    rows.extend(panels.chunks(columns.max(1)).map(BodyRow::Panels));
                }
                Block::EmbedPlaceholder { text, url } => {
                    rows.push(BodyRow::Embed(text, url.as_deref()));
                }
                Block::CallToAction(link) => rows.push(BodyRow::CallToAction(link)),
            }
        }
    }

    rows
}


/// Body row index where the section with the given anchor starts.
///
/// Sections before the chart grid always map to the same rows, so this
/// does not depend on terminal width.
pub fn anchor_row(doc: &Document, anchor: &str) -> Option<usize> {
    let section_idx = doc.anchor_index(anchor)?;
    let before = Document {
        header: doc.header.clone(),
        sections: doc.sections[..section_idx].to_vec(),
    };
    Some(body_rows(&before, 1).len())
}


/// Number of body rows at the given width; the scroll offset is clamped to it.
pub fn body_len(doc: &Document, width: u16) -> usize {
    body_rows(doc, grid_columns(width)).len()
}


fn row_height(row: &BodyRow<'_>, width: u16) -> u16 {
    let text_width = width.saturating_sub(4).max(10) as usize;
    match row {
        BodyRow::Title(_) => 2,
        BodyRow::Text(text) => wrap(text, text_width).len() as u16 + 1,
        BodyRow::Bullets(items) => {
            items
                .iter()
                .map(|item| wrap(item, text_width.saturating_sub(2).max(1)).len() as u16)
                .sum::<u16>()
                + 1
        }
        BodyRow::Table(_, cells) => cells.len() as u16 + 4,
        BodyRow::Toggle(_) => 2,
        BodyRow::Panels(_) => PANEL_HEIGHT,
        BodyRow::Embed(..) => 5,
        BodyRow::CallToAction(_) => 3,
    }
}


fn rgb(hex: &str) -> Color {
    let (r, g, b) = hex_to_rgb(hex);
    Color::Rgb(r, g, b)
}


/// The full dashboard screen: header, scrollable body and key hints.
pub struct DashboardScreen<'a> {
    pub document: &'a Document,
    pub scroll: usize,
    pub status: Option<&'a str>,
}


impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);

        render_header(self.document, chunks[0], buf);
        render_body(self.document, self.scroll, chunks[1], buf);
        render_footer(self.status, chunks[2], buf);
    }
}


fn render_header(doc: &Document, area: Rect, buf: &mut Buffer) {
    let block = WidgetBlock::default()
        .borders(Borders::BOTTOM)
        .style(Style::default().bg(HEADER_BG).fg(Color::White));
    let inner = block.inner(area);
    block.render(area, buf);

    let jump_width = doc.header.jump.label.chars().count() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(jump_width)])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        format!(" {}", doc.header.title),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .render(chunks[0], buf);

    Paragraph::new(Line::from(Span::styled(
        doc.header.jump.label.as_str(),
        Style::default().add_modifier(Modifier::UNDERLINED),
    )))
    .render(chunks[1], buf);
}


fn render_footer(status: Option<&str>, area: Rect, buf: &mut Buffer) {
    let hints = "t toggle · j/k scroll · g dashboard · c contact · q quit";
    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if let Some(status) = status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Style::default().fg(ACCENT)));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}


fn render_body(doc: &Document, scroll: usize, area: Rect, buf: &mut Buffer) {
    let rows = body_rows(doc, grid_columns(area.width));
    let start = scroll.min(rows.len().saturating_sub(1));
    let mut y = area.y;
    let bottom = area.y + area.height;

    for row in rows.iter().skip(start) {
        if y >= bottom {
            break;
        }
        let height = row_height(row, area.width).min(bottom - y);
        let row_area = Rect::new(area.x + 1, y, area.width.saturating_sub(2), height);
        render_row(row, row_area, buf);
        y += height;
    }
}


fn render_row(row: &BodyRow<'_>, area: Rect, buf: &mut Buffer) {
    match row {
        BodyRow::Title(title) => {
            Paragraph::new(Line::from(Span::styled(
                *title,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )))
            .render(area, buf);
        }
        BodyRow::Text(text) => {
            Paragraph::new(*text).wrap(Wrap { trim: true }).render(area, buf);
        }
        BodyRow::Bullets(items) => {
            let lines: Vec<Line> = items
                .iter()
                .flat_map(|item| {
                    wrap(item, area.width.saturating_sub(2).max(1) as usize)
                        .into_iter()
                        .enumerate()
                        .map(|(i, line)| Line::from(format!("{} {}", if i == 0 { "•" } else { " " }, line)))
                        .collect::<Vec<_>>()
                })
                .collect();
            Paragraph::new(lines).render(area, buf);
        }
        BodyRow::Table(headers, cells) => render_table(headers, cells, area, buf),
        BodyRow::Toggle(label) => {
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("[ {label} ]"),
                    Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  press t", Style::default().fg(Color::DarkGray)),
            ]))
            .render(area, buf);
        }
        BodyRow::Panels(panels) => {
            let constraints = vec![Constraint::Ratio(1, panels.len() as u32); panels.len()];
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(area);
            for (panel, cell) in panels.iter().zip(cells.iter()) {
                render_panel(panel, *cell, buf);
            }
        }
        BodyRow::Embed(text, url) => {
            let mut lines = vec![Line::from(Span::styled(*text, Style::default().fg(Color::DarkGray)))];
            if let Some(url) = url {
                lines.push(Line::from(Span::styled(*url, Style::default().fg(Color::Cyan))));
            }
            Paragraph::new(lines)
                .block(WidgetBlock::bordered().border_type(BorderType::Rounded).title(" BI embed "))
                .render(area, buf);
        }
        BodyRow::CallToAction(link) => {
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("[ {} ]", link.label),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ),
                Span::raw(" "),
                Span::styled(link.href.as_str(), Style::default().fg(Color::Cyan)),
            ]))
            .alignment(ratatui::layout::Alignment::Center)
            .block(WidgetBlock::default().borders(Borders::TOP))
            .render(area, buf);
        }
    }
}


fn render_table(headers: &[String; 2], cells: &[[String; 2]], area: Rect, buf: &mut Buffer) {
    let rows = cells
        .iter()
        .map(|cell| Row::new(vec![cell[0].clone(), cell[1].clone()]));
    let header = Row::new(vec![headers[0].clone(), headers[1].clone()])
        .style(Style::default().add_modifier(Modifier::BOLD));

    Table::new(rows, [Constraint::Length(16), Constraint::Length(10)])
        .header(header)
        .block(WidgetBlock::bordered().border_type(BorderType::Rounded))
        .render(area, buf);
}


fn render_panel(panel: &Panel, area: Rect, buf: &mut Buffer) {
    let block = WidgetBlock::bordered()
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", panel.caption.lead),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(3)])
        .split(inner);

    match &panel.chart {
        ChartSpec::Bars(bars) => {
            render_bars(bars, chunks[0], buf);
            render_legend(bars, chunks[1], buf);
        }
        ChartSpec::Proportion(pie) => render_proportion(pie, chunks[0], chunks[1], buf),
    }

    Paragraph::new(panel.caption.plain())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
}


fn render_bars(spec: &BarChartSpec, area: Rect, buf: &mut Buffer) {
    let direction = match spec.orientation {
        Orientation::Vertical => Direction::Vertical,
        Orientation::Horizontal => Direction::Horizontal,
    };
    let grouped = spec.series.len() > 1;
    let mut chart = BarChart::default()
        .direction(direction)
        .bar_gap(1)
        .group_gap(if grouped { 2 } else { 0 })
        .max(spec.max_value().max(1));

    if grouped {
        for (idx, category) in spec.categories.iter().enumerate() {
            let bars: Vec<Bar> = spec
                .series
                .iter()
                .map(|series| make_bar(series.values.get(idx).copied().unwrap_or(0), &series.fill))
                .collect();
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(category.as_str()))
                    .bars(&bars),
            );
        }
    } else if let Some(series) = spec.series.first() {
        let bars: Vec<Bar> = spec
            .categories
            .iter()
            .zip(series.values.iter())
            .map(|(category, value)| make_bar(*value, &series.fill).label(Line::from(category.as_str())))
            .collect();
        chart = chart.data(BarGroup::default().bars(&bars));
    }

    let slots = (spec.categories.len() * spec.series.len().max(1)).max(1) as u16;
    let bar_width = match spec.orientation {
        Orientation::Vertical => (area.width / slots).saturating_sub(1).clamp(1, (spec.bar_size / 4).max(1) as u16),
        Orientation::Horizontal => 1,
    };

    chart.bar_width(bar_width).render(area, buf);
}


fn make_bar<'a>(value: u64, fill: &str) -> Bar<'a> {
    let color = rgb(fill);
    Bar::default()
        .value(value)
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
}


fn render_legend(spec: &BarChartSpec, area: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = spec
        .series
        .iter()
        .flat_map(|series| {
            [
                Span::styled("■ ", Style::default().fg(rgb(&series.fill))),
                Span::raw(format!("{}  ", series.name)),
            ]
        })
        .collect();
    Paragraph::new(Line::from(spans))
        .alignment(ratatui::layout::Alignment::Center)
        .render(area, buf);
}


/// Slices as a stacked ratio bar plus one line per slice with its literal value.
fn render_proportion(spec: &ProportionSpec, area: Rect, legend: Rect, buf: &mut Buffer) {
    let total = spec.total();
    let width = area.width as usize;

    let mut ratio = Vec::new();
    let mut used = 0usize;
    for (idx, slice) in spec.slices.iter().enumerate() {
        let cells = if idx + 1 == spec.slices.len() {
            width.saturating_sub(used)
        } else if total == 0 {
            0
        } else {
            ((slice.value as f64 / total as f64) * width as f64).round() as usize
        };
        used += cells;
        ratio.push(Span::styled("█".repeat(cells), Style::default().fg(rgb(&slice.fill))));
    }
    if total == 0 {
        ratio = vec![Span::styled("░".repeat(width), Style::default().fg(Color::DarkGray))];
    }

    let mut lines = vec![Line::from(ratio), Line::default()];
    for slice in &spec.slices {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(rgb(&slice.fill))),
            Span::raw(format!("{:<12}", slice.label)),
            Span::styled(slice.value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }
    Paragraph::new(lines).render(area, buf);

    let names: Vec<Span> = spec
        .slices
        .iter()
        .flat_map(|slice| {
            [
                Span::styled("■ ", Style::default().fg(rgb(&slice.fill))),
                Span::raw(format!("{}  ", slice.label)),
            ]
        })
        .collect();
    Paragraph::new(Line::from(names))
        .alignment(ratatui::layout::Alignment::Center)
        .render(legend, buf);
}
