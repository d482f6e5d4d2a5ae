//! One-shot terminal print of the dashboard.

use std::fmt::Write;

use crate::dashboard::chart::{BarChartSpec, ChartSpec, ProportionSpec};
use crate::dashboard::{Block, Document, Panel};
use crate::format::{hex_to_rgb, wrap};


const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 24;
const TEXT_WIDTH: usize = 76;


/// ANSI styling switch; `Plain` emits no escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Color,
    Plain,
}


impl TextStyle {
    fn code(self, code: &'static str) -> &'static str {
        match self {
            TextStyle::Color => code,
            TextStyle::Plain => "",
        }
    }

    fn fg(self, hex: &str) -> String {
        match self {
            TextStyle::Color => {
                let (r, g, b) = hex_to_rgb(hex);
                format!("\x1b[38;2;{r};{g};{b}m")
            }
            TextStyle::Plain => String::new(),
        }
    }
}


/// Render the whole document as terminal text.
pub fn render_text(doc: &Document, style: TextStyle) -> String {
    let mut out = String::new();
    let bold = style.code(BOLD);
    let dim = style.code(DIM);
    let cyan = style.code(CYAN);
    let reset = style.code(RESET);

    // writeln! into a String cannot fail
    let _ = writeln!(out, "{}", "═".repeat(TEXT_WIDTH));
    let _ = writeln!(out, "{bold}{}{reset}", doc.header.title);
    let _ = writeln!(
        out,
        "{dim}{} ({}){reset}",
        doc.header.jump.label, doc.header.jump.href
    );
    let _ = writeln!(out, "{}", "═".repeat(TEXT_WIDTH));

    for section in &doc.sections {
        out.push('\n');
        if let Some(title) = &section.title {
            let _ = writeln!(out, "{bold}{}{reset}", title.to_uppercase());
            let _ = writeln!(out, "{}", "-".repeat(40));
        }

        for block in &section.blocks {
            render_block(&mut out, block, style);
        }
    }

    let _ = writeln!(
        out,
        "\n{dim}Tip: flip the atomicity chart interactively with {reset}{cyan}hdbi dashboard{reset}"
    );

    out
}


fn render_block(out: &mut String, block: &Block, style: TextStyle) {
    let bold = style.code(BOLD);
    let dim = style.code(DIM);
    let cyan = style.code(CYAN);
    let reset = style.code(RESET);

    match block {
        Block::Paragraph(text) => {
            for line in wrap(text, TEXT_WIDTH - 2) {
                let _ = writeln!(out, "  {line}");
            }
            out.push('\n');
        }
        Block::Bullets(items) => {
            for item in items {
                for (i, line) in wrap(item, TEXT_WIDTH - 4).into_iter().enumerate() {
                    let marker = if i == 0 { "•" } else { " " };
                    let _ = writeln!(out, "  {marker} {line}");
                }
            }
            out.push('\n');
        }
        Block::Table { headers, rows } => {
            let width = rows
                .iter()
                .map(|r| r[0].chars().count())
                .chain(std::iter::once(headers[0].chars().count()))
                .max()
                .unwrap_or(0);
            let _ = writeln!(out, "  {bold}{:<width$}  {:>10}{reset}", headers[0], headers[1]);
            for row in rows {
                let _ = writeln!(out, "  {:<width$}  {:>10}", row[0], row[1]);
            }
            out.push('\n');
        }
        Block::Toggle { label, .. } => {
            let _ = writeln!(out, "  {bold}[ {label} ]{reset}\n");
        }
        Block::PanelGrid(panels) => {
            for panel in panels {
                render_panel(out, panel, style);
            }
        }
        Block::EmbedPlaceholder { text, url } => {
            let _ = writeln!(out, "  ┌{}┐", "─".repeat(TEXT_WIDTH - 6));
            let _ = writeln!(out, "  │ {dim}{:<w$}{reset} │", text, w = TEXT_WIDTH - 8);
            if let Some(url) = url {
                let _ = writeln!(out, "  │ {cyan}{:<w$}{reset} │", url, w = TEXT_WIDTH - 8);
            }
            let _ = writeln!(out, "  └{}┘\n", "─".repeat(TEXT_WIDTH - 6));
        }
        Block::CallToAction(link) => {
            let _ = writeln!(out, "  {bold}[ {} ]{reset} {cyan}{}{reset}", link.label, link.href);
        }
    }
}


fn render_panel(out: &mut String, panel: &Panel, style: TextStyle) {
    let bold = style.code(BOLD);
    let dim = style.code(DIM);
    let reset = style.code(RESET);

    let _ = writeln!(out, "  {bold}{}{reset}", panel.caption.lead);
    match &panel.chart {
        ChartSpec::Bars(bars) => render_bars(out, bars, style),
        ChartSpec::Proportion(pie) => render_proportion(out, pie, style),
    }
    for line in wrap(&panel.caption.plain(), TEXT_WIDTH - 4) {
        let _ = writeln!(out, "    {dim}{line}{reset}");
    }
    out.push('\n');
}


fn render_bars(out: &mut String, bars: &BarChartSpec, style: TextStyle) {
    let max_value = bars.max_value();
    let label_width = bars.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let legend = bars.series.len() > 1;

    for (idx, category) in bars.categories.iter().enumerate() {
        for (series_idx, series) in bars.series.iter().enumerate() {
            let value = series.values.get(idx).copied().unwrap_or(0);
            let label = if series_idx == 0 { category.as_str() } else { "" };
            let name = if legend { format!(" {}", series.name) } else { String::new() };
            let _ = writeln!(
                out,
                "    {:<label_width$} {} {:>6}{}",
                label,
                create_bar(value, max_value, BAR_WIDTH, &series.fill, style),
                value,
                name,
            );
        }
    }

    if !legend {
        if let Some(series) = bars.series.first() {
            let _ = writeln!(out, "    {}■{} {}", style.fg(&series.fill), style.code(RESET), series.name);
        }
    }
}


fn render_proportion(out: &mut String, pie: &ProportionSpec, style: TextStyle) {
    let total = pie.total();
    let label_width = pie.slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

    for slice in &pie.slices {
        let _ = writeln!(
            out,
            "    {:<label_width$} {} {:>6}",
            slice.label,
            create_bar(slice.value, total, BAR_WIDTH, &slice.fill, style),
            slice.value,
        );
    }
}


/// Create a simple text bar for visualization.
fn create_bar(value: u64, max_value: u64, width: usize, fill: &str, style: TextStyle) -> String {
    if max_value == 0 {
        return "░".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64) as usize;
    let filled = filled.min(width);

    format!(
        "{}{}{}{}{}{}",
        style.fg(fill),
        "█".repeat(filled),
        style.code(RESET),
        style.code(DIM),
        "░".repeat(width - filled),
        style.code(RESET),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{render, RenderOptions, ToggleState};
    use crate::data::STORE;

    fn plain(toggle: ToggleState) -> String {
        render_text(&render(&STORE, toggle, &RenderOptions::default()), TextStyle::Plain)
    }

    #[test]
    fn test_plain_has_no_escape_codes() {
        assert!(!plain(ToggleState::Visible).contains('\x1b'));
    }

    #[test]
    fn test_toggle_label_and_panel() {
        let visible = plain(ToggleState::Visible);
        assert!(visible.contains("[ Hide Atomicity Chart ]"));
        assert!(visible.contains("Attempted Inserts"));

        let hidden = plain(ToggleState::Hidden);
        assert!(hidden.contains("[ Show Atomicity Chart ]"));
        assert!(!hidden.contains("Attempted Inserts"));
    }

    #[test]
    fn test_row_counts_and_contact() {
        let text = plain(ToggleState::Visible);
        assert_eq!(text.matches("3,000").count(), 5);
        assert!(text.contains("mailto:data-team@example.com?subject=Hospital%20DB%20Insights"));
    }

    #[test]
    fn test_room_availability_shows_literal_values() {
        let text = plain(ToggleState::Visible);
        assert!(text.contains("  2300"));
        assert!(text.contains("   700"));
        assert!(!text.contains("2,300"));
    }

    #[test]
    fn test_create_bar_handles_zero_max() {
        assert_eq!(create_bar(0, 0, 4, "#000000", TextStyle::Plain), "░░░░");
        assert_eq!(create_bar(2, 4, 4, "#000000", TextStyle::Plain), "██░░");
    }
}
