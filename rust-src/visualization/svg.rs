//! SVG rendering of the whole page and of individual charts.

use crate::dashboard::chart::{BarChartSpec, ChartSpec, Orientation, ProportionSpec};
use crate::dashboard::{Block, Document, Panel, Section};
use crate::format::{format_compact, wrap};


// Page palette
const PAGE_BG: &str = "#F9FAFB";
const HEADER_BG: &str = "#111827";
const CARD_BG: &str = "#FFFFFF";
const CARD_BORDER: &str = "#E5E7EB";
const TEXT: &str = "#111827";
const TEXT_SECONDARY: &str = "#4B5563";
const GRID_STROKE: &str = "#CCCCCC";
const ACCENT: &str = "#A5B4FC";

// Page geometry
const PAGE_WIDTH: i32 = 1280;
const HEADER_HEIGHT: i32 = 56;
const MARGIN: i32 = 32;
const CARD_PADDING: i32 = 24;
const SECTION_GAP: i32 = 40;
const LINE_HEIGHT: i32 = 20;
const GRID_COLUMNS: i32 = 4;
const GRID_GAP: i32 = 24;
const CHART_HEIGHT: i32 = 280;
const CAPTION_HEIGHT: i32 = 64;
const TEXT_WRAP: usize = 150;
const CAPTION_WRAP: usize = 40;


/// Escape text for XML content and attributes.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}


/// Render the full page as a standalone SVG document.
pub fn render_page_svg(doc: &Document) -> String {
    let mut body = Vec::new();
    let mut y = HEADER_HEIGHT + MARGIN;

    for section in &doc.sections {
        y = layout_section(section, y, &mut body);
        y += SECTION_GAP;
    }

    let height = y - SECTION_GAP + MARGIN;

    let mut svg_parts = vec![
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
            w = PAGE_WIDTH,
            h = height
        ),
        "<style>".to_string(),
        "  .title { fill: #FFFFFF; font: 600 20px -apple-system, sans-serif; }".to_string(),
        "  .jump { fill: #FFFFFF; font: 14px -apple-system, sans-serif; text-decoration: underline; }".to_string(),
        format!("  .card-title {{ fill: {}; font: 600 20px -apple-system, sans-serif; }}", TEXT),
        format!("  .body {{ fill: {}; font: 14px -apple-system, sans-serif; }}", TEXT),
        format!("  .muted {{ fill: {}; font: 12px -apple-system, sans-serif; }}", TEXT_SECONDARY),
        format!("  .axis {{ fill: {}; font: 11px -apple-system, sans-serif; }}", TEXT_SECONDARY),
        format!("  .button {{ fill: {}; font: 600 14px -apple-system, sans-serif; }}", TEXT),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, PAGE_WIDTH, height, PAGE_BG),
    ];

    // Header bar
    svg_parts.push(format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        PAGE_WIDTH, HEADER_HEIGHT, HEADER_BG
    ));
    svg_parts.push(format!(
        r#"<text x="24" y="35" class="title">{}</text>"#,
        escape_xml(&doc.header.title)
    ));
    svg_parts.push(format!(
        r#"<a xlink:href="{}"><text x="{}" y="34" class="jump" text-anchor="end">{}</text></a>"#,
        escape_xml(&doc.header.jump.href),
        PAGE_WIDTH - 24,
        escape_xml(&doc.header.jump.label)
    ));

    svg_parts.extend(body);
    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


/// Render one chart as a standalone SVG element.
pub fn render_chart_svg(chart: &ChartSpec, width: i32, height: i32) -> String {
    let mut parts = vec![format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" font-family="-apple-system, sans-serif">"#,
        w = width,
        h = height
    )];
    parts.extend(chart_body(chart, 0, 0, width, height));
    parts.push("</svg>".to_string());
    parts.join("\n")
}


fn layout_section(section: &Section, top: i32, out: &mut Vec<String>) -> i32 {
    let x = MARGIN;
    let width = PAGE_WIDTH - 2 * MARGIN;
    let mut inner = Vec::new();
    let mut y = top + CARD_PADDING;

    if let Some(title) = &section.title {
        inner.push(format!(
            r#"<text x="{}" y="{}" class="card-title">{}</text>"#,
            x + CARD_PADDING,
            y + 20,
            escape_xml(title)
        ));
        y += 44;
    }

    for block in &section.blocks {
        y = layout_block(block, x + CARD_PADDING, y, width - 2 * CARD_PADDING, &mut inner);
    }
    y += CARD_PADDING;

    match section.id {
        Some(id) => out.push(format!(r#"<g id="{}">"#, escape_xml(id))),
        None => out.push("<g>".to_string()),
    }
    if section.title.is_some() {
        out.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="12" fill="{}" stroke="{}"/>"#,
            x,
            top,
            width,
            y - top,
            CARD_BG,
            CARD_BORDER
        ));
    }
    out.extend(inner);
    out.push("</g>".to_string());

    y
}


fn layout_block(block: &Block, x: i32, top: i32, width: i32, out: &mut Vec<String>) -> i32 {
    let mut y = top;

    match block {
        Block::Paragraph(text) => {
            for line in wrap(text, TEXT_WRAP) {
                out.push(format!(r#"<text x="{}" y="{}" class="body">{}</text>"#, x, y + 15, escape_xml(&line)));
                y += LINE_HEIGHT;
            }
            y += 8;
        }
        Block::Bullets(items) => {
            for item in items {
                for (i, line) in wrap(item, TEXT_WRAP - 4).into_iter().enumerate() {
                    let marker = if i == 0 { "•" } else { " " };
                    out.push(format!(
                        r#"<text x="{}" y="{}" class="body">{} {}</text>"#,
                        x + 8,
                        y + 15,
                        marker,
                        escape_xml(&line)
                    ));
                    y += LINE_HEIGHT;
                }
            }
            y += 8;
        }
        Block::Table { headers, rows } => {
            let table_width = 360;
            let row_height = 28;
            out.push(format!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#F3F4F6"/>"##,
                x, y, table_width, row_height
            ));
            out.push(table_row(x, y, headers, "button"));
            y += row_height;
            for row in rows {
                out.push(format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                    x, y, x + table_width, y, CARD_BORDER
                ));
                out.push(table_row(x, y, row, "body"));
                y += row_height;
            }
            y += 16;
        }
        Block::Toggle { label, .. } => {
            let button_width = label.chars().count() as i32 * 8 + 24;
            out.push(format!(
                r#"<rect x="{}" y="{}" width="{}" height="30" rx="6" fill="{}" stroke="{}"/>"#,
                x, y, button_width, CARD_BG, CARD_BORDER
            ));
            out.push(format!(
                r#"<text x="{}" y="{}" class="button" text-anchor="middle">{}</text>"#,
                x + button_width / 2,
                y + 20,
                escape_xml(label)
            ));
            y += 30 + 24;
        }
        Block::PanelGrid(panels) => {
            let panel_width = (width - (GRID_COLUMNS - 1) * GRID_GAP) / GRID_COLUMNS;
            for (row_idx, row) in panels.chunks(GRID_COLUMNS as usize).enumerate() {
                let row_y = y + row_idx as i32 * (CHART_HEIGHT + CAPTION_HEIGHT + GRID_GAP);
                for (col_idx, panel) in row.iter().enumerate() {
                    let panel_x = x + col_idx as i32 * (panel_width + GRID_GAP);
                    layout_panel(panel, panel_x, row_y, panel_width, out);
                }
            }
            let rows = (panels.len() as i32 + GRID_COLUMNS - 1) / GRID_COLUMNS;
            y += rows * (CHART_HEIGHT + CAPTION_HEIGHT + GRID_GAP);
        }
        Block::EmbedPlaceholder { text, url } => {
            out.push(format!(
                r#"<rect x="{}" y="{}" width="{}" height="120" rx="8" fill="{}" stroke="{}" stroke-dasharray="6 4"/>"#,
                x, y, width, PAGE_BG, TEXT_SECONDARY
            ));
            out.push(format!(
                r#"<text x="{}" y="{}" class="body" text-anchor="middle">{}</text>"#,
                x + width / 2,
                y + 56,
                escape_xml(text)
            ));
            if let Some(url) = url {
                out.push(format!(
                    r#"<text x="{}" y="{}" class="muted" text-anchor="middle">{}</text>"#,
                    x + width / 2,
                    y + 80,
                    escape_xml(url)
                ));
            }
            y += 120 + 16;
        }
        Block::CallToAction(link) => {
            let button_width = 280;
            let button_x = x + (width - button_width) / 2;
            out.push(format!(r#"<a xlink:href="{}">"#, escape_xml(&link.href)));
            out.push(format!(
                r#"<rect x="{}" y="{}" width="{}" height="56" rx="16" fill="{}"/>"#,
                button_x, y, button_width, ACCENT
            ));
            out.push(format!(
                r#"<text x="{}" y="{}" class="button" text-anchor="middle">{}</text>"#,
                button_x + button_width / 2,
                y + 34,
                escape_xml(&link.label)
            ));
            out.push("</a>".to_string());
            y += 56;
        }
    }

    y
}


fn table_row(x: i32, y: i32, cells: &[String; 2], class: &str) -> String {
    format!(
        r#"<text x="{}" y="{}" class="{c}">{}</text><text x="{}" y="{}" class="{c}">{}</text>"#,
        x + 16,
        y + 19,
        escape_xml(&cells[0]),
        x + 200,
        y + 19,
        escape_xml(&cells[1]),
        c = class
    )
}


fn layout_panel(panel: &Panel, x: i32, y: i32, width: i32, out: &mut Vec<String>) {
    out.push(format!(r#"<g id="panel-{}">"#, panel.id.slug()));
    out.extend(chart_body(&panel.chart, x, y, width, CHART_HEIGHT));
    for (i, line) in wrap(&panel.caption.plain(), CAPTION_WRAP).into_iter().enumerate() {
        out.push(format!(
            r#"<text x="{}" y="{}" class="muted" text-anchor="middle">{}</text>"#,
            x + width / 2,
            y + CHART_HEIGHT + 18 + i as i32 * 16,
            escape_xml(&line)
        ));
    }
    out.push("</g>".to_string());
}


/// Chart primitives positioned inside the given box.
fn chart_body(chart: &ChartSpec, x: i32, y: i32, width: i32, height: i32) -> Vec<String> {
    match chart {
        ChartSpec::Bars(bars) => bar_body(bars, x, y, width, height),
        ChartSpec::Proportion(pie) => proportion_body(pie, x, y, width, height),
    }
}


/// Tick step and axis top for a value range, using 1/2/5 steps.
fn axis_scale(max: u64) -> (u64, u64) {
    if max == 0 {
        return (1, 4);
    }

    let raw = max as f64 / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };

    let step = ((nice * magnitude).round() as u64).max(1);
    let ticks = max.div_ceil(step).max(1);
    (step, step.saturating_mul(ticks))
}


fn bar_body(spec: &BarChartSpec, x: i32, y: i32, width: i32, height: i32) -> Vec<String> {
    let mut parts = Vec::new();
    let horizontal = spec.orientation == Orientation::Horizontal;

    let axis_left = if horizontal { 72 } else { 40 };
    let legend_height = 24;
    let axis_bottom = 24;
    let plot_x = (x + axis_left) as f64;
    let plot_y = (y + 8) as f64;
    let plot_w = (width - axis_left - 8).max(1) as f64;
    let plot_h = (height - 8 - axis_bottom - legend_height).max(1) as f64;

    let (step, top) = axis_scale(spec.max_value());
    let ticks = top / step;

    // Gridlines and value ticks
    for tick in 0..=ticks {
        let value = tick * step;
        let frac = value as f64 / top as f64;
        if horizontal {
            let gx = plot_x + frac * plot_w;
            parts.push(format!(
                r#"<line x1="{gx:.1}" y1="{:.1}" x2="{gx:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="3 3"/>"#,
                plot_y,
                plot_y + plot_h,
                GRID_STROKE
            ));
            parts.push(format!(
                r#"<text x="{gx:.1}" y="{:.1}" class="axis" font-size="11" text-anchor="middle">{}</text>"#,
                plot_y + plot_h + 16.0,
                format_compact(value)
            ));
        } else {
            let gy = plot_y + plot_h - frac * plot_h;
            parts.push(format!(
                r#"<line x1="{:.1}" y1="{gy:.1}" x2="{:.1}" y2="{gy:.1}" stroke="{}" stroke-dasharray="3 3"/>"#,
                plot_x,
                plot_x + plot_w,
                GRID_STROKE
            ));
            parts.push(format!(
                r#"<text x="{:.1}" y="{:.1}" class="axis" font-size="11" text-anchor="end">{}</text>"#,
                plot_x - 6.0,
                gy + 4.0,
                format_compact(value)
            ));
        }
    }

    let n = spec.categories.len().max(1) as f64;
    let n_series = spec.series.len().max(1) as f64;
    let band = if horizontal { plot_h / n } else { plot_w / n };
    let thickness = (spec.bar_size as f64).min(band * 0.8 / n_series).max(1.0);

    for (idx, category) in spec.categories.iter().enumerate() {
        let band_start = idx as f64 * band;
        let group_start = band_start + (band - thickness * n_series) / 2.0;

        for (series_idx, series) in spec.series.iter().enumerate() {
            let value = series.values.get(idx).copied().unwrap_or(0);
            let length = value as f64 / top as f64 * if horizontal { plot_w } else { plot_h };
            let offset = group_start + series_idx as f64 * thickness;

            let (bx, by, bw, bh) = if horizontal {
                (plot_x, plot_y + offset, length, thickness)
            } else {
                (plot_x + offset, plot_y + plot_h - length, thickness, length)
            };

            parts.push(format!(
                r#"<rect x="{bx:.1}" y="{by:.1}" width="{bw:.1}" height="{bh:.1}" fill="{}"><title>{}: {} {}</title></rect>"#,
                escape_xml(&series.fill),
                escape_xml(category),
                escape_xml(&series.name),
                value
            ));
        }

        // Category label
        let center = band_start + band / 2.0;
        let label = if horizontal {
            format!(
                r#"<text x="{:.1}" y="{:.1}" class="axis" font-size="11" text-anchor="end">{}</text>"#,
                plot_x - 6.0,
                plot_y + center + 4.0,
                escape_xml(category)
            )
        } else {
            format!(
                r#"<text x="{:.1}" y="{:.1}" class="axis" font-size="11" text-anchor="middle">{}</text>"#,
                plot_x + center,
                plot_y + plot_h + 16.0,
                escape_xml(category)
            )
        };
        parts.push(label);
    }

    // Axes
    parts.push(format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
        plot_x, plot_y, plot_x, plot_y + plot_h, TEXT_SECONDARY
    ));
    parts.push(format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
        plot_x, plot_y + plot_h, plot_x + plot_w, plot_y + plot_h, TEXT_SECONDARY
    ));

    // Legend
    let legend: Vec<(&str, &str)> = spec.series.iter().map(|s| (s.name.as_str(), s.fill.as_str())).collect();
    parts.extend(legend_row(&legend, x, y + height - 8, width));

    parts
}


fn legend_row(entries: &[(&str, &str)], x: i32, baseline: i32, width: i32) -> Vec<String> {
    let entry_widths: Vec<i32> = entries.iter().map(|(name, _)| name.chars().count() as i32 * 7 + 24).collect();
    let total: i32 = entry_widths.iter().sum();
    let mut cursor = x + (width - total).max(0) / 2;
    let mut parts = Vec::new();

    for ((name, fill), entry_width) in entries.iter().zip(entry_widths) {
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="10" height="10" fill="{}"/>"#,
            cursor,
            baseline - 9,
            escape_xml(fill)
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="axis" font-size="11">{}</text>"#,
            cursor + 14,
            baseline,
            escape_xml(name)
        ));
        cursor += entry_width;
    }

    parts
}


fn proportion_body(spec: &ProportionSpec, x: i32, y: i32, width: i32, height: i32) -> Vec<String> {
    let mut parts = Vec::new();
    let cx = x as f64 + width as f64 / 2.0;
    let cy = y as f64 + (height - 24) as f64 / 2.0;
    let outer = spec.outer_radius as f64;
    let inner = spec.inner_radius as f64;
    let total = spec.total();

    if total > 0 {
        let mut angle = -90.0_f64;
        for slice in &spec.slices {
            if slice.value == 0 {
                continue;
            }
            let sweep = slice.value as f64 / total as f64 * 360.0;
            let title = format!("<title>{}: {}</title>", escape_xml(&slice.label), slice.value);

            if slice.value == total {
                // A full ring cannot be drawn as a single arc
                parts.push(format!(
                    r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}">{}</circle>"#,
                    (outer + inner) / 2.0,
                    escape_xml(&slice.fill),
                    outer - inner,
                    title
                ));
            } else {
                parts.push(format!(
                    r##"<path d="{}" fill="{}" stroke="#FFFFFF">{}</path>"##,
                    donut_segment(cx, cy, inner, outer, angle, angle + sweep),
                    escape_xml(&slice.fill),
                    title
                ));
            }

            // Value label outside the ring
            let mid = (angle + sweep / 2.0).to_radians();
            let lx = cx + (outer + 16.0) * mid.cos();
            let ly = cy + (outer + 16.0) * mid.sin();
            let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
            parts.push(format!(
                r#"<text x="{lx:.1}" y="{:.1}" class="axis" font-size="12" fill="{}" text-anchor="{}">{}</text>"#,
                ly + 4.0,
                escape_xml(&slice.fill),
                anchor,
                slice.value
            ));

            angle += sweep;
        }
    } else {
        parts.push(format!(
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
            (outer + inner) / 2.0,
            CARD_BORDER,
            outer - inner
        ));
    }

    let legend: Vec<(&str, &str)> = spec.slices.iter().map(|s| (s.label.as_str(), s.fill.as_str())).collect();
    parts.extend(legend_row(&legend, x, y + height - 8, width));

    parts
}


/// Path for a ring segment between two angles in degrees, clockwise.
fn donut_segment(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    let point = |r: f64, deg: f64| {
        let rad = deg.to_radians();
        (cx + r * rad.cos(), cy + r * rad.sin())
    };
    let large = if end - start > 180.0 { 1 } else { 0 };
    let (ox0, oy0) = point(outer, start);
    let (ox1, oy1) = point(outer, end);
    let (ix1, iy1) = point(inner, end);
    let (ix0, iy0) = point(inner, start);

    format!(
        "M {ox0:.2} {oy0:.2} A {outer:.2} {outer:.2} 0 {large} 1 {ox1:.2} {oy1:.2} \
         L {ix1:.2} {iy1:.2} A {inner:.2} {inner:.2} 0 {large} 0 {ix0:.2} {iy0:.2} Z"
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::chart::{bar_chart, grouped_bar, BarBinding};
    use crate::dashboard::{render, PanelId, RenderOptions, ToggleState};
    use crate::data::STORE;

    fn page(toggle: ToggleState) -> String {
        render_page_svg(&render(&STORE, toggle, &RenderOptions::default()))
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Insights & <Optimizations>"), "Insights &amp; &lt;Optimizations&gt;");
    }

    #[test]
    fn test_page_contains_fixed_content() {
        let svg = page(ToggleState::Visible);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Hospital DB • Insights &amp; Optimizations"));
        assert!(svg.contains(r#"xlink:href="mailto:data-team@example.com?subject=Hospital%20DB%20Insights""#));
        assert!(svg.contains(r##"xlink:href="#dashboard""##));
        assert!(svg.contains(r#"<g id="dashboard">"#));
        assert_eq!(svg.matches("3,000").count(), 5);
    }

    #[test]
    fn test_page_follows_toggle() {
        let visible = page(ToggleState::Visible);
        assert!(visible.contains("Hide Atomicity Chart"));
        assert!(visible.contains(&format!(r#"id="panel-{}""#, PanelId::Atomicity.slug())));

        let hidden = page(ToggleState::Hidden);
        assert!(hidden.contains("Show Atomicity Chart"));
        assert!(!hidden.contains(r#"id="panel-atomicity""#));
    }

    #[test]
    fn test_proportion_labels_are_literal() {
        let svg = page(ToggleState::Visible);
        assert!(svg.contains("<title>Available: 2300</title>"));
        assert!(svg.contains("<title>Unavailable: 700</title>"));
        assert!(svg.contains(">2300</text>"));
        assert!(!svg.contains("2,300"));
        assert!(svg.contains(">700</text>"));
    }

    #[test]
    fn test_axis_scale() {
        assert_eq!(axis_scale(0), (1, 4));
        assert_eq!(axis_scale(1), (1, 1));
        assert_eq!(axis_scale(450), (200, 600));
        assert_eq!(axis_scale(160), (50, 200));
    }

    #[test]
    fn test_axis_scale_saturates_near_max() {
        let (step, top) = axis_scale(u64::MAX);
        assert!(step > 0);
        assert_eq!(top, u64::MAX);
    }

    #[test]
    fn test_grouped_bars_draw_every_series() {
        let a = STORE.patients_per_department;
        let chart = grouped_bar(&[
            (&a, BarBinding::vertical("Patients", "#8884d8", 20)),
            (&a, BarBinding::vertical("Again", "#82ca9d", 20)),
        ]);
        let svg = render_chart_svg(&chart, 300, 280);
        assert_eq!(svg.matches(r##"fill="#8884d8"><title>"##).count(), 5);
        assert_eq!(svg.matches(r##"fill="#82ca9d"><title>"##).count(), 5);
    }

    #[test]
    fn test_empty_chart_renders() {
        let empty = crate::models::Dataset::<crate::models::CategoryCount> {
            category_key: "label",
            value_key: "value",
            records: &[],
        };
        let svg = render_chart_svg(&bar_chart(&empty, BarBinding::vertical("x", "#000000", 10)), 200, 200);
        assert!(svg.ends_with("</svg>"));
    }
}
