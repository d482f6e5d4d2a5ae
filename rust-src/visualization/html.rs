//! Standalone HTML rendering of the dashboard.
//!
//! Charts are inlined as SVG. Section entrances are CSS keyframes with the
//! delays carried on each section; they run once on load and nothing waits
//! on them.
//!
//! The page carries the panels of both toggle states. Panels that only one
//! state shows are marked `data-toggled`, and a small script flips them
//! together with the button label.

use crate::dashboard::{Block, DashboardView, Document, Panel, Section, ToggleState};

use super::svg::{escape_xml as escape, render_chart_svg};


const CHART_WIDTH: i32 = 300;
const CHART_HEIGHT: i32 = 300;

const STYLE: &str = r#"
body { margin: 0; background: #f9fafb; font-family: -apple-system, sans-serif; color: #111827; }
header { background: #111827; color: #fff; padding: 12px 24px; display: flex; align-items: center; justify-content: space-between; box-shadow: 0 2px 4px rgba(0,0,0,.2); }
header h1 { font-size: 20px; font-weight: 600; letter-spacing: .02em; margin: 0; }
header a { color: #fff; text-underline-offset: 4px; }
header a:hover { color: #a5b4fc; }
main { padding: 24px; }
section { margin-bottom: 40px; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px; }
.card h2 { font-size: 20px; margin: 0 0 16px; }
table { min-width: 360px; font-size: 14px; text-align: left; border-collapse: collapse; margin-bottom: 24px; }
thead { background: #f3f4f6; }
th, td { padding: 8px 16px; }
tbody tr { border-top: 1px solid #e5e7eb; }
.toggle { font-size: 14px; padding: 6px 12px; border: 1px solid #e5e7eb; border-radius: 6px; background: #fff; margin-bottom: 24px; }
.grid { display: grid; grid-template-columns: repeat(1, 1fr); gap: 32px; }
@media (min-width: 640px) { .grid { grid-template-columns: repeat(2, 1fr); } }
@media (min-width: 768px) { .grid { grid-template-columns: repeat(3, 1fr); } }
@media (min-width: 1024px) { .grid { grid-template-columns: repeat(4, 1fr); } }
.panel svg { width: 100%; height: auto; }
.panel p { font-size: 14px; color: #4b5563; text-align: center; }
.embed { border: 2px dashed #9ca3af; border-radius: 8px; padding: 48px; text-align: center; color: #4b5563; }
.cta { text-align: center; }
.cta a { display: inline-block; font-size: 18px; padding: 24px 32px; border-radius: 16px; background: #a5b4fc; color: #111827; text-decoration: none; box-shadow: 0 10px 20px rgba(0,0,0,.15); }
@keyframes enter { from { opacity: 0; transform: translateY(20px); } to { opacity: 1; transform: none; } }
.enter { animation-name: enter; animation-fill-mode: both; animation-timing-function: ease-out; }
.panel[hidden] { display: none; }
"#;

const TOGGLE_SCRIPT: &str = r#"
document.querySelectorAll("button.toggle").forEach(function (button) {
  button.addEventListener("click", function () {
    var label = button.dataset.altLabel;
    button.dataset.altLabel = button.textContent;
    button.textContent = label;
    button.dataset.state = button.dataset.state === "visible" ? "hidden" : "visible";
    document.querySelectorAll(".panel[data-toggled]").forEach(function (panel) {
      panel.hidden = !panel.hidden;
    });
  });
});
"#;


/// The page as it is now, plus the page one flip away.
struct States<'a> {
    current: &'a Document,
    flipped: &'a Document,
}


/// Render the view's current document as an HTML page with a working toggle.
pub fn render_html(view: &DashboardView) -> String {
    let mut flipped = view.clone();
    flipped.flip();
    let states = States {
        current: view.document(),
        flipped: flipped.document(),
    };
    let doc = states.current;

    let mut out = Vec::new();

    out.push("<!DOCTYPE html>".to_string());
    out.push(r#"<html lang="en">"#.to_string());
    out.push("<head>".to_string());
    out.push(r#"<meta charset="utf-8">"#.to_string());
    out.push(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string());
    out.push(format!("<title>{}</title>", escape(&doc.header.title)));
    out.push(format!("<style>{STYLE}</style>"));
    out.push("</head>".to_string());
    out.push("<body>".to_string());

    out.push("<header>".to_string());
    out.push(format!("<h1>{}</h1>", escape(&doc.header.title)));
    out.push(format!(
        r#"<a href="{}">{}</a>"#,
        escape(&doc.header.jump.href),
        escape(&doc.header.jump.label)
    ));
    out.push("</header>".to_string());

    out.push("<main>".to_string());
    for section in &doc.sections {
        render_section(section, &states, &mut out);
    }
    out.push("</main>".to_string());
    if doc.toggle_label().is_some() {
        out.push(format!("<script>{TOGGLE_SCRIPT}</script>"));
    }
    out.push("</body>".to_string());
    out.push("</html>".to_string());

    out.join("\n")
}


fn render_section(section: &Section, states: &States<'_>, out: &mut Vec<String>) {
    let id = section
        .id
        .map(|id| format!(r#" id="{}""#, escape(id)))
        .unwrap_or_default();
    let class = if section.title.is_some() { "card enter" } else { "cta enter" };

    out.push(format!(
        r#"<section{} class="{}" style="animation-duration: {}ms; animation-delay: {}ms">"#,
        id, class, section.entrance.duration_ms, section.entrance.delay_ms
    ));
    if let Some(title) = &section.title {
        out.push(format!("<h2>{}</h2>", escape(title)));
    }
    for block in &section.blocks {
        render_block(block, states, out);
    }
    out.push("</section>".to_string());
}


fn render_block(block: &Block, states: &States<'_>, out: &mut Vec<String>) {
    match block {
        Block::Paragraph(text) => out.push(format!("<p>{}</p>", escape(text))),
        Block::Bullets(items) => {
            out.push("<ul>".to_string());
            for item in items {
                out.push(format!("<li>{}</li>", escape(item)));
            }
            out.push("</ul>".to_string());
        }
        Block::Table { headers, rows } => {
            out.push("<table>".to_string());
            out.push(format!(
                "<thead><tr><th>{}</th><th>{}</th></tr></thead>",
                escape(&headers[0]),
                escape(&headers[1])
            ));
            out.push("<tbody>".to_string());
            for row in rows {
                out.push(format!(
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape(&row[0]),
                    escape(&row[1])
                ));
            }
            out.push("</tbody>".to_string());
            out.push("</table>".to_string());
        }
        Block::Toggle { label, state } => {
            let state = match state {
                ToggleState::Visible => "visible",
                ToggleState::Hidden => "hidden",
            };
            let alt_label = states.flipped.toggle_label().unwrap_or_default();
            out.push(format!(
                r#"<button type="button" class="toggle" data-state="{}" data-alt-label="{}">{}</button>"#,
                state,
                escape(alt_label),
                escape(label)
            ));
        }
        Block::PanelGrid(panels) => {
            out.push(r#"<div class="grid">"#.to_string());
            for panel in grid_panels(panels, states.flipped) {
                let shown = states.current.has_panel(panel.id);
                let toggled = shown != states.flipped.has_panel(panel.id);
                render_panel(panel, shown, toggled, out);
            }
            out.push("</div>".to_string());
        }
        Block::EmbedPlaceholder { text, url } => {
            out.push(r#"<div class="embed">"#.to_string());
            out.push(format!("<p>{}</p>", escape(text)));
            if let Some(url) = url {
                out.push(format!(r#"<p><a href="{0}">{0}</a></p>"#, escape(url)));
            }
            out.push("</div>".to_string());
        }
        Block::CallToAction(link) => {
            out.push(format!(
                r#"<a href="{}">{}</a>"#,
                escape(&link.href),
                escape(&link.label)
            ));
        }
    }
}


/// Every panel either state shows, in grid order.
fn grid_panels<'a>(current: &'a [Panel], flipped: &'a Document) -> Vec<&'a Panel> {
    let other: Vec<&Panel> = flipped.panels().collect();
    if other.len() > current.len() {
        other
    } else {
        current.iter().collect()
    }
}


fn render_panel(panel: &Panel, shown: bool, toggled: bool, out: &mut Vec<String>) {
    out.push(format!(
        r#"<div class="panel" id="panel-{}" data-chart="{}"{}{}>"#,
        panel.id.slug(),
        panel.chart.kind().name(),
        if toggled { " data-toggled" } else { "" },
        if shown { "" } else { " hidden" }
    ));
    out.push(render_chart_svg(&panel.chart, CHART_WIDTH, CHART_HEIGHT));
    out.push(format!(
        "<p><strong>{}</strong>{}</p>",
        escape(panel.caption.lead),
        escape(panel.caption.text)
    ));
    out.push("</div>".to_string());
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{RenderOptions, Variant};
    use crate::data::STORE;

    fn page(hide_atomicity: bool) -> String {
        let mut view = DashboardView::new(&STORE, RenderOptions::default());
        if hide_atomicity {
            view.flip();
        }
        render_html(&view)
    }

    #[test]
    fn test_html_links() {
        let html = page(false);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r##"<a href="#dashboard">Jump to Dashboard</a>"##));
        assert!(html.contains(
            r#"<a href="mailto:data-team@example.com?subject=Hospital%20DB%20Insights">Contact Data Team</a>"#
        ));
        assert!(html.contains(r#"<section id="dashboard""#));
    }

    #[test]
    fn test_html_toggle_states() {
        let visible = page(false);
        assert!(visible.contains(
            r#"data-state="visible" data-alt-label="Show Atomicity Chart">Hide Atomicity Chart</button>"#
        ));
        assert!(visible.contains(r#"<div class="panel" id="panel-atomicity" data-chart="bar" data-toggled>"#));

        let hidden = page(true);
        assert!(hidden.contains(
            r#"data-state="hidden" data-alt-label="Hide Atomicity Chart">Show Atomicity Chart</button>"#
        ));
        assert!(hidden.contains(r#"<div class="panel" id="panel-atomicity" data-chart="bar" data-toggled hidden>"#));
    }

    #[test]
    fn test_toggle_button_is_scripted() {
        for html in [page(false), page(true)] {
            assert_eq!(html.matches("<script>").count(), 1);
            assert!(html.contains(r#"addEventListener("click""#));
            assert!(html.contains(".panel[data-toggled]"));
            assert!(html.contains("button.dataset.altLabel"));
        }
    }

    #[test]
    fn test_only_the_atomicity_panel_toggles() {
        for html in [page(false), page(true)] {
            assert_eq!(html.matches(r#"<div class="panel""#).count(), 8);
            assert_eq!(html.matches("data-toggled>").count() + html.matches("data-toggled hidden>").count(), 1);
            assert!(html.contains(r#"id="panel-prescriptions" data-chart="horizontal-bar">"#));
            assert!(html.contains(r#"id="panel-room-availability" data-chart="proportion">"#));
        }
    }

    #[test]
    fn test_row_count_cells() {
        let html = page(false);
        for table in ["Patients", "Appointments", "Prescriptions", "Nurses", "Departments"] {
            assert!(html.contains(&format!("<tr><td>{table}</td><td>3,000</td></tr>")));
        }
    }

    #[test]
    fn test_entrance_delays() {
        let html = page(false);
        for delay in [0, 200, 400, 600] {
            assert!(html.contains(&format!("animation-duration: 600ms; animation-delay: {delay}ms")));
        }
    }

    #[test]
    fn test_embed_variant() {
        let options = RenderOptions {
            variant: Variant::Embed,
            embed_url: Some("https://bi.example.com/a?b=1&c=2".to_string()),
        };
        let html = render_html(&DashboardView::new(&STORE, options));
        assert!(html.contains(r#"<div class="embed">"#));
        assert!(html.contains("https://bi.example.com/a?b=1&amp;c=2"));
        assert!(!html.contains(r#"class="toggle""#));
        assert!(!html.contains("<script>"));
    }
}
