//! Visualization layer: terminal, SVG, HTML and file export.

mod export;
mod html;
mod svg;
mod terminal;
mod text;

pub use export::{
    export_dashboard_html,
    export_dashboard_png,
    export_dashboard_svg,
    export_datasets_json,
    open_target,
    ExportFormat,
};
pub use terminal::{anchor_row, body_len, DashboardScreen};
pub use text::{render_text, TextStyle};
