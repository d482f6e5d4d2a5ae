//! File export for the dashboard: SVG, PNG, HTML and dataset JSON.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use crate::dashboard::{DashboardView, Document};
use crate::data::DatasetStore;
use crate::error::ExportError;

use super::html::render_html;
use super::svg::render_page_svg;


// Page background, matches the SVG page fill
const PAGE_BG: (u8, u8, u8) = (249, 250, 251);


/// Output format for `hdbi export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    Svg,
    #[default]
    Png,
    Html,
    Json,
}


impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }
}


fn write_file(output_path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    std::fs::write(output_path, contents).map_err(|source| ExportError::Io {
        path: output_path.to_path_buf(),
        source,
    })
}


/// Export dashboard as SVG.
pub fn export_dashboard_svg(doc: &Document, output_path: &Path) -> Result<(), ExportError> {
    write_file(output_path, render_page_svg(doc).as_bytes())?;
    info!(path = %output_path.display(), "exported SVG");
    Ok(())
}


/// Export dashboard as PNG.
pub fn export_dashboard_png(doc: &Document, output_path: &Path) -> Result<(), ExportError> {
    let svg_content = render_page_svg(doc);

    // Parse SVG with system fonts so labels are drawn
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(&svg_content, &options)?;

    // Render to pixmap
    let size = tree.size();
    let width = size.width() as u32;
    let height = size.height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::Pixmap { width, height })?;

    pixmap.fill(tiny_skia::Color::from_rgba8(PAGE_BG.0, PAGE_BG.1, PAGE_BG.2, 255));
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Png(e.to_string()))?;
    write_file(output_path, &png)?;

    info!(path = %output_path.display(), width, height, "exported PNG");
    Ok(())
}


/// Export dashboard as a standalone HTML page.
pub fn export_dashboard_html(view: &DashboardView, output_path: &Path) -> Result<(), ExportError> {
    write_file(output_path, render_html(view).as_bytes())?;
    info!(path = %output_path.display(), "exported HTML");
    Ok(())
}


/// Export the literal datasets as pretty-printed JSON.
pub fn export_datasets_json(store: &DatasetStore, output_path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(store)?;
    write_file(output_path, json.as_bytes())?;
    info!(path = %output_path.display(), "exported dataset JSON");
    Ok(())
}


/// Open a file or URL with the default application.
pub fn open_target(target: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(target)
            .spawn()
            .with_context(|| format!("Failed to open {target}"))?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", target])
            .spawn()
            .with_context(|| format!("Failed to open {target}"))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(target)
            .spawn()
            .with_context(|| format!("Failed to open {target}"))?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{render, RenderOptions, ToggleState};
    use crate::data::STORE;
    use tempfile::TempDir;

    fn document() -> Document {
        render(&STORE, ToggleState::Visible, &RenderOptions::default())
    }

    #[test]
    fn test_export_svg_writes_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("dashboard.svg");

        export_dashboard_svg(&document(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Hide Atomicity Chart"));
    }

    #[test]
    fn test_export_png_writes_png() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("dashboard.png");

        export_dashboard_png(&document(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_export_json_round_values() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("datasets.json");

        export_datasets_json(&STORE, &path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["roomAvailability"][0]["value"], 2300);
        assert_eq!(value["rowCounts"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_export_to_missing_dir_is_io_error() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("missing").join("dashboard.svg");

        let err = export_dashboard_svg(&document(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert_eq!(ExportFormat::Html.extension(), "html");
    }
}
