//! Export command for dashboard files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::{Settings, EXPORT_FILE_STEM};
use crate::dashboard::{DashboardView, RenderOptions};
use crate::data::STORE;
use crate::visualization::{
    export_dashboard_html,
    export_dashboard_png,
    export_dashboard_svg,
    export_datasets_json,
    open_target,
    ExportFormat,
};


/// Run the export command.
pub fn run(
    settings: &Settings,
    options: RenderOptions,
    hide_atomicity: bool,
    format: ExportFormat,
    output: Option<PathBuf>,
    should_open: bool,
) -> Result<()> {
    // Determine output path
    let output_path = match output {
        Some(path) => path,
        None => {
            let dir = settings.export_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
            dir.join(default_file_name(format))
        }
    };

    println!("Exporting to {}...", format.extension().to_uppercase());

    let mut view = DashboardView::new(&STORE, options);
    if hide_atomicity {
        view.flip();
    }
    match format {
        ExportFormat::Svg => export_dashboard_svg(view.document(), &output_path)?,
        ExportFormat::Png => export_dashboard_png(view.document(), &output_path)?,
        ExportFormat::Html => export_dashboard_html(&view, &output_path)?,
        ExportFormat::Json => export_datasets_json(&STORE, &output_path)?,
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    // Open if requested
    if should_open {
        println!("Opening {}...", format.extension().to_uppercase());
        open_target(&output_path.to_string_lossy())?;
    }

    Ok(())
}


/// File name for an export without `--output`, stamped with today's date.
fn default_file_name(format: ExportFormat) -> String {
    format!(
        "{}-{}.{}",
        EXPORT_FILE_STEM,
        Local::now().format("%Y%m%d"),
        format.extension()
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_name() {
        let name = default_file_name(ExportFormat::Html);
        assert!(name.starts_with("hospital-insights-"));
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn test_export_uses_settings_dir() {
        let tmp_dir = TempDir::new().unwrap();
        let settings = Settings {
            export_dir: Some(tmp_dir.path().join("exports")),
            ..Default::default()
        };

        run(
            &settings,
            RenderOptions::default(),
            true,
            ExportFormat::Svg,
            None,
            false,
        )
        .unwrap();

        let written: Vec<_> = std::fs::read_dir(tmp_dir.path().join("exports"))
            .unwrap()
            .flatten()
            .collect();
        assert_eq!(written.len(), 1);
        let svg = std::fs::read_to_string(written[0].path()).unwrap();
        assert!(svg.contains("Show Atomicity Chart"));
    }
}
