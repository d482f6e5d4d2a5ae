//! Application settings and constants.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dashboard::Variant;


/// Recipient of the call-to-action link.
pub const CONTACT_EMAIL: &str = "data-team@example.com";

/// Subject line pre-filled in the call-to-action link.
pub const CONTACT_SUBJECT: &str = "Hospital DB Insights";

/// File name stem for exports without an explicit output path.
pub const EXPORT_FILE_STEM: &str = "hospital-insights";

/// Key poll interval for the interactive dashboard (milliseconds).
pub const TUI_POLL_INTERVAL_MS: u64 = 100;

/// Minimum terminal width for 2, 3 and 4 grid columns.
pub const GRID_BREAKPOINTS: [u16; 3] = [64, 96, 128];

/// Environment variable prefix for settings overrides (`HDBI_VARIANT`, ...).
const ENV_PREFIX: &str = "HDBI";


/// User settings, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which dashboard configuration to render.
    pub variant: Variant,
    /// Where exports go when no `--output` is given.
    pub export_dir: Option<PathBuf>,
    /// Target of the BI embed placeholder in the embed variant.
    pub embed_url: Option<String>,
}


impl Settings {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }
}


/// The `mailto:` target of the call to action.
pub fn contact_href() -> String {
    format!(
        "mailto:{}?subject={}",
        CONTACT_EMAIL,
        urlencoding::encode(CONTACT_SUBJECT)
    )
}


/// Get the settings file path.
pub fn get_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hospital-insights")
        .join("settings.toml")
}


/// Default export directory.
pub fn default_export_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hospital-insights")
        .join("exports")
}


/// Load settings from the settings file (if any) and `HDBI_*` variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&get_settings_path())
}


fn load_settings_from(path: &Path) -> Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    settings
        .try_deserialize()
        .context("Invalid settings")
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_contact_href() {
        assert_eq!(
            contact_href(),
            "mailto:data-team@example.com?subject=Hospital%20DB%20Insights"
        );
    }

    #[test]
    fn test_get_settings_path() {
        let path = get_settings_path();
        assert!(path.to_string_lossy().contains("hospital-insights"));
        assert!(path.to_string_lossy().ends_with("settings.toml"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let settings = load_settings_from(&tmp_dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings.variant, Variant::Full);
        assert!(settings.embed_url.is_none());
    }

    #[test]
    fn test_settings_file_is_read() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "variant = \"embed\"\nembed_url = \"https://bi.example.com/hospital\"\nexport_dir = \"/tmp/hdbi\"\n",
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.variant, Variant::Embed);
        assert_eq!(settings.embed_url.as_deref(), Some("https://bi.example.com/hospital"));
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/hdbi"));
    }
}
