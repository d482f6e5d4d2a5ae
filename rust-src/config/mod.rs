//! Configuration and settings for Hospital DB Insights.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    contact_href,
    default_export_dir,
    get_settings_path,
    load_settings,
    Settings,
    CONTACT_EMAIL,
    CONTACT_SUBJECT,
    EXPORT_FILE_STEM,
    GRID_BREAKPOINTS,
    TUI_POLL_INTERVAL_MS,
};
