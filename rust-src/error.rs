//! Error types for file export.

use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Png(String),

    #[error("failed to serialize datasets: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
