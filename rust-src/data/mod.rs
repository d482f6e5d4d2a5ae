//! Static dataset store and page copy.

mod content;
mod store;

pub use content::{
    Caption,
    CONTACT_LABEL,
    DASHBOARD_BULLETS,
    DASHBOARD_INTRO,
    EMBED_PLACEHOLDER,
    HIGHLIGHTS_TEXT,
    JUMP_LABEL,
    OVERVIEW_BULLETS,
    OVERVIEW_TEXT,
    PAGE_TITLE,
};
pub use store::{DatasetStore, STORE};
