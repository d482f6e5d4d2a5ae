//! Render tree: a pure function of the dataset store and toggle state.
//!
//! Renderers (terminal, SVG, HTML) only ever walk a [`Document`]; none of
//! them reach back into the store.

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::config::contact_href;
use crate::data::{
    Caption,
    DatasetStore,
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
use crate::format::format_thousands;

use super::chart::ChartSpec;
use super::panels::{visible_panels, PanelId};
use super::toggle::ToggleState;


/// Anchor id of the dashboard section.
pub const DASHBOARD_ANCHOR: &str = "dashboard";

/// Entrance transition length for every section.
const ENTRANCE_DURATION_MS: u32 = 600;

/// Delay added per section, in page order.
const ENTRANCE_STAGGER_MS: u32 = 200;


/// Which of the two dashboard configurations to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Chart grid with the atomicity toggle.
    #[default]
    Full,
    /// Placeholder for an external BI embed instead of the chart grid.
    Embed,
}


/// Inputs to the render function besides the store and toggle.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub variant: Variant,
    pub embed_url: Option<String>,
}


/// Cosmetic fade/slide-in on first display. Never affects content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrance {
    pub delay_ms: u32,
    pub duration_ms: u32,
}


impl Entrance {
    fn nth(index: u32) -> Self {
        Self {
            delay_ms: index * ENTRANCE_STAGGER_MS,
            duration_ms: ENTRANCE_DURATION_MS,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub jump: Link,
}


/// One chart plus its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: PanelId,
    pub chart: ChartSpec,
    pub caption: Caption,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Bullets(Vec<String>),
    /// Two-column table; cells are already formatted.
    Table {
        headers: [String; 2],
        rows: Vec<[String; 2]>,
    },
    Toggle {
        label: String,
        state: ToggleState,
    },
    PanelGrid(Vec<Panel>),
    EmbedPlaceholder {
        text: String,
        url: Option<String>,
    },
    CallToAction(Link),
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: Option<&'static str>,
    pub title: Option<String>,
    pub entrance: Entrance,
    pub blocks: Vec<Block>,
}


/// The whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub header: Header,
    pub sections: Vec<Section>,
}


impl Document {
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    /// Panels in grid order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.blocks()
            .filter_map(|b| match b {
                Block::PanelGrid(panels) => Some(panels.iter()),
                _ => None,
            })
            .flatten()
    }

    pub fn has_panel(&self, id: PanelId) -> bool {
        self.panels().any(|p| p.id == id)
    }

    /// Label of the toggle control, if this variant has one.
    pub fn toggle_label(&self) -> Option<&str> {
        self.blocks().find_map(|b| match b {
            Block::Toggle { label, .. } => Some(label.as_str()),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn call_to_action(&self) -> Option<&Link> {
        self.blocks().find_map(|b| match b {
            Block::CallToAction(link) => Some(link),
            _ => None,
        })
    }

    /// Index of the section carrying the given anchor id.
    pub fn anchor_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == Some(id))
    }
}


/// Build the page for the given toggle state.
pub fn render(store: &DatasetStore, toggle: ToggleState, options: &RenderOptions) -> Document {
    let header = Header {
        title: PAGE_TITLE.to_string(),
        jump: Link {
            label: JUMP_LABEL.to_string(),
            href: format!("#{DASHBOARD_ANCHOR}"),
        },
    };

    let sections = vec![
        Section {
            id: None,
            title: Some("Problem Overview".to_string()),
            entrance: Entrance::nth(0),
            blocks: vec![
                Block::Paragraph(OVERVIEW_TEXT.to_string()),
                Block::Bullets(OVERVIEW_BULLETS.iter().map(|b| b.to_string()).collect()),
            ],
        },
        Section {
            id: None,
            title: Some("Optimization Highlights".to_string()),
            entrance: Entrance::nth(1),
            blocks: vec![Block::Paragraph(HIGHLIGHTS_TEXT.to_string())],
        },
        dashboard_section(store, toggle, options),
        Section {
            id: None,
            title: None,
            entrance: Entrance::nth(3),
            blocks: vec![Block::CallToAction(Link {
                label: CONTACT_LABEL.to_string(),
                href: contact_href(),
            })],
        },
    ];

    let document = Document { header, sections };
    debug!(
        variant = ?options.variant,
        ?toggle,
        panels = document.panels().count(),
        "render tree evaluated"
    );
    document
}


fn dashboard_section(store: &DatasetStore, toggle: ToggleState, options: &RenderOptions) -> Section {
    let mut blocks = vec![row_count_table(store)];

    match options.variant {
        Variant::Full => {
            blocks.push(Block::Paragraph(DASHBOARD_INTRO.to_string()));
            blocks.push(Block::Bullets(
                DASHBOARD_BULLETS.iter().map(|b| b.to_string()).collect(),
            ));
            blocks.push(Block::Toggle {
                label: toggle.label().to_string(),
                state: toggle,
            });
            blocks.push(Block::PanelGrid(
                visible_panels(toggle)
                    .map(|id| Panel {
                        id,
                        chart: id.chart(store),
                        caption: id.caption(),
                    })
                    .collect(),
            ));
        }
        Variant::Embed => {
            blocks.push(Block::EmbedPlaceholder {
                text: EMBED_PLACEHOLDER.to_string(),
                url: options.embed_url.clone(),
            });
        }
    }

    Section {
        id: Some(DASHBOARD_ANCHOR),
        title: Some("Interactive BI Dashboard".to_string()),
        entrance: Entrance::nth(2),
        blocks,
    }
}


fn row_count_table(store: &DatasetStore) -> Block {
    Block::Table {
        headers: ["Table".to_string(), "Row Count".to_string()],
        rows: store
            .row_counts
            .records
            .iter()
            .map(|r| [r.table.to_string(), format_thousands(r.rows)])
            .collect(),
    }
}
