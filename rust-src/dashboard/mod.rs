//! Dashboard model: toggle, chart adapter, panel list and render tree.

pub mod chart;
mod panels;
mod render_tree;
mod toggle;
mod view;

#[allow(unused_imports)]
pub use panels::{visible_panels, PanelId, Visibility, PANELS};
#[allow(unused_imports)]
pub use render_tree::{
    render,
    Block,
    Document,
    Entrance,
    Header,
    Link,
    Panel,
    RenderOptions,
    Section,
    Variant,
    DASHBOARD_ANCHOR,
};
#[allow(unused_imports)]
pub use toggle::{ToggleControl, ToggleState};
pub use view::DashboardView;
