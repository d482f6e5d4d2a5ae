//! The controlling component: owns the toggle and the current render tree.

use crate::data::DatasetStore;

use super::render_tree::{render, Document, RenderOptions};
use super::toggle::{ToggleControl, ToggleState};


/// Dashboard state for one session. Starts with the toggle visible.
#[derive(Debug, Clone)]
pub struct DashboardView {
    store: &'static DatasetStore,
    options: RenderOptions,
    toggle: ToggleControl,
    document: Document,
}


impl DashboardView {
    pub fn new(store: &'static DatasetStore, options: RenderOptions) -> Self {
        let toggle = ToggleControl::new();
        let document = render(store, toggle.state(), &options);
        Self { store, options, toggle, document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    #[cfg(test)]
    pub fn toggle_state(&self) -> ToggleState {
        self.toggle.state()
    }

    /// Flip the toggle and re-evaluate the render tree.
    pub fn flip(&mut self) -> ToggleState {
        let state = self.toggle.flip();
        self.document = render(self.store, state, &self.options);
        state
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::PanelId;
    use crate::data::STORE;

    #[test]
    fn test_flip_rerenders() {
        let mut view = DashboardView::new(&STORE, RenderOptions::default());
        assert!(view.document().has_panel(PanelId::Atomicity));

        assert_eq!(view.flip(), ToggleState::Hidden);
        assert!(!view.document().has_panel(PanelId::Atomicity));
        assert_eq!(view.document().toggle_label(), Some("Show Atomicity Chart"));
    }

    #[test]
    fn test_every_flip_matches_fresh_render() {
        let options = RenderOptions::default();
        let mut view = DashboardView::new(&STORE, options.clone());
        for _ in 0..3 {
            let state = view.flip();
            assert_eq!(view.document(), &render(&STORE, state, &options));
        }
    }

    #[test]
    fn test_even_flips_restore_initial_document() {
        let mut view = DashboardView::new(&STORE, RenderOptions::default());
        let initial = view.document().clone();

        view.flip();
        assert_ne!(view.document(), &initial);
        view.flip();
        assert_eq!(view.document(), &initial);

        for _ in 0..4 {
            view.flip();
        }
        assert_eq!(view.document(), &initial);
    }
}
