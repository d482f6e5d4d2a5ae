//! Visibility toggle for the atomicity chart.

use tracing::debug;


/// Whether the optional chart panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Visible,
    Hidden,
}


impl ToggleState {
    /// The other state.
    pub fn flipped(self) -> Self {
        match self {
            ToggleState::Visible => ToggleState::Hidden,
            ToggleState::Hidden => ToggleState::Visible,
        }
    }

    pub fn is_visible(self) -> bool {
        self == ToggleState::Visible
    }

    /// Text of the control that flips into the other state.
    pub fn label(self) -> &'static str {
        match self {
            ToggleState::Visible => "Hide Atomicity Chart",
            ToggleState::Hidden => "Show Atomicity Chart",
        }
    }
}


/// Owner of the toggle state. `flip` is the only way to change it.
#[derive(Debug, Clone, Default)]
pub struct ToggleControl {
    state: ToggleState,
}


impl ToggleControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Invert the state.
    pub fn flip(&mut self) -> ToggleState {
        self.state = self.state.flipped();
        debug!(state = ?self.state, "atomicity toggle flipped");
        self.state
    }
}
