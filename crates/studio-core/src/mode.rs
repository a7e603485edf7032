use std::fmt;
use std::sync::Arc;

use crate::state::StudioState;
use crate::surface::Surface;

/// How the voice for a generation is acquired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A server-defined voice picked from the catalog
    #[default]
    Preset,
    /// A user-supplied audio sample used as the voice reference
    Clone,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Preset, Self::Clone];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::Clone => "clone",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Switches the active mode and keeps tabs and sections in sync with it
pub struct ModeController {
    state: Arc<StudioState>,
    surface: Arc<dyn Surface>,
}

impl ModeController {
    pub fn new(state: Arc<StudioState>, surface: Arc<dyn Surface>) -> Self {
        Self { state, surface }
    }

    /// Make `target` the active mode
    ///
    /// Shows exactly one input section and marks exactly one tab active.
    /// Leaving clone mode collapses the auth-help panel.
    pub fn switch_mode(&self, target: Mode) {
        let previous = self.state.mode();
        self.state.set_mode(target);
        self.render();

        if target == Mode::Preset {
            self.surface.set_auth_help_visible(false);
        }

        if previous != target {
            tracing::debug!(from = %previous, to = %target, "switched input mode");
        }
    }

    /// Re-apply the current mode to the surface
    pub fn render(&self) {
        let active = self.state.mode();

        for mode in Mode::ALL {
            self.surface.set_section_visible(mode, mode == active);
            self.surface.set_tab_active(mode, mode == active);
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }
}
