use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::mode::Mode;

/// Mutable view state shared by the controller's collaborators
///
/// Owned by the studio and handed out by `Arc`; collaborators read the mode
/// through it instead of keeping their own copy.
#[derive(Debug, Default)]
pub struct StudioState {
    mode: RwLock<Mode>,
    loading: AtomicBool,
}

impl StudioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active input mode
    pub fn mode(&self) -> Mode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_mode(&self, mode: Mode) {
        *self.mode.write().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Whether a generation request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Enter the loading state; false if another request already holds it
    pub(crate) fn try_begin_loading(&self) -> bool {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn end_loading(&self) {
        self.loading.store(false, Ordering::Release);
    }
}
