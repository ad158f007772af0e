use serde::{Deserialize, Serialize};

use crate::sys::window::WindowId;

/// What triggered a (possible) reflow.
///
/// Only the variants that matter for focus bookkeeping carry a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Add(WindowId),
    Remove(WindowId),
    FocusChanged(WindowId),
    WindowSwap,
    SpaceChange,
    Unknown,
}

impl Change {
    /// The window this change is about, if any.
    pub fn window(&self) -> Option<WindowId> {
        match *self {
            Change::Add(wid) | Change::Remove(wid) | Change::FocusChanged(wid) => Some(wid),
            Change::WindowSwap | Change::SpaceChange | Change::Unknown => None,
        }
    }
}
