use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::screen::Screen;

#[allow(non_camel_case_types)]
pub type pid_t = i32;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId {
    pub pid: pid_t,
    pub idx: NonZeroU32,
}

impl WindowId {
    /// Panics if `idx` is zero.
    pub fn new(pid: pid_t, idx: u32) -> WindowId {
        WindowId {
            pid,
            idx: NonZeroU32::new(idx).expect("window index must be non-zero"),
        }
    }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({}, {})", self.pid, self.idx)
    }
}

/// A snapshot of the windows known to the system and the subset that is
/// currently active (visible and manageable) on one screen.
///
/// Snapshots are taken by the [`WindowsProvider`] at the moment a reflow runs
/// and are never kept across reflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSet {
    pub windows: Vec<WindowId>,
    pub active: Vec<WindowId>,
}

impl WindowSet {
    /// A set where every known window is also active.
    pub fn all_active(windows: Vec<WindowId>) -> WindowSet {
        WindowSet { active: windows.clone(), windows }
    }

    pub fn is_active(&self, wid: WindowId) -> bool { self.active.contains(&wid) }
}

/// The platform side of window management: enumerating windows per screen and
/// moving them.
pub trait WindowsProvider {
    fn active_window_set(&self, screen: &Screen) -> WindowSet;

    fn apply_frames(&self, screen: &Screen, frames: &[(WindowId, Rect)]);
}
