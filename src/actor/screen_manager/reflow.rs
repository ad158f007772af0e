use std::rc::Rc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::common::config::GapSettings;
use crate::layout_engine::utils::compute_tiling_area;
use crate::layout_engine::{Layout, LayoutCalcInputs, LayoutKind};
use crate::sys::screen::Screen;
use crate::sys::window::{WindowSet, WindowsProvider};

/// One geometry recomputation, bound to the snapshot it was created with.
///
/// The operation owns a copy of the layout rather than borrowing the live
/// one, so later selection changes cannot affect a reflow that is already
/// queued.
pub(super) struct ReflowOperation {
    pub(super) screen: Screen,
    pub(super) windows: WindowSet,
    pub(super) layout: LayoutKind,
    pub(super) gaps: GapSettings,
    pub(super) provider: Rc<dyn WindowsProvider>,
    pub(super) token: CancellationToken,
}

impl ReflowOperation {
    /// Computes and applies the frames. Returns whether geometry was applied;
    /// an operation cancelled before this point applies nothing.
    pub(super) fn run(self) -> bool {
        if self.token.is_cancelled() {
            trace!("reflow superseded before it started");
            return false;
        }
        let area = compute_tiling_area(self.screen.frame, &self.gaps);
        let frames = self.layout.calculate_layout(&self.windows, LayoutCalcInputs {
            area,
            gaps: &self.gaps.inner,
        });
        debug!(
            layout = %self.layout.key(),
            windows = self.windows.active.len(),
            frames = frames.len(),
            "applying layout"
        );
        self.provider.apply_frames(&self.screen, &frames);
        true
    }
}
