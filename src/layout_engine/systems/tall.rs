use super::{Layout, LayoutCalcInputs, LayoutKey, MainPane, PanedLayout};
use crate::common::config::LayoutSettings;
use crate::layout_engine::Orientation;
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

/// A main column of windows beside a column holding everything else.
#[derive(Debug, Clone)]
pub struct TallLayout {
    pane: MainPane,
    mirrored: bool,
}

impl TallLayout {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            pane: MainPane::new(settings),
            mirrored: false,
        }
    }

    /// The main column on the right instead of the left.
    pub fn mirrored(settings: &LayoutSettings) -> Self {
        Self {
            pane: MainPane::new(settings),
            mirrored: true,
        }
    }

    pub fn pane(&self) -> &MainPane { &self.pane }
}

impl Layout for TallLayout {
    fn key(&self) -> LayoutKey {
        if self.mirrored {
            LayoutKey::TallRight
        } else {
            LayoutKey::Tall
        }
    }

    fn name(&self) -> &'static str {
        if self.mirrored { "Tall Right" } else { "Tall" }
    }

    fn description(&self) -> String { self.pane.describe("width") }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        self.pane.calculate(&windows.active, inputs, Orientation::Horizontal, self.mirrored)
    }

    fn as_paned(&mut self) -> Option<&mut dyn PanedLayout> { Some(&mut self.pane) }
}
