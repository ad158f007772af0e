use super::{Layout, LayoutCalcInputs, LayoutKey, MainPane, PanedLayout};
use crate::common::config::LayoutSettings;
use crate::layout_engine::Orientation;
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

/// A main row across the top with the remaining windows side by side below.
#[derive(Debug, Clone)]
pub struct WideLayout {
    pane: MainPane,
}

impl WideLayout {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self { pane: MainPane::new(settings) }
    }

    pub fn pane(&self) -> &MainPane { &self.pane }
}

impl Layout for WideLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Wide }

    fn name(&self) -> &'static str { "Wide" }

    fn description(&self) -> String { self.pane.describe("height") }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        self.pane.calculate(&windows.active, inputs, Orientation::Vertical, false)
    }

    fn as_paned(&mut self) -> Option<&mut dyn PanedLayout> { Some(&mut self.pane) }
}
