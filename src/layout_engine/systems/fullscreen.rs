use super::{Layout, LayoutCalcInputs, LayoutKey};
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

/// Every window covers the whole tiling area.
#[derive(Debug, Clone, Default)]
pub struct FullscreenLayout;

impl Layout for FullscreenLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Fullscreen }

    fn name(&self) -> &'static str { "Fullscreen" }

    fn description(&self) -> String { "All windows maximized".to_string() }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        windows.active.iter().map(|&wid| (wid, inputs.area)).collect()
    }
}
