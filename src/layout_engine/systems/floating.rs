use super::{Layout, LayoutCalcInputs, LayoutKey};
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

/// Leaves every window where the user put it.
#[derive(Debug, Clone, Default)]
pub struct FloatingLayout;

impl Layout for FloatingLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Floating }

    fn name(&self) -> &'static str { "Floating" }

    fn description(&self) -> String { "Windows are not tiled".to_string() }

    fn calculate_layout(&self, _: &WindowSet, _: LayoutCalcInputs<'_>) -> Vec<(WindowId, Rect)> {
        Vec::new()
    }
}
