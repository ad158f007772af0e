use super::{Layout, LayoutCalcInputs, LayoutKey};
use crate::layout_engine::Orientation;
use crate::layout_engine::utils::split_even;
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

fn split_windows(
    windows: &WindowSet,
    inputs: LayoutCalcInputs<'_>,
    orientation: Orientation,
) -> Vec<(WindowId, Rect)> {
    let gap = match orientation {
        Orientation::Horizontal => inputs.gaps.horizontal,
        Orientation::Vertical => inputs.gaps.vertical,
    };
    let frames = split_even(inputs.area, windows.active.len(), orientation, gap);
    windows.active.iter().copied().zip(frames).collect()
}

/// Equal-width columns, one per window.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout;

impl Layout for ColumnLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Column }

    fn name(&self) -> &'static str { "Column" }

    fn description(&self) -> String { "Equal-width columns".to_string() }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        split_windows(windows, inputs, Orientation::Horizontal)
    }
}

/// Equal-height rows, one per window.
#[derive(Debug, Clone, Default)]
pub struct RowLayout;

impl Layout for RowLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Row }

    fn name(&self) -> &'static str { "Row" }

    fn description(&self) -> String { "Equal-height rows".to_string() }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        split_windows(windows, inputs, Orientation::Vertical)
    }
}
