use tracing::trace;

use super::{Layout, LayoutCalcInputs, LayoutKey, StatefulLayout};
use crate::layout_engine::Orientation;
use crate::layout_engine::utils::split_ratio;
use crate::model::Change;
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

/// Binary space partitioning over an insertion ordering of windows.
///
/// Each window takes half of the space left by the windows before it,
/// alternating between vertical and horizontal cuts. The ordering is kept
/// from the change stream: new windows are inserted right after the focused
/// one, so a new window splits the space of the window it was opened from.
#[derive(Debug, Clone, Default)]
pub struct BspLayout {
    order: Vec<WindowId>,
    focused: Option<WindowId>,
}

impl BspLayout {
    pub fn order(&self) -> &[WindowId] { &self.order }

    fn focused_index(&self) -> Option<usize> {
        let focused = self.focused?;
        self.order.iter().position(|&w| w == focused)
    }

    fn insert(&mut self, wid: WindowId) {
        if self.order.contains(&wid) {
            return;
        }
        match self.focused_index() {
            Some(idx) => self.order.insert(idx + 1, wid),
            None => self.order.push(wid),
        }
    }

    fn remove(&mut self, wid: WindowId) {
        self.order.retain(|&w| w != wid);
        if self.focused == Some(wid) {
            self.focused = None;
        }
    }

    fn swap_focused_with_next(&mut self) {
        let Some(idx) = self.focused_index() else { return };
        if self.order.len() < 2 {
            return;
        }
        let next = (idx + 1) % self.order.len();
        self.order.swap(idx, next);
    }

    /// The windows to place, in layout order: known windows first, then
    /// active windows this layout has not been told about yet.
    fn arranged(&self, windows: &WindowSet) -> Vec<WindowId> {
        let mut arranged: Vec<WindowId> =
            self.order.iter().copied().filter(|&w| windows.is_active(w)).collect();
        for &wid in &windows.active {
            if !arranged.contains(&wid) {
                arranged.push(wid);
            }
        }
        arranged
    }
}

impl Layout for BspLayout {
    fn key(&self) -> LayoutKey { LayoutKey::Bsp }

    fn name(&self) -> &'static str { "Binary Space Partitioning" }

    fn description(&self) -> String { format!("{} windows tracked", self.order.len()) }

    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)> {
        let arranged = self.arranged(windows);
        let mut frames = Vec::with_capacity(arranged.len());
        let mut remaining = inputs.area;
        let mut orientation = Orientation::Horizontal;
        for (i, &wid) in arranged.iter().enumerate() {
            if i + 1 == arranged.len() {
                frames.push((wid, remaining));
                break;
            }
            let gap = match orientation {
                Orientation::Horizontal => inputs.gaps.horizontal,
                Orientation::Vertical => inputs.gaps.vertical,
            };
            let (first, rest) = split_ratio(remaining, 0.5, orientation, gap);
            frames.push((wid, first));
            remaining = rest;
            orientation = orientation.flip();
        }
        frames
    }

    fn as_stateful(&self) -> Option<&dyn StatefulLayout> { Some(self) }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulLayout> { Some(self) }
}

impl StatefulLayout for BspLayout {
    fn update_with_change(&mut self, change: &Change) {
        match *change {
            Change::Add(wid) => {
                self.insert(wid);
                self.focused = Some(wid);
            }
            Change::Remove(wid) => self.remove(wid),
            Change::FocusChanged(wid) => self.focused = Some(wid),
            Change::WindowSwap => self.swap_focused_with_next(),
            Change::SpaceChange | Change::Unknown => {}
        }
        trace!(order = ?self.order, focused = ?self.focused, "bsp ordering updated");
    }

    fn next_window_id_clockwise(&self) -> Option<WindowId> {
        match self.focused_index() {
            Some(idx) => self.order.get((idx + 1) % self.order.len()).copied(),
            None => self.order.first().copied(),
        }
    }

    fn next_window_id_counter_clockwise(&self) -> Option<WindowId> {
        match self.focused_index() {
            Some(idx) => {
                let len = self.order.len();
                self.order.get((idx + len - 1) % len).copied()
            }
            None => self.order.last().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common::config::InnerGaps;

    fn w(idx: u32) -> WindowId { WindowId::new(1, idx) }

    fn layout_with(windows: &[u32]) -> BspLayout {
        let mut layout = BspLayout::default();
        for &idx in windows {
            layout.update_with_change(&Change::Add(w(idx)));
        }
        layout
    }

    #[test]
    fn new_windows_follow_the_focused_window() {
        let mut layout = layout_with(&[1, 2, 3]);
        assert_eq!(layout.order(), [w(1), w(2), w(3)]);

        layout.update_with_change(&Change::FocusChanged(w(1)));
        layout.update_with_change(&Change::Add(w(4)));
        assert_eq!(layout.order(), [w(1), w(4), w(2), w(3)]);

        layout.update_with_change(&Change::Add(w(4)));
        assert_eq!(layout.order().len(), 4);
    }

    #[test]
    fn removal_clears_focus_and_navigation_restarts() {
        let mut layout = layout_with(&[1, 2, 3]);
        layout.update_with_change(&Change::Remove(w(3)));
        assert_eq!(layout.order(), [w(1), w(2)]);
        assert_eq!(layout.next_window_id_clockwise(), Some(w(1)));
        assert_eq!(layout.next_window_id_counter_clockwise(), Some(w(2)));
    }

    #[test]
    fn navigation_wraps_around() {
        let mut layout = layout_with(&[1, 2, 3]);
        layout.update_with_change(&Change::FocusChanged(w(3)));
        assert_eq!(layout.next_window_id_clockwise(), Some(w(1)));
        assert_eq!(layout.next_window_id_counter_clockwise(), Some(w(2)));

        layout.update_with_change(&Change::FocusChanged(w(1)));
        assert_eq!(layout.next_window_id_counter_clockwise(), Some(w(3)));

        assert_eq!(BspLayout::default().next_window_id_clockwise(), None);
    }

    #[test]
    fn swap_moves_focused_window_forward() {
        let mut layout = layout_with(&[1, 2, 3]);
        layout.update_with_change(&Change::FocusChanged(w(1)));
        layout.update_with_change(&Change::WindowSwap);
        assert_eq!(layout.order(), [w(2), w(1), w(3)]);
        layout.update_with_change(&Change::Unknown);
        assert_eq!(layout.order(), [w(2), w(1), w(3)]);
    }

    #[test]
    fn frames_alternate_split_direction() {
        let layout = layout_with(&[1, 2, 3]);
        let gaps = InnerGaps::default();
        let inputs = LayoutCalcInputs {
            area: Rect::from_xywh(0.0, 0.0, 800.0, 600.0),
            gaps: &gaps,
        };
        let windows = WindowSet::all_active(vec![w(3), w(2), w(1), w(9)]);
        let frames = layout.calculate_layout(&windows, inputs);
        assert_eq!(frames, vec![
            (w(1), Rect::from_xywh(0.0, 0.0, 400.0, 600.0)),
            (w(2), Rect::from_xywh(400.0, 0.0, 400.0, 300.0)),
            (w(3), Rect::from_xywh(400.0, 300.0, 200.0, 300.0)),
            (w(9), Rect::from_xywh(600.0, 300.0, 200.0, 300.0)),
        ]);
    }
}
