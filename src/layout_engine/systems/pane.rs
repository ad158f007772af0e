use super::{LayoutCalcInputs, PanedLayout};
use crate::common::config::LayoutSettings;
use crate::layout_engine::Orientation;
use crate::layout_engine::utils::{split_even, split_ratio};
use crate::sys::geometry::Rect;
use crate::sys::window::WindowId;

const MIN_RATIO: f64 = 0.1;
const MAX_RATIO: f64 = 0.9;

/// Main pane parameters shared by the tall and wide layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct MainPane {
    pub ratio: f64,
    pub count: usize,
    step: f64,
}

impl MainPane {
    pub fn new(settings: &LayoutSettings) -> MainPane {
        MainPane {
            ratio: settings.main_pane_ratio.clamp(MIN_RATIO, MAX_RATIO),
            count: settings.main_pane_count.max(1),
            step: settings.pane_step,
        }
    }

    pub(super) fn describe(&self, axis: &str) -> String {
        format!(
            "{} main, {:.0}% {axis}",
            self.count,
            (self.ratio * 100.0).round()
        )
    }

    /// Places the first `count` windows in the main pane and the rest in the
    /// secondary pane. `split` is the axis the two panes sit along; windows
    /// inside a pane are laid out across the other axis. When `main_last` is
    /// set the main pane goes right of (or below) the secondary one.
    pub(super) fn calculate(
        &self,
        windows: &[WindowId],
        inputs: LayoutCalcInputs<'_>,
        split: Orientation,
        main_last: bool,
    ) -> Vec<(WindowId, Rect)> {
        if windows.is_empty() {
            return Vec::new();
        }
        let gaps = inputs.gaps;
        let (split_gap, inner_gap) = match split {
            Orientation::Horizontal => (gaps.horizontal, gaps.vertical),
            Orientation::Vertical => (gaps.vertical, gaps.horizontal),
        };
        let main_count = self.count.min(windows.len());
        let (main, rest) = windows.split_at(main_count);

        if rest.is_empty() {
            let frames = split_even(inputs.area, main.len(), split.flip(), inner_gap);
            return main.iter().copied().zip(frames).collect();
        }

        let (main_rect, rest_rect) = if main_last {
            let (first, second) = split_ratio(inputs.area, 1.0 - self.ratio, split, split_gap);
            (second, first)
        } else {
            split_ratio(inputs.area, self.ratio, split, split_gap)
        };

        let main_frames = split_even(main_rect, main.len(), split.flip(), inner_gap);
        let rest_frames = split_even(rest_rect, rest.len(), split.flip(), inner_gap);
        main.iter()
            .copied()
            .zip(main_frames)
            .chain(rest.iter().copied().zip(rest_frames))
            .collect()
    }
}

impl PanedLayout for MainPane {
    fn shrink_main_pane(&mut self) {
        self.ratio = (self.ratio - self.step).max(MIN_RATIO);
    }

    fn expand_main_pane(&mut self) {
        self.ratio = (self.ratio + self.step).min(MAX_RATIO);
    }

    fn increase_main_pane_count(&mut self) { self.count += 1; }

    fn decrease_main_pane_count(&mut self) { self.count = self.count.saturating_sub(1).max(1); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_clamped_while_resizing() {
        let mut pane = MainPane::new(&LayoutSettings {
            main_pane_ratio: 0.85,
            pane_step: 0.1,
            ..Default::default()
        });
        pane.expand_main_pane();
        assert_eq!(pane.ratio, MAX_RATIO);
        for _ in 0..20 {
            pane.shrink_main_pane();
        }
        assert_eq!(pane.ratio, MIN_RATIO);
    }

    #[test]
    fn count_never_drops_below_one() {
        let mut pane = MainPane::new(&LayoutSettings::default());
        pane.decrease_main_pane_count();
        assert_eq!(pane.count, 1);
        pane.increase_main_pane_count();
        pane.increase_main_pane_count();
        assert_eq!(pane.count, 3);
    }
}
