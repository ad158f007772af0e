use enum_dispatch::enum_dispatch;
use strum::{AsRefStr, Display, EnumString};

use crate::common::config::{InnerGaps, LayoutSettings};
use crate::model::Change;
use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowSet};

#[derive(Clone, Copy)]
pub struct LayoutCalcInputs<'a> {
    /// The tiling area, i.e. the screen's usable frame minus outer gaps.
    pub area: Rect,
    pub gaps: &'a InnerGaps,
}

/// Identifies a layout algorithm by the name used in configuration and in
/// `select_layout` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutKey {
    Tall,
    TallRight,
    Wide,
    Fullscreen,
    Column,
    Row,
    Floating,
    Bsp,
}

#[enum_dispatch]
pub trait Layout {
    fn key(&self) -> LayoutKey;

    /// Human-readable name, shown in the layout HUD.
    fn name(&self) -> &'static str;

    /// One-line summary of the layout's current parameters.
    fn description(&self) -> String;

    /// Assigns a frame to each active window this layout manages. Windows
    /// left out of the result are not moved.
    fn calculate_layout(
        &self,
        windows: &WindowSet,
        inputs: LayoutCalcInputs<'_>,
    ) -> Vec<(WindowId, Rect)>;

    fn as_paned(&mut self) -> Option<&mut dyn PanedLayout> { None }

    fn as_stateful(&self) -> Option<&dyn StatefulLayout> { None }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulLayout> { None }
}

/// Layouts with a resizable main pane.
pub trait PanedLayout {
    fn shrink_main_pane(&mut self);
    fn expand_main_pane(&mut self);
    fn increase_main_pane_count(&mut self);
    fn decrease_main_pane_count(&mut self);
}

/// Layouts that keep their own ordering of windows, kept current from the
/// change stream rather than recomputed from each snapshot.
pub trait StatefulLayout {
    fn update_with_change(&mut self, change: &Change);
    fn next_window_id_clockwise(&self) -> Option<WindowId>;
    fn next_window_id_counter_clockwise(&self) -> Option<WindowId>;
}

mod bsp;
pub use bsp::BspLayout;
mod floating;
pub use floating::FloatingLayout;
mod fullscreen;
pub use fullscreen::FullscreenLayout;
mod linear;
pub use linear::{ColumnLayout, RowLayout};
mod pane;
pub use pane::MainPane;
mod tall;
pub use tall::TallLayout;
mod wide;
pub use wide::WideLayout;

#[derive(Debug, Clone)]
#[enum_dispatch(Layout)]
pub enum LayoutKind {
    Tall(TallLayout),
    Wide(WideLayout),
    Fullscreen(FullscreenLayout),
    Column(ColumnLayout),
    Row(RowLayout),
    Floating(FloatingLayout),
    Bsp(BspLayout),
}

impl LayoutKind {
    /// A fresh instance of the layout named by `key`.
    pub fn new(key: LayoutKey, settings: &LayoutSettings) -> LayoutKind {
        match key {
            LayoutKey::Tall => TallLayout::new(settings).into(),
            LayoutKey::TallRight => TallLayout::mirrored(settings).into(),
            LayoutKey::Wide => WideLayout::new(settings).into(),
            LayoutKey::Fullscreen => FullscreenLayout.into(),
            LayoutKey::Column => ColumnLayout.into(),
            LayoutKey::Row => RowLayout.into(),
            LayoutKey::Floating => FloatingLayout.into(),
            LayoutKey::Bsp => BspLayout::default().into(),
        }
    }
}
