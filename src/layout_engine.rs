mod graph;
pub mod registry;
pub mod selection;
pub mod systems;
pub mod utils;

pub use graph::Orientation;
pub use registry::LayoutRegistry;
pub use selection::LayoutSelection;
pub use systems::{
    BspLayout, ColumnLayout, FloatingLayout, FullscreenLayout, Layout, LayoutCalcInputs,
    LayoutKey, LayoutKind, MainPane, PanedLayout, RowLayout, StatefulLayout, TallLayout,
    WideLayout,
};
