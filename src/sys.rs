//! Platform-facing types: geometry, screens and spaces, windows, and the
//! serial executor all layout work runs on.

pub mod executor;
pub mod geometry;
pub mod screen;
pub mod window;
