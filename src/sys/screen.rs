use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SpaceId(NonZeroU64);

impl SpaceId {
    /// Panics if `id` is zero; zero is never a valid space number.
    pub fn new(id: u64) -> SpaceId { SpaceId(NonZeroU64::new(id).expect("space id must be non-zero")) }

    pub fn get(&self) -> u64 { self.0.get() }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.get()) }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    /// A regular desktop created by the user. Only these are tiled.
    #[default]
    User,
    /// A space owned by a single fullscreen application.
    Fullscreen,
    /// Anything else the system shows (e.g. the desktop overview).
    System,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    #[serde(default)]
    pub kind: SpaceKind,
}

impl Space {
    pub fn user(id: u64) -> Space {
        Space {
            id: SpaceId::new(id),
            kind: SpaceKind::User,
        }
    }

    pub fn is_tileable(&self) -> bool { self.kind == SpaceKind::User }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

/// A physical display surface.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: ScreenId,
    /// The usable frame, i.e. excluding menu bars and docks.
    pub frame: Rect,
}

impl Screen {
    pub fn new(id: u32, frame: Rect) -> Screen { Screen { id: ScreenId(id), frame } }
}
