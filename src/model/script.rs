//! Replay scripts: a scripted stand-in for the event sources of a running
//! window manager.
//!
//! ```ron
//! (
//!     screens: [(id: 1, frame: (origin: (x: 0.0, y: 0.0), size: (width: 1440.0, height: 900.0)), space: (id: 1))],
//!     steps: [
//!         set_windows(screen: 1, windows: (windows: [(pid: 1, idx: 1)], active: [(pid: 1, idx: 1)])),
//!         change(screen: 1, change: add((pid: 1, idx: 1))),
//!         command(screen: 1, command: cycle_forward),
//!         drain,
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

use crate::model::Change;
use crate::sys::geometry::Rect;
use crate::sys::screen::Space;
use crate::sys::window::WindowSet;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script")]
    Parse(#[from] ron::error::SpannedError),
    #[error("script declares no screens")]
    NoScreens,
    #[error("screen {0} is declared more than once")]
    DuplicateScreen(u32),
    #[error("step {step} refers to unknown screen {screen}")]
    UnknownScreen { step: usize, screen: u32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub screens: Vec<ScreenSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenSpec {
    pub id: u32,
    pub frame: Rect,
    #[serde(default)]
    pub space: Option<Space>,
    #[serde(default)]
    pub windows: WindowSet,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Change { screen: u32, change: Change },
    Command { screen: u32, command: Command },
    SetWindows { screen: u32, windows: WindowSet },
    SetSpace { screen: u32, space: Space },
    SetTiling(bool),
    /// Runs everything queued so far, including expired HUD timers.
    Drain,
}

impl Step {
    pub fn screen(&self) -> Option<u32> {
        match *self {
            Step::Change { screen, .. }
            | Step::Command { screen, .. }
            | Step::SetWindows { screen, .. }
            | Step::SetSpace { screen, .. } => Some(screen),
            Step::SetTiling(_) | Step::Drain => None,
        }
    }
}

/// User commands, as a hotkey daemon would deliver them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CycleForward,
    CycleBackward,
    Select(String),
    ShrinkMainPane,
    ExpandMainPane,
    IncreaseMainPaneCount,
    DecreaseMainPaneCount,
    ReloadConfig,
    ShowHud,
}

impl Script {
    pub fn read(path: &Path) -> Result<Script, ScriptError> {
        let buf = std::fs::read_to_string(path)
            .map_err(|source| ScriptError::Read { path: path.to_owned(), source })?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> Result<Script, ScriptError> {
        let options = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME | Extensions::UNWRAP_NEWTYPES);
        let script: Script = options.from_str(buf)?;
        script.check()?;
        Ok(script)
    }

    fn check(&self) -> Result<(), ScriptError> {
        if self.screens.is_empty() {
            return Err(ScriptError::NoScreens);
        }
        for (i, spec) in self.screens.iter().enumerate() {
            if self.screens[..i].iter().any(|s| s.id == spec.id) {
                return Err(ScriptError::DuplicateScreen(spec.id));
            }
        }
        for (step, s) in self.steps.iter().enumerate() {
            let Some(screen) = s.screen() else { continue };
            if !self.screens.iter().any(|s| s.id == screen) {
                return Err(ScriptError::UnknownScreen { step, screen });
            }
        }
        Ok(())
    }
}
