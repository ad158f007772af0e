//! Recording collaborators for screen manager tests.

use std::cell::{Cell, RefCell};

use crate::sys::geometry::Rect;
use crate::sys::screen::{Screen, ScreenId};
use crate::sys::window::{WindowId, WindowSet, WindowsProvider};
use crate::ui::layout_hud::HudPresenter;

#[derive(Default)]
pub struct RecordingProvider {
    windows: RefCell<WindowSet>,
    fetches: Cell<usize>,
    applied: RefCell<Vec<(ScreenId, Vec<(WindowId, Rect)>)>>,
    on_apply: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl RecordingProvider {
    pub fn set_windows(&self, windows: WindowSet) { *self.windows.borrow_mut() = windows; }

    pub fn fetches(&self) -> usize { self.fetches.get() }

    pub fn applied(&self) -> Vec<(ScreenId, Vec<(WindowId, Rect)>)> { self.applied.borrow().clone() }

    pub fn clear(&self) {
        self.fetches.set(0);
        self.applied.borrow_mut().clear();
    }

    /// Runs `f` right after the next set of frames is recorded.
    pub fn on_next_apply(&self, f: impl FnOnce() + 'static) {
        *self.on_apply.borrow_mut() = Some(Box::new(f));
    }
}

impl WindowsProvider for RecordingProvider {
    fn active_window_set(&self, _screen: &Screen) -> WindowSet {
        self.fetches.set(self.fetches.get() + 1);
        self.windows.borrow().clone()
    }

    fn apply_frames(&self, screen: &Screen, frames: &[(WindowId, Rect)]) {
        self.applied.borrow_mut().push((screen.id, frames.to_vec()));
        let hook = self.on_apply.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HudEvent {
    Show {
        title: String,
        description: String,
        frame: Rect,
    },
    Hide,
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<HudEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<HudEvent> { self.events.borrow().clone() }

    pub fn shows(&self) -> usize {
        self.events.borrow().iter().filter(|e| matches!(e, HudEvent::Show { .. })).count()
    }
}

impl HudPresenter for RecordingPresenter {
    fn show(&self, title: &str, description: &str, frame: Rect) {
        self.events.borrow_mut().push(HudEvent::Show {
            title: title.to_string(),
            description: description.to_string(),
            frame,
        });
    }

    fn hide(&self) { self.events.borrow_mut().push(HudEvent::Hide); }
}
