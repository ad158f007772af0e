//! Transient panel naming the layout that was just selected.

use std::rc::Rc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::sys::executor::Queue;
use crate::sys::geometry::{Rect, Size};

/// How long the panel stays up after the last request to show it.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(600);

const PANEL_SIZE: Size = Size::new(360.0, 96.0);

/// Draws and removes the panel. Implementations decide what "drawing" means.
pub trait HudPresenter {
    fn show(&self, title: &str, description: &str, frame: Rect);
    fn hide(&self);
}

/// Presenter that only logs, for headless runs.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl HudPresenter for LogPresenter {
    fn show(&self, title: &str, description: &str, frame: Rect) {
        info!(title, description, ?frame, "layout hud shown");
    }

    fn hide(&self) {
        debug!("layout hud hidden");
    }
}

pub struct LayoutHud {
    presenter: Rc<dyn HudPresenter>,
    queue: Queue,
    hide_timer: Option<CancellationToken>,
}

impl LayoutHud {
    pub fn new(presenter: Rc<dyn HudPresenter>, queue: Queue) -> Self {
        LayoutHud { presenter, queue, hide_timer: None }
    }

    /// Shows the panel centred on `screen_frame` and (re)starts the hide
    /// timer. Only one hide timer is ever live.
    pub fn show(&mut self, title: &str, description: &str, screen_frame: Rect) {
        self.cancel_hide();
        self.presenter.show(title, description, screen_frame.centered(PANEL_SIZE));
        let presenter = self.presenter.clone();
        self.hide_timer = Some(self.queue.dispatch_after(DISPLAY_DURATION, move || presenter.hide()));
    }

    pub fn is_scheduled_to_hide(&self) -> bool {
        self.hide_timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Cancels the pending hide without hiding.
    pub fn cancel_hide(&mut self) {
        if let Some(token) = self.hide_timer.take() {
            token.cancel();
        }
    }
}

impl Drop for LayoutHud {
    fn drop(&mut self) { self.cancel_hide(); }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::actor::screen_manager::testing::{HudEvent, RecordingPresenter};
    use crate::sys::executor::SerialExecutor;

    #[test]
    fn panel_is_centred_and_hidden_after_delay() {
        let mut executor = SerialExecutor::new();
        let presenter = Rc::new(RecordingPresenter::default());
        let mut hud = LayoutHud::new(presenter.clone(), executor.queue());

        hud.show("Tall", "1 main, 50% width", Rect::from_xywh(0.0, 0.0, 1000.0, 800.0));
        executor.run_until_idle();
        assert!(hud.is_scheduled_to_hide());
        assert_eq!(presenter.events(), vec![HudEvent::Show {
            title: "Tall".into(),
            description: "1 main, 50% width".into(),
            frame: Rect::from_xywh(320.0, 352.0, 360.0, 96.0),
        }]);

        executor.fire_timers_until(Instant::now() + DISPLAY_DURATION);
        assert_eq!(presenter.events().last(), Some(&HudEvent::Hide));
    }

    #[test]
    fn showing_again_replaces_the_hide_timer() {
        let mut executor = SerialExecutor::new();
        let presenter = Rc::new(RecordingPresenter::default());
        let mut hud = LayoutHud::new(presenter.clone(), executor.queue());
        let frame = Rect::from_xywh(0.0, 0.0, 1000.0, 800.0);

        hud.show("Tall", "", frame);
        hud.show("Wide", "", frame);
        executor.run_until_idle();
        assert_eq!(executor.pending_timers(), 1);

        executor.fire_timers_until(Instant::now() + Duration::from_secs(2));
        let hides = presenter.events().iter().filter(|e| **e == HudEvent::Hide).count();
        assert_eq!(hides, 1);
    }

    #[test]
    fn dropping_the_hud_cancels_the_timer() {
        let mut executor = SerialExecutor::new();
        let presenter = Rc::new(RecordingPresenter::default());
        let mut hud = LayoutHud::new(presenter.clone(), executor.queue());
        hud.show("Tall", "", Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        drop(hud);

        executor.fire_timers_until(Instant::now() + Duration::from_secs(2));
        assert!(!presenter.events().contains(&HudEvent::Hide));
    }
}
