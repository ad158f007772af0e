//! Per-screen layout control.
//!
//! A [`ScreenManager`] decides when a screen must be reflowed and with which
//! layout. Requests are coalesced: every call to
//! [`ScreenManager::set_needs_reflow`] cancels whatever reflow is still
//! pending and queues a new one, so a burst of window events produces a
//! single trailing reflow. All work runs on the shared serial [`Queue`];
//! nothing is executed inline.
//!
//! Queued work only holds a weak reference to the manager's state. Dropping
//! the manager cancels the pending reflow and turns any job still in the
//! queue into a no-op.

mod reflow;
#[cfg(test)]
pub mod testing;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, instrument, trace};

use self::reflow::ReflowOperation;
use crate::common::config::SharedConfig;
use crate::layout_engine::{Layout, LayoutKey, LayoutKind, LayoutSelection, PanedLayout};
use crate::model::Change;
use crate::sys::executor::Queue;
use crate::sys::screen::{Screen, Space};
use crate::sys::window::{WindowId, WindowsProvider};
use crate::ui::layout_hud::{HudPresenter, LayoutHud};

type Hook = Rc<dyn Fn()>;

pub struct ScreenManager {
    state: Rc<RefCell<State>>,
}

struct State {
    screen: Screen,
    space: Option<Space>,
    config: SharedConfig,
    provider: Rc<dyn WindowsProvider>,
    queue: Queue,
    selection: LayoutSelection,
    pending: Option<CancellationToken>,
    last_focused: Option<WindowId>,
    /// Taken out while the presenter runs.
    hud: Option<LayoutHud>,
    on_reflow_initiation: Option<Hook>,
    on_reflow_completion: Option<Hook>,
}

impl State {
    fn is_tileable(&self) -> bool { self.space.is_some_and(|s| s.is_tileable()) }

    fn track_focus(&mut self, change: &Change) {
        let Some(wid) = change.window() else { return };
        if !matches!(change, Change::Remove(_)) {
            self.last_focused = Some(wid);
        } else if self.last_focused == Some(wid) {
            self.last_focused = None;
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn paned(&mut self) -> Option<&mut dyn PanedLayout> {
        self.selection.current_mut().and_then(|l| l.as_paned())
    }
}

impl ScreenManager {
    pub fn new(
        screen: Screen,
        config: SharedConfig,
        provider: Rc<dyn WindowsProvider>,
        queue: Queue,
        presenter: Rc<dyn HudPresenter>,
    ) -> Self {
        let selection = LayoutSelection::new(&config.load());
        let hud = LayoutHud::new(presenter, queue.clone());
        ScreenManager {
            state: Rc::new(RefCell::new(State {
                screen,
                space: None,
                config,
                provider,
                queue,
                selection,
                pending: None,
                last_focused: None,
                hud: Some(hud),
                on_reflow_initiation: None,
                on_reflow_completion: None,
            })),
        }
    }

    pub fn screen(&self) -> Screen { self.state.borrow().screen }

    pub fn space(&self) -> Option<Space> { self.state.borrow().space }

    pub fn last_focused_window(&self) -> Option<WindowId> { self.state.borrow().last_focused }

    pub fn current_layout_key(&self) -> Option<LayoutKey> {
        self.state.borrow().selection.current().map(|l| l.key())
    }

    pub fn current_layout_index(&self) -> usize { self.state.borrow().selection.current_index() }

    pub fn layout_keys(&self) -> Vec<LayoutKey> {
        self.state.borrow().selection.layouts().iter().map(|l| l.key()).collect()
    }

    pub fn has_pending_reflow(&self) -> bool {
        self.state.borrow().pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    pub fn set_on_reflow_initiation(&self, hook: impl Fn() + 'static) {
        self.state.borrow_mut().on_reflow_initiation = Some(Rc::new(hook));
    }

    pub fn set_on_reflow_completion(&self, hook: impl Fn() + 'static) {
        self.state.borrow_mut().on_reflow_completion = Some(Rc::new(hook));
    }

    /// Replaces the screen after a display reconfiguration. Does not reflow
    /// by itself; the owner is expected to follow up with a change.
    pub fn update_screen(&self, screen: Screen) { self.state.borrow_mut().screen = screen; }

    /// Switches to `space`, restoring the layout selection it had when it
    /// was last left.
    pub fn update_space(&self, space: Space) {
        let show_hud = {
            let mut state = self.state.borrow_mut();
            let outgoing = state.space.map(|s| s.id);
            let config = state.config.load();
            state.space = Some(space);
            state.selection.change_space(outgoing, space.id, &config);
            config.enables_layout_hud_on_space_change()
        };
        if show_hud {
            self.display_layout_hud();
        }
        self.set_needs_reflow(Change::SpaceChange);
    }

    /// Records `change` and schedules a reflow, superseding any reflow that
    /// has not completed yet.
    #[instrument(skip(self))]
    pub fn set_needs_reflow(&self, change: Change) {
        let mut state = self.state.borrow_mut();
        state.track_focus(&change);
        state.cancel_pending();

        if let Some(stateful) = state.selection.current_mut().and_then(|l| l.as_stateful_mut()) {
            stateful.update_with_change(&change);
        }

        // The guard travels with the work and marks the request finished
        // however it ends.
        let token = CancellationToken::new();
        let done = token.clone().drop_guard();
        state.pending = Some(token.clone());
        let owner = Rc::downgrade(&self.state);
        state.queue.dispatch(move || reflow(&owner, token, done));
    }

    pub fn cycle_layout_forward(&self) {
        let changed = self.state.borrow_mut().selection.cycle_forward();
        self.after_layout_change(changed);
    }

    pub fn cycle_layout_backward(&self) {
        let changed = self.state.borrow_mut().selection.cycle_backward();
        self.after_layout_change(changed);
    }

    /// Selects the layout named `key`. Unknown keys are ignored.
    pub fn select_layout(&self, key: &str) {
        let changed = self.state.borrow_mut().selection.select(key);
        self.after_layout_change(changed);
    }

    fn after_layout_change(&self, changed: bool) {
        if changed {
            self.display_layout_hud();
            self.set_needs_reflow(Change::Unknown);
        }
    }

    /// Mutates the current layout, then reflows.
    ///
    /// `f` runs on a copy with the manager unborrowed, so it may call back
    /// into it. The copy is written back only if the same layout is still
    /// selected on the same space afterwards.
    pub fn update_current_layout(&self, f: impl FnOnce(&mut LayoutKind)) {
        let (space, index, mut layout) = {
            let state = self.state.borrow();
            let Some(layout) = state.selection.current() else { return };
            (state.space, state.selection.current_index(), layout.clone())
        };
        f(&mut layout);

        let changed = {
            let mut state = self.state.borrow_mut();
            if state.space == space {
                state.selection.replace_current(index, layout)
            } else {
                debug!("space changed while updating the layout, dropping the update");
                false
            }
        };
        if changed {
            self.set_needs_reflow(Change::Unknown);
        }
    }

    /// Rebuilds the layout lists from the current configuration. Remembered
    /// per-space selections are forgotten.
    pub fn reload_configuration(&self) {
        {
            let mut state = self.state.borrow_mut();
            let config = state.config.load();
            state.selection.reload(&config);
        }
        self.set_needs_reflow(Change::Unknown);
    }

    // Pane adjustments never reflow on their own.

    pub fn shrink_main_pane(&self) {
        if let Some(paned) = self.state.borrow_mut().paned() {
            paned.shrink_main_pane();
        }
    }

    pub fn expand_main_pane(&self) {
        if let Some(paned) = self.state.borrow_mut().paned() {
            paned.expand_main_pane();
        }
    }

    pub fn increase_main_pane_count(&self) {
        if let Some(paned) = self.state.borrow_mut().paned() {
            paned.increase_main_pane_count();
        }
    }

    pub fn decrease_main_pane_count(&self) {
        if let Some(paned) = self.state.borrow_mut().paned() {
            paned.decrease_main_pane_count();
        }
    }

    pub fn next_window_id_clockwise(&self) -> Option<WindowId> {
        let state = self.state.borrow();
        state.selection.current()?.as_stateful()?.next_window_id_clockwise()
    }

    pub fn next_window_id_counter_clockwise(&self) -> Option<WindowId> {
        let state = self.state.borrow();
        state.selection.current()?.as_stateful()?.next_window_id_counter_clockwise()
    }

    /// Briefly shows the current layout's name, if enabled and the space is
    /// tiled.
    pub fn display_layout_hud(&self) {
        let (mut hud, name, description, frame) = {
            let mut state = self.state.borrow_mut();
            if !state.config.load().enables_layout_hud() || !state.is_tileable() {
                return;
            }
            let Some(layout) = state.selection.current() else { return };
            let (name, description) = (layout.name(), layout.description());
            // Absent only while a presenter is already showing the panel.
            let Some(hud) = state.hud.take() else { return };
            (hud, name, description, state.screen.frame)
        };
        hud.show(name, &description, frame);
        self.state.borrow_mut().hud = Some(hud);
    }

    /// Orders managers left to right by the left edge of their screen.
    pub fn position_cmp(&self, other: &ScreenManager) -> Ordering {
        let left = self.screen().frame.min_x();
        left.total_cmp(&other.screen().frame.min_x())
    }
}

pub fn sort_screen_managers(managers: &mut [ScreenManager]) {
    managers.sort_by(|a, b| a.position_cmp(b));
}

impl Drop for ScreenManager {
    fn drop(&mut self) {
        // Only fails while a queued job is calling out with the state
        // borrowed; that job's completion is then caught by the owner check.
        let Ok(mut state) = self.state.try_borrow_mut() else { return };
        state.cancel_pending();
        state.on_reflow_initiation = None;
        state.on_reflow_completion = None;
        if let Some(hud) = state.hud.as_mut() {
            hud.cancel_hide();
        }
    }
}

/// The deferred body of a reflow request. Everything is re-checked here
/// since the state may have moved on since the request was made.
#[instrument(skip_all)]
fn reflow(owner: &Weak<RefCell<State>>, token: CancellationToken, done: DropGuard) {
    if token.is_cancelled() {
        trace!("reflow request superseded");
        return;
    }
    let Some(state) = owner.upgrade() else { return };

    let (screen, layout, gaps, provider, queue, on_initiation) = {
        let state = state.borrow();
        let config = state.config.load();
        if !config.tiling_enabled() {
            trace!("tiling disabled, skipping reflow");
            return;
        }
        if !state.is_tileable() {
            trace!(space = ?state.space, "space is not tiled, skipping reflow");
            return;
        }
        let Some(layout) = state.selection.current() else {
            debug!("no layout selected, skipping reflow");
            return;
        };
        (
            state.screen,
            layout.clone(),
            config.settings.layout.gaps.clone(),
            state.provider.clone(),
            state.queue.clone(),
            state.on_reflow_initiation.clone(),
        )
    };
    drop(state);

    let operation = ReflowOperation {
        windows: provider.active_window_set(&screen),
        screen,
        layout,
        gaps,
        provider,
        token: token.clone(),
    };
    if let Some(hook) = on_initiation {
        hook();
    }

    let owner = owner.clone();
    queue.dispatch(move || {
        let _done = done;
        if !operation.run() {
            return;
        }
        // Cancellation and liveness are checked right before the hook runs,
        // on the same serial queue that performs teardown.
        if token.is_cancelled() {
            trace!("reflow superseded after applying, not signalling completion");
            return;
        }
        let Some(state) = owner.upgrade() else { return };
        let on_completion = state.borrow().on_reflow_completion.clone();
        drop(state);
        if let Some(hook) = on_completion {
            hook();
        }
    });
}
