//! Which layout governs a screen, and which one each space last used.

use std::mem;

use tracing::debug;

use super::registry::LayoutRegistry;
use super::systems::{Layout, LayoutKind};
use crate::common::collections::HashMap;
use crate::common::config::Config;
use crate::sys::screen::SpaceId;

/// The live layout list and selected index for one screen, plus what every
/// previously visited space had selected.
///
/// The live list belongs to the current space. On a space change it is moved
/// into the outgoing space's slot and the incoming space's list is moved out,
/// so each space keeps its own layout instances and no two spaces ever share
/// one stateful layout.
pub struct LayoutSelection {
    layouts: Vec<LayoutKind>,
    current: usize,
    index_by_space: HashMap<SpaceId, usize>,
    layouts_by_space: HashMap<SpaceId, Vec<LayoutKind>>,
}

impl LayoutSelection {
    pub fn new(config: &Config) -> Self {
        LayoutSelection {
            layouts: LayoutRegistry::layouts_from_configuration(config),
            current: 0,
            index_by_space: HashMap::default(),
            layouts_by_space: HashMap::default(),
        }
    }

    pub fn layouts(&self) -> &[LayoutKind] { &self.layouts }

    pub fn current_index(&self) -> usize { self.current }

    pub fn current(&self) -> Option<&LayoutKind> { self.layouts.get(self.current) }

    pub fn current_mut(&mut self) -> Option<&mut LayoutKind> { self.layouts.get_mut(self.current) }

    /// The index a space will come back to, if it has been left before.
    pub fn remembered_index(&self, space: SpaceId) -> Option<usize> {
        self.index_by_space.get(&space).copied()
    }

    fn is_valid(&self) -> bool { self.current < self.layouts.len() }

    pub fn cycle_forward(&mut self) -> bool {
        if !self.is_valid() {
            return false;
        }
        self.current = (self.current + 1) % self.layouts.len();
        true
    }

    pub fn cycle_backward(&mut self) -> bool {
        if !self.is_valid() {
            return false;
        }
        self.current = if self.current == 0 { self.layouts.len() } else { self.current } - 1;
        true
    }

    /// Selects the first layout whose key is `key`. Returns false, leaving
    /// the selection alone, if there is none.
    pub fn select(&mut self, key: &str) -> bool {
        match self.layouts.iter().position(|l| l.key().as_ref() == key) {
            Some(idx) => {
                self.current = idx;
                true
            }
            None => {
                debug!(key, "no layout with this key on the current space");
                false
            }
        }
    }

    /// Stores an updated copy of the layout at `index`. Refused, returning
    /// false, when `index` is no longer selected or now holds another kind
    /// of layout.
    pub fn replace_current(&mut self, index: usize, layout: LayoutKind) -> bool {
        if index != self.current {
            debug!(index, current = self.current, "selection moved on, dropping layout update");
            return false;
        }
        match self.layouts.get_mut(index) {
            Some(current) if current.key() == layout.key() => {
                *current = layout;
                true
            }
            _ => {
                debug!(index, "layout was replaced, dropping layout update");
                false
            }
        }
    }

    /// Stores the live state under `outgoing` and restores the state of
    /// `incoming`, materializing a fresh list from `config` on first visit.
    pub fn change_space(&mut self, outgoing: Option<SpaceId>, incoming: SpaceId, config: &Config) {
        if let Some(outgoing) = outgoing {
            self.index_by_space.insert(outgoing, self.current);
            self.layouts_by_space.insert(outgoing, mem::take(&mut self.layouts));
        }

        self.layouts = match self.layouts_by_space.remove(&incoming) {
            Some(layouts) => layouts,
            None => {
                debug!(?incoming, "first visit, creating layouts from configuration");
                LayoutRegistry::layouts_from_configuration(config)
            }
        };
        self.current = self.index_by_space.get(&incoming).copied().unwrap_or(0);
        if !self.is_valid() {
            self.current = 0;
        }
        debug!(?outgoing, ?incoming, index = self.current, "restored layout selection");
    }

    /// Rebuilds the live list from `config` and forgets every remembered
    /// space. The selected layout is kept if the new list still has it.
    pub fn reload(&mut self, config: &Config) {
        let previous = self.current().map(|l| l.key());
        self.layouts = LayoutRegistry::layouts_from_configuration(config);
        self.index_by_space.clear();
        self.layouts_by_space.clear();
        self.current = previous
            .and_then(|key| self.layouts.iter().position(|l| l.key() == key))
            .unwrap_or(0);
    }
}
