use std::time::Instant;

use super::listeners::{Listeners, Subscription};
use super::section::SectionId;

/// Per-session record of which section the reader is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub active_section_id: SectionId,
    pub is_suspended: bool,
    pub last_manual_action_at: Option<Instant>,
}

/// Single source of truth for the active section.
///
/// Passive writes go through `set_active` and are dropped while suspended.
/// Only the navigator may write through a suspension.
#[derive(Debug)]
pub struct ActiveSectionStore {
    state: NavigationState,
    listeners: Listeners<SectionId>,
}

impl ActiveSectionStore {
    pub fn new(initial: SectionId) -> Self {
        Self {
            state: NavigationState {
                active_section_id: initial,
                is_suspended: false,
                last_manual_action_at: None,
            },
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn active(&self) -> &SectionId {
        &self.state.active_section_id
    }

    pub fn is_suspended(&self) -> bool {
        self.state.is_suspended
    }

    /// Returns whether the active section changed.
    pub fn set_active(&mut self, id: SectionId) -> bool {
        if self.state.is_suspended {
            tracing::trace!(section = %id, "active section write dropped while suspended");
            return false;
        }
        self.replace_active(id)
    }

    pub fn suspend(&mut self) {
        self.state.is_suspended = true;
    }

    pub fn resume(&mut self) {
        self.state.is_suspended = false;
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SectionId) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    pub(crate) fn write_through(&mut self, id: SectionId, now: Instant) -> bool {
        self.state.last_manual_action_at = Some(now);
        self.replace_active(id)
    }

    fn replace_active(&mut self, id: SectionId) -> bool {
        if self.state.active_section_id == id {
            return false;
        }
        self.state.active_section_id = id;
        self.listeners.notify(&self.state.active_section_id);
        true
    }
}
