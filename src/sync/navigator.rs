use std::time::{Duration, Instant};

use crate::error::{SyncError, SyncResult};

use super::listeners::Subscription;
use super::section::{SectionId, SectionRegistry};
use super::store::{ActiveSectionStore, NavigationState};
use super::surface::{RouteSink, Surface};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
struct SettleWindow {
    target: SectionId,
    deadline: Instant,
}

/// Performs programmatic jumps and owns the navigation state.
///
/// A jump suspends passive updates, writes the target optimistically and
/// starts a settle window. Only the most recent window is live: a newer jump
/// replaces the pending one, so exactly one resume happens, timed from the
/// last request.
pub struct SectionNavigator {
    registry: SectionRegistry,
    store: ActiveSectionStore,
    settle_delay: Duration,
    settle: Option<SettleWindow>,
    route: Box<dyn RouteSink>,
}

impl SectionNavigator {
    pub fn new(registry: SectionRegistry, settle_delay: Duration, route: Box<dyn RouteSink>) -> Self {
        let store = ActiveSectionStore::new(registry.first().id.clone());
        Self {
            registry,
            store,
            settle_delay,
            settle: None,
            route,
        }
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn state(&self) -> &NavigationState {
        self.store.state()
    }

    pub fn active(&self) -> &SectionId {
        self.store.active()
    }

    pub fn is_suspended(&self) -> bool {
        self.store.is_suspended()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SectionId) + 'static) -> Subscription {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.store.unsubscribe(subscription)
    }

    pub fn navigate_to(
        &mut self,
        id: &SectionId,
        surface: &mut dyn Surface,
        now: Instant,
    ) -> SyncResult<()> {
        let section = match self.registry.require(id) {
            Ok(section) => section,
            Err(err) => {
                tracing::warn!(section = %id, "navigation to unknown section aborted");
                return Err(err);
            }
        };
        let Some(extent) = surface.element(id) else {
            tracing::debug!(section = %id, "navigation target not mounted yet");
            return Err(SyncError::element_not_found(id.as_str()));
        };
        let path = section.path.clone();

        if let Some(previous) = self.settle.take() {
            tracing::debug!(from = %previous.target, to = %id, "pending navigation superseded");
        }

        self.store.suspend();
        self.store.write_through(id.clone(), now);
        self.route.update_path(&path);
        surface.scroll_into_view(id, extent);
        self.settle = Some(SettleWindow {
            target: id.clone(),
            deadline: now + self.settle_delay,
        });
        tracing::debug!(section = %id, settle_ms = self.settle_delay.as_millis() as u64, "navigation started");
        Ok(())
    }

    /// Ends the settle window once its deadline passes. Returns the target
    /// of the navigation that just settled.
    pub fn poll(&mut self, now: Instant) -> Option<SectionId> {
        let window = self.settle.as_ref()?;
        if now < window.deadline {
            return None;
        }
        let window = self.settle.take()?;
        self.store.resume();
        tracing::debug!(section = %window.target, "navigation settled");
        Some(window.target)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle.as_ref().map(|window| window.deadline)
    }

    /// Passive update from the viewport observer. Dropped while a navigation
    /// is settling.
    pub fn on_observed(&mut self, id: &SectionId) -> bool {
        let Some(section) = self.registry.get(id) else {
            tracing::warn!(section = %id, "observer reported an unregistered section");
            return false;
        };
        let path = section.path.clone();
        if !self.store.set_active(id.clone()) {
            return false;
        }
        self.route.update_path(&path);
        true
    }
}
