use std::time::Instant;

use crate::carousel::TickOutcome;
use crate::command::{ActionId, CommandOutcome};
use crate::page::CarouselSlot;
use crate::sync::SectionId;

use super::core::App;
use super::retry::PendingNavigation;

impl App {
    /// One animation frame: mounts, scroll animation, observer evaluation,
    /// settle windows, navigation retries and carousel timers. Returns
    /// whether anything visible changed.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let tick = self.page.tick(now);
        let mut changed = tick.scrolled;

        for id in &tick.mounted {
            if let Some(section) = self.sync.navigator.registry().get(id).cloned()
                && let Err(err) = self.sync.observer.register(&section, &self.page)
            {
                tracing::warn!(section = %id, error = %err, "mounted section could not be observed");
            }
            self.carousels.on_section_mounted(id, now);
        }
        if tick.relayout {
            self.sync.observer.relayout(&self.page);
            changed = true;
        }

        self.sync.observer.on_scroll(self.page.viewport());
        if let Some(id) = self.sync.observer.on_frame(now) {
            changed |= self.sync.navigator.on_observed(&id);
        }
        changed |= self.resync_after_settle();

        if let Some(settled) = self.sync.navigator.poll(now) {
            self.state
                .report(ActionId::NavigationSettled, format!("at {settled}"));
            self.sync.resync_after_settle = true;
            changed = true;
        }

        changed |= self.retry_pending_navigation(now);

        for slot in [CarouselSlot::Skills, CarouselSlot::Certifications] {
            if let TickOutcome::Advanced { .. } = self.carousels.get_mut(slot).tick(now) {
                changed = true;
            }
        }

        changed |= self.sync_route_into_state();
        changed
    }

    /// Starts a jump to `id`. A target that has not mounted yet is mounted
    /// and retried with backoff.
    pub fn navigate(&mut self, id: SectionId, now: Instant) -> CommandOutcome {
        self.sync.pending = None;
        self.sync.resync_after_settle = false;
        match self.sync.navigator.navigate_to(&id, &mut self.page, now) {
            Ok(()) => {
                self.sync_route_into_state();
                self.state
                    .report(ActionId::NavigateTo, format!("navigating to {id}"));
                CommandOutcome::Applied
            }
            Err(err) if err.is_retryable() => {
                self.page.request_mount(&id);
                self.state
                    .report(ActionId::NavigateTo, format!("loading {id}"));
                self.sync.pending = Some(PendingNavigation::first(id, now, &self.sync.retry));
                CommandOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(section = %id, error = %err, "navigation aborted");
                self.state
                    .report(ActionId::NavigateTo, format!("navigation failed: {err}"));
                CommandOutcome::Noop
            }
        }
    }

    pub fn set_viewport_height(&mut self, rows: u32) -> bool {
        if !self.page.set_viewport_height(rows) {
            return false;
        }
        self.sync.observer.on_scroll(self.page.viewport());
        true
    }

    /// Changes reported while suspended were dropped, so once a navigation
    /// settles the observer's standing winner may differ from the store.
    /// Runs one frame after the settle so the target holds at the settle instant.
    fn resync_after_settle(&mut self) -> bool {
        if !self.sync.resync_after_settle || self.sync.navigator.is_suspended() {
            return false;
        }
        self.sync.resync_after_settle = false;
        let Some(observed) = self.sync.observer.get_active_section().cloned() else {
            return false;
        };
        if &observed == self.sync.navigator.active() {
            return false;
        }
        tracing::debug!(section = %observed, "active section resynced after settle");
        self.sync.navigator.on_observed(&observed)
    }

    fn retry_pending_navigation(&mut self, now: Instant) -> bool {
        let Some(pending) = self.sync.pending.take() else {
            return false;
        };
        if !pending.is_due(now) {
            self.sync.pending = Some(pending);
            return false;
        }

        match self
            .sync
            .navigator
            .navigate_to(&pending.target, &mut self.page, now)
        {
            Ok(()) => {
                self.state.report(
                    ActionId::NavigationRetry,
                    format!("navigating to {}", pending.target),
                );
            }
            Err(err) if err.is_retryable() => {
                self.page.request_mount(&pending.target);
                let target = pending.target.clone();
                let attempt = pending.attempt;
                self.sync.pending = pending.next(now, &self.sync.retry);
                if self.sync.pending.is_none() {
                    tracing::warn!(section = %target, attempts = attempt, "navigation retries exhausted");
                    self.state.report(
                        ActionId::NavigationRetry,
                        format!("{target} did not load"),
                    );
                }
            }
            Err(err) => {
                tracing::warn!(section = %pending.target, error = %err, "navigation retry aborted");
                self.state
                    .report(ActionId::NavigationRetry, format!("navigation failed: {err}"));
            }
        }
        true
    }
}
