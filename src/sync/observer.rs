use std::time::{Duration, Instant};

use crate::error::{SyncError, SyncResult};

use super::geometry::{Extent, ScrollViewport};
use super::listeners::{Listeners, Subscription};
use super::provider::{ProviderKind, VisibilityProvider, fallback_provider};
use super::section::{Section, SectionId};
use super::surface::Surface;

pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    /// Minimum score a section needs before it can become active.
    pub threshold: f32,
    /// Evaluations are coalesced to at most one per interval.
    pub frame_interval: Duration,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
struct Target {
    section: Section,
    extent: Extent,
}

/// Works out which registered section dominates the viewport.
///
/// Scroll reports only mark the observer dirty; `on_frame` does the actual
/// scoring, at most once per frame interval, and notifies listeners when
/// the winner changes. The observer never writes navigation state itself.
pub struct ViewportObserver {
    provider: Box<dyn VisibilityProvider>,
    config: ObserverConfig,
    targets: Vec<Target>,
    viewport: Option<ScrollViewport>,
    dirty: bool,
    last_frame_at: Option<Instant>,
    active: Option<SectionId>,
    listeners: Listeners<SectionId>,
}

impl ViewportObserver {
    pub fn new(provider: Box<dyn VisibilityProvider>, config: ObserverConfig) -> Self {
        Self {
            provider,
            config,
            targets: Vec::new(),
            viewport: None,
            dirty: false,
            last_frame_at: None,
            active: None,
            listeners: Listeners::default(),
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn config(&self) -> ObserverConfig {
        self.config
    }

    /// Begins observing the mounted element for `section`.
    ///
    /// An unmounted element is logged and reported as `ElementNotFound`;
    /// the caller retries after the section mounts.
    pub fn register(&mut self, section: &Section, surface: &dyn Surface) -> SyncResult<()> {
        let Some(extent) = surface.element(&section.id) else {
            tracing::debug!(section = %section.id, "cannot observe unmounted section");
            return Err(SyncError::element_not_found(section.id.as_str()));
        };

        self.attach(&section.id, extent);
        match self
            .targets
            .iter_mut()
            .find(|target| target.section.id == section.id)
        {
            Some(target) => target.extent = extent,
            None => {
                self.targets.push(Target {
                    section: section.clone(),
                    extent,
                });
                self.targets.sort_by_key(|target| target.section.dom_order);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Stops observing `id`. Safe to call for ids that are not registered.
    pub fn unregister(&mut self, id: &SectionId) -> bool {
        self.provider.unobserve(id);
        let before = self.targets.len();
        self.targets.retain(|target| &target.section.id != id);
        let removed = self.targets.len() != before;
        if removed {
            if self.active.as_ref() == Some(id) {
                self.active = None;
            }
            self.dirty = true;
        }
        removed
    }

    pub fn is_registered(&self, id: &SectionId) -> bool {
        self.targets.iter().any(|target| &target.section.id == id)
    }

    pub fn registered_len(&self) -> usize {
        self.targets.len()
    }

    /// Refreshes extents after a layout change. Targets whose element has
    /// gone away keep their last known extent.
    pub fn relayout(&mut self, surface: &dyn Surface) {
        let refreshed: Vec<(SectionId, Extent)> = self
            .targets
            .iter()
            .filter_map(|target| {
                surface
                    .element(&target.section.id)
                    .filter(|extent| *extent != target.extent)
                    .map(|extent| (target.section.id.clone(), extent))
            })
            .collect();
        if refreshed.is_empty() {
            return;
        }

        for (id, extent) in refreshed {
            self.attach(&id, extent);
            if let Some(target) = self.targets.iter_mut().find(|t| t.section.id == id) {
                target.extent = extent;
            }
        }
        self.dirty = true;
    }

    /// Records a scroll position. Cheap; evaluation waits for the next frame.
    pub fn on_scroll(&mut self, viewport: ScrollViewport) {
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.dirty = true;
        }
    }

    /// Runs the coalesced evaluation. Returns the new active section when it changed.
    pub fn on_frame(&mut self, now: Instant) -> Option<SectionId> {
        if !self.dirty {
            return None;
        }
        if let Some(last) = self.last_frame_at
            && now.saturating_duration_since(last) < self.config.frame_interval
        {
            return None;
        }
        let viewport = self.viewport?;

        self.last_frame_at = Some(now);
        self.dirty = false;

        let best = self.evaluate(viewport);
        if best == self.active {
            return None;
        }
        self.active = best.clone();
        let changed = best?;
        self.listeners.notify(&changed);
        Some(changed)
    }

    /// The last evaluated winner, or `None` before the first measured frame
    /// or when nothing clears the threshold.
    pub fn get_active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SectionId) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    fn evaluate(&self, viewport: ScrollViewport) -> Option<SectionId> {
        let mut best: Option<(&Target, f32)> = None;
        for target in &self.targets {
            let Some(score) = self.provider.score(&target.section.id, viewport) else {
                continue;
            };
            if score < self.config.threshold {
                continue;
            }
            // Strictly greater: on ties the earlier section in DOM order keeps the lead.
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((target, score));
            }
        }
        best.map(|(target, _)| target.section.id.clone())
    }

    fn attach(&mut self, id: &SectionId, extent: Extent) {
        loop {
            let err = match self.provider.observe(id, extent) {
                Ok(()) => return,
                Err(err) => err,
            };
            let failed = self.provider.kind();
            let Some(fallback) = fallback_provider(failed) else {
                tracing::error!(section = %id, error = %err, "no provider left to observe section");
                return;
            };
            tracing::warn!(
                section = %id,
                error = %err,
                from = failed.id(),
                to = fallback.kind().id(),
                "visibility provider failed, degrading"
            );
            self.replace_provider(fallback);
        }
    }

    fn replace_provider(&mut self, mut provider: Box<dyn VisibilityProvider>) {
        for target in &self.targets {
            if let Err(err) = provider.observe(&target.section.id, target.extent) {
                tracing::warn!(section = %target.section.id, error = %err, "re-observe failed");
            }
        }
        self.provider = provider;
        self.dirty = true;
    }
}
