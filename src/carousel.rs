use std::time::{Duration, Instant};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(4000);
pub const DEFAULT_OVERRIDE_WINDOW: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub tick_interval: Duration,
    /// Ticks landing within this window after a manual action are skipped.
    pub override_window: Duration,
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            override_window: DEFAULT_OVERRIDE_WINDOW,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// No items; nothing rendered, no timer.
    Idle,
    AutoAdvancing,
    /// Auto-advancing, but a recent manual action is still suppressing ticks.
    ManualOverride,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer is due yet, or none is scheduled.
    NotDue,
    Advanced { index: usize },
    /// The tick fired inside the override window and was skipped.
    Suppressed,
}

/// Auto-advancing carousel state that defers to recent manual interaction.
///
/// The tick schedule is a fixed cadence anchored when the timer starts.
/// Manual actions never move the schedule; they only make ticks inside the
/// override window no-ops.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    active_index: Option<usize>,
    is_auto_playing: bool,
    last_manual_action_at: Option<Instant>,
    config: CarouselConfig,
    next_tick_at: Option<Instant>,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, mut config: CarouselConfig, now: Instant) -> Self {
        config.tick_interval = config.tick_interval.max(Duration::from_millis(1));
        let mut carousel = Self {
            active_index: None,
            is_auto_playing: config.autoplay,
            last_manual_action_at: None,
            config,
            next_tick_at: None,
            items: Vec::new(),
        };
        carousel.set_items(items, now);
        carousel
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active_index.and_then(|index| self.items.get(index))
    }

    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    pub fn last_manual_action_at(&self) -> Option<Instant> {
        self.last_manual_action_at
    }

    pub fn config(&self) -> CarouselConfig {
        self.config
    }

    /// When the next tick is scheduled, `None` when no timer is running.
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.next_tick_at
    }

    pub fn phase(&self, now: Instant) -> CarouselPhase {
        if self.items.is_empty() {
            CarouselPhase::Idle
        } else if !self.is_auto_playing {
            CarouselPhase::Paused
        } else if self.override_is_fresh(now) {
            CarouselPhase::ManualOverride
        } else {
            CarouselPhase::AutoAdvancing
        }
    }

    /// Replaces the items. The index is clamped to the new range and the
    /// timer restarts; an empty list cancels it.
    pub fn set_items(&mut self, items: Vec<T>, now: Instant) {
        self.items = items;
        self.active_index = if self.items.is_empty() {
            None
        } else {
            Some(
                self.active_index
                    .unwrap_or(0)
                    .min(self.items.len() - 1),
            )
        };
        self.restart_timer(now);
    }

    pub fn set_auto_playing(&mut self, auto_playing: bool, now: Instant) {
        if self.is_auto_playing == auto_playing {
            return;
        }
        self.is_auto_playing = auto_playing;
        self.restart_timer(now);
    }

    pub fn toggle_auto_playing(&mut self, now: Instant) -> bool {
        self.set_auto_playing(!self.is_auto_playing, now);
        self.is_auto_playing
    }

    pub fn set_tick_interval(&mut self, tick_interval: Duration, now: Instant) {
        self.config.tick_interval = tick_interval.max(Duration::from_millis(1));
        self.restart_timer(now);
    }

    /// Cancels the timer for good; used when the carousel leaves the page.
    pub fn unmount(&mut self) {
        self.next_tick_at = None;
        self.is_auto_playing = false;
    }

    /// Manual jump. Out-of-range indices are clamped.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if self.items.is_empty() {
            return;
        }
        let index = index.min(self.items.len() - 1);
        self.active_index = Some(index);
        self.mark_manual(now);
    }

    pub fn go_next(&mut self, now: Instant) {
        let Some(current) = self.active_index else {
            return;
        };
        self.active_index = Some((current + 1) % self.items.len());
        self.mark_manual(now);
    }

    pub fn go_previous(&mut self, now: Instant) {
        let Some(current) = self.active_index else {
            return;
        };
        let len = self.items.len();
        self.active_index = Some((current + len - 1) % len);
        self.mark_manual(now);
    }

    /// Fires the scheduled tick if it is due.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(due) = self.next_tick_at else {
            return TickOutcome::NotDue;
        };
        if now < due {
            return TickOutcome::NotDue;
        }
        // Catch up on missed ticks without replaying them.
        let mut next = due + self.config.tick_interval;
        while next <= now {
            next += self.config.tick_interval;
        }
        self.next_tick_at = Some(next);

        if self.override_is_fresh(now) {
            tracing::trace!("carousel tick suppressed by recent manual action");
            return TickOutcome::Suppressed;
        }
        let Some(current) = self.active_index else {
            return TickOutcome::NotDue;
        };
        let index = (current + 1) % self.items.len();
        self.active_index = Some(index);
        TickOutcome::Advanced { index }
    }

    fn override_is_fresh(&self, now: Instant) -> bool {
        self.last_manual_action_at
            .is_some_and(|at| now.saturating_duration_since(at) <= self.config.override_window)
    }

    fn mark_manual(&mut self, now: Instant) {
        self.last_manual_action_at = Some(now);
        tracing::debug!(index = ?self.active_index, "carousel manual override");
    }

    fn restart_timer(&mut self, now: Instant) {
        self.next_tick_at = if self.is_auto_playing && !self.items.is_empty() {
            Some(now + self.config.tick_interval)
        } else {
            None
        };
    }
}
