use std::time::{Duration, Instant};

use crate::sync::SectionId;

/// Caller-side retry for navigations whose target has not mounted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NavRetryPolicy {
    pub(crate) max_attempts: u32,
    pub(crate) base_backoff: Duration,
}

impl NavRetryPolicy {
    /// Delay before retry number `attempt` (1-based); doubles each time.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << shift)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingNavigation {
    pub(crate) target: SectionId,
    pub(crate) attempt: u32,
    pub(crate) due_at: Instant,
}

impl PendingNavigation {
    pub(crate) fn first(target: SectionId, now: Instant, policy: &NavRetryPolicy) -> Self {
        Self {
            target,
            attempt: 1,
            due_at: now + policy.backoff(1),
        }
    }

    /// Schedules the following attempt, or `None` once the budget is spent.
    pub(crate) fn next(self, now: Instant, policy: &NavRetryPolicy) -> Option<Self> {
        let attempt = self.attempt + 1;
        if attempt > policy.max_attempts {
            return None;
        }
        Some(Self {
            target: self.target,
            attempt,
            due_at: now + policy.backoff(attempt),
        })
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{NavRetryPolicy, PendingNavigation};
    use crate::sync::SectionId;

    #[test]
    fn backoff_doubles_and_budget_is_bounded() {
        let policy = NavRetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::from_millis(50),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(50));
        assert_eq!(policy.backoff(3), Duration::from_millis(200));

        let t0 = Instant::now();
        let first = PendingNavigation::first(SectionId::from("skills"), t0, &policy);
        assert!(!first.is_due(t0));
        assert!(first.is_due(t0 + Duration::from_millis(50)));

        let second = first.next(t0, &policy).expect("second attempt");
        let third = second.next(t0, &policy).expect("third attempt");
        assert_eq!(third.due_at, t0 + Duration::from_millis(200));
        assert!(third.next(t0, &policy).is_none());
    }
}
