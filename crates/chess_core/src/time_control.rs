//! Time control: turning protocol clock parameters into a search budget.
//!
//! The budget is fixed once per search request. Searches poll it at their
//! terminal checks and root-move boundaries; there is no preemption beyond
//! that poll, so a search may overrun its deadline by one subtree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;

/// Shared cancellation flag raised by the protocol front end on `stop`.
///
/// Cheap to clone; every clone observes the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every search holding this flag to wind down.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tunable allocation policy. Defaults match the engine's tournament settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimePolicy {
    /// Share of an explicit `movetime` actually spent searching
    pub move_time_safety: f64,
    /// Share of the remaining clock spent on one move
    pub clock_fraction: f64,
    /// Ceiling for clock-derived budgets, in milliseconds
    pub max_search_time_ms: u64,
    /// Ceiling when the root has exactly one legal move, in milliseconds
    pub forced_move_time_ms: u64,
}

impl TimePolicy {
    pub fn max_search_time(&self) -> Duration {
        Duration::from_millis(self.max_search_time_ms)
    }

    pub fn forced_move_time(&self) -> Duration {
        Duration::from_millis(self.forced_move_time_ms)
    }
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self {
            move_time_safety: 0.98,
            clock_fraction: 0.05,
            max_search_time_ms: 30_000,
            forced_move_time_ms: 2_000,
        }
    }
}

/// Clock parameters for the side to move, as recognized from `go`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockParams {
    /// Fixed time for this move only
    pub move_time: Option<Duration>,
    /// Time left on the mover's clock
    pub remaining: Option<Duration>,
}

/// Wall-clock budget for one root search.
#[derive(Debug, Clone)]
pub struct Budget {
    start: Instant,
    /// `None` means search until stopped
    deadline: Option<Instant>,
    stop: StopFlag,
}

impl Budget {
    pub fn new(start: Instant, deadline: Option<Instant>, stop: StopFlag) -> Self {
        Self {
            start,
            deadline,
            stop,
        }
    }

    /// A budget that only ends through its stop flag.
    pub fn unbounded(stop: StopFlag) -> Self {
        Self::new(Instant::now(), None, stop)
    }

    /// A budget of `limit` starting now.
    pub fn with_limit(limit: Duration, stop: StopFlag) -> Self {
        let start = Instant::now();
        Self::new(start, Some(start + limit), stop)
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time allotted to this search, if bounded.
    pub fn allotted(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(self.start))
    }

    /// True once the deadline has passed or a stop was requested.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed nanoseconds, never zero.
    pub fn elapsed_nanos(&self) -> u128 {
        self.elapsed().as_nanos().max(1)
    }
}

/// Fixes the deadline of a search starting at `now`.
///
/// An explicit move time wins over the clock. A zero or missing clock means
/// no deadline. With a single legal reply the budget is capped at the
/// policy's forced-move ceiling whatever was requested.
pub fn compute_budget(
    now: Instant,
    clock: &ClockParams,
    root_moves: usize,
    policy: &TimePolicy,
    stop: StopFlag,
) -> Budget {
    let allotment = match (clock.move_time, clock.remaining) {
        (Some(move_time), _) => Some(move_time.mul_f64(policy.move_time_safety)),
        (None, Some(remaining)) if !remaining.is_zero() => Some(
            remaining
                .mul_f64(policy.clock_fraction)
                .min(policy.max_search_time()),
        ),
        _ => None,
    };

    let allotment = if root_moves == 1 {
        let forced = policy.forced_move_time();
        Some(allotment.map_or(forced, |a| a.min(forced)))
    } else {
        allotment
    };

    Budget::new(now, allotment.map(|a| now + a), stop)
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
