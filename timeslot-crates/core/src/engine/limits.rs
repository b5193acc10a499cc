use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// A cancellation handle which can be shared between threads.
///
/// All clones observe the same flag; once triggered it stays triggered.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    triggered: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Interrupt {
        Interrupt::default()
    }

    /// Wraps an existing flag, e.g. one registered with an OS signal handler.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Interrupt {
        Interrupt { triggered: flag }
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }
}

/// The resource limits of a single engine invocation.
#[derive(Clone, Debug, Default)]
pub struct SolveLimits {
    /// Wall-clock budget of one `solve` call; `None` means unbounded.
    pub time_budget: Option<Duration>,
    pub interrupt: Option<Interrupt>,
}

impl SolveLimits {
    /// Starts the clock for one engine invocation.
    pub fn start(&self) -> LimitTracker {
        LimitTracker {
            deadline: self.time_budget.map(|budget| Instant::now() + budget),
            interrupt: self.interrupt.clone(),
            stop_reason: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    TimeBudget,
    Interrupted,
}

/// Tracks whether a running engine invocation should stop, and why it did.
#[derive(Clone, Debug)]
pub struct LimitTracker {
    deadline: Option<Instant>,
    interrupt: Option<Interrupt>,
    stop_reason: Option<StopReason>,
}

impl LimitTracker {
    pub fn should_stop(&mut self) -> bool {
        if self.stop_reason.is_some() {
            return true;
        }

        if self
            .interrupt
            .as_ref()
            .is_some_and(Interrupt::is_triggered)
        {
            self.stop_reason = Some(StopReason::Interrupted);
        } else if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.stop_reason = Some(StopReason::TimeBudget);
        }

        self.stop_reason.is_some()
    }

    /// The reason the tracker first asked to stop, if it did.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }
}
