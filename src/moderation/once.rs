use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot flag for "log this only once" events.
///
/// Owned by whoever emits the event so each instance (and each test) starts
/// fresh. `first()` returns true for exactly one caller, even under races.
#[derive(Debug, Default)]
pub struct OnceFlag {
    fired: AtomicBool,
}

impl OnceFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time it is called, false afterwards.
    pub fn first(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }
}
