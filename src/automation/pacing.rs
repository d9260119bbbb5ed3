use std::time::Duration;

/// Wait strategy used between UI transitions.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread. Production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        tracing::trace!(?duration, "waiting for redraw");
        std::thread::sleep(duration);
    }
}

/// Records requested waits without sleeping.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: std::cell::RefCell<Vec<Duration>>,
}

#[cfg(test)]
impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }

    pub fn total(&self) -> Duration {
        self.pauses.borrow().iter().sum()
    }
}

#[cfg(test)]
impl Pacer for RecordingPacer {
    fn pause(&self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}
