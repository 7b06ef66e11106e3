// A cancellable repeating task driven by the host's display ticks.
//
// The renderer re-arms the task at the end of every tick ("run again before the next repaint").
// Once cancelled it can never be re-armed, so no tick does any work after teardown.

#[derive(Debug, Default)]
pub struct FrameTask {
    pending: bool,
    cancelled: bool,
    ticks: u64,
}

impl FrameTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more tick. No-op once cancelled.
    pub fn schedule(&mut self) {
        if !self.cancelled {
            self.pending = true;
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending = false;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called at the top of a display tick. True means the callback is due and should run now;
    /// the request is consumed and must be renewed with `schedule`.
    pub fn begin_tick(&mut self) -> bool {
        if self.cancelled || !self.pending {
            return false;
        }
        self.pending = false;
        self.ticks += 1;
        true
    }

    /// Ticks that actually ran.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_runs_only_when_scheduled() {
        let mut task = FrameTask::new();
        assert!(!task.begin_tick());
        task.schedule();
        assert!(task.begin_tick());
        assert!(!task.begin_tick(), "request is consumed by the tick");
        task.schedule();
        assert!(task.begin_tick());
        assert_eq!(task.ticks(), 2);
    }

    #[test]
    fn cancel_drops_pending_request_and_blocks_rescheduling() {
        let mut task = FrameTask::new();
        task.schedule();
        task.cancel();
        assert!(!task.is_pending());
        assert!(!task.begin_tick());
        task.schedule();
        assert!(!task.begin_tick());
        assert!(task.is_cancelled());
        assert_eq!(task.ticks(), 0);
    }
}
