use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Pending,
    Fired,
    Cancelled,
}

/// One-shot task that completes a draw once enough time has been fed to it.
/// Time only moves through [`DrawTask::update`], so callers decide whether it
/// is wall-clock or simulated.
#[derive(Debug, Clone)]
pub struct DrawTask {
    delay: Duration,
    elapsed: Duration,
    state: TaskState,
}

impl DrawTask {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::from_secs(0),
            state: TaskState::Pending,
        }
    }

    /// Returns `true` exactly once: on the update that makes the accumulated
    /// time reach the delay. A zero delay still needs one update.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if self.state != TaskState::Pending {
            return false;
        }
        self.elapsed += elapsed;
        if self.elapsed >= self.delay {
            self.state = TaskState::Fired;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        if self.state == TaskState::Pending {
            self.state = TaskState::Cancelled;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    pub fn remaining(&self) -> Duration {
        match self.state {
            TaskState::Pending => self.delay.saturating_sub(self.elapsed),
            TaskState::Fired | TaskState::Cancelled => Duration::from_secs(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_update() {
        let mut task = DrawTask::new(Duration::from_millis(1500));

        assert!(!task.update(Duration::from_secs(0)));
        assert!(!task.update(Duration::from_millis(1000)));
        assert_eq!(task.remaining(), Duration::from_millis(500));
        assert!(!task.update(Duration::from_millis(499)));
        assert!(task.update(Duration::from_millis(1)));
        assert!(!task.is_pending());
        // fires once only
        assert!(!task.update(Duration::from_secs(3)));
    }

    #[test]
    fn task_fast_forward() {
        let mut task = DrawTask::new(Duration::from_millis(1500));
        assert!(task.update(Duration::from_secs(60)));
        assert_eq!(task.remaining(), Duration::from_secs(0));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut task = DrawTask::new(Duration::from_millis(1500));
        assert!(!task.update(Duration::from_millis(1000)));
        task.cancel();
        assert!(!task.is_pending());
        assert!(!task.update(Duration::from_secs(2)));
        assert_eq!(task.remaining(), Duration::from_secs(0));
    }

    #[test]
    fn zero_delay_waits_for_an_update() {
        let mut task = DrawTask::new(Duration::from_secs(0));
        assert!(task.is_pending());
        assert!(task.update(Duration::from_secs(0)));
    }
}
