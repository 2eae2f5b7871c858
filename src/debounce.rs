/// Trailing-edge debounce driven by host timestamps.
///
/// Every `schedule` cancels the previous deadline and starts a new quiet period; `poll` fires
/// once when the quiet period has elapsed since the latest `schedule`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Returns `true` exactly once per quiet period.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
