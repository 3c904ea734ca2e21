use tokio::time::Duration;
use tokio::time::Instant;

/// Per-player action deadline. Exactly one of these is armed per table
/// at any time, per §4.5. Modeled directly on the arm/clear/expired/
/// remaining shape used for the single-table decision clock it's
/// generalized from.
#[derive(Debug, Clone)]
pub struct TurnTimer {
    action_timeout: Duration,
    deadline: Option<Instant>,
    can_check: bool,
}

impl TurnTimer {
    pub fn new(action_timeout_ms: u64) -> Self {
        Self {
            action_timeout: Duration::from_millis(action_timeout_ms),
            deadline: None,
            can_check: false,
        }
    }

    /// Arms the timer for the seat whose turn it is. `can_check` is
    /// cached at arm-time so expiry doesn't need to recompute legality.
    pub fn start(&mut self, can_check: bool) {
        self.deadline = Some(Instant::now() + self.action_timeout);
        self.can_check = can_check;
    }

    /// Disarms the timer (action submitted, seating changed, table
    /// destroyed). A no-op if already disarmed.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn can_check(&self) -> bool {
        self.can_check
    }

    pub fn action_timeout(&self) -> Duration {
        self.action_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let timer = TurnTimer::new(1000);
        assert!(timer.deadline().is_none());
        assert!(!timer.expired());
    }

    #[test]
    fn start_sets_a_future_deadline() {
        let mut timer = TurnTimer::new(1000);
        timer.start(true);
        assert!(timer.deadline().is_some());
        assert!(!timer.expired());
        assert!(timer.can_check());
    }

    #[test]
    fn cancel_clears_deadline() {
        let mut timer = TurnTimer::new(1000);
        timer.start(false);
        timer.cancel();
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn restart_replaces_previous_deadline() {
        let mut timer = TurnTimer::new(1000);
        timer.start(true);
        let first = timer.deadline();
        timer.start(false);
        assert_ne!(first, timer.deadline());
        assert!(!timer.can_check());
    }
}
