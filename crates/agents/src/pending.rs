use std::sync::Mutex;

use arena_gameplay::Decision;
use arena_gameplay::PlayerView;
use tokio::sync::oneshot;
use tokio::time::Duration;
use tokio::time::Instant;

/// A one-shot slot holding the future decision expected from a push-
/// or pull-mode agent, with a hard deadline. Exactly one of
/// [`PendingTurn::resolve`]'s callers wins; later callers are told
/// they were too late.
pub struct PendingTurn {
    pub view: PlayerView,
    deadline: Instant,
    resolver: Mutex<Option<oneshot::Sender<Decision>>>,
}

impl PendingTurn {
    pub fn new(view: PlayerView, timeout: Duration) -> (Self, oneshot::Receiver<Decision>) {
        let (tx, rx) = oneshot::channel();
        let pending = Self {
            view,
            deadline: Instant::now() + timeout,
            resolver: Mutex::new(Some(tx)),
        };
        (pending, rx)
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Attempts to resolve the pending turn. Returns `true` if this
    /// call was the first (and therefore winning) resolution.
    pub fn resolve(&self, decision: Decision) -> bool {
        let mut guard = self.resolver.lock().expect("pending turn mutex poisoned");
        match guard.take() {
            Some(tx) => {
                let _ = tx.send(decision);
                true
            }
            None => false,
        }
    }

    pub fn already_resolved(&self) -> bool {
        self.resolver
            .lock()
            .expect("pending turn mutex poisoned")
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_gameplay::Action;
    use arena_gameplay::ArenaGamePhase;

    fn view() -> PlayerView {
        PlayerView {
            table_id: "t".into(),
            hand_number: 1,
            phase: ArenaGamePhase::Preflop,
            community_cards: vec![],
            seats: vec![],
            hero_seat_index: 0,
            current_bet: 0,
            pot_total: 0,
            valid_actions: vec![Action::Check, Action::Fold],
            call_amount: 0,
            min_raise_amount: 0,
            max_raise_amount: 0,
        }
    }

    #[tokio::test]
    async fn only_first_resolution_wins() {
        let (pending, rx) = PendingTurn::new(view(), Duration::from_millis(100));
        assert!(pending.resolve(Decision::new(Action::Check, 0)));
        assert!(!pending.resolve(Decision::new(Action::Fold, 0)));
        let decision = rx.await.unwrap();
        assert_eq!(decision.action, Action::Check);
    }

    #[tokio::test]
    async fn reports_expiry_after_deadline() {
        let (pending, _rx) = PendingTurn::new(view(), Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(pending.expired());
    }
}
