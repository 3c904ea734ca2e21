use arena_gameplay::Action;
use arena_gameplay::Decision;
use arena_gameplay::PlayerView;

/// Deterministic demotion used to coerce an unlawful action into a
/// lawful one, per §4.7/GLOSSARY: `RAISE -> CALL -> CHECK -> FOLD`,
/// `CALL -> CHECK -> FOLD`, `CHECK -> CALL -> FOLD`. `FOLD` is always
/// legal, so the cascade always terminates.
pub fn fallback_cascade(action: Action, valid: &[Action]) -> Action {
    if valid.contains(&action) {
        return action;
    }
    let chain: &[Action] = match action {
        Action::Raise => &[Action::Call, Action::Check, Action::Fold],
        Action::Call => &[Action::Check, Action::Fold],
        Action::Check => &[Action::Call, Action::Fold],
        Action::AllIn => &[Action::Call, Action::Check, Action::Fold],
        Action::Fold => &[Action::Fold],
    };
    chain
        .iter()
        .copied()
        .find(|a| valid.contains(a))
        .unwrap_or(Action::Fold)
}

/// Synthesises the timeout default action: CHECK if legal, else FOLD.
pub fn default_timeout_decision(view: &PlayerView) -> Decision {
    let action = if view.valid_actions.contains(&Action::Check) {
        Action::Check
    } else {
        Action::Fold
    };
    Decision::with_reasoning(action, 0, "auto-action timeout")
}

/// Maps an agent's raw response onto a legal, amount-clamped decision.
/// `raw_action` is `None` when the string failed to parse at all,
/// which is treated the same as "not in validActions".
pub fn validate_decision(raw_action: Option<Action>, amount: i64, view: &PlayerView) -> Decision {
    let requested = raw_action.unwrap_or(Action::Check);
    let action = fallback_cascade(requested, &view.valid_actions);
    let clamped_amount = match action {
        Action::Call => view.call_amount,
        Action::Raise => amount.clamp(view.min_raise_amount, view.max_raise_amount),
        Action::AllIn => view.max_raise_amount,
        Action::Check | Action::Fold => 0,
    };
    Decision::new(action, clamped_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_gameplay::PublicSeat;

    fn view(valid: Vec<Action>) -> PlayerView {
        PlayerView {
            table_id: "t".into(),
            hand_number: 1,
            phase: arena_gameplay::ArenaGamePhase::Preflop,
            community_cards: vec![],
            seats: vec![PublicSeat {
                seat_index: 0,
                player_id: Some("p0".into()),
                player_name: None,
                stack: 100,
                position: None,
                bet_this_round: 0,
                bet_this_hand: 0,
                hole_cards: None,
            }],
            hero_seat_index: 0,
            current_bet: 10,
            pot_total: 15,
            valid_actions: valid,
            call_amount: 10,
            min_raise_amount: 20,
            max_raise_amount: 100,
        }
    }

    #[test]
    fn raise_demotes_to_call_then_check_then_fold() {
        assert_eq!(
            fallback_cascade(Action::Raise, &[Action::Call, Action::Fold]),
            Action::Call
        );
        assert_eq!(
            fallback_cascade(Action::Raise, &[Action::Check, Action::Fold]),
            Action::Check
        );
        assert_eq!(fallback_cascade(Action::Raise, &[Action::Fold]), Action::Fold);
    }

    #[test]
    fn legal_action_passes_through_unchanged() {
        assert_eq!(
            fallback_cascade(Action::Check, &[Action::Check, Action::Fold]),
            Action::Check
        );
    }

    #[test]
    fn polling_resolution_clamps_oversized_raise() {
        let view = view(vec![Action::Fold, Action::Call, Action::Raise, Action::AllIn]);
        let decision = validate_decision(Some(Action::Raise), 999_999, &view);
        assert_eq!(decision.action, Action::Raise);
        assert_eq!(decision.amount, 100);
    }

    #[test]
    fn unknown_action_falls_back_through_cascade() {
        let view = view(vec![Action::Fold, Action::Check]);
        let decision = validate_decision(None, 0, &view);
        assert_eq!(decision.action, Action::Check);
    }

    #[test]
    fn timeout_default_checks_when_legal() {
        let view = view(vec![Action::Fold, Action::Check]);
        let decision = default_timeout_decision(&view);
        assert_eq!(decision.action, Action::Check);
        assert_eq!(decision.reasoning.as_deref(), Some("auto-action timeout"));
    }

    #[test]
    fn timeout_default_folds_when_check_illegal() {
        let view = view(vec![Action::Fold, Action::Call]);
        let decision = default_timeout_decision(&view);
        assert_eq!(decision.action, Action::Fold);
    }
}
