use arena_agents::fallback_cascade;
use arena_gameplay::Action;
use arena_gameplay::Decision;
use arena_gameplay::PlayerView;
use rand::rng;
use rand::Rng;

use crate::archetype::Archetype;

const WEIGHTED_ACTIONS: [Action; 4] = [Action::Fold, Action::Check, Action::Call, Action::Raise];

/// Samples one of `{FOLD, CHECK, CALL, RAISE}` by weighted draw, then
/// clamps the result into `view.validActions` through the shared
/// fallback cascade, per §4.8.
pub fn decide(archetype: Archetype, view: &PlayerView) -> Decision {
    let weights = archetype.weights(view.phase);
    let drawn = weighted_draw(&weights);
    let action = fallback_cascade(drawn, &view.valid_actions);
    let amount = match action {
        Action::Raise => size_raise(archetype, view),
        Action::Call => view.call_amount,
        Action::AllIn => view.max_raise_amount,
        Action::Check | Action::Fold => 0,
    };
    Decision::new(action, amount)
}

fn weighted_draw(weights: &[f64; 4]) -> Action {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Action::Fold;
    }
    let mut sample = rng().random_range(0.0..total);
    for (weight, action) in weights.iter().zip(WEIGHTED_ACTIONS.iter()) {
        if sample < *weight {
            return *action;
        }
        sample -= *weight;
    }
    *WEIGHTED_ACTIONS.last().unwrap()
}

/// Archetype-specific raise sizing, clamped to the legal range.
fn size_raise(archetype: Archetype, view: &PlayerView) -> i64 {
    let min = view.min_raise_amount;
    let max = view.max_raise_amount;
    let pot = view.pot_total;
    let raw = match archetype {
        Archetype::TightPassive | Archetype::LoosePassive => min,
        Archetype::TightAggressive => pot,
        Archetype::LooseAggressive => {
            let multiplier = rng().random_range(1.5..=3.0);
            ((pot as f64) * multiplier) as i64
        }
        Archetype::Random => {
            if min >= max {
                min
            } else {
                rng().random_range(min..=max)
            }
        }
    };
    raw.clamp(min.min(max), max.max(min))
}
