mod archetype;
mod decider;

pub use archetype::Archetype;
pub use archetype::ALL_ARCHETYPES;
pub use decider::decide;
