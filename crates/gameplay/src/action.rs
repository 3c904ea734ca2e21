use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The five legal action kinds. Ordered worst-to-best for the fallback
/// cascade (§4.7): `RAISE -> CALL -> CHECK -> FOLD`, and separately
/// `CALL -> CHECK -> FOLD`, `CHECK -> CALL -> FOLD`. `FoldWinAction`
/// lives elsewhere; these are the player-submittable kinds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "FOLD",
            Action::Check => "CHECK",
            Action::Call => "CALL",
            Action::Raise => "RAISE",
            Action::AllIn => "ALL_IN",
        };
        write!(f, "{}", s)
    }
}

impl Action {
    pub fn parse(s: &str) -> Option<Action> {
        match s.to_ascii_uppercase().as_str() {
            "FOLD" => Some(Action::Fold),
            "CHECK" => Some(Action::Check),
            "CALL" => Some(Action::Call),
            "RAISE" => Some(Action::Raise),
            "ALL_IN" => Some(Action::AllIn),
            _ => None,
        }
    }
}

/// A decision returned by any agent transport: in-process call, push
/// callback response, or polling submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub amount: i64,
    pub reasoning: Option<String>,
}

impl Decision {
    pub fn new(action: Action, amount: i64) -> Self {
        Self {
            action,
            amount,
            reasoning: None,
        }
    }

    pub fn with_reasoning(action: Action, amount: i64, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            amount,
            reasoning: Some(reasoning.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Action::parse("raise"), Some(Action::Raise));
        assert_eq!(Action::parse("ALL_IN"), Some(Action::AllIn));
        assert_eq!(Action::parse("bogus"), None);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(Action::AllIn.to_string(), "ALL_IN");
    }
}
