use std::fmt;

/// Seat label relative to the dealer button, controlling action order.
/// Assignment per table size follows the table in the data model:
/// heads-up collapses to `{Btn, Bb}` (the button also posts the small
/// blind); 3..6 seats use the standard clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Btn,
    Sb,
    Bb,
    Utg,
    Utg1,
    Co,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
            Position::Utg => "UTG",
            Position::Utg1 => "UTG1",
            Position::Co => "CO",
        };
        write!(f, "{}", label)
    }
}

/// Assigns positions clockwise from the dealer button for `active_seats`
/// seat indices (already in clockwise order starting at the button),
/// per the table in §3 of the data model.
pub fn assign_positions(active_seats: &[usize]) -> Vec<(usize, Position)> {
    let n = active_seats.len();
    let labels: &[Position] = match n {
        2 => &[Position::Btn, Position::Bb],
        3 => &[Position::Btn, Position::Sb, Position::Bb],
        4 => &[Position::Btn, Position::Sb, Position::Bb, Position::Co],
        5 => &[
            Position::Btn,
            Position::Sb,
            Position::Bb,
            Position::Utg,
            Position::Co,
        ],
        6 => &[
            Position::Btn,
            Position::Sb,
            Position::Bb,
            Position::Utg,
            Position::Utg1,
            Position::Co,
        ],
        _ => panic!("table size must be 2..=6, got {n}"),
    };
    active_seats
        .iter()
        .copied()
        .zip(labels.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_has_btn_and_bb_only() {
        let assigned = assign_positions(&[2, 5]);
        assert_eq!(assigned, vec![(2, Position::Btn), (5, Position::Bb)]);
    }

    #[test]
    fn six_handed_uses_all_labels() {
        let assigned = assign_positions(&[0, 1, 2, 3, 4, 5]);
        let labels: Vec<Position> = assigned.into_iter().map(|(_, p)| p).collect();
        assert_eq!(
            labels,
            vec![
                Position::Btn,
                Position::Sb,
                Position::Bb,
                Position::Utg,
                Position::Utg1,
                Position::Co,
            ]
        );
    }

    #[test]
    #[should_panic]
    fn rejects_out_of_range_size() {
        assign_positions(&[0, 1, 2, 3, 4, 5, 6]);
    }
}
