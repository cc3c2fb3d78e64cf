//! # Transition Tables
//!
//! Two lookup tables over the same six states, used for different jobs.
//!
//! ## Screening (coarse reachability)
//!
//! | state  | successors checked       |
//! |--------|--------------------------|
//! | START1 | MID1, FINAL1             |
//! | START2 | MID1, FINAL2             |
//! | MID1   | MID2, FINAL1, FINAL2     |
//! | MID2   | MID1, FINAL1, FINAL2     |
//! | FINAL* | —                        |
//!
//! A buffer is worth reconciling only if some present state has one of its
//! screening successors present too.
//!
//! ## Legality (strict single step)
//!
//! | from          | legal to               |
//! |---------------|------------------------|
//! | START1/START2 | MID1, FINAL1, FINAL2   |
//! | MID1          | MID2, FINAL1, FINAL2   |
//! | MID2          | MID1, FINAL1, FINAL2   |
//! | FINAL*        | — (terminal)           |
//!
//! Building a valid run accepts an entry only if the step from the current
//! tail is legal.
//!
//! The screening table is a strict subset of the legality table. Keep them
//! separate: unifying them changes which buffers fall back to final-only
//! draining.

use crate::state::State;

/// Successors checked by the reachability screen for `state`.
pub fn screening_successors(state: State) -> &'static [State] {
    match state {
        State::Start1 => &[State::Mid1, State::Final1],
        State::Start2 => &[State::Mid1, State::Final2],
        State::Mid1 => &[State::Mid2, State::Final1, State::Final2],
        State::Mid2 => &[State::Mid1, State::Final1, State::Final2],
        State::Final1 | State::Final2 => &[],
    }
}

/// States that may legally follow `from` in a valid run.
pub fn legal_successors(from: State) -> &'static [State] {
    match from {
        State::Start1 | State::Start2 => &[State::Mid1, State::Final1, State::Final2],
        State::Mid1 => &[State::Mid2, State::Final1, State::Final2],
        State::Mid2 => &[State::Mid1, State::Final1, State::Final2],
        State::Final1 | State::Final2 => &[],
    }
}

/// Whether `from → to` is a legal single step.
pub fn is_legal(from: State, to: State) -> bool {
    legal_successors(from).contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use State::*;

    #[test]
    fn test_tables_diverge_on_start_to_opposite_final() {
        assert!(is_legal(Start1, Final2));
        assert!(!screening_successors(Start1).contains(&Final2));
        assert!(is_legal(Start2, Final1));
        assert!(!screening_successors(Start2).contains(&Final1));
    }

    #[test]
    fn test_finals_are_terminal() {
        for to in State::ALL {
            assert!(!is_legal(Final1, to));
            assert!(!is_legal(Final2, to));
        }
        assert!(screening_successors(Final1).is_empty());
        assert!(screening_successors(Final2).is_empty());
    }

    #[test]
    fn test_no_state_reaches_a_start() {
        for from in State::ALL {
            assert!(!is_legal(from, Start1));
            assert!(!is_legal(from, Start2));
        }
    }

    #[test]
    fn test_mid_states_interleave_but_do_not_self_loop() {
        assert!(is_legal(Mid1, Mid2));
        assert!(is_legal(Mid2, Mid1));
        assert!(!is_legal(Mid1, Mid1));
        assert!(!is_legal(Mid2, Mid2));
    }

    #[test]
    fn test_start_cannot_reach_mid2_directly() {
        assert!(!is_legal(Start1, Mid2));
        assert!(!is_legal(Start2, Mid2));
    }

    fn any_state() -> impl Strategy<Value = State> {
        proptest::sample::select(State::ALL.to_vec())
    }

    proptest! {
        /// Every screening successor is also a legal successor.
        #[test]
        fn screening_is_subset_of_legality(from in any_state(), to in any_state()) {
            if screening_successors(from).contains(&to) {
                prop_assert!(is_legal(from, to));
            }
        }

        /// Legal steps never lower the sort priority below the mid band.
        #[test]
        fn legal_steps_never_move_backwards(from in any_state(), to in any_state()) {
            if is_legal(from, to) {
                prop_assert!(to.priority() >= from.priority().min(2));
            }
        }
    }
}
