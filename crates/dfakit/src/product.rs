use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    dfa::{Dfa, State, StateId, StateIdx},
    DfaError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Union,
    Intersection,
}

impl Operation {
    // acceptance of a product state from the acceptance of its two halves
    pub fn combine(self, a: bool, b: bool) -> bool {
        match self {
            Operation::Union => a || b,
            Operation::Intersection => a && b,
        }
    }
}

impl FromStr for Operation {
    type Err = DfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(Operation::Union),
            "intersection" => Ok(Operation::Intersection),
            other => Err(DfaError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Union => write!(f, "union"),
            Operation::Intersection => write!(f, "intersection"),
        }
    }
}

impl Dfa {
    /// Cross-product automaton of `a` and `b`, running both in lockstep.
    ///
    /// The result has exactly `|Q_a| * |Q_b|` states; states that can't be
    /// reached from the start pair are kept (see [`Dfa::prune_unreachable`]).
    /// The state for `(a_i, b_j)` sits at index `i * |Q_b| + j`.
    pub fn product(a: &Dfa, b: &Dfa, operation: Operation) -> Result<Dfa, DfaError> {
        if a.alphabet != b.alphabet {
            return Err(DfaError::AlphabetMismatch {
                left: a.alphabet.symbols().to_vec(),
                right: b.alphabet.symbols().to_vec(),
            });
        }

        // b's alphabet may list the same symbols in a different order
        let b_positions: Vec<usize> = a
            .alphabet
            .iter()
            .map(|x| b.alphabet.position(x).expect("alphabets are set-equal"))
            .collect();

        let width = b.states.len();
        let pair_idx = |p: StateIdx, q: StateIdx| StateIdx::new(p.index() * width + q.index());

        let mut states: Vec<State> = Vec::with_capacity(a.states.len() * width);
        for (i, p) in a.states.iter().enumerate() {
            let i = StateIdx::new(i);
            for (j, q) in b.states.iter().enumerate() {
                let j = StateIdx::new(j);
                let transitions = b_positions
                    .iter()
                    .enumerate()
                    .map(|(k, b_k)| pair_idx(a.next(i, k), b.next(j, *b_k)))
                    .collect();

                states.push(State {
                    id: StateId::pair(p.id.clone(), q.id.clone()),
                    accepting: operation.combine(p.accepting, q.accepting),
                    transitions,
                });
            }
        }

        debug!(
            "{} of {} x {} states -> {} states",
            operation,
            a.states.len(),
            b.states.len(),
            states.len()
        );

        let initial_state = pair_idx(a.initial_state, b.initial_state);
        Ok(Dfa::from_parts(a.alphabet.clone(), states, initial_state))
    }

    pub fn union(a: &Dfa, b: &Dfa) -> Result<Dfa, DfaError> {
        Self::product(a, b, Operation::Union)
    }

    pub fn intersection(a: &Dfa, b: &Dfa) -> Result<Dfa, DfaError> {
        Self::product(a, b, Operation::Intersection)
    }
}
