use std::collections::VecDeque;

use bit_set::BitSet;
use dfakit_util::DisjointSet;
use log::{debug, trace};

use crate::dfa::{Dfa, State, StateId, StateIdx};

// distinguishable pairs, stored over the strict lower triangle (p > q)
struct PairTable {
    marked: BitSet,
}

impl PairTable {
    fn new(n: usize) -> Self {
        PairTable {
            marked: BitSet::with_capacity(n * n.saturating_sub(1) / 2),
        }
    }

    fn slot(p: usize, q: usize) -> usize {
        let (p, q) = if p > q { (p, q) } else { (q, p) };
        p * (p - 1) / 2 + q
    }

    fn is_marked(&self, p: usize, q: usize) -> bool {
        p != q && self.marked.contains(Self::slot(p, q))
    }

    fn mark(&mut self, p: usize, q: usize) {
        debug_assert_ne!(p, q);
        self.marked.insert(Self::slot(p, q));
    }
}

impl Dfa {
    // table filling: mark pairs split by acceptance, then propagate backwards
    // through the transitions until a full scan marks nothing new
    fn distinguishable_pairs(dfa: &Dfa) -> PairTable {
        let n = dfa.states.len();
        let mut table = PairTable::new(n);

        for p in 1..n {
            for q in 0..p {
                if dfa.states[p].accepting != dfa.states[q].accepting {
                    table.mark(p, q);
                }
            }
        }

        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut changed = false;
            for p in 1..n {
                for q in 0..p {
                    if table.is_marked(p, q) {
                        continue;
                    }

                    let (sp, sq) = (&dfa.states[p], &dfa.states[q]);
                    let split = sp
                        .transitions
                        .iter()
                        .zip(&sq.transitions)
                        .position(|(a, b)| table.is_marked(a.index(), b.index()));

                    if let Some(position) = split {
                        trace!(
                            "{} and {} are distinguished by `{}`",
                            sp.id,
                            sq.id,
                            dfa.alphabet.symbols()[position]
                        );
                        table.mark(p, q);
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        debug!("table filling over {} states reached fixpoint after {} rounds", n, rounds);
        table
    }

    /// Minimal automaton recognizing the same language as `dfa`.
    ///
    /// Each state of the result is one Myhill-Nerode equivalence class of
    /// `dfa`. Unreachable states are not pruned here: a class made only of
    /// unreachable states survives. Run [`Dfa::prune_unreachable`] first if
    /// that matters.
    pub fn minimize(dfa: &Dfa) -> Dfa {
        let n = dfa.states.len();
        let table = Self::distinguishable_pairs(dfa);

        let mut classes = DisjointSet::new(n);
        for p in 1..n {
            for q in 0..p {
                if !table.is_marked(p, q) {
                    classes.union(p, q);
                }
            }
        }

        // number classes by the position of their first member
        let mut class_number: Vec<Option<usize>> = vec![None; n];
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut class_of: Vec<StateIdx> = Vec::with_capacity(n);
        for s in 0..n {
            let repr = classes.find(s);
            let number = *class_number[repr].get_or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            members[number].push(s);
            class_of.push(StateIdx::new(number));
        }

        // equivalent states step to equivalent states, so any member will do
        let states: Vec<State> = members
            .iter()
            .map(|class| {
                let representative = &dfa.states[class[0]];
                State {
                    id: StateId::class(class.iter().map(|x| dfa.states[*x].id.clone()).collect()),
                    accepting: representative.accepting,
                    transitions: representative
                        .transitions
                        .iter()
                        .map(|x| class_of[x.index()])
                        .collect(),
                }
            })
            .collect();

        debug!("minimized {} states to {} states", n, states.len());

        let initial_state = class_of[dfa.initial_state.index()];
        Dfa::from_parts(dfa.alphabet.clone(), states, initial_state)
    }

    // basic BFS from the start state
    pub fn reachable(dfa: &Dfa) -> BitSet {
        let mut visited = BitSet::with_capacity(dfa.states.len());
        let mut queue: VecDeque<StateIdx> = VecDeque::new();
        visited.insert(dfa.initial_state.index());
        queue.push_back(dfa.initial_state);

        while let Some(state) = queue.pop_front() {
            for next in &dfa.states[state].transitions {
                if visited.insert(next.index()) {
                    queue.push_back(*next);
                }
            }
        }

        visited
    }

    /// Copy of `dfa` without the states that can't be reached from its start
    /// state. State identities are kept.
    pub fn prune_unreachable(dfa: &Dfa) -> Dfa {
        let reachable = Self::reachable(dfa);

        let mut renumbered: Vec<Option<StateIdx>> = vec![None; dfa.states.len()];
        for (new, old) in reachable.iter().enumerate() {
            renumbered[old] = Some(StateIdx::new(new));
        }
        let renumber = |x: &StateIdx| {
            renumbered[x.index()].expect("successor of a reachable state is reachable")
        };

        let states: Vec<State> = reachable
            .iter()
            .map(|old| {
                let state = &dfa.states[old];
                State {
                    id: state.id.clone(),
                    accepting: state.accepting,
                    transitions: state.transitions.iter().map(renumber).collect(),
                }
            })
            .collect();

        debug!("pruned {} unreachable states", dfa.states.len() - states.len());

        let initial_state = renumber(&dfa.initial_state);
        Dfa::from_parts(dfa.alphabet.clone(), states, initial_state)
    }
}
