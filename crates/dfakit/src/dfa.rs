use std::{
    collections::HashMap,
    fmt::{self, Write},
};

use dfakit_util::make_type_idx;

use crate::alphabet::Alphabet;

/// Identity of a state.
///
/// Product and minimized automata keep the identities of the states they were
/// built from, structurally, so `(ab, c)` and `(a, bc)` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateId {
    Named(String),
    Pair(Box<StateId>, Box<StateId>),
    // members are kept sorted
    Class(Vec<StateId>),
}

impl StateId {
    pub fn pair(a: StateId, b: StateId) -> StateId {
        StateId::Pair(Box::new(a), Box::new(b))
    }

    pub fn class(mut members: Vec<StateId>) -> StateId {
        members.sort();
        if members.len() == 1 {
            return members.pop().expect("must be nonempty");
        }
        StateId::Class(members)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        StateId::Named(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        StateId::Named(name)
    }
}

impl StateId {
    /// Like `Display`, but backslashes, brackets and commas inside names are
    /// escaped with a backslash. Distinct ids never render the same way.
    pub fn escaped(&self) -> Escaped<'_> {
        Escaped(self)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, escape: bool) -> fmt::Result {
        match self {
            StateId::Named(name) if escape => {
                for c in name.chars() {
                    if matches!(c, '\\' | '(' | ')' | '{' | '}' | ',') {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                Ok(())
            }
            StateId::Named(name) => write!(f, "{}", name),
            StateId::Pair(a, b) => {
                write!(f, "(")?;
                a.render(f, escape)?;
                write!(f, ", ")?;
                b.render(f, escape)?;
                write!(f, ")")
            }
            StateId::Class(members) => {
                write!(f, "{{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    member.render(f, escape)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

pub struct Escaped<'a>(&'a StateId);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f, true)
    }
}

make_type_idx!(pub(crate) StateIdx, State);

#[derive(Debug, Clone)]
pub struct State {
    pub(crate) id: StateId,
    pub(crate) accepting: bool,
    // one entry per alphabet symbol, in alphabet order
    pub(crate) transitions: Vec<StateIdx>,
}

impl State {
    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

/// A complete deterministic finite automaton.
///
/// Every state has exactly one successor per alphabet symbol, and every
/// successor lives in the same automaton. Once built a `Dfa` is never
/// modified; product construction, minimization and pruning all return new
/// automata.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(crate) alphabet: Alphabet,
    pub(crate) states: Vec<State>,
    pub(crate) initial_state: StateIdx,
    lookup: HashMap<StateId, StateIdx>,
}

impl Dfa {
    // callers guarantee totality, closure and unique ids
    pub(crate) fn from_parts(alphabet: Alphabet, states: Vec<State>, initial_state: StateIdx) -> Dfa {
        debug_assert!(initial_state.index() < states.len());
        debug_assert!(states.iter().all(|x| x.transitions.len() == alphabet.len()));
        debug_assert!(states
            .iter()
            .flat_map(|x| x.transitions.iter())
            .all(|x| x.index() < states.len()));

        let lookup: HashMap<StateId, StateIdx> = states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.id.clone(), StateIdx::new(i)))
            .collect();
        debug_assert_eq!(lookup.len(), states.len(), "state ids must be unique");

        Dfa {
            alphabet,
            states,
            initial_state,
            lookup,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start(&self) -> &State {
        &self.states[self.initial_state]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: &StateId) -> Option<&State> {
        self.lookup.get(id).map(|x| &self.states[*x])
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|x| x.accepting)
    }

    /// Successor of `state` (a state of this automaton) on `symbol`, or `None`
    /// if the symbol is not part of the alphabet.
    pub fn successor(&self, state: &State, symbol: &str) -> Option<&State> {
        let position = self.alphabet.position(symbol)?;
        Some(&self.states[state.transitions[position]])
    }

    pub(crate) fn next(&self, state: StateIdx, position: usize) -> StateIdx {
        self.states[state].transitions[position]
    }

    /// Runs the automaton over `symbols` and returns the state it ends in.
    /// Returns `None` as soon as a symbol outside the alphabet shows up.
    pub fn run<I, S>(&self, symbols: I) -> Option<&State>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.initial_state;
        for symbol in symbols {
            let position = self.alphabet.position(symbol.as_ref())?;
            state = self.next(state, position);
        }

        Some(&self.states[state])
    }

    pub fn accepts_symbols<I, S>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(symbols).is_some_and(State::is_accepting)
    }

    // every char of the input is one symbol
    pub fn accepts(&self, input: &str) -> bool {
        self.accepts_symbols(input.chars().map(String::from))
    }
}
