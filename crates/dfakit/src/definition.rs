// Persisted form of an automaton, and the checks that turn one into a `Dfa`.
//
// {
//     "alphabet": ["0", "1"],
//     "states": ["q0", "q1"],
//     "startState": "q0",
//     "acceptStates": ["q1"],
//     "transitions": {
//         "q0": { "0": "q0", "1": "q1" },
//         "q1": { "0": "q1", "1": "q0" }
//     }
// }

use std::collections::{BTreeMap, HashMap, HashSet};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use serde_json as json;

use crate::{
    alphabet::Alphabet,
    dfa::{Dfa, State, StateId, StateIdx},
    DfaError,
};

pub type TransitionTable = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DfaDefinition {
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub start_state: String,
    pub accept_states: Vec<String>,
    pub transitions: TransitionTable,
}

const FIELDS: [&str; 5] = ["alphabet", "states", "startState", "acceptStates", "transitions"];

fn field<T: DeserializeOwned>(
    object: &json::Map<String, json::Value>,
    name: &str,
    expected: &str,
) -> Result<T, DfaError> {
    let value = object
        .get(name)
        .ok_or_else(|| DfaError::MissingField(name.to_string()))?;
    T::deserialize(value).map_err(|_| DfaError::invalid_field(name, format!("expected {}", expected)))
}

impl DfaDefinition {
    /// Parses a persisted record. Only the shape of the record is checked
    /// here; see [`DfaDefinition::validate`] for the automaton invariants.
    pub fn from_json_str(source: &str) -> Result<DfaDefinition, DfaError> {
        let value: json::Value =
            json::from_str(source).map_err(|e| DfaError::MalformedSource(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| DfaError::MalformedSource("expected a JSON object".to_string()))?;

        if let Some(missing) = FIELDS.iter().find(|x| !object.contains_key(**x)) {
            return Err(DfaError::MissingField(missing.to_string()));
        }

        Ok(DfaDefinition {
            alphabet: field(object, "alphabet", "a list of symbols")?,
            states: field(object, "states", "a list of state names")?,
            start_state: field(object, "startState", "a state name")?,
            accept_states: field(object, "acceptStates", "a list of state names")?,
            transitions: field(object, "transitions", "a map from state to a map from symbol to state")?,
        })
    }

    pub fn to_json_string(&self) -> Result<String, json::Error> {
        let mut buf = Vec::new();
        let formatter = json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf).expect("serde_json writes valid utf8"))
    }

    /// Checks every invariant a `Dfa` relies on and builds it. The first
    /// violation found is reported; nothing is built unless all checks pass.
    pub fn validate(&self) -> Result<Dfa, DfaError> {
        let alphabet = Alphabet::new(self.alphabet.iter().cloned())?;

        if self.states.is_empty() {
            return Err(DfaError::invalid_field("states", "states must be non-empty"));
        }
        let mut declared: HashMap<&str, StateIdx> = HashMap::with_capacity(self.states.len());
        for (i, name) in self.states.iter().enumerate() {
            if declared.insert(name, StateIdx::new(i)).is_some() {
                return Err(DfaError::invalid_field(
                    "states",
                    format!("state `{}` is declared more than once", name),
                ));
            }
        }

        let initial_state = *declared
            .get(self.start_state.as_str())
            .ok_or_else(|| DfaError::undeclared("startState", &self.start_state))?;

        let mut accepting = vec![false; self.states.len()];
        for name in &self.accept_states {
            let idx = declared
                .get(name.as_str())
                .ok_or_else(|| DfaError::undeclared("acceptStates", name))?;
            accepting[idx.index()] = true;
        }

        let mut states: Vec<State> = Vec::with_capacity(self.states.len());
        for name in &self.states {
            let rules = self
                .transitions
                .get(name)
                .ok_or_else(|| DfaError::IncompleteTransition {
                    state: name.clone(),
                    symbol: None,
                })?;

            let mut transitions: Vec<StateIdx> = Vec::with_capacity(alphabet.len());
            for symbol in alphabet.iter() {
                let target = rules.get(symbol).ok_or_else(|| DfaError::IncompleteTransition {
                    state: name.clone(),
                    symbol: Some(symbol.to_string()),
                })?;
                let target = declared
                    .get(target.as_str())
                    .ok_or_else(|| DfaError::undeclared("transitions", target))?;
                transitions.push(*target);
            }

            if let Some(extra) = rules.keys().find(|x| !alphabet.contains(x.as_str())) {
                return Err(DfaError::invalid_field(
                    "transitions",
                    format!("state `{}` has a transition on `{}`, which is not in the alphabet", name, extra),
                ));
            }

            let idx = declared[name.as_str()];
            states.push(State {
                id: StateId::from(name.as_str()),
                accepting: accepting[idx.index()],
                transitions,
            });
        }

        if let Some(extra) = self.transitions.keys().find(|x| !declared.contains_key(x.as_str())) {
            return Err(DfaError::undeclared("transitions", extra));
        }

        Ok(Dfa::from_parts(alphabet, states, initial_state))
    }
}

impl Dfa {
    pub fn from_definition(definition: &DfaDefinition) -> Result<Dfa, DfaError> {
        definition.validate()
    }

    pub fn from_json_str(source: &str) -> Result<Dfa, DfaError> {
        DfaDefinition::from_json_str(source)?.validate()
    }

    /// Persisted record for this automaton. Structured state identities are
    /// written out through their `Display` form, unless two of them would
    /// render the same, in which case every name is written escaped.
    pub fn to_definition(&self) -> DfaDefinition {
        let mut names: Vec<String> = self.states.iter().map(|x| x.id.to_string()).collect();
        let distinct = names.iter().collect::<HashSet<_>>().len();
        if distinct != names.len() {
            warn!(
                "{} state names collide when rendered, writing escaped names",
                names.len() - distinct
            );
            names = self.states.iter().map(|x| x.id.escaped().to_string()).collect();
        }

        let transitions: TransitionTable = self
            .states
            .iter()
            .zip(&names)
            .map(|(state, name)| {
                let rules = self
                    .alphabet
                    .iter()
                    .zip(&state.transitions)
                    .map(|(symbol, next)| (symbol.to_string(), names[next.index()].clone()))
                    .collect();
                (name.clone(), rules)
            })
            .collect();

        DfaDefinition {
            alphabet: self.alphabet.symbols().to_vec(),
            states: names.clone(),
            start_state: names[self.initial_state.index()].clone(),
            accept_states: self
                .states
                .iter()
                .zip(&names)
                .filter(|(state, _)| state.accepting)
                .map(|(_, name)| name.clone())
                .collect(),
            transitions,
        }
    }
}
