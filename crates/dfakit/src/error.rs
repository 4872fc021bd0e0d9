use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DfaError {
    #[error("Malformed automaton source: {0}")]
    MalformedSource(String),
    #[error("Missing required field `{0}`")]
    MissingField(String),
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("`{field}` references undeclared state `{state}`")]
    UndeclaredState { field: String, state: String },
    #[error("State `{state}` {}", missing_transition(.symbol))]
    IncompleteTransition {
        state: String,
        symbol: Option<String>,
    },
    #[error("Alphabets differ: {left:?} vs {right:?}")]
    AlphabetMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },
    #[error("Unknown operation `{0}`, accepted operations are `union` or `intersection`")]
    InvalidOperation(String),
}

fn missing_transition(symbol: &Option<String>) -> String {
    match symbol {
        Some(symbol) => format!("has no transition on symbol `{}`", symbol),
        None => "has no transitions defined".to_string(),
    }
}

impl DfaError {
    pub(crate) fn invalid_field<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        DfaError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn undeclared<F: Into<String>, S: Into<String>>(field: F, state: S) -> Self {
        DfaError::UndeclaredState {
            field: field.into(),
            state: state.into(),
        }
    }
}
