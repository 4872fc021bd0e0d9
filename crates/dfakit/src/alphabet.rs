use std::collections::HashMap;

use crate::DfaError;

pub type Symbol = String;

/// The input symbols of an automaton.
///
/// Symbols keep the order they were declared in for display, but two
/// alphabets compare equal whenever they hold the same set of symbols.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    positions: HashMap<Symbol, usize>,
}

impl Alphabet {
    pub fn new<I, S>(symbols: I) -> Result<Alphabet, DfaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(DfaError::invalid_field("alphabet", "alphabet must be non-empty"));
        }

        let mut positions = HashMap::with_capacity(symbols.len());
        for (i, symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol.clone(), i).is_some() {
                return Err(DfaError::invalid_field(
                    "alphabet",
                    format!("symbol `{}` is declared more than once", symbol),
                ));
            }
        }

        Ok(Alphabet { symbols, positions })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    // never true for an alphabet that made it through `new`
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.positions.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.symbols.iter().all(|x| other.contains(x))
    }
}

impl Eq for Alphabet {}
