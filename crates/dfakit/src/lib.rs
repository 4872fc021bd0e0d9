pub mod alphabet;
pub mod definition;
mod dfa;
pub mod dot;
mod error;
mod minimize;
mod product;


pub use alphabet::{Alphabet, Symbol};
pub use definition::DfaDefinition;
pub use dfa::{Dfa, Escaped, State, StateId};
pub use error::DfaError;
pub use product::Operation;
