// Symmetric difference of two languages, read off already computed products:
// same transition structure as the union, accepting where the union accepts
// but the intersection doesn't. Only meaningful when both records come from
// the same pair of automata.

use std::collections::HashSet;

use dfakit::DfaDefinition;

pub fn xor_definition(union: &DfaDefinition, intersection: &DfaDefinition) -> DfaDefinition {
    let both: HashSet<&str> = intersection.accept_states.iter().map(String::as_str).collect();

    let mut xor = union.clone();
    xor.accept_states.retain(|x| !both.contains(x.as_str()));
    xor
}

#[cfg(test)]
mod tests {
    use dfakit::{Dfa, Operation};

    use super::xor_definition;

    const EVEN_ZEROS: &str = r#"{
        "alphabet": ["0", "1"],
        "states": ["e", "o"],
        "startState": "e",
        "acceptStates": ["e"],
        "transitions": {
            "e": { "0": "o", "1": "e" },
            "o": { "0": "e", "1": "o" }
        }
    }"#;

    const ENDS_IN_ONE: &str = r#"{
        "alphabet": ["0", "1"],
        "states": ["n", "y"],
        "startState": "n",
        "acceptStates": ["y"],
        "transitions": {
            "n": { "0": "n", "1": "y" },
            "y": { "0": "n", "1": "y" }
        }
    }"#;

    #[test]
    fn xor_accepts_exactly_one() {
        let a = Dfa::from_json_str(EVEN_ZEROS).unwrap();
        let b = Dfa::from_json_str(ENDS_IN_ONE).unwrap();
        let union = Dfa::product(&a, &b, Operation::Union).unwrap().to_definition();
        let intersection = Dfa::product(&a, &b, Operation::Intersection)
            .unwrap()
            .to_definition();

        let xor = xor_definition(&union, &intersection);
        assert_eq!(xor.states, union.states);
        assert_eq!(xor.transitions, union.transitions);
        assert_eq!(xor.accept_states.len(), 2);

        let xor = xor.validate().unwrap();
        for input in ["", "1", "0", "01", "001", "00", "10", "0101"] {
            assert_eq!(
                xor.accepts(input),
                a.accepts(input) != b.accepts(input),
                "input '{}'",
                input
            );
        }
    }
}
