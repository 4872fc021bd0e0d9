use dfakit::{Dfa, DfaError, Operation, StateId};

const CONTAINS_01: &str = include_str!("data/contains_01.json");
const CONTAINS_10: &str = include_str!("data/contains_10.json");
const ODD_ONES: &str = include_str!("data/odd_ones.json");
const TERNARY: &str = include_str!("data/ternary.json");

fn load(source: &str) -> Dfa {
    Dfa::from_json_str(source).expect("fixture should be valid")
}

fn all_strings(alphabet: &[&str], max_len: usize) -> Vec<String> {
    let mut result = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let next: Vec<String> = frontier
            .iter()
            .flat_map(|prefix| alphabet.iter().map(move |x| format!("{}{}", prefix, x)))
            .collect();
        result.extend(next.iter().cloned());
        frontier = next;
    }
    result
}

fn run_vectors(tests: &[(&str, bool)], dfa: &Dfa, name: &str) {
    for (test, expected_result) in tests {
        let result = dfa.accepts(test);
        assert_eq!(
            result, *expected_result,
            "'{}' failed on input '{}', expect match: {}, actual match: {}",
            name, test, expected_result, result
        );
    }
}

fn pair(a: &str, b: &str) -> StateId {
    StateId::pair(a.into(), b.into())
}

#[test]
fn union_of_substring_automata() {
    let a = load(CONTAINS_01);
    let b = load(CONTAINS_10);
    let union = Dfa::product(&a, &b, Operation::Union).unwrap();

    let test_vectors = vec![
        ("1001", true),
        ("0000", false),
        ("1111", false),
        ("01", true),
        ("10", true),
        ("", false),
    ];
    run_vectors(&test_vectors, &union, "contains 01 or 10");
}

#[test]
fn intersection_of_substring_automata() {
    let a = load(CONTAINS_01);
    let b = load(CONTAINS_10);
    let intersection = Dfa::product(&a, &b, Operation::Intersection).unwrap();

    let contains_both = |x: &str| x.contains("01") && x.contains("10");
    for input in ["1001", "0101", "0011", "1100", "0000", "010"] {
        assert_eq!(
            intersection.accepts(input),
            contains_both(input),
            "input '{}'",
            input
        );
    }

    assert!(intersection.accepts("1001"));
    assert!(!intersection.accepts("0011"));
}

#[test]
fn product_matches_definition() {
    let a = load(CONTAINS_01);
    let b = load(CONTAINS_10);
    let union = Dfa::union(&a, &b).unwrap();
    let intersection = Dfa::intersection(&a, &b).unwrap();

    for input in all_strings(&["0", "1"], 10) {
        let (in_a, in_b) = (a.accepts(&input), b.accepts(&input));
        assert_eq!(union.accepts(&input), in_a || in_b, "union on '{}'", input);
        assert_eq!(intersection.accepts(&input), in_a && in_b, "intersection on '{}'", input);
    }
}

#[test]
fn product_is_commutative() {
    let a = load(CONTAINS_01);
    let b = load(ODD_ONES);

    for operation in [Operation::Union, Operation::Intersection] {
        let ab = Dfa::product(&a, &b, operation).unwrap();
        let ba = Dfa::product(&b, &a, operation).unwrap();
        for input in all_strings(&["0", "1"], 9) {
            assert_eq!(ab.accepts(&input), ba.accepts(&input), "{} on '{}'", operation, input);
        }
    }
}

#[test]
fn product_shape() {
    let a = load(CONTAINS_01);
    let b = load(CONTAINS_10);
    let union = Dfa::union(&a, &b).unwrap();

    // full cross product, nothing pruned
    assert_eq!(union.num_states(), 9);
    assert_eq!(union.start().id(), &pair("a", "p"));
    assert_eq!(union.alphabet(), a.alphabet());
    assert_eq!(union.alphabet().symbols(), a.alphabet().symbols());

    for state in union.states() {
        for symbol in union.alphabet().iter() {
            assert!(union.successor(state, symbol).is_some());
        }
    }

    // b lists its alphabet as ["1", "0"]; lockstep must still line up by symbol
    let start = union.start();
    assert_eq!(union.successor(start, "0").unwrap().id(), &pair("b", "p"));
    assert_eq!(union.successor(start, "1").unwrap().id(), &pair("a", "q"));

    let both = union.state(&pair("c", "r")).unwrap();
    assert!(both.is_accepting());
    let neither = union.state(&pair("b", "q")).unwrap();
    assert!(!neither.is_accepting());
    let one = union.state(&pair("c", "p")).unwrap();
    assert!(one.is_accepting());

    let intersection = Dfa::intersection(&a, &b).unwrap();
    assert!(!intersection.state(&pair("c", "p")).unwrap().is_accepting());
    assert!(intersection.state(&pair("c", "r")).unwrap().is_accepting());
}

#[test]
fn composite_names_do_not_collide() {
    // concatenating names would turn both (ab, c) and (a, bc) into "abc"
    let left = Dfa::from_json_str(
        r#"{
            "alphabet": ["x"],
            "states": ["a", "ab"],
            "startState": "a",
            "acceptStates": ["ab"],
            "transitions": { "a": { "x": "ab" }, "ab": { "x": "a" } }
        }"#,
    )
    .unwrap();
    let right = Dfa::from_json_str(
        r#"{
            "alphabet": ["x"],
            "states": ["c", "bc"],
            "startState": "c",
            "acceptStates": ["c"],
            "transitions": { "c": { "x": "bc" }, "bc": { "x": "c" } }
        }"#,
    )
    .unwrap();

    let product = Dfa::intersection(&left, &right).unwrap();
    assert_eq!(product.num_states(), 4);

    let ab_c = product.state(&pair("ab", "c")).unwrap();
    let a_bc = product.state(&pair("a", "bc")).unwrap();
    assert_ne!(ab_c.id(), a_bc.id());
    assert!(ab_c.is_accepting());
    assert!(!a_bc.is_accepting());

    let definition = product.to_definition();
    assert!(definition.states.contains(&"(ab, c)".to_string()));
    assert!(definition.states.contains(&"(a, bc)".to_string()));
}

#[test]
fn persisted_names_stay_distinct() {
    // (a, "b, c") and ("a, b", c) both display as "(a, b, c)"
    let left = Dfa::from_json_str(
        r#"{
            "alphabet": ["x"],
            "states": ["a", "a, b"],
            "startState": "a",
            "acceptStates": ["a, b"],
            "transitions": { "a": { "x": "a, b" }, "a, b": { "x": "a" } }
        }"#,
    )
    .unwrap();
    let right = Dfa::from_json_str(
        r#"{
            "alphabet": ["x"],
            "states": ["c", "b, c"],
            "startState": "c",
            "acceptStates": ["c"],
            "transitions": { "c": { "x": "b, c" }, "b, c": { "x": "c" } }
        }"#,
    )
    .unwrap();

    let product = Dfa::intersection(&left, &right).unwrap();
    assert_eq!(
        product.state(&pair("a", "b, c")).unwrap().id().to_string(),
        product.state(&pair("a, b", "c")).unwrap().id().to_string()
    );

    let definition = product.to_definition();
    assert_eq!(
        definition.states,
        vec!["(a, c)", "(a, b\\, c)", "(a\\, b, c)", "(a\\, b, b\\, c)"]
    );
    assert_eq!(definition.transitions.len(), 4);
    assert_eq!(definition.start_state, "(a, c)");
    assert_eq!(definition.accept_states, vec!["(a\\, b, c)"]);

    let json = definition.to_json_string().unwrap();
    let reloaded = Dfa::from_json_str(&json).unwrap();
    assert_eq!(reloaded.num_states(), 4);
    for input in all_strings(&["x"], 6) {
        assert_eq!(reloaded.accepts(&input), product.accepts(&input), "input '{}'", input);
    }
}

#[test]
fn alphabet_mismatch_is_refused() {
    let binary = load(ODD_ONES);
    let ternary = load(TERNARY);

    for operation in [Operation::Union, Operation::Intersection] {
        let result = Dfa::product(&binary, &ternary, operation);
        match result {
            Err(DfaError::AlphabetMismatch { left, right }) => {
                assert_eq!(left, vec!["0", "1"]);
                assert_eq!(right, vec!["0", "1", "2"]);
            }
            other => panic!("expected AlphabetMismatch, got {:?}", other.map(|x| x.num_states())),
        }
    }
}

#[test]
fn operation_keywords() {
    assert_eq!("union".parse::<Operation>(), Ok(Operation::Union));
    assert_eq!("intersection".parse::<Operation>(), Ok(Operation::Intersection));
    assert_eq!(
        "xor".parse::<Operation>(),
        Err(DfaError::InvalidOperation("xor".to_string()))
    );
    assert_eq!(Operation::Intersection.to_string(), "intersection");
}

#[test]
fn minimized_product_keeps_language() {
    let a = load(CONTAINS_01);
    let b = load(CONTAINS_10);

    for operation in [Operation::Union, Operation::Intersection] {
        let product = Dfa::product(&a, &b, operation).unwrap();
        let minimized = Dfa::minimize(&product);
        let pruned_first = Dfa::minimize(&Dfa::prune_unreachable(&product));

        assert!(minimized.num_states() <= product.num_states());
        assert_eq!(Dfa::minimize(&minimized).num_states(), minimized.num_states());
        assert!(pruned_first.num_states() <= minimized.num_states());

        for input in all_strings(&["0", "1"], 9) {
            let expected = product.accepts(&input);
            assert_eq!(minimized.accepts(&input), expected, "{} on '{}'", operation, input);
            assert_eq!(pruned_first.accepts(&input), expected, "{} on '{}'", operation, input);
        }
    }
}
