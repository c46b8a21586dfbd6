use automata_lib::{
    automaton::FiniteAutomaton,
    error::AutomatonError,
    regex::compiler::{compile, compile_raw},
    validation::same_language::assert_same_language,
};

const ABC: [char; 3] = ['a', 'b', 'c'];

fn assert_words(automaton: &FiniteAutomaton, words: &[(&str, bool)]) {
    for (word, expected) in words {
        assert_eq!(
            automaton.accepts(word).unwrap(),
            *expected,
            "word {:?} should be {}",
            word,
            if *expected { "accepted" } else { "rejected" }
        );
    }
}

#[test]
fn test_compile_union_of_stars() {
    let automaton = compile("a(bc)*+b*+c", &ABC).unwrap();

    assert_words(
        &automaton,
        &[
            ("abcbcbcbc", true),
            ("a", true),
            ("bbbbbbbbbbbbb", true),
            ("bc", false),
            ("c", true),
            ("cc", false),
            ("ab", false),
        ],
    );
}

#[test]
fn test_compile_nested_groups() {
    let automaton = compile("(ab)*a*+((a+b)(a+b))*", &['a', 'b']).unwrap();

    assert_words(
        &automaton,
        &[
            ("abababab", true),
            ("aaaaa", true),
            ("bbbbb", false),
            ("bbbbbb", true),
            ("abaabab", false),
            ("abbbabaaba", true),
            ("abababaaaa", true),
            ("", true),
        ],
    );
}

#[test]
fn test_compile_precedence() {
    let automaton = compile("ab*", &ABC).unwrap();
    assert_words(&automaton, &[("a", true), ("abbb", true), ("abab", false)]);

    let automaton = compile("a+bc", &ABC).unwrap();
    assert_words(&automaton, &[("a", true), ("bc", true), ("ac", false)]);
}

#[test]
fn test_compile_constants() {
    let empty = compile("0", &ABC).unwrap();
    assert_eq!(empty.state_count(), 0);
    assert_words(&empty, &[("", false), ("a", false)]);

    let epsilon = compile("1", &ABC).unwrap();
    assert_eq!(epsilon.state_count(), 1);
    assert_eq!(epsilon.transition_count(), 0);
    assert_words(&epsilon, &[("", true), ("a", false)]);

    let raw = compile_raw("0", &ABC).unwrap();
    assert_eq!(raw.state_count(), 0);
}

#[test]
fn test_compile_symbol() {
    let raw = compile_raw("b", &ABC).unwrap();
    assert_eq!(raw.state_count(), 2);
    assert_eq!(raw.transition_count(), 1);
    assert_eq!(raw.starts().count(), 1);
    assert_eq!(raw.terminals().count(), 1);
}

#[test]
fn test_compile_raw_has_epsilon_transitions() {
    let raw = compile_raw("a*b", &ABC).unwrap();

    assert!(raw.graph.edge_weights().any(|label| label.is_epsilon()));
    assert_eq!(
        raw.accepts("ab"),
        Err(AutomatonError::NonOneLetterTransition(String::new()))
    );

    assert_words(&raw.one_letter_form(), &[("b", true), ("aab", true), ("ba", false)]);
}

#[test]
fn test_compile_collapses_stars() {
    let single = compile("(ab)*", &ABC).unwrap();
    let repeated = compile("(ab)***", &ABC).unwrap();

    assert_same_language(&single, &repeated, 6);
    assert_eq!(single.state_count(), repeated.state_count());
}

#[test]
fn test_compile_star_of_constants() {
    assert_words(&compile("0*", &ABC).unwrap(), &[("", true), ("a", false)]);
    assert_words(&compile("1*", &ABC).unwrap(), &[("", true), ("a", false)]);
}

#[test]
fn test_compile_is_minimal_dfa() {
    let automaton = compile("(a+b)*", &['a', 'b']).unwrap();
    assert_eq!(automaton.state_count(), 1);
    assert!(automaton.is_deterministic());

    let automaton = compile("a(bc)*", &ABC).unwrap();
    assert_eq!(automaton.state_count(), 3);
}

#[test]
fn test_from_regex_matches_compile() {
    let a = FiniteAutomaton::from_regex("(a+c)*b", &ABC).unwrap();
    let b = compile("(a+c)*b", &ABC).unwrap();

    assert_eq!(a.state_count(), b.state_count());
    assert_same_language(&a, &b, 5);
}

#[test]
fn test_compile_errors() {
    for expression in ["", "a+", "+a", "()", "(a", "a)", ")a(", "*a", "a+*b", "d", "a(b+)"] {
        assert!(
            matches!(compile(expression, &ABC), Err(AutomatonError::BadRegExp(_))),
            "{:?} should not compile",
            expression
        );
    }
}

#[test]
fn test_compile_error_holds_expression() {
    assert_eq!(
        compile_raw("ab+x", &ABC).unwrap_err(),
        AutomatonError::BadRegExp("ab+x".to_string())
    );
}

#[test]
fn test_compile_long_concatenation() {
    let expression = "ab".repeat(50_000);
    let raw = compile_raw(&expression, &['a', 'b']).unwrap();

    assert_eq!(raw.state_count(), 200_000);
    assert_eq!(raw.transition_count(), 100_000 + 99_999);
    assert_eq!(raw.starts().count(), 1);
    assert_eq!(raw.terminals().count(), 1);
}

#[test]
fn test_compile_long_union() {
    let expression = "a+".repeat(50_000) + "a";
    let raw = compile_raw(&expression, &['a']).unwrap();

    assert_eq!(raw.state_count(), 1 + 2 * 50_001);
    assert_eq!(raw.transition_count(), 2 * 50_001);
    assert_eq!(raw.starts().count(), 1);
    assert_eq!(raw.terminals().count(), 50_001);
}

#[test]
fn test_long_expression_keeps_language() {
    let expression = "ab".repeat(5_000) + "(c+a)*";
    let automaton = compile_raw(&expression, &ABC).unwrap().one_letter_form();

    let word = "ab".repeat(5_000);
    let extended = word.clone() + "acca";
    let trailing = word.clone() + "b";
    assert_words(
        &automaton,
        &[
            (word.as_str(), true),
            (extended.as_str(), true),
            (trailing.as_str(), false),
            (&word[1..], false),
        ],
    );
}
