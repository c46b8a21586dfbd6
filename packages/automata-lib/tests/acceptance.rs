use automata_lib::{
    automaton::{FiniteAutomaton, Language, label::Label, node::StateNode},
    error::AutomatonError,
};

fn ab_star() -> FiniteAutomaton {
    let mut automaton = FiniteAutomaton::new("ab".chars());
    let q0 = automaton.add_state(StateNode::new(true, true));
    let q1 = automaton.add_state(StateNode::inner());
    automaton.add_transition(q0, q1, 'a');
    automaton.add_transition(q1, q0, 'b');
    automaton
}

#[test]
fn test_accepts() {
    let automaton = ab_star();

    assert!(automaton.accepts("").unwrap());
    assert!(automaton.accepts("abab").unwrap());
    assert!(!automaton.accepts("aba").unwrap());
    assert!(!automaton.accepts("ba").unwrap());
}

#[test]
fn test_symbols_outside_alphabet_are_rejected() {
    let automaton = ab_star();

    assert!(!automaton.accepts("abz").unwrap());
    assert!(!automaton.accepts("ä").unwrap());
}

#[test]
fn test_language_trait() {
    let automaton = ab_star();
    let language: &dyn Language = &automaton;

    assert_eq!(language.alphabet(), &['a', 'b']);
    assert_eq!(language.check("ab"), Ok(true));
}

#[test]
fn test_accepts_all() {
    let automaton = ab_star();

    assert_eq!(
        automaton.accepts_all(["ab", "a", ""]).unwrap(),
        vec![true, false, true]
    );
}

#[test]
fn test_multiple_start_states() {
    let mut automaton = FiniteAutomaton::new("ab".chars());
    let q0 = automaton.add_state(StateNode::start());
    let q1 = automaton.add_state(StateNode::start());
    let q2 = automaton.add_state(StateNode::terminal());
    automaton.add_transition(q0, q2, 'a');
    automaton.add_transition(q1, q2, 'b');

    assert!(automaton.accepts("a").unwrap());
    assert!(automaton.accepts("b").unwrap());
    assert!(!automaton.accepts("").unwrap());
}

#[test]
fn test_rejects_non_one_letter_transitions() {
    let mut automaton = ab_star();
    let q2 = automaton.add_state(StateNode::inner());
    automaton.add_transition(q2, q2, "ba");

    // the offending transition is unreachable, the check still fails
    assert_eq!(
        automaton.accepts("ab"),
        Err(AutomatonError::NonOneLetterTransition("ba".to_string()))
    );

    automaton.add_transition(q2, q2, Label::epsilon());
    assert!(automaton.accepts("").is_err());
}
