use automata_lib::{
    automaton::{FiniteAutomaton, image::AutomatonImage, node::StateNode},
    error::AutomatonError,
    validation::same_language::assert_same_language,
};
use petgraph::graph::NodeIndex;

/// Multi letter transitions, an epsilon transition back to a non terminal
/// state and an epsilon self loop.
fn multi_letter_fixture() -> FiniteAutomaton {
    let mut image = AutomatonImage::new("abcd");
    let s0 = image.add_state(true, false);
    let s1 = image.add_state(false, false);
    let s2 = image.add_state(false, true);
    let s3 = image.add_state(false, true);

    image.add_transition(s0, s1, "abcd");
    image.add_transition(s0, s3, "aaa");
    image.add_transition(s1, s1, "bcd");
    image.add_transition(s1, s2, "dab");
    image.add_transition(s2, s1, "");
    image.add_transition(s3, s2, "bcb");
    image.add_transition(s3, s3, "");
    image.add_transition(s3, s3, "bbbbb");

    FiniteAutomaton::from_image(&image).unwrap()
}

/// An epsilon cycle through the start state.
fn epsilon_cycle_fixture() -> FiniteAutomaton {
    let mut image = AutomatonImage::new("ab");
    let s0 = image.add_state(true, true);
    let s1 = image.add_state(false, false);
    let s2 = image.add_state(false, false);

    image.add_transition(s0, s0, "");
    image.add_transition(s0, s0, "");
    image.add_transition(s0, s0, "");
    image.add_transition(s0, s1, "abbaabb");
    image.add_transition(s1, s2, "");
    image.add_transition(s2, s0, "");

    FiniteAutomaton::from_image(&image).unwrap()
}

fn assert_words(automaton: &FiniteAutomaton, words: &[(&str, bool)]) {
    for (word, expected) in words {
        assert_eq!(automaton.accepts(word).unwrap(), *expected, "word {:?}", word);
    }
}

#[test]
fn test_one_letter_form_multi_letter() {
    let automaton = multi_letter_fixture().one_letter_form();

    assert!(automaton.is_one_letter());
    assert_words(
        &automaton,
        &[
            ("abcd", false),
            ("abcdbcddab", true),
            ("abcdbcddabbcdbcddab", true),
            ("aaa", true),
            ("aaabcbbcdbcddab", true),
            ("aaaaaa", false),
            ("aabbbbb", false),
            ("aaabbbbbbcbdabbcdbcddab", true),
        ],
    );
}

#[test]
fn test_one_letter_form_epsilon_cycle() {
    let automaton = epsilon_cycle_fixture().one_letter_form();

    assert!(automaton.is_one_letter());
    assert_words(
        &automaton,
        &[
            ("", true),
            ("a", false),
            ("abb", false),
            ("abbaabb", true),
            ("abbaabbabbaabb", true),
            ("abbabb", false),
        ],
    );
}

#[test]
fn test_set_semantics_of_transitions() {
    let automaton = epsilon_cycle_fixture();

    // the three epsilon self loops collapse into one
    assert_eq!(automaton.transition_count(), 4);
}

#[test]
fn test_accepts_requires_one_letter_form() {
    let automaton = multi_letter_fixture();

    assert!(!automaton.is_one_letter());
    assert!(matches!(
        automaton.accepts("aaa"),
        Err(AutomatonError::NonOneLetterTransition(_))
    ));
}

#[test]
fn test_remove_multi_letter_transitions() {
    let mut automaton = multi_letter_fixture();
    automaton.remove_multi_letter_transitions();

    // abcd, aaa, bcd, dab, bcb and bbbbb need 3 + 2 + 2 + 2 + 2 + 4 new states
    assert_eq!(automaton.state_count(), 4 + 15);
    assert!(
        automaton
            .graph
            .edge_weights()
            .all(|label| label.len() <= 1)
    );
    // the epsilon transitions are untouched
    assert_eq!(
        automaton
            .graph
            .edge_weights()
            .filter(|label| label.is_epsilon())
            .count(),
        2
    );
}

#[test]
fn test_epsilon_closure() {
    let automaton = epsilon_cycle_fixture();

    let mut closure = automaton.epsilon_closure(NodeIndex::new(1));
    closure.sort();
    assert_eq!(closure, vec![NodeIndex::new(0), NodeIndex::new(2)]);

    // a state is not part of its own closure, even on an epsilon self loop
    assert!(automaton.epsilon_closure(NodeIndex::new(0)).is_empty());
}

#[test]
fn test_remove_unreachable_and_dead_states() {
    let mut automaton = FiniteAutomaton::new("ab".chars());
    let start = automaton.add_state(StateNode::start());
    let dead = automaton.add_state(StateNode::inner());
    let unreachable = automaton.add_state(StateNode::terminal());
    let terminal = automaton.add_state(StateNode::terminal());

    automaton.add_transition(start, dead, 'a');
    automaton.add_transition(start, terminal, 'b');
    automaton.add_transition(unreachable, terminal, 'a');
    automaton.add_transition(terminal, terminal, 'a');

    let trimmed = automaton.without_unreachable_and_dead_states();

    assert_eq!(trimmed.state_count(), 2);
    // the surviving states keep their order
    assert!(trimmed.is_start(NodeIndex::new(0)));
    assert!(trimmed.is_terminal(NodeIndex::new(1)));
    assert_eq!(trimmed.transition_count(), 2);
    assert_same_language(&automaton, &trimmed, 5);
}

#[test]
fn test_remove_unreachable_and_dead_states_keeps_nothing_without_terminals() {
    let mut automaton = FiniteAutomaton::new("ab".chars());
    let start = automaton.add_state(StateNode::start());
    let other = automaton.add_state(StateNode::inner());
    automaton.add_transition(start, other, 'a');

    automaton.remove_unreachable_and_dead_states();

    assert_eq!(automaton.state_count(), 0);
    assert!(!automaton.accepts("a").unwrap());
}

#[test]
fn test_inverted() {
    let automaton = multi_letter_fixture();
    let inverted = automaton.inverted();

    assert_eq!(inverted.state_count(), automaton.state_count());
    assert_eq!(inverted.transition_count(), automaton.transition_count());

    for (state, data) in automaton.states() {
        assert_eq!(inverted.state(state).start, data.terminal);
        assert_eq!(inverted.state(state).terminal, data.start);
    }

    for (from, to, label) in automaton.all_transitions() {
        assert!(inverted.get_transition(to, from, label).is_some());
    }
}

#[test]
fn test_one_letter_form_keeps_one_letter_automata() {
    let mut automaton = FiniteAutomaton::new("ab".chars());
    let start = automaton.add_state(StateNode::start());
    let terminal = automaton.add_state(StateNode::terminal());
    automaton.add_transition(start, terminal, 'a');
    automaton.add_transition(terminal, start, 'b');

    let normalized = automaton.one_letter_form();

    assert_eq!(normalized.state_count(), 2);
    assert_eq!(normalized.transition_count(), 2);
    assert_same_language(&automaton, &normalized, 6);
}
