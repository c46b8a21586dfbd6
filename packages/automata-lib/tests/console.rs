use automata_lib::{
    automaton::{FiniteAutomaton, console::ToConsoleFormat, image::AutomatonImage},
    regex::compiler::compile_raw,
};

const MULTI_LETTER: &str = "\
4
8
0
2 3
0 1 abcd
0 3 aaa
1 1 bcd
1 2 dab
2 1 eps
3 2 bcb
3 3 eps
3 3 bbbbb
";

#[test]
fn test_parse_from_console() {
    let automaton = FiniteAutomaton::parse_from_console(MULTI_LETTER).unwrap();

    assert_eq!(automaton.state_count(), 4);
    assert_eq!(automaton.transition_count(), 8);
    assert_eq!(automaton.starts().count(), 1);
    assert_eq!(automaton.terminals().count(), 2);

    let normalized = automaton.one_letter_form();
    assert!(normalized.accepts("aaabcbbcdbcddab").unwrap());
    assert!(!normalized.accepts("aabbbbb").unwrap());
}

#[test]
fn test_to_console_format() {
    let mut image = AutomatonImage::new("ab");
    let s0 = image.add_state(true, false);
    let s1 = image.add_state(false, true);
    image.add_transition(s0, s1, "ab");
    image.add_transition(s1, s0, "");

    assert_eq!(image.to_console_format(), "2\n2\n0\n1\n0 1 ab\n1 0 eps\n");
}

#[test]
fn test_console_round_trip() {
    let automaton = FiniteAutomaton::parse_from_console(MULTI_LETTER).unwrap();

    assert_eq!(automaton.to_console_format(), MULTI_LETTER);
}

#[test]
fn test_console_empty_lines() {
    let automaton = compile_raw("0", &['a']).unwrap();
    let console = automaton.to_console_format();

    assert_eq!(console, "0\n0\n\n\n");
    assert_eq!(
        FiniteAutomaton::parse_from_console(&console)
            .unwrap()
            .state_count(),
        0
    );
}

#[test]
fn test_console_rejects_unknown_states() {
    assert!(FiniteAutomaton::parse_from_console("2\n0\n5\n\n").is_err());
    assert!(FiniteAutomaton::parse_from_console("2\n0\n0\n7\n").is_err());
    assert!(FiniteAutomaton::parse_from_console("2\n1\n0\n1\n4 1 a\n").is_err());
    assert!(FiniteAutomaton::parse_from_console("2\n1\n0\n1\n0 4 a\n").is_err());
}
