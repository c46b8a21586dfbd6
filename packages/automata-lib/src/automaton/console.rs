//! In this file, we parse the line oriented console format of automata.
//!
//! The format lists the state count, the transition count, the start states,
//! the terminal states and then one transition per line. The token `eps`
//! stands for the empty label. An example automaton accepting `a(bc)*`:
//! ```text
//! 3
//! 3
//! 0
//! 1
//! 0 1 a
//! 1 2 b
//! 2 1 c
//! ```
//!
//! The start and terminal lines may be empty.
use std::io::{BufRead, Write};

use itertools::Itertools;
use nom::{
    Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{line_ending, multispace0, space0, space1},
    combinator::eof,
    error::ParseError,
    multi::{count, separated_list0},
};

use crate::automaton::{
    DEFAULT_ALPHABET, FiniteAutomaton,
    image::{AutomatonImage, StateImage, TransitionImage},
};

pub const EPSILON_TOKEN: &str = "eps";

fn index<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, usize, E> {
    nom::combinator::map(nom::character::complete::u32, |index| index as usize).parse(input)
}

fn end_of_line<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, (), E> {
    let (input, _) = space0(input)?;
    let (input, _) = alt((line_ending, eof)).parse(input)?;
    Ok((input, ()))
}

// E.g., 4
fn count_line<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, usize, E> {
    let (input, _) = space0(input)?;
    let (input, value) = index(input)?;
    let (input, _) = end_of_line(input)?;
    Ok((input, value))
}

#[test]
fn test_count_line() {
    let (rest, value) = count_line::<nom::error::Error<&str>>("  12 \n3\n").unwrap();
    assert_eq!(value, 12);
    assert_eq!(rest, "3\n");
}

// E.g., 0 2 3
fn index_list_line<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<usize>, E> {
    let (input, _) = space0(input)?;
    let (input, indices) = separated_list0(space1, index).parse(input)?;
    let (input, _) = end_of_line(input)?;
    Ok((input, indices))
}

#[test]
fn test_index_list_line() {
    let (rest, indices) = index_list_line::<nom::error::Error<&str>>("0 2  3 \nx").unwrap();
    assert_eq!(indices, vec![0, 2, 3]);
    assert_eq!(rest, "x");
}

#[test]
fn test_index_list_line_empty() {
    let (rest, indices) = index_list_line::<nom::error::Error<&str>>("\n1\n").unwrap();
    assert!(indices.is_empty());
    assert_eq!(rest, "1\n");
}

fn label<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    let (input, token) = take_while1(|c: char| !c.is_whitespace()).parse(input)?;

    if token == EPSILON_TOKEN {
        Ok((input, ""))
    } else {
        Ok((input, token))
    }
}

// E.g., 0 1 abc
fn transition<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, TransitionSpec<'a>, E> {
    let (input, _) = space0(input)?;
    let (input, from) = index(input)?;
    let (input, _) = space1(input)?;
    let (input, to) = index(input)?;
    let (input, _) = space1(input)?;
    let (input, label) = label(input)?;
    let (input, _) = end_of_line(input)?;

    Ok((input, TransitionSpec { from, to, label }))
}

#[test]
fn test_transition() {
    let (_, transition) = transition::<nom::error::Error<&str>>("3 1 bcb\n").unwrap();
    assert_eq!(transition.from, 3);
    assert_eq!(transition.to, 1);
    assert_eq!(transition.label, "bcb");
}

#[test]
fn test_transition_epsilon() {
    let (rest, transition) = transition::<nom::error::Error<&str>>("2 1 eps").unwrap();
    assert_eq!(transition.from, 2);
    assert_eq!(transition.to, 1);
    assert_eq!(transition.label, "");
    assert_eq!(rest, "");
}

#[test]
fn test_transition_missing_label() {
    assert!(transition::<nom::error::Error<&str>>("2 1\n").is_err());
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSpec<'a> {
    pub from: usize,
    pub to: usize,
    pub label: &'a str,
}

#[derive(Debug, Clone)]
pub struct ConsoleSpec<'a> {
    pub state_count: usize,
    pub starts: Vec<usize>,
    pub terminals: Vec<usize>,
    pub transitions: Vec<TransitionSpec<'a>>,
}

impl<'a> ConsoleSpec<'a> {
    fn p(input: &'a str) -> nom::IResult<&'a str, ConsoleSpec<'a>, nom::error::Error<&'a str>> {
        let (input, _) = multispace0(input)?;
        let (input, state_count) = count_line(input)?;
        let (input, transition_count) = count_line(input)?;
        let (input, starts) = index_list_line(input)?;
        let (input, terminals) = index_list_line(input)?;
        let (input, transitions) = count(transition, transition_count).parse(input)?;
        let (input, _) = multispace0(input)?;

        Ok((
            input,
            ConsoleSpec {
                state_count,
                starts,
                terminals,
                transitions,
            },
        ))
    }

    pub fn parse(input: &'a str) -> anyhow::Result<ConsoleSpec<'a>> {
        match Self::p(input) {
            Ok((rest, _)) if !rest.is_empty() => Err(anyhow::anyhow!(
                "Failed to parse console automaton: unexpected trailing input {:?}",
                rest
            )),
            Ok((_, spec)) => Ok(spec),
            Err(e) => Err(anyhow::anyhow!("Failed to parse console automaton: {}", e)),
        }
    }
}

#[test]
fn test_console_spec_1() {
    let input = "3\n3\n0\n1\n0 1 a\n1 2 b\n2 1 c\n";

    let (_, spec) = ConsoleSpec::p(input).unwrap();
    assert_eq!(spec.state_count, 3);
    assert_eq!(spec.starts, vec![0]);
    assert_eq!(spec.terminals, vec![1]);
    assert_eq!(spec.transitions.len(), 3);
    assert_eq!(spec.transitions[2].label, "c");
}

#[test]
fn test_console_spec_no_terminals() {
    let input = "2\n1\n0 1\n\n0 1 eps";

    let spec = ConsoleSpec::parse(input).unwrap();
    assert_eq!(spec.starts, vec![0, 1]);
    assert!(spec.terminals.is_empty());
    assert_eq!(spec.transitions[0].label, "");
}

#[test]
fn test_console_spec_too_few_transitions() {
    let input = "2\n3\n0\n1\n0 1 a\n";

    assert!(ConsoleSpec::parse(input).is_err());
}

#[test]
fn test_console_spec_trailing_input() {
    let input = "2\n1\n0\n1\n0 1 a\n1 0 b\n";

    assert!(ConsoleSpec::parse(input).is_err());
}

impl TryFrom<ConsoleSpec<'_>> for AutomatonImage {
    type Error = anyhow::Error;

    /// The console format carries no alphabet, the default alphabet is used.
    fn try_from(spec: ConsoleSpec) -> Result<Self, Self::Error> {
        let mut image = AutomatonImage::new(DEFAULT_ALPHABET);
        image.states = vec![StateImage::default(); spec.state_count];

        for start in spec.starts {
            image
                .states
                .get_mut(start)
                .ok_or_else(|| anyhow::anyhow!("Start state {} does not exist", start))?
                .start = true;
        }

        for terminal in spec.terminals {
            image
                .states
                .get_mut(terminal)
                .ok_or_else(|| anyhow::anyhow!("Terminal state {} does not exist", terminal))?
                .terminal = true;
        }

        for transition in spec.transitions {
            image
                .states
                .get_mut(transition.from)
                .ok_or_else(|| {
                    anyhow::anyhow!("Transition source {} does not exist", transition.from)
                })?
                .transitions
                .push(TransitionImage {
                    target: transition.to,
                    string: transition.label.to_string(),
                });
        }

        Ok(image)
    }
}

impl FiniteAutomaton {
    pub fn parse_from_console(console_str: &str) -> anyhow::Result<Self> {
        let spec = ConsoleSpec::parse(console_str)?;
        let image = AutomatonImage::try_from(spec)?;
        Ok(FiniteAutomaton::from_image(&image)?)
    }
}

fn read_line(input: &mut impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow::anyhow!("Unexpected end of input"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The prompts of the interactive mode, in the order the answers are read.
pub const STATE_COUNT_PROMPT: &str = "Enter states number: ";
pub const TRANSITION_COUNT_PROMPT: &str = "Enter transitions number: ";
pub const START_STATES_PROMPT: &str = "Enter list of start states:";
pub const TERMINAL_STATES_PROMPT: &str = "Enter list of terminal states:";
pub const TRANSITIONS_PROMPT: &str = "Enter list of transitions ([from] [to] [letter (eps for empty)]):";

/// Reads an automaton in the console format interactively: every prompt is
/// written to `prompt` before the matching lines are read from `input`.
/// Returns the collected text, ready for [ConsoleSpec::parse].
pub fn read_interactive(mut input: impl BufRead, mut prompt: impl Write) -> anyhow::Result<String> {
    write!(prompt, "{}", STATE_COUNT_PROMPT)?;
    prompt.flush()?;
    let state_count = read_line(&mut input)?;

    write!(prompt, "{}", TRANSITION_COUNT_PROMPT)?;
    prompt.flush()?;
    let transition_count = read_line(&mut input)?;
    let transition_count_value = transition_count
        .trim()
        .parse::<usize>()
        .map_err(|e| anyhow::anyhow!("Invalid transitions number {:?}: {}", transition_count, e))?;

    writeln!(prompt, "{}", START_STATES_PROMPT)?;
    let starts = read_line(&mut input)?;

    writeln!(prompt, "{}", TERMINAL_STATES_PROMPT)?;
    let terminals = read_line(&mut input)?;

    writeln!(prompt, "{}", TRANSITIONS_PROMPT)?;
    let transitions = (0..transition_count_value)
        .map(|_| read_line(&mut input))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok([state_count, transition_count, starts, terminals]
        .into_iter()
        .chain(transitions)
        .map(|line| line + "\n")
        .collect())
}

#[test]
fn test_read_interactive() {
    let answers = "2\n1\n0\n1\n0 1 ab\n";
    let mut prompts = vec![];

    let text = read_interactive(answers.as_bytes(), &mut prompts).unwrap();
    assert_eq!(text, answers);

    let prompts = String::from_utf8(prompts).unwrap();
    assert!(prompts.starts_with(STATE_COUNT_PROMPT));
    assert!(prompts.ends_with(&format!("{}\n", TRANSITIONS_PROMPT)));
}

#[test]
fn test_read_interactive_end_of_input() {
    let answers = "2\n3\n0\n1\n0 1 ab\n";

    assert!(read_interactive(answers.as_bytes(), std::io::sink()).is_err());
}

pub trait ToConsoleFormat {
    fn to_console_format(&self) -> String;
}

impl ToConsoleFormat for AutomatonImage {
    fn to_console_format(&self) -> String {
        let mut console = String::new();

        let transitions = self
            .states
            .iter()
            .enumerate()
            .flat_map(|(from, state)| {
                state
                    .transitions
                    .iter()
                    .map(move |transition| (from, transition))
            })
            .collect_vec();

        console.push_str(&format!("{}\n", self.states.len()));
        console.push_str(&format!("{}\n", transitions.len()));

        let starts = self
            .states
            .iter()
            .positions(|state| state.start)
            .join(" ");
        console.push_str(&starts);
        console.push('\n');

        let terminals = self
            .states
            .iter()
            .positions(|state| state.terminal)
            .join(" ");
        console.push_str(&terminals);
        console.push('\n');

        for (from, transition) in transitions {
            let label = if transition.string.is_empty() {
                EPSILON_TOKEN
            } else {
                transition.string.as_str()
            };

            console.push_str(&format!("{} {} {}\n", from, transition.target, label));
        }

        console
    }
}

impl ToConsoleFormat for FiniteAutomaton {
    fn to_console_format(&self) -> String {
        self.to_image().to_console_format()
    }
}
