use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{FiniteAutomaton, label::Label, node::StateNode},
    error::{AutomatonError, AutomatonResult},
    regex::REGEX_OPERATORS,
};

/// Compiles a regular expression into an NFA with epsilon transitions.
///
/// The grammar has three operators: union `+` binds weakest, then
/// concatenation, then star `*`. Parentheses group, `0` is the empty language,
/// `1` the language of the empty word and every symbol of the alphabet stands
/// for itself.
pub fn compile_raw(expression: &str, alphabet: &[char]) -> AutomatonResult<FiniteAutomaton> {
    validate(expression, alphabet)?;

    let symbols = collapse_stars(expression);
    let compiler = RegexCompiler { alphabet };
    let automaton = compiler.compile(&symbols)?;

    tracing::debug!(
        "compiled {:?} into {} states, {} transitions",
        expression,
        automaton.state_count(),
        automaton.transition_count()
    );

    Ok(automaton)
}

/// Compiles a regular expression into its minimal DFA without unreachable and
/// dead states.
pub fn compile(expression: &str, alphabet: &[char]) -> AutomatonResult<FiniteAutomaton> {
    let mut automaton = compile_raw(expression, alphabet)?;
    automaton.ideal();
    Ok(automaton)
}

impl FiniteAutomaton {
    pub fn from_regex(expression: &str, alphabet: &[char]) -> AutomatonResult<Self> {
        compile(expression, alphabet)
    }

    pub fn from_regex_raw(expression: &str, alphabet: &[char]) -> AutomatonResult<Self> {
        compile_raw(expression, alphabet)
    }
}

fn validate(expression: &str, alphabet: &[char]) -> AutomatonResult<()> {
    if expression.is_empty() {
        return Err(AutomatonError::BadRegExp(expression.to_string()));
    }

    let mut balance = 0i32;

    for symbol in expression.chars() {
        if !alphabet.contains(&symbol) && !REGEX_OPERATORS.contains(symbol) {
            return Err(AutomatonError::BadRegExp(expression.to_string()));
        }

        match symbol {
            '(' => balance += 1,
            ')' => balance -= 1,
            _ => {}
        }

        if balance < 0 {
            return Err(AutomatonError::BadRegExp(expression.to_string()));
        }
    }

    if balance != 0 {
        return Err(AutomatonError::BadRegExp(expression.to_string()));
    }

    Ok(())
}

/// `a**` means the same as `a*`.
fn collapse_stars(expression: &str) -> Vec<char> {
    expression
        .chars()
        .coalesce(|previous, current| {
            if previous == '*' && current == '*' {
                Ok(previous)
            } else {
                Err((previous, current))
            }
        })
        .collect()
}

struct RegexCompiler<'a> {
    alphabet: &'a [char],
}

impl RegexCompiler<'_> {
    fn compile(&self, expression: &[char]) -> AutomatonResult<FiniteAutomaton> {
        tracing::trace!("compiling sub expression {:?}", to_string(expression));

        if expression.is_empty() {
            return Err(AutomatonError::BadRegExp(String::new()));
        }

        if expression.len() == 1 {
            return self.atom(expression[0]);
        }

        let balanced = balanced_positions(expression);
        let Some(&first) = balanced.first() else {
            return Err(AutomatonError::BadRegExp(to_string(expression)));
        };
        let last = expression.len() - 1;

        if first == last {
            return self.compile(&expression[1..last]);
        }

        if first == last - 1 && expression[last] == '*' {
            return Ok(self.star(self.compile(&expression[..last])?));
        }

        let branches = split_branches(expression, &balanced);
        if branches.len() > 1 {
            let branches = branches
                .into_iter()
                .map(|branch| self.compile(branch))
                .collect::<AutomatonResult<Vec<_>>>()?;
            return Ok(self.union(branches));
        }

        let factors = split_factors(expression, &balanced);
        if factors.len() < 2 {
            return Err(AutomatonError::BadRegExp(to_string(expression)));
        }

        let factors = factors
            .into_iter()
            .map(|factor| self.compile(factor))
            .collect::<AutomatonResult<Vec<_>>>()?;
        Ok(self.concat(factors))
    }

    fn atom(&self, symbol: char) -> AutomatonResult<FiniteAutomaton> {
        let mut automaton = self.empty();

        if self.alphabet.contains(&symbol) {
            let start = automaton.add_state(StateNode::start());
            let terminal = automaton.add_state(StateNode::terminal());
            automaton.add_transition(start, terminal, symbol);
        } else if symbol == '1' {
            automaton.add_state(StateNode::new(true, true));
        } else if symbol != '0' {
            return Err(AutomatonError::BadRegExp(symbol.to_string()));
        }

        Ok(automaton)
    }

    fn star(&self, inner: FiniteAutomaton) -> FiniteAutomaton {
        let mut automaton = self.empty();
        let hub = automaton.add_state(StateNode::new(true, true));

        let (starts, terminals) = absorb(&mut automaton, inner);

        for start in starts {
            automaton.state_mut(start).start = false;
            automaton.add_transition(hub, start, Label::epsilon());
        }
        for terminal in terminals {
            automaton.state_mut(terminal).terminal = false;
            automaton.add_transition(terminal, hub, Label::epsilon());
        }

        automaton
    }

    fn union(&self, branches: Vec<FiniteAutomaton>) -> FiniteAutomaton {
        let mut automaton = self.empty();
        let start = automaton.add_state(StateNode::start());

        for branch in branches {
            let (branch_starts, _) = absorb(&mut automaton, branch);

            for branch_start in branch_starts {
                automaton.state_mut(branch_start).start = false;
                // every branch start is fresh, no duplicate check needed
                automaton.graph.add_edge(start, branch_start, Label::epsilon());
            }
        }

        automaton
    }

    fn concat(&self, factors: Vec<FiniteAutomaton>) -> FiniteAutomaton {
        let mut automaton = self.empty();
        let mut tails: Option<Vec<NodeIndex>> = None;

        for factor in factors {
            let (starts, terminals) = absorb(&mut automaton, factor);

            if let Some(tails) = &tails {
                for &terminal in tails {
                    automaton.state_mut(terminal).terminal = false;
                }
                for &start in &starts {
                    automaton.state_mut(start).start = false;
                }

                for &terminal in tails {
                    for &start in &starts {
                        automaton.add_transition(terminal, start, Label::epsilon());
                    }
                }
            }

            tails = Some(terminals);
        }

        automaton
    }

    fn empty(&self) -> FiniteAutomaton {
        FiniteAutomaton::new(self.alphabet.iter().copied())
    }
}

/// Absorbs `other` into `automaton` and returns the start and terminal states
/// of `other` under their new indices.
fn absorb(
    automaton: &mut FiniteAutomaton,
    other: FiniteAutomaton,
) -> (Vec<NodeIndex>, Vec<NodeIndex>) {
    let starts = other.starts().collect_vec();
    let terminals = other.terminals().collect_vec();
    let offset = automaton.absorb(other);

    let shift = |states: Vec<NodeIndex>| {
        states
            .into_iter()
            .map(|state| NodeIndex::new(state.index() + offset))
            .collect_vec()
    };

    (shift(starts), shift(terminals))
}

/// The positions after which every parenthesis opened so far is closed.
fn balanced_positions(expression: &[char]) -> Vec<usize> {
    let mut balance = 0;

    expression
        .iter()
        .enumerate()
        .filter_map(|(i, symbol)| {
            match symbol {
                '(' => balance += 1,
                ')' => balance -= 1,
                _ => {}
            }
            (balance == 0).then_some(i)
        })
        .collect()
}

/// Splits at every `+` outside of parentheses.
fn split_branches<'e>(expression: &'e [char], balanced: &[usize]) -> Vec<&'e [char]> {
    let mut branches = vec![];
    let mut start = 0;

    for &i in balanced {
        if expression[i] == '+' {
            branches.push(&expression[start..i]);
            start = i + 1;
        }
    }

    branches.push(&expression[start..]);
    branches
}

/// Splits a union free expression into its factors: a symbol or a
/// parenthesized group, each with an optional trailing `*`.
fn split_factors<'e>(expression: &'e [char], balanced: &[usize]) -> Vec<&'e [char]> {
    let mut factors = vec![];
    let mut start = 0;

    for &end in balanced {
        if end < start {
            continue;
        }

        let end = if expression.get(end + 1) == Some(&'*') {
            end + 1
        } else {
            end
        };

        factors.push(&expression[start..=end]);
        start = end + 1;
    }

    factors
}

fn to_string(expression: &[char]) -> String {
    expression.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_stars() {
        assert_eq!(to_string(&collapse_stars("a***b*")), "a*b*");
    }

    #[test]
    fn test_balanced_positions() {
        let expression = "(ab)*c".chars().collect_vec();
        assert_eq!(balanced_positions(&expression), vec![3, 4, 5]);
    }

    #[test]
    fn test_split_branches() {
        let expression = "a+(b+c)*+1".chars().collect_vec();
        let branches = split_branches(&expression, &balanced_positions(&expression));

        assert_eq!(
            branches.into_iter().map(to_string).collect_vec(),
            vec!["a", "(b+c)*", "1"]
        );
    }

    #[test]
    fn test_split_factors() {
        let expression = "a*(bc)*c(a)".chars().collect_vec();
        let factors = split_factors(&expression, &balanced_positions(&expression));

        assert_eq!(
            factors.into_iter().map(to_string).collect_vec(),
            vec!["a*", "(bc)*", "c", "(a)"]
        );
    }

    #[test]
    fn test_validate() {
        let alphabet = ['a', 'b'];
        assert!(validate("(a+b)*1", &alphabet).is_ok());
        assert!(validate("", &alphabet).is_err());
        assert!(validate("a+c", &alphabet).is_err());
        assert!(validate("(a", &alphabet).is_err());
        assert!(validate(")a(", &alphabet).is_err());
    }
}
