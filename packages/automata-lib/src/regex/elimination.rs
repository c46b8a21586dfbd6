use itertools::Itertools;
use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::{
    automaton::{FiniteAutomaton, node::StateNode},
    regex::{EMPTY_LANGUAGE, EMPTY_WORD, RegexContext, beautify},
};

impl FiniteAutomaton {
    /// Converts the automaton into an equivalent regular expression by state
    /// elimination. The automaton itself is left untouched.
    ///
    /// The result is not minimal in any sense, only its language is
    /// guaranteed.
    pub fn to_regex(&self) -> String {
        let mut automaton = self.ideal_form();

        let starts = automaton.starts().collect_vec();
        let terminals = automaton.terminals().collect_vec();

        let global_start = automaton.add_state(StateNode::start());
        let global_terminal = automaton.add_state(StateNode::terminal());

        for start in starts {
            automaton.state_mut(start).start = false;
            automaton.add_transition(global_start, start, EMPTY_WORD);
        }
        for terminal in terminals {
            automaton.state_mut(terminal).terminal = false;
            automaton.add_transition(terminal, global_terminal, EMPTY_WORD);
        }

        loop {
            let merged = automaton.merge_parallel_transitions();
            let eliminated = automaton.eliminate_inner_state();

            if !merged && !eliminated {
                break;
            }
        }

        let regex = match automaton.starts().next() {
            Some(start) => automaton
                .ordered_transitions(start)
                .first()
                .map_or(EMPTY_LANGUAGE.to_string(), |(_, label)| label.clone()),
            None => EMPTY_LANGUAGE.to_string(),
        };

        tracing::debug!("eliminated all inner states, regex has length {}", regex.len());

        regex
    }

    /// Outgoing transitions in the order they were added.
    fn ordered_transitions(&self, state: NodeIndex) -> Vec<(NodeIndex, String)> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .sorted_by_key(|edge| edge.id())
            .map(|edge| (edge.target(), edge.weight().as_str().to_string()))
            .collect()
    }

    /// For every state, joins all transitions to the first target that is
    /// reached by more than one transition into a single union transition.
    /// Returns whether anything was merged.
    fn merge_parallel_transitions(&mut self) -> bool {
        let mut merged = false;

        for state in self.graph.node_indices().collect_vec() {
            let transitions = self.ordered_transitions(state);

            let target = transitions
                .iter()
                .map(|(target, _)| *target)
                .find(|target| transitions.iter().filter(|(t, _)| t == target).count() >= 2);

            let Some(target) = target else {
                continue;
            };

            let label = transitions
                .iter()
                .filter(|(t, _)| *t == target)
                .map(|(_, label)| beautify(label, RegexContext::Union))
                .unique()
                .join("+");

            self.remove_transitions_where(|from, to, _| from == state && to == target);
            self.add_transition(state, target, label);
            merged = true;
        }

        merged
    }

    /// Removes the first state that is neither start nor terminal. Every path
    /// through it is replaced by a transition labeled with the concatenation of
    /// the incoming label, the starred loop label and the outgoing label.
    /// Returns whether a state was removed.
    fn eliminate_inner_state(&mut self) -> bool {
        let Some(state) = self
            .graph
            .node_indices()
            .find(|&state| !self.is_start(state) && !self.is_terminal(state))
        else {
            return false;
        };

        let outgoing = self.ordered_transitions(state);

        let loop_label = outgoing
            .iter()
            .filter(|(target, _)| *target == state)
            .map(|(_, label)| beautify(label, RegexContext::Union))
            .unique()
            .join("+");
        let middle = if loop_label.is_empty() || loop_label == EMPTY_WORD {
            String::new()
        } else {
            format!("{}*", beautify(&loop_label, RegexContext::Star))
        };

        let incoming = self
            .graph
            .edges_directed(state, Direction::Incoming)
            .sorted_by_key(|edge| edge.id())
            .filter(|edge| edge.source() != state)
            .map(|edge| (edge.source(), edge.weight().as_str().to_string()))
            .collect_vec();

        for (source, in_label) in &incoming {
            for (target, out_label) in outgoing.iter().filter(|(target, _)| *target != state) {
                let label = concat_through(in_label, &middle, out_label);
                self.add_transition(*source, *target, label);
            }
        }

        self.retain_states(|other| other != state);

        true
    }
}

/// The label of the path `in_label`, then the loop factor `middle`, then
/// `out_label`.
fn concat_through(in_label: &str, middle: &str, out_label: &str) -> String {
    let left = beautify(in_label, RegexContext::Concat);
    let right = beautify(out_label, RegexContext::Concat);

    let label = if left.is_empty() && middle.is_empty() {
        out_label.to_string()
    } else if right.is_empty() && middle.is_empty() {
        in_label.to_string()
    } else {
        format!("{}{}{}", left, middle, right)
    };

    if label.is_empty() {
        EMPTY_WORD.to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_through_drops_empty_word() {
        assert_eq!(concat_through("1", "", "a+b"), "a+b");
        assert_eq!(concat_through("a+b", "", "1"), "a+b");
        assert_eq!(concat_through("1", "", "1"), "1");
    }

    #[test]
    fn test_concat_through_parenthesizes() {
        assert_eq!(concat_through("a+b", "c*", "d"), "(a+b)c*d");
        assert_eq!(concat_through("1", "(ab)*", "1"), "(ab)*");
    }
}
