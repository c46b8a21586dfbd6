use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{Alphabet, FiniteAutomaton, node::StateNode};

impl FiniteAutomaton {
    /// Determinizes the automaton with the subset construction.
    /// The automaton is brought into one letter form first, then every set of
    /// states reachable from the set of start states becomes one state of the
    /// result. The empty set becomes a non-accepting sink as soon as it is
    /// reached, so the result is a complete DFA over the alphabet.
    pub fn determinize(&mut self) {
        self.to_one_letter_form();

        let mut dfa = self.empty_like();
        let mut state_map: HashMap<Vec<NodeIndex>, NodeIndex> = HashMap::new();

        let start_set = self.starts().collect_vec();
        let dfa_start = dfa.add_state(StateNode::new(true, self.is_terminal_set(&start_set)));
        state_map.insert(start_set.clone(), dfa_start);

        let mut queue = VecDeque::from([start_set]);

        while let Some(set) = queue.pop_front() {
            let from = state_map[&set];

            for &symbol in self.alphabet() {
                let mut target_set = set
                    .iter()
                    .flat_map(|&state| self.transitions(state))
                    .filter(|(_, label)| label.matches(symbol))
                    .map(|(target, _)| target)
                    .collect_vec();

                target_set.sort();
                target_set.dedup();

                let to = if let Some(&existing) = state_map.get(&target_set) {
                    existing
                } else {
                    let new_state =
                        dfa.add_state(StateNode::new(false, self.is_terminal_set(&target_set)));
                    state_map.insert(target_set.clone(), new_state);
                    queue.push_back(target_set);
                    new_state
                };

                dfa.add_transition(from, to, symbol);
            }
        }

        tracing::debug!(
            "determinized automaton with {} states into {} states",
            self.state_count(),
            dfa.state_count()
        );

        *self = dfa;
    }

    pub fn determinized(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.determinize();
        automaton
    }

    /// Checks if a set of states contains a terminal state.
    pub fn is_terminal_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&state| self.is_terminal(state))
    }

    /// Checks whether the automaton is a complete DFA: exactly one start state
    /// and exactly one transition per state and symbol, no other labels.
    pub fn is_deterministic(&self) -> bool {
        if self.starts().count() != 1 || !self.is_one_letter() {
            return false;
        }

        self.graph.node_indices().all(|state| {
            let symbols = self
                .transitions(state)
                .filter_map(|(_, label)| label.as_symbol())
                .collect_vec();

            symbols.len() == self.alphabet().len()
                && self
                    .alphabet()
                    .iter()
                    .all(|symbol| symbols.contains(symbol))
        })
    }
}
