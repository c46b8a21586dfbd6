use itertools::Itertools;
use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::automaton::{FiniteAutomaton, node::StateNode};

impl FiniteAutomaton {
    /// Brings the automaton into one letter form: afterwards every transition
    /// is labeled with exactly one symbol. The language is unchanged.
    pub fn to_one_letter_form(&mut self) {
        self.remove_multi_letter_transitions();
        self.remove_epsilon_transitions();
    }

    pub fn one_letter_form(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.to_one_letter_form();
        automaton
    }

    /// Replaces every transition with a label of two or more symbols by a
    /// chain of fresh states, one symbol per step.
    pub fn remove_multi_letter_transitions(&mut self) {
        let multi_letter = self
            .all_transitions()
            .filter(|(_, _, label)| label.is_multi_letter())
            .map(|(from, to, label)| (from, to, label.clone()))
            .collect_vec();

        for (from, to, label) in &multi_letter {
            let symbols = label.symbols().collect_vec();
            let Some((last, chain)) = symbols.split_last() else {
                continue;
            };

            let mut previous = *from;
            for symbol in chain {
                let next = self.add_state(StateNode::inner());
                self.add_transition(previous, next, *symbol);
                previous = next;
            }

            self.add_transition(previous, *to, *last);
        }

        self.remove_transitions_where(|_, _, label| label.is_multi_letter());

        tracing::debug!(
            "split {} multi letter transitions, {} states",
            multi_letter.len(),
            self.state_count()
        );
    }

    /// Removes all epsilon transitions. Every state takes over the acceptance
    /// and the labeled transitions of the states in its epsilon closure.
    /// Afterwards unreachable and dead states are removed.
    pub fn remove_epsilon_transitions(&mut self) {
        let mut marks = vec![usize::MAX; self.state_count()];
        let inherited = self
            .graph
            .node_indices()
            .map(|state| {
                let closure = self.epsilon_closure_marked(state, &mut marks);
                let terminal = closure.iter().any(|&other| self.is_terminal(other));
                let transitions = closure
                    .iter()
                    .flat_map(|&other| self.transitions(other))
                    .filter(|(_, label)| !label.is_epsilon())
                    .map(|(target, label)| (target, label.clone()))
                    .collect_vec();

                (state, terminal, transitions)
            })
            .collect_vec();

        for (state, terminal, transitions) in inherited {
            if terminal {
                self.state_mut(state).terminal = true;
            }

            for (target, label) in transitions {
                self.add_transition(state, target, label);
            }
        }

        self.remove_transitions_where(|_, _, label| label.is_epsilon());

        tracing::debug!("removed epsilon transitions");

        self.remove_unreachable_and_dead_states();
    }

    /// The states reachable from `state` through epsilon transitions only,
    /// excluding `state` itself.
    pub fn epsilon_closure(&self, state: NodeIndex) -> Vec<NodeIndex> {
        let mut marks = vec![usize::MAX; self.state_count()];
        self.epsilon_closure_marked(state, &mut marks)
    }

    /// A state counts as visited when its mark is the index of `state`, so
    /// `marks` can be shared between the closures of different states.
    fn epsilon_closure_marked(&self, state: NodeIndex, marks: &mut [usize]) -> Vec<NodeIndex> {
        let mark = state.index();
        let mut closure = vec![];
        let mut stack = vec![state];
        marks[mark] = mark;

        while let Some(current) = stack.pop() {
            for edge in self.graph.edges_directed(current, Direction::Outgoing) {
                let target = edge.target();

                if edge.weight().is_epsilon() && marks[target.index()] != mark {
                    marks[target.index()] = mark;
                    closure.push(target);
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// Removes every state that is not reachable from a start state and every
    /// state from which no terminal state is reachable.
    pub fn remove_unreachable_and_dead_states(&mut self) {
        let before = self.state_count();

        let reachable = self.reachable_from_starts();
        self.retain_states(|state| reachable[state.index()]);

        let productive = self.inverted().reachable_from_starts();
        self.retain_states(|state| productive[state.index()]);

        tracing::debug!(
            "removed {} unreachable or dead states, {} remain",
            before - self.state_count(),
            self.state_count()
        );
    }

    pub fn without_unreachable_and_dead_states(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.remove_unreachable_and_dead_states();
        automaton
    }
}
