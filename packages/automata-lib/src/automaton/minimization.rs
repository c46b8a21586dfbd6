use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{Alphabet, FiniteAutomaton, node::StateNode};

/// Represents the table used in the minimization of a DFA.
/// Row 0 is an explicit non-accepting sink with self loops on every symbol,
/// state `i` of the DFA is row `i + 1`. The transitions of a row are stored
/// per symbol in alphabet order, a missing transition leads to the sink.
#[derive(Debug, Clone)]
pub struct MinimizationTable {
    pub rows: Vec<MinimizationTableRow>,
    pub alphabet: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct MinimizationTableRow {
    pub state: StateNode,
    pub transitions: Vec<usize>,
}

impl MinimizationTable {
    pub fn new(dfa: &FiniteAutomaton) -> Self {
        assert_eq!(
            dfa.starts().count(),
            1,
            "DFA must have exactly one start state to minimize"
        );

        let alphabet = dfa.alphabet().to_vec();

        let mut rows = vec![MinimizationTableRow {
            state: StateNode::inner(),
            transitions: vec![0; alphabet.len()],
        }];

        for (state, data) in dfa.states() {
            let transitions = alphabet
                .iter()
                .map(|&symbol| {
                    let targets = dfa
                        .transitions(state)
                        .filter(|(_, label)| label.matches(symbol))
                        .map(|(target, _)| target)
                        .collect_vec();

                    assert!(
                        targets.len() <= 1,
                        "DFA must not have two transitions for symbol {:?} from state {:?}",
                        symbol,
                        state
                    );

                    targets.first().map_or(0, |target| target.index() + 1)
                })
                .collect_vec();

            rows.push(MinimizationTableRow {
                state: *data,
                transitions,
            });
        }

        MinimizationTable { rows, alphabet }
    }

    /// Computes the table of distinguishable pairs of rows.
    /// All pairs with differing acceptance are marked first, markings are
    /// then propagated backwards along the transitions until no new pair is
    /// marked.
    pub fn distinguishable(&self) -> Vec<Vec<bool>> {
        let n = self.rows.len();

        // reverse[l][target] lists the rows going to target with symbol l
        let mut reverse = vec![vec![vec![]; n]; self.alphabet.len()];
        for (source, row) in self.rows.iter().enumerate() {
            for (l, &target) in row.transitions.iter().enumerate() {
                reverse[l][target].push(source);
            }
        }

        let mut marked = vec![vec![false; n]; n];
        let mut queue = VecDeque::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if self.rows[i].state.terminal != self.rows[j].state.terminal {
                    marked[i][j] = true;
                    marked[j][i] = true;
                    queue.push_back((i, j));
                }
            }
        }

        while let Some((u, v)) = queue.pop_front() {
            for l in 0..self.alphabet.len() {
                for &u_source in &reverse[l][u] {
                    for &v_source in &reverse[l][v] {
                        if !marked[u_source][v_source] {
                            marked[u_source][v_source] = true;
                            marked[v_source][u_source] = true;
                            queue.push_back((u_source, v_source));
                        }
                    }
                }
            }
        }

        marked
    }

    /// Assigns every row its equivalence class. Class 0 holds the sink and
    /// every row equivalent to it, the other classes are numbered in the order
    /// their first row appears. Returns the classes and the class count.
    pub fn classes(&self) -> (Vec<usize>, usize) {
        let marked = self.distinguishable();
        let n = self.rows.len();

        let mut classes: Vec<Option<usize>> =
            (0..n).map(|i| (!marked[0][i]).then_some(0)).collect();
        let mut count = 0;

        for i in 1..n {
            if classes[i].is_some() {
                continue;
            }

            count += 1;
            classes[i] = Some(count);

            for j in (i + 1)..n {
                if !marked[i][j] && classes[j].is_none() {
                    classes[j] = Some(count);
                }
            }
        }

        (classes.into_iter().map(|class| class.unwrap_or(0)).collect(), count + 1)
    }

    /// Builds the quotient automaton with one state per class.
    pub fn to_automaton(&self) -> FiniteAutomaton {
        let (classes, class_count) = self.classes();

        let mut automaton = FiniteAutomaton::new(self.alphabet.iter().copied());
        let mut states = vec![StateNode::inner(); class_count];

        for (row, &class) in self.rows.iter().zip(&classes) {
            states[class] = states[class].join(&row.state);
        }

        for state in states {
            automaton.add_state(state);
        }

        for (row, &class) in self.rows.iter().zip(&classes) {
            for (&symbol, &target) in self.alphabet.iter().zip(&row.transitions) {
                automaton.add_transition(
                    NodeIndex::new(class),
                    NodeIndex::new(classes[target]),
                    symbol,
                );
            }
        }

        automaton
    }
}

impl FiniteAutomaton {
    /// Minimizes a DFA by merging all equivalent states.
    /// The result is a complete DFA whose state 0 is the class of the sink,
    /// which can be unreachable.
    ///
    /// Panics if the automaton does not have exactly one start state or has
    /// two transitions with the same symbol leaving a state.
    pub fn minimize(&mut self) {
        let before = self.state_count();

        let table = MinimizationTable::new(self);
        *self = table.to_automaton();

        tracing::debug!("minimized DFA from {} to {} states", before, self.state_count());
    }

    pub fn minimized(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.minimize();
        automaton
    }

    pub fn determinize_minimal(&mut self) {
        self.determinize();
        self.minimize();
    }

    /// Brings the automaton into its canonical form: the minimal DFA without
    /// unreachable and dead states.
    pub fn ideal(&mut self) {
        self.determinize_minimal();
        self.remove_unreachable_and_dead_states();
    }

    pub fn ideal_form(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.ideal();
        automaton
    }

    /// Replaces the automaton by one accepting exactly the words over the
    /// alphabet that the original rejects.
    pub fn complement(&mut self) {
        self.determinize_minimal();

        for state in self.graph.node_weights_mut() {
            state.complement_mut();
        }

        self.minimize();
        self.remove_unreachable_and_dead_states();
    }

    pub fn complemented(&self) -> FiniteAutomaton {
        let mut automaton = self.clone();
        automaton.complement();
        automaton
    }
}
