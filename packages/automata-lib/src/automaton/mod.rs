use std::fmt::{Debug, Display};

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{label::Label, node::StateNode},
    error::AutomatonResult,
};

pub mod acceptance;
pub mod console;
pub mod determinize;
pub mod image;
pub mod label;
pub mod minimization;
pub mod node;
pub mod normalize;

/// The alphabet used when none is given, matching the default of the
/// structural image format.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

pub trait Alphabet {
    fn alphabet(&self) -> &[char];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    /// Checks whether `word` belongs to the language.
    fn check(&self, word: &str) -> AutomatonResult<bool>;
}

/// A finite automaton over an explicit alphabet.
///
/// The automaton owns its states in a graph arena, a state is identified by
/// its [NodeIndex] and transitions are edges weighted by their [Label]. The
/// same automaton type is used for every stage of the pipeline: raw NFAs with
/// epsilon and multi letter transitions, one letter NFAs, complete DFAs and
/// minimal DFAs. Which invariants hold depends on the passes that were run.
///
/// Per state, transitions have set semantics: a `(target, label)` pair exists
/// at most once.
#[derive(Clone)]
pub struct FiniteAutomaton {
    pub graph: DiGraph<StateNode, Label>,
    alphabet: Vec<char>,
}

impl FiniteAutomaton {
    /// Creates an empty automaton. Duplicate symbols of the alphabet are
    /// dropped, the order of first appearance is kept.
    pub fn new(alphabet: impl IntoIterator<Item = char>) -> Self {
        FiniteAutomaton {
            graph: DiGraph::new(),
            alphabet: alphabet.into_iter().unique().collect(),
        }
    }

    pub fn with_default_alphabet() -> Self {
        FiniteAutomaton::new(DEFAULT_ALPHABET.chars())
    }

    /// Creates an empty automaton over the alphabet of self.
    pub fn empty_like(&self) -> Self {
        FiniteAutomaton {
            graph: DiGraph::new(),
            alphabet: self.alphabet.clone(),
        }
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_state(&mut self, state: StateNode) -> NodeIndex {
        self.graph.add_node(state)
    }

    /// Adds a transition unless the same `(target, label)` pair already leaves
    /// `from`. Returns the index of the new or the existing edge.
    pub fn add_transition(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        label: impl Into<Label>,
    ) -> EdgeIndex {
        let label = label.into();

        if let Some(existing) = self.get_transition(from, to, &label) {
            return existing;
        }

        self.graph.add_edge(from, to, label)
    }

    pub fn get_transition(&self, from: NodeIndex, to: NodeIndex, label: &Label) -> Option<EdgeIndex> {
        self.graph
            .edges_connecting(from, to)
            .find(|edge| edge.weight() == label)
            .map(|edge| edge.id())
    }

    pub fn state(&self, state: NodeIndex) -> &StateNode {
        &self.graph[state]
    }

    pub fn state_mut(&mut self, state: NodeIndex) -> &mut StateNode {
        &mut self.graph[state]
    }

    /// Iterates over all states in arena order.
    pub fn states(&self) -> impl Iterator<Item = (NodeIndex, &StateNode)> + '_ {
        self.graph
            .node_indices()
            .map(move |state| (state, &self.graph[state]))
    }

    pub fn starts(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |state| self.graph[*state].start)
    }

    pub fn terminals(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |state| self.graph[*state].terminal)
    }

    pub fn is_start(&self, state: NodeIndex) -> bool {
        self.graph[state].start
    }

    pub fn is_terminal(&self, state: NodeIndex) -> bool {
        self.graph[state].terminal
    }

    /// Outgoing transitions of a state as `(target, label)` pairs.
    pub fn transitions(&self, from: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Label)> + '_ {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .map(|edge| (edge.target(), edge.weight()))
    }

    /// All transitions as `(source, target, label)` triples.
    pub fn all_transitions(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Label)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    /// Removes every transition for which `remove` returns true. The remaining
    /// transitions keep their relative order.
    pub fn remove_transitions_where(&mut self, remove: impl Fn(NodeIndex, NodeIndex, &Label) -> bool) {
        let graph = self.graph.filter_map(
            |_, data| Some(*data),
            |edge, label| match self.graph.edge_endpoints(edge) {
                Some((from, to)) if remove(from, to, label) => None,
                _ => Some(label.clone()),
            },
        );

        self.graph = graph;
    }

    /// Keeps only the states for which `keep` returns true, together with the
    /// transitions between kept states. Unlike [DiGraph::remove_node] this keeps
    /// the relative order of the surviving states.
    pub fn retain_states(&mut self, keep: impl Fn(NodeIndex) -> bool) {
        let graph = self.graph.filter_map(
            |state, data| keep(state).then_some(*data),
            |_, label| Some(label.clone()),
        );

        self.graph = graph;
    }

    /// Appends all states and transitions of `other` to self, returning the
    /// offset that was added to the indices of `other`.
    pub(crate) fn absorb(&mut self, other: FiniteAutomaton) -> usize {
        let offset = self.graph.node_count();

        for state in other.graph.node_weights() {
            self.graph.add_node(*state);
        }

        for edge in other.graph.edge_references() {
            self.graph.add_edge(
                NodeIndex::new(edge.source().index() + offset),
                NodeIndex::new(edge.target().index() + offset),
                edge.weight().clone(),
            );
        }

        offset
    }

    /// Creates the inverted automaton: start and terminal flags swap and every
    /// transition is reversed. State `i` of self is state `i` of the result.
    pub fn inverted(&self) -> FiniteAutomaton {
        let mut inverted = self.empty_like();

        for state in self.graph.node_weights() {
            inverted.graph.add_node(state.invert());
        }

        for edge in self.graph.edge_references() {
            inverted
                .graph
                .add_edge(edge.target(), edge.source(), edge.weight().clone());
        }

        inverted
    }

    /// Marks every state that can be reached from some start state, following
    /// transitions regardless of their labels.
    pub fn reachable_from_starts(&self) -> Vec<bool> {
        let mut visited = vec![false; self.state_count()];
        let mut stack = self.starts().collect_vec();

        for start in &stack {
            visited[start.index()] = true;
        }

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                let target = edge.target();

                if !visited[target.index()] {
                    visited[target.index()] = true;
                    stack.push(target);
                }
            }
        }

        visited
    }

    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            self.terminals().map(|state| state.index().to_string()).join(" ")
        ));
        dot.push_str("node [shape = circle];\n");

        for start in self.starts() {
            dot.push_str(&format!("START -> {};\n", start.index()));
        }

        for (state, _) in self.states() {
            dot.push_str(&format!("{} [ label=\"{}\" ];\n", state.index(), state.index()));
        }

        for (from, to, label) in self.all_transitions() {
            dot.push_str(&format!(
                "{} -> {} [ label=\"{}\" ];\n",
                from.index(),
                to.index(),
                label
            ));
        }

        dot.push_str("}\n");

        dot
    }
}

impl Alphabet for FiniteAutomaton {
    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Default for FiniteAutomaton {
    fn default() -> Self {
        FiniteAutomaton::with_default_alphabet()
    }
}

impl Display for FiniteAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of states: {}", self.state_count())?;
        writeln!(f, "All the states:")?;

        for (state, data) in self.states() {
            writeln!(f)?;
            writeln!(f, " ------------STATE {} -----------", state.index())?;
            if data.start {
                writeln!(f, "START")?;
            }
            if data.terminal {
                writeln!(f, "TERMINAL")?;
            }

            for (target, label) in self.transitions(state) {
                writeln!(f, " -- {} --> {}", label, target.index())?;
            }
        }

        Ok(())
    }
}

impl Debug for FiniteAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FiniteAutomaton")
            .field("alphabet", &self.alphabet.iter().collect::<String>())
            .field("state_count", &self.graph.node_count())
            .field("start_states", &self.starts().collect_vec())
            .field("terminal_states", &self.terminals().collect_vec())
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .all_transitions()
                    .map(|(from, to, label)| format!("{:?} --- {} --> {:?}", from, label, to))
                    .collect_vec(),
            )
            .finish()
    }
}
