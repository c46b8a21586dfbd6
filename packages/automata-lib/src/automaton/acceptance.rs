use itertools::Itertools;

use crate::{
    automaton::{FiniteAutomaton, Language},
    error::{AutomatonError, AutomatonResult},
};

impl FiniteAutomaton {
    /// Checks whether every transition is labeled with exactly one symbol.
    pub fn is_one_letter(&self) -> bool {
        self.graph
            .edge_weights()
            .all(|label| label.as_symbol().is_some())
    }

    /// Simulates the automaton on `word` from all start states at once.
    ///
    /// Fails with [AutomatonError::NonOneLetterTransition] if any transition
    /// is not labeled with exactly one symbol, no matter whether it would be
    /// taken. Symbols outside of the alphabet have no transitions and lead to
    /// rejection.
    pub fn accepts(&self, word: &str) -> AutomatonResult<bool> {
        if let Some(label) = self
            .graph
            .edge_weights()
            .find(|label| label.as_symbol().is_none())
        {
            return Err(AutomatonError::NonOneLetterTransition(
                label.as_str().to_string(),
            ));
        }

        let mut active = vec![false; self.state_count()];
        for start in self.starts() {
            active[start.index()] = true;
        }

        for symbol in word.chars() {
            let mut next = vec![false; self.state_count()];

            for state in self.graph.node_indices().filter(|state| active[state.index()]) {
                for (target, label) in self.transitions(state) {
                    if label.matches(symbol) {
                        next[target.index()] = true;
                    }
                }
            }

            active = next;
        }

        Ok(self
            .graph
            .node_indices()
            .filter(|state| active[state.index()])
            .any(|state| self.is_terminal(state)))
    }

    /// Checks every word, stopping at the first error.
    pub fn accepts_all<'a>(
        &self,
        words: impl IntoIterator<Item = &'a str>,
    ) -> AutomatonResult<Vec<bool>> {
        words.into_iter().map(|word| self.accepts(word)).try_collect()
    }
}

impl Language for FiniteAutomaton {
    fn check(&self, word: &str) -> AutomatonResult<bool> {
        self.accepts(word)
    }
}
