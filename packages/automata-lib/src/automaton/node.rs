/// A state of a finite automaton.
/// States carry no data besides their flags, their identity is the index they
/// have in the owning automaton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub start: bool,
    pub terminal: bool,
}

impl StateNode {
    pub fn new(start: bool, terminal: bool) -> Self {
        StateNode { start, terminal }
    }

    pub fn start() -> Self {
        StateNode::new(true, false)
    }

    pub fn terminal() -> Self {
        StateNode::new(false, true)
    }

    /// A state that is neither start nor terminal.
    pub fn inner() -> Self {
        StateNode::new(false, false)
    }

    /// The state as seen in the inverted automaton, where start and terminal
    /// swap roles.
    pub fn invert(&self) -> Self {
        StateNode::new(self.terminal, self.start)
    }

    /// Flips acceptance, used for complementation.
    pub fn complement_mut(&mut self) {
        self.terminal = !self.terminal;
    }

    /// The flags of a state standing for a group of states.
    pub fn join(&self, other: &StateNode) -> StateNode {
        StateNode::new(self.start || other.start, self.terminal || other.terminal)
    }
}
