use std::fmt::Display;

/// Result type of the automaton engine.
pub type AutomatonResult<T> = core::result::Result<T, AutomatonError>;

/// Errors surfaced by the automaton engine. None of them are recovered
/// internally, every operation either succeeds or fails the same way for the
/// same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// The regular expression is empty, unbalanced, contains a symbol outside
    /// of the alphabet or has a sub expression that is not well formed. Holds
    /// the offending (sub) expression.
    BadRegExp(String),
    /// The acceptance checker met a transition whose label is not exactly one
    /// symbol long. Holds the offending label.
    NonOneLetterTransition(String),
    /// A structural image references a state that does not exist.
    UnknownState { index: usize, state_count: usize },
}

impl Display for AutomatonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomatonError::BadRegExp(expression) => {
                write!(f, "bad regular expression: `{}`", expression)
            }
            AutomatonError::NonOneLetterTransition(label) => write!(
                f,
                "transition labeled `{}` is not a one letter transition, normalize the automaton first",
                label
            ),
            AutomatonError::UnknownState { index, state_count } => write!(
                f,
                "transition target {} is out of range for an automaton with {} states",
                index, state_count
            ),
        }
    }
}

impl std::error::Error for AutomatonError {}
