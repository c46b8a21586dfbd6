use std::fmt::Display;

/// The label of a transition: a string over the alphabet.
/// The empty label is an epsilon transition, labels longer than one symbol are
/// only allowed until the automaton is brought into one letter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(string: impl Into<String>) -> Self {
        Label(string.into())
    }

    pub fn epsilon() -> Self {
        Label(String::new())
    }

    pub fn symbol(symbol: char) -> Self {
        Label(symbol.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols of the label.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_epsilon(&self) -> bool {
        self.is_empty()
    }

    pub fn is_multi_letter(&self) -> bool {
        self.len() >= 2
    }

    /// Returns the symbol if the label is exactly one symbol long.
    pub fn as_symbol(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Some(symbol),
            _ => None,
        }
    }

    pub fn matches(&self, symbol: char) -> bool {
        self.as_symbol() == Some(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label(value)
    }
}

impl From<char> for Label {
    fn from(value: char) -> Self {
        Label::symbol(value)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "eps")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
