use serde::{Deserialize, Serialize};

use crate::{
    automaton::{Alphabet, DEFAULT_ALPHABET, FiniteAutomaton, console::ConsoleSpec, node::StateNode},
    error::{AutomatonError, AutomatonResult},
};

/// Structural image of an automaton: states in order, transitions addressed by
/// the position of their target.
///
/// ```json
/// {
///     "alphabet": "ab",
///     "states": [
///         { "start": true, "terminal": false, "transitions": [{ "target": 1, "string": "ab" }] },
///         { "start": false, "terminal": true, "transitions": [] }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonImage {
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    pub states: Vec<StateImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateImage {
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub transitions: Vec<TransitionImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionImage {
    pub target: usize,
    pub string: String,
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

impl AutomatonImage {
    pub fn new(alphabet: impl Into<String>) -> Self {
        AutomatonImage {
            alphabet: alphabet.into(),
            states: vec![],
        }
    }

    /// Appends a state and returns its position.
    pub fn add_state(&mut self, start: bool, terminal: bool) -> usize {
        self.states.push(StateImage {
            start,
            terminal,
            transitions: vec![],
        });
        self.states.len() - 1
    }

    pub fn add_transition(&mut self, from: usize, target: usize, string: impl Into<String>) {
        self.states[from].transitions.push(TransitionImage {
            target,
            string: string.into(),
        });
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an image from a `.json` file or from a `.fa` file in the console
    /// format.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let path = std::path::Path::new(path);
        match path.extension() {
            Some(ext) if ext == "json" => {
                let json_str = std::fs::read_to_string(path)?;
                Ok(Self::from_json(&json_str)?)
            }
            Some(ext) if ext == "fa" => {
                let console_str = std::fs::read_to_string(path)?;
                let spec = ConsoleSpec::parse(&console_str)?;
                AutomatonImage::try_from(spec)
            }
            _ => Err(anyhow::anyhow!(
                "Unsupported file extension: {:?}",
                path.extension()
            )),
        }
    }
}

impl FiniteAutomaton {
    /// Builds an automaton from its structural image. All states are created
    /// before any transition, a transition to a position without a state fails
    /// with [AutomatonError::UnknownState].
    pub fn from_image(image: &AutomatonImage) -> AutomatonResult<Self> {
        let mut automaton = FiniteAutomaton::new(image.alphabet.chars());

        let states = image
            .states
            .iter()
            .map(|state| automaton.add_state(StateNode::new(state.start, state.terminal)))
            .collect::<Vec<_>>();

        for (from, state) in states.iter().zip(&image.states) {
            for transition in &state.transitions {
                let to = states
                    .get(transition.target)
                    .ok_or(AutomatonError::UnknownState {
                        index: transition.target,
                        state_count: states.len(),
                    })?;

                automaton.add_transition(*from, *to, transition.string.as_str());
            }
        }

        Ok(automaton)
    }

    pub fn to_image(&self) -> AutomatonImage {
        let mut image = AutomatonImage::new(self.alphabet().iter().collect::<String>());

        for (_, state) in self.states() {
            image.add_state(state.start, state.terminal);
        }

        for (from, to, label) in self.all_transitions() {
            image.add_transition(from.index(), to.index(), label.as_str());
        }

        image
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        self.to_image().to_json()
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(Self::from_image(&AutomatonImage::from_json(json)?)?)
    }

    pub fn to_json_file(&self, path: &str) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Self::from_image(&AutomatonImage::from_file(path)?)?)
    }
}

impl TryFrom<AutomatonImage> for FiniteAutomaton {
    type Error = AutomatonError;

    fn try_from(image: AutomatonImage) -> Result<Self, Self::Error> {
        FiniteAutomaton::from_image(&image)
    }
}
