use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::automaton::{FiniteAutomaton, image::AutomatonImage};

pub struct RandomOptions {
    pub seed: u64,
    pub count: usize,
}

impl Default for RandomOptions {
    fn default() -> Self {
        RandomOptions { seed: 1, count: 10 }
    }
}

impl RandomOptions {
    pub fn new(seed: u64, count: usize) -> Self {
        RandomOptions { seed, count }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Generates random automata over `alphabet`. Labels have up to
/// `max_label_length` symbols, so epsilon and multi letter transitions occur.
/// State 0 is always a start state.
pub fn generate_random_automata(
    options: RandomOptions,
    alphabet: &[char],
    state_count: usize,
    transition_count: usize,
    max_label_length: usize,
) -> Vec<FiniteAutomaton> {
    assert!(state_count > 0, "Random automata need at least one state");

    let mut r = StdRng::seed_from_u64(options.seed);
    let alphabet_string = alphabet.iter().collect::<String>();

    (0..options.count)
        .map(|_| {
            let mut image = AutomatonImage::new(alphabet_string.clone());

            for i in 0..state_count {
                let start = i == 0 || r.gen_range(0..4) == 0;
                let terminal = r.gen_range(0..3) == 0;
                image.add_state(start, terminal);
            }

            for _ in 0..transition_count {
                let from = r.gen_range(0..state_count);
                let to = r.gen_range(0..state_count);

                let length = if alphabet.is_empty() {
                    0
                } else {
                    r.gen_range(0..=max_label_length)
                };
                let label = (0..length)
                    .map(|_| alphabet[r.gen_range(0..alphabet.len())])
                    .collect::<String>();

                image.add_transition(from, to, label);
            }

            match FiniteAutomaton::from_image(&image) {
                Ok(automaton) => automaton,
                Err(e) => panic!("generated an invalid image: {}", e),
            }
        })
        .collect()
}

/// Generates random regular expressions over `alphabet` with operators nested
/// at most `max_depth` deep.
pub fn generate_random_regexes(
    options: RandomOptions,
    alphabet: &[char],
    max_depth: usize,
) -> Vec<String> {
    let mut r = StdRng::seed_from_u64(options.seed);

    (0..options.count)
        .map(|_| random_regex(&mut r, alphabet, max_depth))
        .collect()
}

fn random_regex(r: &mut StdRng, alphabet: &[char], depth: usize) -> String {
    if depth == 0 || r.gen_range(0..4) == 0 {
        let atom = r.gen_range(0..alphabet.len() + 2);
        return match atom {
            0 => "0".to_string(),
            1 => "1".to_string(),
            _ => alphabet[atom - 2].to_string(),
        };
    }

    match r.gen_range(0..3) {
        0 => format!(
            "({}+{})",
            random_regex(r, alphabet, depth - 1),
            random_regex(r, alphabet, depth - 1)
        ),
        1 => format!(
            "{}{}",
            random_regex(r, alphabet, depth - 1),
            random_regex(r, alphabet, depth - 1)
        ),
        _ => format!("({})*", random_regex(r, alphabet, depth - 1)),
    }
}
