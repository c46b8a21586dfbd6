use itertools::{Itertools, repeat_n};

use crate::{automaton::Language, error::AutomatonResult};

/// All words over `alphabet` of length at most `max_word_length`, shortest
/// first.
pub fn words_up_to(alphabet: &[char], max_word_length: usize) -> impl Iterator<Item = String> + '_ {
    std::iter::once(String::new()).chain((1..=max_word_length).flat_map(move |i| {
        repeat_n(alphabet.iter(), i)
            .multi_cartesian_product()
            .map(|word| word.into_iter().collect::<String>())
    }))
}

/// Returns the shortest word of length at most `max_word_length` on which the
/// two languages disagree, if there is one.
pub fn first_difference(
    a: &impl Language,
    b: &impl Language,
    max_word_length: usize,
) -> AutomatonResult<Option<String>> {
    for word in words_up_to(a.alphabet(), max_word_length) {
        if a.check(&word)? != b.check(&word)? {
            return Ok(Some(word));
        }
    }

    Ok(None)
}

/// Checks if two languages are the same.
/// This is done by checking if the alphabets are the same and then checking if
/// both accept the same words up to a certain length.
pub fn same_language(
    a: &impl Language,
    b: &impl Language,
    max_word_length: usize,
) -> AutomatonResult<bool> {
    if a.alphabet() != b.alphabet() {
        return Ok(false);
    }

    Ok(first_difference(a, b, max_word_length)?.is_none())
}

fn check_or_panic(language: &impl Language, word: &str, name: &str) -> bool {
    match language.check(word) {
        Ok(accepted) => accepted,
        Err(e) => panic!("automaton `{}` failed on {:?}: {}", name, word, e),
    }
}

pub fn assert_same_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        match (check_or_panic(a, &word, "a"), check_or_panic(b, &word, "b")) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        match (check_or_panic(a, &word, "a"), check_or_panic(b, &word, "b")) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            _ => {}
        }
    }
}
