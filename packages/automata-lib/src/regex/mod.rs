pub mod compiler;
pub mod elimination;

/// The symbols with a meaning in regular expressions besides the alphabet:
/// `0` is the empty language, `1` the language of the empty word.
pub const REGEX_OPERATORS: &str = "01()*+";

pub const EMPTY_LANGUAGE: &str = "0";
pub const EMPTY_WORD: &str = "1";

/// The operator a sub expression is embedded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexContext {
    Union,
    Concat,
    Star,
}

/// Rewrites a sub expression so that it can be embedded into `context`
/// without changing its meaning.
///
/// The empty word is written as `1` under union and star and disappears
/// under concatenation. A sub expression with a top level union is
/// parenthesized under concatenation and star, any other sub expression of
/// more than one symbol is parenthesized under star.
pub fn beautify(expression: &str, context: RegexContext) -> String {
    if expression.is_empty() || expression == EMPTY_WORD {
        return match context {
            RegexContext::Union | RegexContext::Star => EMPTY_WORD.to_string(),
            RegexContext::Concat => String::new(),
        };
    }

    if expression.chars().count() == 1 {
        return expression.to_string();
    }

    match context {
        RegexContext::Union => expression.to_string(),
        RegexContext::Concat if has_top_level_union(expression) => format!("({})", expression),
        RegexContext::Concat => expression.to_string(),
        RegexContext::Star if is_parenthesized(expression) => expression.to_string(),
        RegexContext::Star => format!("({})", expression),
    }
}

/// Checks whether `expression` contains a `+` outside of all parentheses.
pub fn has_top_level_union(expression: &str) -> bool {
    let mut depth = 0;

    for symbol in expression.chars() {
        match symbol {
            '(' => depth += 1,
            ')' => depth -= 1,
            '+' if depth == 0 => return true,
            _ => {}
        }
    }

    false
}

/// Checks whether one pair of parentheses encloses the whole expression.
pub fn is_parenthesized(expression: &str) -> bool {
    if !expression.starts_with('(') {
        return false;
    }

    let mut depth = 0;
    for (i, symbol) in expression.char_indices() {
        match symbol {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }

        if depth == 0 {
            return i + symbol.len_utf8() == expression.len();
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beautify_empty_word() {
        assert_eq!(beautify("", RegexContext::Union), "1");
        assert_eq!(beautify("1", RegexContext::Star), "1");
        assert_eq!(beautify("1", RegexContext::Concat), "");
    }

    #[test]
    fn test_beautify_union() {
        assert_eq!(beautify("a+b", RegexContext::Union), "a+b");
        assert_eq!(beautify("a+b", RegexContext::Concat), "(a+b)");
        assert_eq!(beautify("a+b", RegexContext::Star), "(a+b)");
        assert_eq!(beautify("(a+b)c", RegexContext::Concat), "(a+b)c");
    }

    #[test]
    fn test_beautify_star() {
        assert_eq!(beautify("a", RegexContext::Star), "a");
        assert_eq!(beautify("ab", RegexContext::Star), "(ab)");
        assert_eq!(beautify("(ab)", RegexContext::Star), "(ab)");
        assert_eq!(beautify("(a)(b)", RegexContext::Star), "((a)(b))");
    }

    #[test]
    fn test_has_top_level_union() {
        assert!(has_top_level_union("a+b"));
        assert!(has_top_level_union("(a+b)+c"));
        assert!(!has_top_level_union("(a+b)c"));
        assert!(!has_top_level_union("abc*"));
    }
}
