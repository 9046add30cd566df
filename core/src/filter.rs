use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"^[a-zA-Z0-9-]*$").expect("valid regex");
    static ref PHRASE: Regex = Regex::new(r"^[a-zA-Z0-9\- ]*$").expect("valid regex");
}

fn starts_with_digit(term: &str) -> bool {
    term.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn ends_with_digit(term: &str) -> bool {
    term.chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

/// Whether a term has an index-worthy shape.
///
/// Single words may hold ASCII letters, digits and hyphens but must not lead with a
/// digit. Phrases may also hold spaces and must neither start nor end with a digit.
pub fn is_valid_term(term: &str) -> bool {
    if starts_with_digit(term) { return false; }
    if term.contains(' ') {
        !ends_with_digit(term) && PHRASE.is_match(term)
    } else {
        WORD.is_match(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words() {
        assert!(is_valid_term("fox"));
        assert!(is_valid_term("Well-known"));
        assert!(is_valid_term("mp3"));
        assert!(is_valid_term("-prefix"));
        assert!(!is_valid_term("3d"));
        assert!(!is_valid_term("fox."));
        assert!(!is_valid_term("don't"));
        assert!(!is_valid_term("café"));
    }

    #[test]
    fn phrases() {
        assert!(is_valid_term("quick fox"));
        assert!(is_valid_term("state-of-the-art design"));
        assert!(!is_valid_term("chapter 3"));
        assert!(!is_valid_term("2 foxes"));
        assert!(!is_valid_term("fox ."));
        assert!(is_valid_term("mp3 player"));
    }
}
