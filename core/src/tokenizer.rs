use crate::stopwords::StopwordSet;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Word endings split off into their own token, as in `Darwin's` -> `Darwin` `'s`.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ll", "'ve", "'d", "'m"];

fn is_wordlike(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Byte length of a clitic ending of `token`, matched case-insensitively with either a
/// straight or a typographic apostrophe.
fn clitic_len(token: &str) -> Option<usize> {
    CLITICS.iter().find_map(|clitic| {
        [clitic.to_string(), clitic.replace('\'', "\u{2019}")].into_iter().find_map(|form| {
            let cut = token.len().checked_sub(form.len()).filter(|&n| n > 0)?;
            let tail = token.get(cut..)?;
            (tail.eq_ignore_ascii_case(&form) && is_wordlike(&token[..cut])).then_some(form.len())
        })
    })
}

fn push_word(tokens: &mut Vec<String>, word: String) {
    match clitic_len(&word) {
        Some(len) => {
            let cut = word.len() - len;
            tokens.push(word[..cut].to_string());
            tokens.push(word[cut..].to_string());
        }
        None => tokens.push(word),
    }
}

/// Split text on Unicode word boundaries.
///
/// Whitespace is dropped, punctuation is kept as separate tokens, and words joined by a
/// bare hyphen (`well-known`, `state-of-the-art`) come back as one token. Possessive and
/// contraction endings (`'s`, `n't`, `'ll`, ...) become tokens of their own.
pub fn segment(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut last_end: Option<usize> = None;
    let mut open_hyphen = false;

    for (start, seg) in text.split_word_bound_indices() {
        if seg.chars().all(char::is_whitespace) {
            last_end = None;
            open_hyphen = false;
            continue;
        }
        let adjacent = last_end == Some(start);
        last_end = Some(start + seg.len());

        if open_hyphen && adjacent && is_wordlike(seg) {
            tokens.pop();
            if let Some(prev) = tokens.last_mut() {
                prev.push('-');
                prev.push_str(seg);
            }
            open_hyphen = false;
            continue;
        }

        open_hyphen = adjacent && seg == "-" && tokens.last().is_some_and(|t| is_wordlike(t));
        tokens.push(seg.to_string());
    }

    let mut words = Vec::with_capacity(tokens.len());
    for token in tokens {
        push_word(&mut words, token);
    }
    words
}

/// Tokenize one page of text, dropping stopwords. Case is preserved.
///
/// With `normalize` set the text is NFKC folded first, which turns typographic
/// ligatures from PDF extraction back into plain letters.
pub fn tokenize(text: &str, stopwords: &StopwordSet, normalize: bool) -> Vec<String> {
    let text: Cow<str> = if normalize { Cow::Owned(text.nfkc().collect()) } else { Cow::Borrowed(text) };
    segment(&text)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect()
}
