//! Word-level lexer for column headers.
//!
//! A header word is split into its text and the punctuation characters it
//! carried, so the punctuation can be restored around a translated word.

/// Characters stripped from header words before dictionary lookup.
///
/// `-`, `$` and `%` are not in the set, so `US$` and `-5` survive lexing.
pub const PUNCTUATION: &str = "!\"#&'()*+,./:;<=>?@[\\]^_`{|}~";

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

/// Removes every punctuation character from `phrase`.
pub fn strip_punctuation(phrase: &str) -> String {
    phrase.chars().filter(|c| !is_punctuation(*c)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexedWord {
    /// The word with punctuation removed.
    pub text: String,
    /// Removed punctuation, in order of appearance.
    pub punctuation: String,
}

impl LexedWord {
    pub fn lex(word: &str) -> Self {
        let (punctuation, text): (String, String) = word.chars().partition(|c| is_punctuation(*c));
        Self { text, punctuation }
    }

    /// Forgets recorded commas (used once the word carries its own
    /// thousands separators).
    pub fn drop_commas(&mut self) {
        self.punctuation.retain(|c| c != ',');
    }

    /// Rebuilds the word around `text`.
    ///
    /// When the punctuation starts with `(` the parenthesis goes in front and
    /// the remainder after; otherwise all punctuation trails the word.
    pub fn assemble(&self, text: &str) -> String {
        match self.punctuation.strip_prefix('(') {
            Some(rest) => format!("({text}{rest}"),
            None => format!("{text}{}", self.punctuation),
        }
    }
}
