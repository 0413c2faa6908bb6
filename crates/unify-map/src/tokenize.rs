//! Header tokenization with spelling translation.
//!
//! Turns a free-form column header such as
//! `"Labor force, female (% of total labor force)"` into a [`HeaderToken`]:
//!
//! 1. each space-separated word is lexed, translated through the spelling
//!    dictionary (the first word is title-cased when translated), integers are
//!    re-rendered with thousands separators, and punctuation is restored;
//! 2. the parenthesised clause becomes the `unit`;
//! 3. the text after the last `", "` becomes the `context`;
//! 4. the rest is split into words, with `and` / `of` joining their
//!    neighbours into three-word combos.
//!
//! The tokenizer is a standalone normalisation helper; validation does not
//! depend on it.

use std::sync::LazyLock;

use regex::Regex;
use unify_model::{Dataset, HeaderToken, TranslationTable};

use crate::lexer::{LexedWord, strip_punctuation};

/// Words that join their neighbours into a combo.
pub const CONJUNCTIONS: &[&str] = &["and", "of"];

static UNIT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("valid unit regex"));

#[derive(Debug, Clone, Copy)]
pub struct HeaderTokenizer<'a> {
    translations: &'a TranslationTable,
}

impl<'a> HeaderTokenizer<'a> {
    pub fn new(translations: &'a TranslationTable) -> Self {
        Self { translations }
    }

    /// Applies spelling translation and number formatting word by word.
    ///
    /// A word with a clause comma inside it (`force,female`) is translated
    /// one segment at a time so the comma stays where it was.
    pub fn translate(&self, header: &str) -> String {
        let mut words = Vec::new();
        for (idx, raw) in header.split(' ').filter(|w| !w.is_empty()).enumerate() {
            let mut segments = Vec::new();
            let mut start = 0;
            for pos in clause_commas(raw).filter(|&pos| pos > 0 && pos + 1 < raw.len()) {
                segments.push(&raw[start..pos]);
                start = pos + 1;
            }
            segments.push(&raw[start..]);
            let translated: Vec<String> = segments
                .iter()
                .enumerate()
                .map(|(seg, segment)| self.translate_word(segment, idx == 0 && seg == 0))
                .collect();
            words.push(translated.join(","));
        }
        words.join(" ")
    }

    fn translate_word(&self, raw: &str, leading: bool) -> String {
        let mut lexed = LexedWord::lex(raw);
        let mut word = match self.translations.get(&lexed.text.to_lowercase()) {
            Some(translated) if leading => title_case(translated),
            Some(translated) => translated.to_string(),
            None => lexed.text.clone(),
        };
        if let Some(formatted) = format_integer(&word) {
            word = formatted;
            lexed.drop_commas();
        }
        lexed.assemble(&word)
    }

    pub fn tokenize(&self, header: &str) -> HeaderToken {
        let translated = self.translate(header);
        let (rest, unit) = split_unit(&translated);
        let (rest, context) = split_context(rest);

        let words: Vec<String> = strip_punctuation(rest)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut tokens = Vec::new();
        let mut combos = Vec::new();
        for (idx, word) in words.iter().enumerate() {
            if !CONJUNCTIONS.contains(&word.as_str()) {
                tokens.push(word.clone());
            } else if idx > 0 && idx + 1 < words.len() {
                combos.push(format!("{} {} {}", words[idx - 1], word, words[idx + 1]));
            }
        }

        HeaderToken {
            raw_header: header.to_string(),
            translated,
            tokens,
            combos,
            unit,
            context,
        }
    }

    /// Tokenizes every header of every dataset, in input order.
    pub fn tokenize_datasets(&self, datasets: &[Dataset]) -> Vec<HeaderToken> {
        datasets
            .iter()
            .flat_map(|dataset| dataset.columns.iter())
            .map(|header| self.tokenize(header))
            .collect()
    }
}

/// Splits off the outermost parenthesised clause.
///
/// Everything from the opening parenthesis onwards is removed, together with
/// one space in front of it.
fn split_unit(text: &str) -> (&str, Option<String>) {
    let Some(found) = UNIT_CLAUSE.find(text) else {
        return (text, None);
    };
    let clause = found.as_str();
    let unit = clause[1..clause.len() - 1].to_string();
    let head = &text[..found.start()];
    (head.strip_suffix(' ').unwrap_or(head), Some(unit))
}

/// Byte offsets of the commas in `text` that are not digit group separators.
fn clause_commas(text: &str) -> impl DoubleEndedIterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    let digit_at = move |idx: Option<usize>| {
        idx.and_then(|i| bytes.get(i))
            .is_some_and(u8::is_ascii_digit)
    };
    text.match_indices(',')
        .map(|(pos, _)| pos)
        .filter(move |&pos| !(digit_at(pos.checked_sub(1)) && digit_at(Some(pos + 1))))
}

fn split_context(text: &str) -> (&str, Option<String>) {
    match clause_commas(text).next_back() {
        Some(pos) => {
            let context = text[pos + 1..].trim();
            let context = (!context.is_empty()).then(|| context.to_string());
            (&text[..pos], context)
        }
        None => (text, None),
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_run = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_run {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// `Some("1,234,567")` for `"1234567"`; `None` when the word is not an
/// integer.
fn format_integer(word: &str) -> Option<String> {
    let value: i64 = word.parse().ok()?;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    Some(grouped)
}
