// File: src/core/tokenizer.rs

/// Splits free text into the tokens the classifier scores.
///
/// Implementations must never emit the reserved `UNK` token for a real word;
/// the classifier would silently score it as the unseen-word bucket.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Whitespace-separated words, lowercased, with every non `a-z` character
/// dropped. Words that end up empty are skipped. This matches how the
/// upstream counting job normalizes review text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn normalize(word: &str) -> String {
        word.chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_ascii_lowercase())
            .collect()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(Self::normalize)
            .filter(|w| !w.is_empty())
            .collect()
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}
