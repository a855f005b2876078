use crate::classifiers::dictionary::SentimentDictionary;

/// Longest dictionary phrase the tokenizer will try, in characters.
pub const MAX_PHRASE_LEN: usize = 6;
/// Shortest multi-character candidate; anything shorter falls back to one character.
pub const MIN_PHRASE_LEN: usize = 2;

/// Greedy longest-match tokenizer: dictionary phrases first, single characters otherwise.
pub struct Tokenizer<'d> {
    dictionary: &'d SentimentDictionary,
}

impl<'d> Tokenizer<'d> {
    pub fn new(dictionary: &'d SentimentDictionary) -> Self {
        Self { dictionary }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        // Byte offset of every char plus the end of the string, so windows are
        // measured in characters but sliced on valid boundaries.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut tokens = Vec::new();
        let mut i = 0;
        while i < char_count {
            let longest = MAX_PHRASE_LEN.min(char_count - i);
            let matched = (MIN_PHRASE_LEN..=longest)
                .rev()
                .find(|&len| self.dictionary.contains(&text[bounds[i]..bounds[i + len]]));

            let len = matched.unwrap_or(1);
            tokens.push(text[bounds[i]..bounds[i + len]].to_string());
            i += len;
        }
        tokens
    }
}
