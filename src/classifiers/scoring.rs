//! Dictionary scoring: a fold over the token stream driven by a two-state
//! negation automaton.

use crate::classifiers::dictionary::SentimentDictionary;
use crate::generic_types::{DecisionStage, Label, Prediction};

const BASE_CONFIDENCE: f64 = 0.5;
const LONG_MATCH_CONFIDENCE: f64 = 0.7;
/// Matches longer than this many characters use the raised base.
const LONG_MATCH_LEN: usize = 3;
pub const DICTIONARY_CONFIDENCE_CAP: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negation {
    Normal,
    Negated,
}

impl Negation {
    fn toggle(self) -> Self {
        match self {
            Negation::Normal => Negation::Negated,
            Negation::Negated => Negation::Normal,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Negation::Normal => 1.0,
            Negation::Negated => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DictionaryScore {
    /// Positive leans praise, negative leans criticism.
    pub score: f64,
    pub hits: usize,
    /// Character length of the longest dictionary token seen.
    pub longest_match: usize,
}

impl DictionaryScore {
    pub fn label(&self) -> Option<Label> {
        if self.score > 0.0 {
            Some(Label::Praise)
        } else if self.score < 0.0 {
            Some(Label::Criticism)
        } else {
            None
        }
    }

    pub fn confidence(&self) -> f64 {
        let base = if self.longest_match > LONG_MATCH_LEN {
            LONG_MATCH_CONFIDENCE
        } else {
            BASE_CONFIDENCE
        };
        (self.score.abs() / 2.0 + base).min(DICTIONARY_CONFIDENCE_CAP)
    }

    /// `None` when the hits cancel out or there were none.
    pub fn to_prediction(&self) -> Option<Prediction> {
        self.label().map(|label| Prediction {
            label,
            confidence: self.confidence(),
            stage: DecisionStage::Dictionary,
        })
    }
}

pub fn score_tokens<S: AsRef<str>>(dictionary: &SentimentDictionary, tokens: &[S]) -> DictionaryScore {
    let (_, score) = tokens.iter().fold(
        (Negation::Normal, DictionaryScore::default()),
        |(state, mut acc), token| {
            let token = token.as_ref();
            if dictionary.is_neutral(token) {
                return (state, acc);
            }
            if dictionary.is_negation(token) {
                return (state.toggle(), acc);
            }
            match dictionary.label_of(token) {
                Some(label) => {
                    acc.score += dictionary.weight_of(token) * label.polarity() * state.sign();
                    acc.hits += 1;
                    acc.longest_match = acc.longest_match.max(token.chars().count());
                    (Negation::Normal, acc)
                }
                None => (state, acc),
            }
        },
    );
    score
}
