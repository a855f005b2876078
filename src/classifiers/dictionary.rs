//! Static sentiment knowledge: the praise / criticism phrase lists plus the
//! closed sets of negation, neutral and soft markers the dictionary scorer uses.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::classifiers::naive_bayes::ClassifierError;
use crate::classifiers::tokenizer::{Tokenizer, MAX_PHRASE_LEN};
use crate::generic_types::{Label, PerLabel};

const PRAISE_PHRASES: &[&str] = &[
    "认真", "努力", "优秀", "很好", "非常好", "真棒", "棒", "聪明", "进步", "有进步",
    "细心", "仔细", "勤奋", "积极", "主动", "用心", "出色", "不错", "完美", "厉害",
    "优异", "负责", "专心", "踏实", "了不起", "好样的", "态度端正", "值得表扬",
    "表现很好", "继续保持", "还不错", "还可以", "还行",
];

const CRITICISM_PHRASES: &[&str] = &[
    "马虎", "马马虎虎", "粗心", "懒惰", "偷懒", "糟糕", "退步", "敷衍", "拖拉", "磨蹭",
    "迟到", "调皮", "捣乱", "差", "太差", "很差", "差劲", "失望", "不及格", "分心",
    "走神", "潦草", "浮躁", "需要改进", "有待提高", "有待加强", "不太好", "不太认真",
    "一般", "表现一般", "努力不够",
];

/// Tokens that flip the polarity of the next dictionary hit.
pub const NEGATION_MARKERS: [&str; 4] = ["不", "没", "别", "无"];

/// Never toggles negation and never scores.
pub const NEUTRAL_MARKER: &str = "还";

/// A dictionary hit containing one of these counts for half.
pub const SOFT_MARKERS: [&str; 4] = ["还", "一般", "不太", "有待"];

pub const SOFT_WEIGHT: f64 = 0.5;
pub const FULL_WEIGHT: f64 = 1.0;

lazy_static! {
    static ref DEFAULT_DICTIONARY: SentimentDictionary =
        SentimentDictionary::build(PRAISE_PHRASES.iter().copied(), CRITICISM_PHRASES.iter().copied());
}

#[derive(Debug, Clone)]
pub struct SentimentDictionary {
    phrases: PerLabel<HashSet<String>>,
}

impl SentimentDictionary {
    /// Build a dictionary from two phrase lists.
    ///
    /// Every phrase must be 1 to 6 characters long and the two lists must not
    /// share an entry.
    pub fn new<P, C>(praise: P, criticism: C) -> Result<Self, ClassifierError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let praise: Vec<String> = praise.into_iter().map(|p| p.as_ref().to_string()).collect();
        let criticism: Vec<String> = criticism.into_iter().map(|p| p.as_ref().to_string()).collect();

        for phrase in praise.iter().chain(criticism.iter()) {
            let len = phrase.chars().count();
            if len == 0 || len > MAX_PHRASE_LEN {
                return Err(ClassifierError::InvalidInput(format!(
                    "dictionary phrase '{}' must be 1 to {} characters",
                    phrase, MAX_PHRASE_LEN
                )));
            }
        }

        let dictionary = Self::build(praise, criticism);
        if let Some(shared) = dictionary.phrases.praise.intersection(&dictionary.phrases.criticism).next() {
            return Err(ClassifierError::InvalidInput(format!(
                "dictionary phrase '{}' is listed under both labels",
                shared
            )));
        }
        Ok(dictionary)
    }

    fn build<P, C>(praise: P, criticism: C) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        SentimentDictionary {
            phrases: PerLabel {
                praise: praise.into_iter().map(|p| p.as_ref().to_string()).collect(),
                criticism: criticism.into_iter().map(|p| p.as_ref().to_string()).collect(),
            },
        }
    }

    /// Known phrase under either label.
    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.praise.contains(phrase) || self.phrases.criticism.contains(phrase)
    }

    pub fn contains_for(&self, label: Label, phrase: &str) -> bool {
        self.phrases[label].contains(phrase)
    }

    pub fn label_of(&self, phrase: &str) -> Option<Label> {
        Label::ALL.into_iter().find(|&label| self.contains_for(label, phrase))
    }

    pub fn is_negation(&self, token: &str) -> bool {
        NEGATION_MARKERS.contains(&token)
    }

    pub fn is_neutral(&self, token: &str) -> bool {
        token == NEUTRAL_MARKER
    }

    pub fn weight_of(&self, token: &str) -> f64 {
        if SOFT_MARKERS.iter().any(|marker| token.contains(marker)) {
            SOFT_WEIGHT
        } else {
            FULL_WEIGHT
        }
    }

    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(self)
    }
}

impl Default for SentimentDictionary {
    fn default() -> Self {
        DEFAULT_DICTIONARY.clone()
    }
}
