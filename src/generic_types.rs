use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifiers::naive_bayes::ClassifierError;

/// The two classification outcomes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[serde(alias = "表扬")]
    Praise,
    #[serde(alias = "批评")]
    Criticism,
}

impl Label {
    /// Praise first: ties in the posterior are resolved in this order.
    pub const ALL: [Label; 2] = [Label::Praise, Label::Criticism];

    pub fn index(self) -> usize {
        match self {
            Label::Praise => 0,
            Label::Criticism => 1,
        }
    }

    pub fn other(self) -> Label {
        match self {
            Label::Praise => Label::Criticism,
            Label::Criticism => Label::Praise,
        }
    }

    /// Sign of a dictionary hit for this label.
    pub fn polarity(self) -> f64 {
        match self {
            Label::Praise => 1.0,
            Label::Criticism => -1.0,
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Label::Praise => "praise",
            Label::Criticism => "criticism",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Label::Praise => "表扬",
            Label::Criticism => "批评",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Label {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "praise" | "p" | "表扬" => Ok(Label::Praise),
            "criticism" | "c" | "批评" => Ok(Label::Criticism),
            other => Err(ClassifierError::InvalidInput(format!("unknown label '{}'", other))),
        }
    }
}

/// Fixed two-slot table indexed by [`Label`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerLabel<T> {
    pub praise: T,
    pub criticism: T,
}

impl<T> PerLabel<T> {
    pub fn from_fn(mut f: impl FnMut(Label) -> T) -> Self {
        PerLabel {
            praise: f(Label::Praise),
            criticism: f(Label::Criticism),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Label, &T) -> U) -> PerLabel<U> {
        PerLabel {
            praise: f(Label::Praise, &self.praise),
            criticism: f(Label::Criticism, &self.criticism),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &T)> {
        Label::ALL.into_iter().map(move |label| (label, &self[label]))
    }
}

impl<T> Index<Label> for PerLabel<T> {
    type Output = T;

    fn index(&self, label: Label) -> &T {
        match label {
            Label::Praise => &self.praise,
            Label::Criticism => &self.criticism,
        }
    }
}

impl<T> IndexMut<Label> for PerLabel<T> {
    fn index_mut(&mut self, label: Label) -> &mut T {
        match label {
            Label::Praise => &mut self.praise,
            Label::Criticism => &mut self.criticism,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabeledExample {
    pub text: String,
    pub label: Label,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        LabeledExample {
            text: text.into(),
            label,
        }
    }
}

/// Which stage of the prediction cascade produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStage {
    ExactMatch,
    Dictionary,
    Posterior,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f64,
    pub stage: DecisionStage,
}

/// One row of the "what the model learned" keyword table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub token: String,
    pub weight: f64,
    pub in_dictionary: bool,
}
