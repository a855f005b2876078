use std::collections::{BTreeSet, HashMap};

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{debug, trace};

use crate::classifiers::dictionary::SentimentDictionary;
use crate::classifiers::scoring::score_tokens;
use crate::classifiers::tokenizer::Tokenizer;
use crate::generic_types::{DecisionStage, Label, LabeledExample, PerLabel, Prediction};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("The model has not been trained")]
    UntrainedModel,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Laplace smoothing constant.
pub const SMOOTHING_ALPHA: f64 = 1.0;
pub const EXACT_MATCH_CONFIDENCE: f64 = 0.95;
pub const POSTERIOR_DAMPING: f64 = 0.8;
pub const POSTERIOR_CONFIDENCE_CAP: f64 = 0.9;

/// Everything derived from one `train` call. Built in full before it replaces
/// the previous model.
#[derive(Debug, Clone)]
pub(crate) struct TrainedModel {
    pub(crate) vocabulary: BTreeSet<String>,
    pub(crate) word_freq: PerLabel<HashMap<String, usize>>,
    pub(crate) word_totals: PerLabel<usize>,
    pub(crate) class_counts: PerLabel<usize>,
    /// First label seen for each training text.
    exact: HashMap<String, Label>,
}

impl TrainedModel {
    fn fit(tokenizer: &Tokenizer<'_>, data: &[LabeledExample], pb: Option<&ProgressBar>) -> Self {
        let tokenized: Vec<Vec<String>> = data.iter().map(|ex| tokenizer.tokenize(&ex.text)).collect();

        // First pass: vocabulary
        let vocabulary: BTreeSet<String> = tokenized.iter().flatten().cloned().collect();

        // Second pass: class and word counts
        let mut word_freq: PerLabel<HashMap<String, usize>> = PerLabel::default();
        let mut class_counts: PerLabel<usize> = PerLabel::default();
        let mut exact = HashMap::new();
        for (example, tokens) in data.iter().zip(&tokenized) {
            class_counts[example.label] += 1;
            exact.entry(example.text.clone()).or_insert(example.label);
            for token in tokens {
                *word_freq[example.label].entry(token.clone()).or_insert(0) += 1;
            }
            if let Some(pb) = pb {
                pb.inc(1);
            }
        }

        let word_totals: PerLabel<usize> = word_freq.map(|_, freq| freq.values().sum());
        TrainedModel {
            vocabulary,
            word_freq,
            word_totals,
            class_counts,
            exact,
        }
    }

    pub(crate) fn frequency(&self, token: &str, label: Label) -> usize {
        self.word_freq[label].get(token).copied().unwrap_or(0)
    }

    /// P(token | label) with add-alpha smoothing.
    pub(crate) fn word_prob(&self, token: &str, label: Label) -> f64 {
        let count = self.frequency(token, label) as f64;
        let total = self.word_totals[label] as f64;
        (count + SMOOTHING_ALPHA) / (total + SMOOTHING_ALPHA * self.vocabulary.len() as f64)
    }

    fn exact_match(&self, text: &str) -> Option<Prediction> {
        self.exact.get(text).map(|&label| Prediction {
            label,
            confidence: EXACT_MATCH_CONFIDENCE,
            stage: DecisionStage::ExactMatch,
        })
    }

    /// Log prior plus log likelihood of every in-vocabulary token occurrence.
    fn log_scores(&self, tokens: &[String]) -> PerLabel<f64> {
        let total: usize = self.class_counts.praise + self.class_counts.criticism;
        PerLabel::from_fn(|label| {
            let prior = (self.class_counts[label] as f64 / total as f64).ln();
            tokens
                .iter()
                .filter(|token| self.vocabulary.contains(token.as_str()))
                .fold(prior, |acc, token| acc + self.word_prob(token, label).ln())
        })
    }

    fn posterior(&self, tokens: &[String]) -> Prediction {
        let scores = self.log_scores(tokens);

        let mut best = Label::Praise;
        for label in Label::ALL {
            if scores[label] > scores[best] {
                best = label;
            }
        }

        // log-sum-exp normalization
        let max = scores[best];
        let exps = scores.map(|_, &score| (score - max).exp());
        let sum = exps.praise + exps.criticism;
        let probability = exps[best] / sum;

        Prediction {
            label: best,
            confidence: (probability * POSTERIOR_DAMPING).min(POSTERIOR_CONFIDENCE_CAP),
            stage: DecisionStage::Posterior,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Struct for the Naive Bayes Classifier
pub struct NaiveBayes {
    dictionary: SentimentDictionary,
    model: Option<TrainedModel>,
}

impl NaiveBayes {
    /// Create a new classifier over the built-in sentiment dictionary
    pub fn new() -> Self {
        Self::with_dictionary(SentimentDictionary::default())
    }

    pub fn with_dictionary(dictionary: SentimentDictionary) -> Self {
        NaiveBayes {
            dictionary,
            model: None,
        }
    }

    pub fn dictionary(&self) -> &SentimentDictionary {
        &self.dictionary
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.dictionary.tokenizer().tokenize(text)
    }

    /// Train the classifier with labeled data.
    ///
    /// Rebuilds the vocabulary and every count from scratch. On error the
    /// previously trained model, if any, is left as it was.
    pub fn train(&mut self, data: &[LabeledExample]) -> Result<(), ClassifierError> {
        self.train_with_progress(data, None)
    }

    pub fn train_with_progress(
        &mut self,
        data: &[LabeledExample],
        pb: Option<&ProgressBar>,
    ) -> Result<(), ClassifierError> {
        if data.is_empty() {
            return Err(ClassifierError::InvalidDataset("no training examples".to_string()));
        }

        let model = TrainedModel::fit(&self.dictionary.tokenizer(), data, pb);
        debug!(
            examples = data.len(),
            vocabulary = model.vocabulary.len(),
            praise = model.class_counts.praise,
            criticism = model.class_counts.criticism,
            "Training complete"
        );
        self.model = Some(model);
        Ok(())
    }

    /// Classify a given text.
    ///
    /// Tries an exact match against the training texts, then the sentiment
    /// dictionary, then the Naive-Bayes posterior.
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let model = self.trained()?;

        let prediction = model.exact_match(text).unwrap_or_else(|| {
            let tokens = self.tokenize(text);
            let score = score_tokens(&self.dictionary, &tokens);
            trace!(score = score.score, hits = score.hits, "Dictionary score");
            score.to_prediction().unwrap_or_else(|| model.posterior(&tokens))
        });

        trace!(
            text = %text,
            label = %prediction.label,
            confidence = prediction.confidence,
            stage = ?prediction.stage,
            "Prediction"
        );
        Ok(prediction)
    }

    /// Number of training examples per label in the current model.
    pub fn class_counts(&self) -> Result<PerLabel<usize>, ClassifierError> {
        self.trained().map(|model| model.class_counts.clone())
    }

    pub fn vocabulary_len(&self) -> Result<usize, ClassifierError> {
        self.trained().map(|model| model.vocabulary.len())
    }

    /// Smoothed conditional probability of `token` under `label`.
    pub fn word_probability(&self, token: &str, label: Label) -> Result<f64, ClassifierError> {
        self.trained().map(|model| model.word_prob(token, label))
    }

    pub(crate) fn trained(&self) -> Result<&TrainedModel, ClassifierError> {
        self.model.as_ref().ok_or(ClassifierError::UntrainedModel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("这次考试考得很好", Label::Praise),
            LabeledExample::new("真是太马虎了", Label::Criticism),
            LabeledExample::new("做得非常认真", Label::Praise),
            LabeledExample::new("还需要更多练习", Label::Criticism),
            LabeledExample::new("字写得很工整", Label::Praise),
            LabeledExample::new("上课总是说话", Label::Criticism),
        ]
    }

    fn trained() -> NaiveBayes {
        let mut nb = NaiveBayes::new();
        nb.train(&sample_data()).unwrap();
        nb
    }

    #[test]
    fn test_untrained_guard() {
        let nb = NaiveBayes::new();
        assert!(!nb.is_trained());
        assert_eq!(nb.predict("很认真").unwrap_err(), ClassifierError::UntrainedModel);
        assert_eq!(nb.class_counts().unwrap_err(), ClassifierError::UntrainedModel);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let mut nb = NaiveBayes::new();
        assert!(matches!(nb.train(&[]), Err(ClassifierError::InvalidDataset(_))));
        assert!(!nb.is_trained());
    }

    #[test]
    fn test_failed_train_keeps_previous_model() {
        let mut nb = trained();
        let before = nb.vocabulary_len().unwrap();
        assert!(nb.train(&[]).is_err());
        assert_eq!(nb.vocabulary_len().unwrap(), before);
        assert_eq!(nb.predict("这次考试考得很好").unwrap().stage, DecisionStage::ExactMatch);
    }

    #[test]
    fn test_class_counts_sum_to_dataset_len() {
        let nb = trained();
        let counts = nb.class_counts().unwrap();
        assert_eq!(counts.praise, 3);
        assert_eq!(counts.criticism, 3);
        assert_eq!(counts.praise + counts.criticism, sample_data().len());
    }

    #[test]
    fn test_retrain_replaces_state() {
        let mut nb = trained();
        nb.train(&[LabeledExample::new("好", Label::Praise)]).unwrap();
        assert_eq!(nb.vocabulary_len().unwrap(), 1);
        // old texts are no longer memorized
        let p = nb.predict("真是太马虎了").unwrap();
        assert_ne!(p.stage, DecisionStage::ExactMatch);
    }

    #[test]
    fn test_exact_match_first_in_dataset_order() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            LabeledExample::new("同一句话", Label::Criticism),
            LabeledExample::new("同一句话", Label::Praise),
        ])
        .unwrap();
        let p = nb.predict("同一句话").unwrap();
        assert_eq!(p.label, Label::Criticism);
        assert_eq!(p.confidence, EXACT_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_exact_match_precedes_dictionary() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            LabeledExample::new("马虎", Label::Praise),
            LabeledExample::new("上课总是说话", Label::Criticism),
        ])
        .unwrap();
        let p = nb.predict("马虎").unwrap();
        assert_eq!(p.label, Label::Praise);
        assert_eq!(p.stage, DecisionStage::ExactMatch);

        let p = nb.predict("有点马虎").unwrap();
        assert_eq!(p.label, Label::Criticism);
        assert_eq!(p.stage, DecisionStage::Dictionary);
    }

    #[test]
    fn test_word_probability_bounds() {
        let nb = trained();
        for label in Label::ALL {
            for token in ["考", "马虎", "认真", "从未见过"] {
                let p = nb.word_probability(token, label).unwrap();
                assert!(p > 0.0 && p < 1.0, "P({}|{}) = {}", token, label, p);
            }
        }
    }

    #[test]
    fn test_posterior_prior_only_for_empty_text() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            LabeledExample::new("甲", Label::Criticism),
            LabeledExample::new("乙", Label::Criticism),
            LabeledExample::new("丙", Label::Praise),
        ])
        .unwrap();
        let p = nb.predict("").unwrap();
        assert_eq!(p.stage, DecisionStage::Posterior);
        assert_eq!(p.label, Label::Criticism);
        assert!((p.confidence - (2.0 / 3.0) * POSTERIOR_DAMPING).abs() < 1e-9);
    }

    #[test]
    fn test_posterior_tie_prefers_praise() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            LabeledExample::new("甲", Label::Praise),
            LabeledExample::new("乙", Label::Criticism),
        ])
        .unwrap();
        let p = nb.predict("丁").unwrap();
        assert_eq!(p.label, Label::Praise);
        assert!((p.confidence - 0.5 * POSTERIOR_DAMPING).abs() < 1e-9);
    }

    #[test]
    fn test_single_label_dataset_has_finite_confidence() {
        let mut nb = NaiveBayes::new();
        nb.train(&[LabeledExample::new("字写得工整", Label::Praise)]).unwrap();
        let p = nb.predict("字").unwrap();
        assert_eq!(p.label, Label::Praise);
        assert!(p.confidence.is_finite());
        assert!(p.confidence <= POSTERIOR_CONFIDENCE_CAP);
    }
}
