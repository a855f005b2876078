use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::classifiers::naive_bayes::{ClassifierError, NaiveBayes};
use crate::dataset::Dataset;
use crate::generic_types::{FeatureWeight, Label, LabeledExample, PerLabel, Prediction};

pub const DEFAULT_MIN_TRAINING_EXAMPLES: usize = 6;

/// A dataset being labeled together with the classifier trained on it.
///
/// Any edit to the dataset marks the model stale; predictions are refused
/// until the next successful `train`.
pub struct LabelingSession {
    dataset: Dataset,
    classifier: NaiveBayes,
    min_examples: usize,
    fresh: bool,
}

impl LabelingSession {
    pub fn new(dataset: Dataset, min_examples: usize) -> Self {
        Self::with_classifier(dataset, NaiveBayes::new(), min_examples)
    }

    pub fn with_classifier(dataset: Dataset, classifier: NaiveBayes, min_examples: usize) -> Self {
        LabelingSession {
            dataset,
            classifier,
            min_examples,
            fresh: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn min_examples(&self) -> usize {
        self.min_examples
    }

    pub fn is_trained(&self) -> bool {
        self.fresh
    }

    pub fn can_train(&self) -> bool {
        self.dataset.len() >= self.min_examples
    }

    pub fn add_example(&mut self, text: &str, label: Label) -> Result<(), ClassifierError> {
        self.dataset.add_example(text, label)?;
        self.fresh = false;
        Ok(())
    }

    pub fn remove_example(&mut self, index: usize) -> Option<LabeledExample> {
        let removed = self.dataset.remove(index);
        if removed.is_some() {
            self.fresh = false;
        }
        removed
    }

    pub fn train(&mut self, pb: Option<&ProgressBar>) -> Result<(), ClassifierError> {
        if !self.can_train() {
            return Err(ClassifierError::InvalidDataset(format!(
                "at least {} examples are required, got {}",
                self.min_examples,
                self.dataset.len()
            )));
        }
        self.classifier.train_with_progress(self.dataset.examples(), pb)?;
        self.fresh = true;
        info!(
            examples = self.dataset.len(),
            praise = self.dataset.count(Label::Praise),
            criticism = self.dataset.count(Label::Criticism),
            "Model trained"
        );
        Ok(())
    }

    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.trim().is_empty() {
            warn!("Rejected empty query");
            return Err(ClassifierError::InvalidInput("query text is empty".to_string()));
        }
        self.require_fresh()?;
        self.classifier.predict(text)
    }

    pub fn feature_weights(&self) -> Result<PerLabel<Vec<FeatureWeight>>, ClassifierError> {
        self.require_fresh()?;
        self.classifier.feature_weights()
    }

    fn require_fresh(&self) -> Result<(), ClassifierError> {
        if self.fresh {
            Ok(())
        } else {
            Err(ClassifierError::UntrainedModel)
        }
    }
}
