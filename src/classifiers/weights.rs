use std::cmp::Ordering;

use crate::classifiers::naive_bayes::{ClassifierError, NaiveBayes};
use crate::generic_types::{FeatureWeight, Label, PerLabel};

/// Rows kept per label.
pub const TOP_FEATURES: usize = 10;

impl NaiveBayes {
    /// Per-label keyword ranking of the trained model.
    ///
    /// A token's weight under a label is `P(t|label) / (P(t|label) + P(t|other))`,
    /// so 0.5 means the token tells the two classes apart not at all. Only
    /// tokens seen at least once under the label are ranked.
    pub fn feature_weights(&self) -> Result<PerLabel<Vec<FeatureWeight>>, ClassifierError> {
        let model = self.trained()?;

        Ok(PerLabel::from_fn(|label: Label| {
            let mut rows: Vec<FeatureWeight> = model
                .vocabulary
                .iter()
                .filter(|token| model.frequency(token, label) >= 1)
                .map(|token| {
                    let in_class = model.word_prob(token, label);
                    let in_other = model.word_prob(token, label.other());
                    FeatureWeight {
                        token: token.clone(),
                        weight: in_class / (in_class + in_other),
                        in_dictionary: self.dictionary().contains_for(label, token),
                    }
                })
                .collect();

            rows.sort_by(|a, b| {
                b.weight
                    .partial_cmp(&a.weight)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.token.cmp(&b.token))
            });
            rows.truncate(TOP_FEATURES);
            rows
        }))
    }
}
