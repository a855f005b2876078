pub mod classifiers;
pub mod config;
pub mod dataset;
pub mod generic_types;
pub mod logging;
pub mod options;
pub mod session;

pub use classifiers::{ClassifierError, NaiveBayes, SentimentDictionary};
pub use dataset::{Dataset, DatasetError};
pub use generic_types::{DecisionStage, FeatureWeight, Label, LabeledExample, PerLabel, Prediction};
pub use session::LabelingSession;
