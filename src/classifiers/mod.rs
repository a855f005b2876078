pub mod dictionary;
pub mod naive_bayes;
pub mod scoring;
pub mod tokenizer;
pub mod weights;

pub use dictionary::SentimentDictionary;
pub use naive_bayes::{ClassifierError, NaiveBayes};
pub use tokenizer::Tokenizer;
