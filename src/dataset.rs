//! Caller-side training data: an ordered, editable list of labeled examples.
//!
//! The classifier never mutates a dataset; it only reads the slice handed to
//! `train`. Datasets can be loaded from a JSON array of `{"text", "label"}`
//! objects or from a plain-text file with one `label: text` entry per line.

use std::io;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::classifiers::naive_bayes::ClassifierError;
use crate::generic_types::{Label, LabeledExample};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to load the dataset: {0}")]
    LoadError(io::Error),

    #[error("Failed to deserialize the dataset: {0}")]
    SerializationError(serde_json::Error),

    #[error("Line {line}: expected 'label: text', got '{content}'")]
    ParseError { line: usize, content: String },

    #[error(transparent)]
    Rejected(#[from] ClassifierError),
}

lazy_static! {
    static ref LINE_RE: Regex =
        Regex::new(r"(?i)^\s*(praise|criticism|表扬|批评)\s*[:：]\s*(.*?)\s*$").expect("valid dataset line pattern");
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    examples: Vec<LabeledExample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Six starter examples, three per label.
    pub fn demo() -> Self {
        let examples = [
            ("这次考试考得很好", Label::Praise),
            ("真是太马虎了", Label::Criticism),
            ("做得非常认真", Label::Praise),
            ("还需要更多练习", Label::Criticism),
            ("字写得很工整", Label::Praise),
            ("上课总是说话", Label::Criticism),
        ];
        Dataset {
            examples: examples
                .into_iter()
                .map(|(text, label)| LabeledExample::new(text, label))
                .collect(),
        }
    }

    /// Append an example. Blank text is rejected.
    pub fn add_example(&mut self, text: &str, label: Label) -> Result<(), ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidInput("example text is empty".to_string()));
        }
        self.examples.push(LabeledExample::new(text, label));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<LabeledExample> {
        if index < self.examples.len() {
            Some(self.examples.remove(index))
        } else {
            None
        }
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn count(&self, label: Label) -> usize {
        self.examples.iter().filter(|ex| ex.label == label).count()
    }

    /// Load a dataset file. `.json` files are parsed as an array of examples,
    /// anything else as the line format.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(DatasetError::LoadError)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json(&content)
        } else {
            Self::parse_lines(&content)
        }
    }

    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let raw: Vec<LabeledExample> = serde_json::from_str(content).map_err(DatasetError::SerializationError)?;
        let mut dataset = Dataset::new();
        for example in raw {
            dataset.add_example(&example.text, example.label)?;
        }
        Ok(dataset)
    }

    /// Parse `label: text` lines. Blank lines and `#` comments are skipped.
    pub fn parse_lines(content: &str) -> Result<Self, DatasetError> {
        let mut dataset = Dataset::new();
        for (n, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let caps = LINE_RE.captures(line).ok_or_else(|| DatasetError::ParseError {
                line: n + 1,
                content: trimmed.to_string(),
            })?;
            let label: Label = caps[1].parse()?;
            dataset.add_example(&caps[2], label)?;
        }
        Ok(dataset)
    }
}
