//! Integration tests for the remark classifier
//!
//! These tests drive the public API the way a labeling front end does:
//! - building a dataset and training on it
//! - the exact-match / dictionary / posterior prediction cascade
//! - keyword ranking
//! - the session workflow (training gate, stale model after edits)

use remark_classifier::{
    ClassifierError, Dataset, DecisionStage, Label, LabeledExample, LabelingSession, NaiveBayes,
};

fn classroom_dataset() -> Vec<LabeledExample> {
    vec![
        LabeledExample::new("这次考试考得很好", Label::Praise),
        LabeledExample::new("真是太马虎了", Label::Criticism),
        LabeledExample::new("做得非常认真", Label::Praise),
        LabeledExample::new("还需要更多练习", Label::Criticism),
        LabeledExample::new("今天的发言很精彩", Label::Praise),
        LabeledExample::new("作业又没有按时交", Label::Criticism),
    ]
}

fn trained_classifier() -> NaiveBayes {
    let mut nb = NaiveBayes::new();
    nb.train(&classroom_dataset()).unwrap();
    nb
}

#[test]
fn test_exact_match_for_every_training_text() {
    let nb = trained_classifier();
    for example in classroom_dataset() {
        let prediction = nb.predict(&example.text).unwrap();
        assert_eq!(prediction.label, example.label, "text: {}", example.text);
        assert_eq!(prediction.confidence, 0.95);
        assert_eq!(prediction.stage, DecisionStage::ExactMatch);
    }
}

#[test]
fn test_unseen_sentence_falls_through_to_posterior() {
    let nb = trained_classifier();
    let prediction = nb.predict("一个从未出现过的全新句子").unwrap();
    assert_eq!(prediction.stage, DecisionStage::Posterior);
    assert!(prediction.confidence > 0.0);
    assert!(prediction.confidence <= 0.9);
}

#[test]
fn test_dictionary_hit() {
    let nb = trained_classifier();
    let prediction = nb.predict("他学习态度很马虎").unwrap();
    assert_eq!(prediction.label, Label::Criticism);
    assert_eq!(prediction.stage, DecisionStage::Dictionary);
    assert!(prediction.confidence >= 0.5 && prediction.confidence <= 0.95);
}

#[test]
fn test_negation_flips_praise() {
    let nb = trained_classifier();
    let prediction = nb.predict("他一点也不认真").unwrap();
    assert_eq!(prediction.label, Label::Criticism);
    assert_eq!(prediction.stage, DecisionStage::Dictionary);

    let prediction = nb.predict("他一点也不马虎").unwrap();
    assert_eq!(prediction.label, Label::Praise);
}

#[test]
fn test_mixed_hits_cancel_to_posterior() {
    let nb = trained_classifier();
    let prediction = nb.predict("认真但是马虎").unwrap();
    assert_eq!(prediction.stage, DecisionStage::Posterior);
}

#[test]
fn test_determinism() {
    let a = trained_classifier();
    let b = trained_classifier();
    for text in ["一个从未出现过的全新句子", "他学习态度很马虎", "考试", ""] {
        assert_eq!(a.predict(text).unwrap(), b.predict(text).unwrap());
    }
    assert_eq!(a.feature_weights().unwrap(), b.feature_weights().unwrap());
}

#[test]
fn test_smoothing_gives_unseen_tokens_mass() {
    let nb = trained_classifier();
    for label in Label::ALL {
        let p = nb.word_probability("从未见过的词", label).unwrap();
        assert!(p > 0.0 && p < 1.0);
    }
}

#[test]
fn test_feature_weights_bounded() {
    let nb = trained_classifier();
    let weights = nb.feature_weights().unwrap();
    for (_, rows) in weights.iter() {
        assert!(rows.len() <= 10);
        assert!(rows.iter().all(|row| (0.0..=1.0).contains(&row.weight)));
    }
}

#[test]
fn test_untrained_guard() {
    let nb = NaiveBayes::new();
    assert_eq!(nb.predict("这次考试考得很好").unwrap_err(), ClassifierError::UntrainedModel);
    assert_eq!(nb.feature_weights().unwrap_err(), ClassifierError::UntrainedModel);
}

#[test]
fn test_empty_query_uses_prior() {
    let mut nb = NaiveBayes::new();
    let mut data = classroom_dataset();
    data.push(LabeledExample::new("上课又迟到", Label::Criticism));
    nb.train(&data).unwrap();

    let prediction = nb.predict("").unwrap();
    assert_eq!(prediction.stage, DecisionStage::Posterior);
    assert_eq!(prediction.label, Label::Criticism);
}

#[test]
fn test_labeling_session_workflow() {
    let mut session = LabelingSession::new(Dataset::new(), 6);
    for example in classroom_dataset().into_iter().take(5) {
        session.add_example(&example.text, example.label).unwrap();
    }
    assert!(!session.can_train());
    assert!(matches!(session.train(None), Err(ClassifierError::InvalidDataset(_))));

    session.add_example("作业又没有按时交", Label::Criticism).unwrap();
    session.train(None).unwrap();
    assert_eq!(session.predict("做得非常认真").unwrap().label, Label::Praise);

    session.remove_example(2);
    assert_eq!(session.predict("做得非常认真").unwrap_err(), ClassifierError::UntrainedModel);
}
