use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::generic_types::Label;

/// Train a praise / criticism classifier on labeled remarks and query it.
#[derive(Debug, Parser)]
#[command(name = "remark-classifier", version)]
pub struct Options {
    /// Configuration file (defaults to ./config.* when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dataset file: JSON array or `label: text` lines. Uses the built-in examples when omitted.
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train on the dataset, then classify each TEXT
    Predict {
        #[arg(required = true)]
        texts: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Train on the dataset, then print the top keywords per label
    Weights {
        #[arg(long)]
        json: bool,
    },
    /// Print the dataset
    Dataset,
    /// Label, train and test interactively
    Repl,
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Predict { .. } => "predict",
            Self::Weights { .. } => "weights",
            Self::Dataset => "dataset",
            Self::Repl => "repl",
        };
        write!(f, "{}", name)
    }
}

/// One line of input in the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Add(Label, String),
    Remove(usize),
    List,
    Train,
    Test(String),
    Weights,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn from_str(line: &str) -> ReplCommand {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match (head.to_lowercase().as_str(), rest) {
            ("praise" | "表扬", text) if !text.is_empty() => ReplCommand::Add(Label::Praise, text.to_string()),
            ("criticism" | "批评", text) if !text.is_empty() => ReplCommand::Add(Label::Criticism, text.to_string()),
            ("remove" | "rm" | "删除", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => ReplCommand::Remove(n - 1),
                _ => ReplCommand::Unknown(line.to_string()),
            },
            ("list" | "ls", "") => ReplCommand::List,
            ("train" | "训练", "") => ReplCommand::Train,
            ("test" | "测试", text) if !text.is_empty() => ReplCommand::Test(text.to_string()),
            ("weights", "") => ReplCommand::Weights,
            ("help" | "?", "") => ReplCommand::Help,
            ("quit" | "exit", "") => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

pub const REPL_HELP: &str = "\
commands:
  praise <text>      label a remark as praise (表扬)
  criticism <text>   label a remark as criticism (批评)
  remove <n>         delete example n (1-based)
  list               show the dataset
  train              train the model
  test <text>        classify a remark (测试)
  weights            show the top keywords per label
  quit";
