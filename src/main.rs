use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use remark_classifier::config::Config;
use remark_classifier::logging::{setup_logger, Logger};
use remark_classifier::options::{Command, Options, ReplCommand, REPL_HELP};
use remark_classifier::{Dataset, FeatureWeight, LabelingSession, PerLabel, Prediction};

fn main() -> Result<()> {
    let options = Options::parse();

    let config = match &options.config {
        Some(path) => Config::from_path(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::new().context("loading config")?,
    };
    setup_logger(options.log_level.as_deref().unwrap_or(&config.logging.level));
    info!("{}", config);

    let dataset_path = options
        .dataset
        .clone()
        .or_else(|| config.dataset.path.as_ref().map(PathBuf::from));
    let dataset = match dataset_path {
        Some(path) => Dataset::load_from_file(&path).with_context(|| format!("loading dataset {}", path.display()))?,
        None => Dataset::demo(),
    };
    info!(examples = dataset.len(), "Dataset ready");

    let mut session = LabelingSession::new(dataset, config.classifier.min_training_examples);
    let show_progress = config.classifier.show_progress;
    let command_name = options.command.to_string();

    Logger::with_span(&command_name, || run(options.command, &mut session, show_progress))
}

fn run(command: Command, session: &mut LabelingSession, show_progress: bool) -> Result<()> {
    match command {
        Command::Predict { texts, json } => {
            train(session, show_progress)?;
            for text in &texts {
                let prediction = session.predict(text)?;
                print_prediction(text, &prediction, json)?;
            }
        }
        Command::Weights { json } => {
            train(session, show_progress)?;
            print_weights(&session.feature_weights()?, json)?;
        }
        Command::Dataset => print_dataset(session.dataset()),
        Command::Repl => repl(session, show_progress)?,
    }
    Ok(())
}

fn training_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Training in progress...");
    pb
}

fn train(session: &mut LabelingSession, show_progress: bool) -> Result<()> {
    let pb = show_progress.then(|| training_bar(session.dataset().len() as u64));
    let result = session.train(pb.as_ref());
    if let Some(pb) = pb {
        match &result {
            Ok(()) => pb.finish_with_message("Training complete!"),
            Err(_) => pb.abandon_with_message("Training failed"),
        }
    }
    result?;
    Ok(())
}

fn print_prediction(text: &str, prediction: &Prediction, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::json!({
            "text": text,
            "label": prediction.label,
            "confidence": prediction.confidence,
            "stage": prediction.stage,
        });
        println!("{}", payload);
    } else {
        println!(
            "{} -> {} ({}) {:.1}% [{:?}]",
            text,
            prediction.label,
            prediction.label.display_name(),
            prediction.confidence * 100.0,
            prediction.stage
        );
    }
    Ok(())
}

fn print_weights(weights: &PerLabel<Vec<FeatureWeight>>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(weights)?);
        return Ok(());
    }
    for (label, rows) in weights.iter() {
        println!("{} ({}) keywords:", label.display_name(), label);
        for row in rows {
            let marker = if row.in_dictionary { "*" } else { "" };
            println!("  {:<8} {:.3}{}", row.token, row.weight, marker);
        }
    }
    println!("(* = sentiment dictionary entry)");
    Ok(())
}

fn print_dataset(dataset: &Dataset) {
    for (i, example) in dataset.examples().iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, example.label.display_name(), example.text);
    }
    println!("{} examples", dataset.len());
}

fn repl(session: &mut LabelingSession, show_progress: bool) -> Result<()> {
    println!("{}", REPL_HELP);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match ReplCommand::from_str(&line) {
            ReplCommand::Add(label, text) => match session.add_example(&text, label) {
                Ok(()) => {
                    println!("added #{} as {}", session.dataset().len(), label.display_name());
                    if !session.can_train() {
                        println!(
                            "{} more example(s) needed before training",
                            session.min_examples() - session.dataset().len()
                        );
                    }
                }
                Err(e) => println!("error: {}", e),
            },
            ReplCommand::Remove(index) => match session.remove_example(index) {
                Some(removed) => println!("removed: {}", removed.text),
                None => println!("no example #{}", index + 1),
            },
            ReplCommand::List => print_dataset(session.dataset()),
            ReplCommand::Train => {
                if let Err(e) = train(session, show_progress) {
                    println!("error: {}", e);
                }
            }
            ReplCommand::Test(text) => match session.predict(&text) {
                Ok(prediction) => print_prediction(&text, &prediction, false)?,
                Err(e) => println!("error: {}", e),
            },
            ReplCommand::Weights => match session.feature_weights() {
                Ok(weights) => print_weights(&weights, false)?,
                Err(e) => println!("error: {}", e),
            },
            ReplCommand::Help => println!("{}", REPL_HELP),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(input) => {
                if !input.is_empty() {
                    warn!(input = %input, "Unrecognized command");
                    println!("unrecognized: {} (type 'help')", input);
                }
            }
        }
    }
    Ok(())
}
