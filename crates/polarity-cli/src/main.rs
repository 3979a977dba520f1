//! Polarity CLI
//!
//! Trains a Naive Bayes sentiment model on a labeled CSV file, prints the
//! validation report, and optionally classifies text typed on stdin.

use anyhow::{bail, Context, Result};
use clap::Parser;
use polarity_classifiers::prelude::*;
use polarity_classifiers::{render_report, SentimentClassifier, SharedAnalyzer};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
#[command(name = "polarity")]
#[command(about = "Train and evaluate a Naive Bayes sentiment classifier", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "polarity.yaml")]
    config: String,

    /// Labeled CSV dataset (overrides dataset.path)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Weight features by TF-IDF instead of raw counts
    #[arg(long)]
    tf_idf: bool,

    /// Additive smoothing parameter
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Minimum corpus frequency for vocabulary tokens
    #[arg(long)]
    min_frequency: Option<usize>,

    /// Vocabulary size cap (0 = unbounded)
    #[arg(long)]
    max_vocabulary: Option<usize>,

    /// Seed for the train/validation shuffle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Classify lines from stdin after training
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = config::load(&cli.config, &cli)?;
    let Some(dataset) = config.dataset.path.clone() else {
        bail!("No dataset given: pass --file or set dataset.path in {}", cli.config);
    };
    info!(
        "Weighting: {:?}, alpha: {}, min frequency: {}",
        config.weighting, config.alpha, config.min_frequency
    );

    let mut analyzer = SentimentAnalyzer::new(config)?;
    let loaded = analyzer
        .load_training_data(&dataset)
        .with_context(|| format!("Failed to load {}", dataset.display()))?;
    let (train, validation) = analyzer.split_sizes();
    info!(
        "Loaded {} records ({} training, {} validation)",
        loaded, train, validation
    );

    analyzer.train().context("Training failed")?;
    let metrics = analyzer.evaluate()?;

    print!(
        "{}",
        render_report(analyzer.model().name(), &metrics, analyzer.confusion_matrix())
    );

    if cli.interactive {
        let classifier = SentimentClassifier::new(SharedAnalyzer::new(analyzer));
        run_interactive(&classifier).await?;
    }

    Ok(())
}

/// Classify stdin lines until EOF or `exit`/`quit`
async fn run_interactive(classifier: &dyn Classifier) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"\nEnter text to classify ('exit' or 'quit' to leave)\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        if !text.is_empty() {
            let result = classifier.classify(text).await?;
            let answer = format!(
                "Sentiment: {} ({:.1}%)\n",
                result.label,
                result.score * 100.0
            );
            stdout.write_all(answer.as_bytes()).await?;
        }

        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("polarity=debug,polarity_classifiers=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("polarity=info,polarity_classifiers=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
