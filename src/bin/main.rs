use clap::Parser;
use crossterm::style::Stylize;
use predictor_core::config::{CliOverrides, PredictorConfig};
use predictor_core::{Guess, PredictorEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "predictor")]
#[command(version)]
#[command(about = "Predict the category of a piece of text", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Aggregated counts file (overrides the config)
    #[arg(long)]
    counts: Option<PathBuf>,

    /// Number of guesses to show (overrides the config)
    #[arg(short, long)]
    top: Option<usize>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Text to classify once; starts the interactive prompt when absent
    text: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let base = match &cli.config {
        Some(path) => PredictorConfig::load(path)?,
        None => PredictorConfig::default(),
    };
    let config = base.with_overrides(&CliOverrides {
        counts_path: cli.counts.clone(),
        top_k: cli.top,
    })?;

    let engine = PredictorEngine::from_config(config)?;

    if !cli.text.is_empty() {
        let text = cli.text.join(" ");
        let guesses = engine.predict(&text)?;
        print_guesses(&guesses);
        return Ok(());
    }

    run_prompt(&engine)
}

fn run_prompt(engine: &PredictorEngine) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Category Predictor. Type some text, or 'exit' to quit.".bold());
    println!("Commands: ':summary' shows the categories, ':reload' rebuilds the model.");
    println!("---------------------------------------------------------------");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("\n> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let input = line?;
        match input.trim() {
            "exit" => break,
            "" => {}
            ":summary" => print_summary(engine),
            ":reload" => match engine.reload() {
                Ok(()) => println!("{}", "Model reloaded.".green()),
                Err(e) => {
                    error!("reload failed: {}", e);
                    println!("{} {}", "Reload failed, keeping the current model:".red(), e);
                }
            },
            text => match engine.predict(text) {
                Ok(guesses) => print_guesses(&guesses),
                Err(e) => println!("{} {}", "No answer available:".red(), e),
            },
        }
        print!("\n> ");
        stdout.flush()?;
    }
    Ok(())
}

fn print_guesses(guesses: &[Guess]) {
    for (i, guess) in guesses.iter().enumerate() {
        let line = format!("Predicted {}", guess);
        if i == 0 {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line);
        }
    }
}

fn print_summary(engine: &PredictorEngine) {
    let model = engine.model();
    println!("{} categories:", model.categories().len());
    for category in model.categories() {
        let prior = model.prior(category).unwrap_or(0.0);
        let vocab = model.vocabulary_size(category).unwrap_or(0);
        println!("  {:<30} prior {:>6.2}%  words {}", category, prior * 100.0, vocab);
    }
}
