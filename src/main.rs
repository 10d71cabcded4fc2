use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use number_trainer::drill::{self, Gesture};
use number_trainer::format::DisplayStyle;
use number_trainer::config::Overrides;
use number_trainer::{Config, RngSource, SpeechBackend, Trainer, TrainerSettings, speech};

/// numtrain - practice reading large numbers aloud
#[derive(Parser)]
#[command(name = "numtrain", version, about)]
struct Cli {
    /// Language tag for formatting and speech (e.g. "en-US", "zh-TW")
    #[arg(short, long, env = "NUMTRAIN_LANGUAGE")]
    language: Option<String>,

    /// Speech backend: local, remote or silent
    #[arg(short, long)]
    speech: Option<SpeechBackend>,

    /// Number rendering: digits or words
    #[arg(short, long)]
    display: Option<DisplayStyle>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive drill (default)
    Drill,
    /// Print freshly generated numbers
    Generate {
        /// How many numbers
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Print raw numbers as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Speak a single number
    Say {
        /// Number to speak
        number: u64,
        /// Seconds to keep running while audio plays
        #[arg(short, long, default_value = "5")]
        wait: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,number_trainer=info",
        1 => "info,number_trainer=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Speech credentials are checked only by the commands that build a sink
    let config = Config::load_with_overrides(Overrides {
        language: cli.language,
        speech: cli.speech,
        display: cli.display,
    })?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Drill) {
        Command::Drill => run_drill(&config).await,
        Command::Generate { count, seed, json } => cmd_generate(&config, count, seed, json),
        Command::Say { number, wait } => cmd_say(&config, number, wait).await,
    }
}

/// Interactive drill over stdin
async fn run_drill(config: &Config) -> anyhow::Result<()> {
    let sink = speech::from_config(&config.speech)?;
    let mut trainer = Trainer::new(
        RngSource::thread(),
        TrainerSettings::from(config),
        sink,
        config.display.formatter(),
    );

    println!("Click to hear a number, double-click to reveal it.");
    println!("{}\n", drill::HELP);
    print!("{}", drill::render(&trainer.items()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let gesture = match drill::parse_gesture(&line) {
            Ok(gesture) => gesture,
            Err(message) => {
                println!("{message} (h for help)");
                continue;
            }
        };

        let outcome = match gesture {
            Gesture::Click(index) => trainer.click(index),
            Gesture::DoubleClick(index) => trainer.double_click(index),
            Gesture::Regenerate => {
                trainer.regenerate();
                Ok(())
            }
            Gesture::Language(tag) => {
                trainer.set_language(tag);
                Ok(())
            }
            Gesture::Help => {
                println!("{}", drill::HELP);
                continue;
            }
            Gesture::Quit => break,
        };

        match outcome {
            Ok(()) => print!("{}", drill::render(&trainer.items())),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

/// Print generated numbers
fn cmd_generate(config: &Config, count: usize, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let numbers = match seed {
        Some(seed) => number_trainer::generate(&mut RngSource::seeded(seed), count),
        None => number_trainer::generate(&mut RngSource::thread(), count),
    };

    if json {
        println!("{}", serde_json::to_string(&numbers)?);
        return Ok(());
    }

    let formatter = config.display.formatter();
    for number in numbers {
        println!("{}", formatter.format(number, &config.language));
    }
    Ok(())
}

/// Speak one number and wait for playback
async fn cmd_say(config: &Config, number: u64, wait: u64) -> anyhow::Result<()> {
    let text = config.display.formatter().format(number, &config.language);
    println!("Speaking: {text}");

    let sink = speech::from_config(&config.speech)?;
    sink.speak(&text, &config.language);

    tokio::time::sleep(Duration::from_secs(wait)).await;
    Ok(())
}
