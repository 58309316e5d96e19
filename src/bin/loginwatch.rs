use std::path::PathBuf;
use structopt::StructOpt;

use loginwatch::config::Config;
use loginwatch::detection::detect;
use loginwatch::input::CsvLoginSource;
use loginwatch::output::{OutputFormat, OutputHandler};

/// Suspicious login detection over authentication histories
#[derive(StructOpt, Debug)]
#[structopt(name = "loginwatch", about = "Flag suspicious events in a login history")]
pub enum Cli {
    /// Analyse a login history and print the suspicious events
    Scan {
        /// Path to configuration file
        #[structopt(short, long, default_value = "loginwatch.toml")]
        config: PathBuf,
        /// CSV login history (overrides the configured input)
        #[structopt(short, long)]
        file: Option<PathBuf>,
        /// Report format: text, json or jsonl (overrides the configured format)
        #[structopt(long)]
        format: Option<String>,
        /// Append the report to this file instead of stdout
        #[structopt(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "loginwatch.toml")]
        output: PathBuf,
    },
    /// Parse and display login events from a file
    Parse {
        /// Path to CSV login history
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of events to display
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Cli::from_args()) {
        log::error!("Run aborted: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli {
        Cli::Scan { config, file, format, output } => {
            let mut config = if config.exists() {
                Config::from_file(&config)?
            } else {
                log::info!("Config file {:?} not found, using defaults", config);
                Config::default()
            };

            if let Some(file) = file {
                config.input.file_path = file;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if output.is_some() {
                config.output.file_path = output;
            }

            scan(&config)?;
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Parse { file, lines } => {
            let events = CsvLoginSource::new(file).read_events()?;
            let display_count = std::cmp::min(lines, events.len());

            println!("Parsed {} event(s) (showing {}):\n", events.len(), display_count);
            for event in events.iter().take(display_count) {
                println!(
                    "  Login: {}, User: {}, Country: {}, Result: {}, Timestamp: {}",
                    event.login_id,
                    event.user_id,
                    event.country,
                    event.login_result.as_str(),
                    event.raw_timestamp
                );
            }
        }
    }

    Ok(())
}

/// Load the history, run detection and write the report
///
/// Progress goes to stderr unless the report is text.
fn scan(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_str(&config.output.format);
    let progress_to_stdout = format.is_human_readable();
    let progress = |message: String| {
        if progress_to_stdout {
            println!("{}", message);
        } else {
            eprintln!("{}", message);
        }
    };

    let source = CsvLoginSource::new(config.input.file_path.clone());

    progress(format!("Loading login events from {} ...", source.file_path().display()));
    let events = source.read_events()?;
    progress(format!("Loaded {} events.", events.len()));

    progress("Detecting suspicious activity...".to_string());
    let flagged = detect(&events);

    let mut output_handler = OutputHandler::new(format, config.output.file_path.clone())?;
    output_handler.write_report(&flagged)?;
    output_handler.flush()?;

    Ok(())
}
