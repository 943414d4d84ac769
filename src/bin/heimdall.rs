use std::path::PathBuf;
use structopt::StructOpt;

use heimdall::config::Config;
use heimdall::geolocation::GeoLookupClient;
use heimdall::input::load_login_events;
use heimdall::output::ArtifactWriter;
use heimdall::pipeline;

/// Login-event geolocation enrichment command line interface
#[derive(StructOpt, Debug)]
#[structopt(name = "heimdall", about = "Login-event geolocation enrichment and reporting")]
pub enum Cli {
    /// Enrich a login-event document and write the result artifacts
    Run {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Input document path, overriding the configured one
        #[structopt(short, long)]
        input: Option<PathBuf>,
        /// Output directory, overriding the configured one
        #[structopt(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
    /// Parse and display login events from a document
    Inspect {
        /// Path to the login-event document
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of events to display
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Run { config, input, output } => {
            let mut config = if config.exists() {
                Config::from_file(&config)?
            } else {
                log::warn!("Config file not found, using defaults");
                Config::default()
            };
            if let Some(input) = input {
                config.input.file_path = input;
            }
            if let Some(output) = output {
                config.output.directory = output;
            }

            let events = load_login_events(&config.input.file_path)?;
            let client = GeoLookupClient::new(&config.lookup);

            let artifacts = pipeline::run(&events, &client).await?;

            let writer = ArtifactWriter::new(&config.output.directory)?;
            writer.write_all(&artifacts.enriched, &artifacts.breakdown)?;

            println!(
                "Enriched {} event(s) for {} user(s); artifacts written to {:?}",
                artifacts.breakdown.total_number_of_logins,
                artifacts.breakdown.user_info.len(),
                writer.directory()
            );
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Inspect { file, lines } => {
            if !file.exists() {
                eprintln!("File not found: {:?}", file);
                std::process::exit(1);
            }

            let events = load_login_events(&file)?;
            let display_count = std::cmp::min(lines, events.len());

            println!("Parsed {} event(s) (showing {}):\n", events.len(), display_count);
            for event in events.iter().take(display_count) {
                println!(
                    "  User: {}, IP: {}, Operation: {}, Status: {}, Time: {}",
                    event.user_id,
                    event.client_ip,
                    event.operation,
                    event.result_status,
                    event.creation_time
                );
            }
        }
    }

    Ok(())
}
