use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::path::{Path, PathBuf};

use lingobot::app_config::Config;
use lingobot::language_utils::AUTO_LANGUAGE;
use lingobot::providers::{create_provider, PROVIDER_IDS};

#[derive(Parser, Debug)]
#[command(name = "lingobot", version, about = "Chat-room translation bot core", long_about = "\
Operate the lingobot translation core outside a chat client: run one-shot
translations, inspect the configured backend's language catalog, and
validate a configuration file before deploying it.

SUPPORTED PROVIDERS:
    google         - Free Google web-translate endpoint (no credentials)
    deepl          - DeepL web endpoint (no credentials)
    libretranslate - Self-hosted instance (requires args.url)
    mock           - Deterministic offline backend for dry runs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config_path: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a piece of text with the configured provider
    Translate {
        /// Destination language code
        #[arg(short, long)]
        to: String,

        /// Source language code; omit to let the backend detect it
        #[arg(short, long, default_value = AUTO_LANGUAGE)]
        from: String,

        /// Text to translate
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },
    /// List the language catalog of the configured provider
    Languages,
    /// Validate the configuration file and provider construction
    CheckConfig,
}

/// Minimal stderr logger driven by the config log level
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            eprintln!("{} [{:<5}] {}", now, record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn load_config(path: &str) -> Result<Config> {
    if !Path::new(path).exists() {
        return Err(anyhow!("Config file not found: {}", path));
    }
    Config::from_file(PathBuf::from(path))
        .context(format!("Failed to load config file: {}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();
    let config = load_config(&options.config_path)?;

    StderrLogger::init(config.log_level.to_level_filter())
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    match options.command {
        Commands::Translate { to, from, text } => {
            let provider = create_provider(&config.provider.id, &config.provider.args)
                .await
                .context("Failed to construct translation provider")?;

            if !provider.is_supported_language(&to) {
                return Err(anyhow!(
                    "Destination language '{}' is not supported by provider '{}'",
                    to,
                    config.provider.id
                ));
            }

            let text = text.join(" ");
            let result = provider.translate(&text, &to, &from).await?;
            info!("Source language: {}", result.source_language);
            println!("{}", result.text);
        }
        Commands::Languages => {
            let provider = create_provider(&config.provider.id, &config.provider.args)
                .await
                .context("Failed to construct translation provider")?;

            let mut entries: Vec<_> = provider.supported_languages().iter().collect();
            entries.sort();
            for (code, name) in entries {
                println!("{:<8} {}", code, name);
            }
        }
        Commands::CheckConfig => {
            if !PROVIDER_IDS.contains(&config.provider.id.as_str()) {
                return Err(anyhow!(
                    "Unknown provider id '{}' (expected one of: {})",
                    config.provider.id,
                    PROVIDER_IDS.join(", ")
                ));
            }
            create_provider(&config.provider.id, &config.provider.args)
                .await
                .context("Provider construction failed")?;

            let rooms = config.load_auto_translate();
            println!(
                "Configuration OK: provider '{}', {} auto-translated room(s)",
                config.provider.id,
                rooms.len()
            );
        }
    }

    Ok(())
}
