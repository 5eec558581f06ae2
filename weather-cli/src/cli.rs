use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{debug, info};
use weather_core::{
    Config, DisplaySink, DisplayState, SearchController, SubmitOutcome, provider_from_config,
};

use crate::{
    logging::{LogLevel, setup_logging},
    sink::{NullSink, TerminalSink},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current conditions and a 5-day forecast for any city")]
pub struct Cli {
    /// Verbosity of diagnostics written to stderr.
    #[arg(short, long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Look up one location and exit.
    Show {
        /// Location name, e.g. "Lisboa" or "Porto,PT".
        location: String,

        /// Print the normalized view model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for locations until cancelled (Esc or Ctrl-C).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        setup_logging(self.log_level)?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { location, json: false } => {
                let controller = controller(TerminalSink::new(false))?;
                if controller.submit(&location).await == SubmitOutcome::Ignored {
                    bail!("Location must not be empty");
                }
                Ok(())
            }
            Command::Show { location, json: true } => show_json(&location).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn controller<S: DisplaySink>(sink: S) -> anyhow::Result<SearchController<S>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(SearchController::new(provider, sink))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;

    info!(path = %path.display(), "Configuration saved");
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show_json(location: &str) -> anyhow::Result<()> {
    let controller = controller(NullSink)?;
    controller.submit(location).await;

    let json = match controller.state() {
        Some(DisplayState::Success(view)) => serde_json::to_string_pretty(&view)?,
        Some(DisplayState::Error(message)) => {
            serde_json::to_string_pretty(&serde_json::json!({ "error": message }))?
        }
        Some(DisplayState::Loading) | None => bail!("Location must not be empty"),
    };

    println!("{json}");
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let controller = controller(TerminalSink::new(true))?;

    loop {
        let input = match Text::new("Cidade:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("Prompt closed");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read location"),
        };

        controller.submit(&input).await;
    }
}
