use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use fieldsmith::{
    FieldBuilderUi, UiOptions,
    api::{ClientConfig, DEFAULT_API_BASE},
    form::{DEFAULT_MAX_CHOICE_LENGTH, DEFAULT_MAX_CHOICES},
};

#[derive(Debug, Parser)]
#[command(
    name = "fieldsmith",
    version,
    about = "Build select fields in the terminal and save them to a fields API"
)]
struct Cli {
    /// Base URL of the fields API
    #[arg(long = "api", env = "FIELDSMITH_API", default_value = DEFAULT_API_BASE, value_name = "URL")]
    api: String,

    /// Initial location, e.g. "?formId=12" to open a saved field
    #[arg(short = 'l', long = "location", value_name = "QUERY")]
    location: Option<String>,

    /// File holding the unsaved draft
    #[arg(long = "drafts", env = "FIELDSMITH_DRAFTS", value_name = "PATH")]
    drafts: Option<PathBuf>,

    /// Maximum number of choices per field
    #[arg(long = "max-choices", default_value_t = DEFAULT_MAX_CHOICES, value_name = "N")]
    max_choices: usize,

    /// Maximum characters per choice before it is flagged
    #[arg(long = "max-length", default_value_t = DEFAULT_MAX_CHOICE_LENGTH, value_name = "N")]
    max_length: usize,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    timeout: Option<u64>,

    /// Keep rejected choice text in the input instead of clearing it
    #[arg(long = "keep-rejected-input")]
    keep_rejected_input: bool,

    /// Hide the key binding help row
    #[arg(long = "no-help")]
    no_help: bool,

    /// Quit without a second confirmation when there are unsaved changes
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Append logs to this file; nothing is logged otherwise
    #[arg(long = "log-file", env = "FIELDSMITH_LOG", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "info", value_name = "FILTER")]
    log_level: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path, &cli.log_level)?;
    }
    tracing::info!(api = %cli.api, "fieldsmith starting");

    let mut client = ClientConfig::default().with_base_url(cli.api.clone());
    if let Some(secs) = cli.timeout {
        client = client.with_timeout(Duration::from_secs(secs));
    }

    let options = UiOptions::default()
        .with_max_choices(cli.max_choices)
        .with_max_choice_length(cli.max_length)
        .with_keep_rejected_input(cli.keep_rejected_input)
        .with_help(!cli.no_help)
        .with_confirm_exit(!cli.no_confirm_exit);

    let mut ui = FieldBuilderUi::new(client).with_options(options);
    if let Some(location) = cli.location.as_deref() {
        ui = ui.with_location(location);
    }
    if let Some(drafts) = cli.drafts.clone() {
        ui = ui.with_draft_path(drafts);
    }

    let location = ui.run().map_err(Report::msg)?;
    if !location.is_empty() {
        println!("{location}");
    }
    Ok(())
}

fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
