use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use chartify::{
    cli,
    config::{self, Config},
    error,
    resolver::{DEFAULT_THRESHOLD, ResolverSettings},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the Billboard Hot 100 for a date
    Chart(ChartOptions),

    /// Create a private playlist from the Billboard Hot 100 of a date
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ChartOptions {
    /// Chart date (YYYY-MM-DD); prompted for when omitted
    #[clap(long)]
    date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Chart date (YYYY-MM-DD); prompted for when omitted
    #[clap(long)]
    date: Option<String>,

    /// Only accept exact matches
    #[clap(long)]
    no_fuzzy: bool,

    /// Minimum fuzzy score (0-100) for a match to be accepted
    #[clap(long, default_value_t = DEFAULT_THRESHOLD, value_parser = parse_threshold)]
    threshold: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=100.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err("threshold must be between 0 and 100".to_string())
    }
}

fn load_config() -> Arc<Config> {
    match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth(load_config()).await,
        Command::Chart(opt) => cli::chart(&config::chart_base_url(), opt.date).await,
        Command::Playlist(opt) => {
            let settings = ResolverSettings {
                fuzzy: !opt.no_fuzzy,
                threshold: opt.threshold,
                ..ResolverSettings::default()
            };
            cli::playlist(load_config(), opt.date, settings).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
