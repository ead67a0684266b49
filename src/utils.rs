use std::io::{self, Write};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Datelike, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{Res, error::ChartifyError};

pub const DATE_PROMPT: &str =
    "Which year do you want to travel to? Type the date in this format YYYY-MM-DD: ";

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// Parses a chart date in `YYYY-MM-DD` form.
pub fn parse_chart_date(input: &str) -> Res<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ChartifyError::InvalidDate(input.to_string()))
}

/// Canonical `YYYY-MM-DD` rendering used in the chart URL and playlist name.
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn chart_year(date: NaiveDate) -> String {
    date.year().to_string()
}

/// Asks for the chart date on stdin.
pub fn prompt_date() -> Res<String> {
    print!("{DATE_PROMPT}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Takes the date from the command line or prompts for it, then validates it.
pub fn date_from_option(date: Option<String>) -> Res<NaiveDate> {
    let input = match date {
        Some(date) => date,
        None => prompt_date()?,
    };
    parse_chart_date(&input)
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
