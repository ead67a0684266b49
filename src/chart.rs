//! Billboard Hot 100 scraping.
//!
//! The chart page lists every position as a nested list item whose heading
//! holds the song title. Only the shape of the result is relied upon
//! downstream: an ordered list of trimmed titles. Any failure while fetching
//! or parsing degrades to an empty (or partial) chart instead of an error, so
//! a markup change upstream never reaches the resolver as a crash.

use reqwest::{Client, header::USER_AGENT};
use scraper::{Html, Selector};

use crate::{Res, types::ChartEntry, warning};

/// Selector for the title headings on the chart page.
pub const TITLE_SELECTOR: &str = "li ul li h3";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Builds the chart URL for a date, e.g. `.../hot-100/1999-07-10`.
pub fn chart_url(base: &str, date: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), date)
}

/// Extracts the chart titles from a chart page in on-page order.
///
/// Whitespace around each title is trimmed and empty headings are skipped
/// without shifting the rank of the titles after them.
/// Markup that does not contain the expected structure yields an empty list.
pub fn parse_chart(html: &str) -> Vec<ChartEntry> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(TITLE_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            log::error!("Invalid chart selector {TITLE_SELECTOR}: {e}");
            return Vec::new();
        }
    };

    let entries: Vec<ChartEntry> = document
        .select(&selector)
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .enumerate()
        .filter(|(_, title)| !title.is_empty())
        .map(|(i, title)| ChartEntry { rank: i + 1, title })
        .collect();

    log::debug!("Parsed {} chart entries", entries.len());
    entries
}

/// Downloads and parses the chart for `date` (`YYYY-MM-DD`) below `base_url`.
pub async fn fetch_chart(base_url: &str, date: &str) -> Vec<ChartEntry> {
    let url = chart_url(base_url, date);

    let html = match fetch_html(&url).await {
        Ok(html) => html,
        Err(e) => {
            warning!("Failed to fetch chart from {}: {}", url, e);
            return Vec::new();
        }
    };

    let entries = parse_chart(&html);
    if entries.is_empty() {
        warning!(
            "No chart entries found at {}. The page layout may have changed.",
            url
        );
    }
    entries
}

async fn fetch_html(url: &str) -> Res<String> {
    log::debug!("GET {url}");
    let response = Client::new()
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.text().await?)
}
