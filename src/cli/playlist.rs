use std::sync::Arc;

use crate::{
    chart,
    config::Config,
    error, info, pipeline,
    resolver::{Resolver, ResolverSettings},
    spotify::SpotifyClient,
    success, utils, warning,
};

pub async fn playlist(config: Arc<Config>, date: Option<String>, settings: ResolverSettings) {
    let date = match utils::date_from_option(date) {
        Ok(date) => date,
        Err(e) => error!("{}", e),
    };
    let chart_date = utils::format_chart_date(date);
    let year = utils::chart_year(date);

    info!("Fetching Billboard Hot 100 for {}", chart_date);
    let entries = chart::fetch_chart(&config.chart_url, &chart_date).await;
    if entries.is_empty() {
        warning!("Nothing to add for {}.", chart_date);
        return;
    }
    success!("Found {} chart entries", entries.len());

    let client = match SpotifyClient::connect(Arc::clone(&config)).await {
        Ok(client) => client,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };

    let resolver = Resolver::new(&client, settings);
    let pb = utils::progress_bar(entries.len() as u64);

    match pipeline::run(&resolver, &client, &entries, &chart_date, &year, &pb).await {
        Ok(report) => info!(
            "{} exact, {} fuzzy, {} not found",
            report.exact, report.fuzzy, report.unresolved
        ),
        Err(e) => error!("Playlist run aborted: {}", e),
    }
}
