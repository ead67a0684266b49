use tabled::Table;

use crate::{chart, error, success, types::ChartTableRow, utils};

pub async fn chart(base_url: &str, date: Option<String>) {
    let date = match utils::date_from_option(date) {
        Ok(date) => utils::format_chart_date(date),
        Err(e) => error!("{}", e),
    };

    let entries = chart::fetch_chart(base_url, &date).await;
    if entries.is_empty() {
        return;
    }

    success!("Billboard Hot 100 for {}", date);
    let rows: Vec<ChartTableRow> = entries
        .into_iter()
        .map(|e| ChartTableRow {
            rank: e.rank,
            title: e.title,
        })
        .collect();
    println!("{}", Table::new(rows));
}
