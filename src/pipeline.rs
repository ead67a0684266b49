//! Chart to playlist orchestration.
//!
//! Every chart entry is resolved on its own, in chart order, one lookup at a
//! time. Only resolved tracks reach the playlist; unresolved entries are
//! reported and dropped without leaving a gap. The logged-in user is looked
//! up before the first search, so a missing or revoked authorization stops
//! the run before any title is touched.

use async_trait::async_trait;
use indicatif::ProgressBar;

use crate::{
    Res, info,
    resolver::{MatchMethod, ResolutionOutcome, Resolver, Scorer, TrackSearch, UnresolvedReason},
    success,
    types::{ChartEntry, Playlist, PlaylistSpec},
    warning,
};

/// Write side of the catalog: who is logged in, playlist creation and
/// track insertion.
#[async_trait]
pub trait PlaylistWriter {
    async fn current_user_id(&self) -> Res<String>;

    async fn create_playlist(&self, owner_id: &str, spec: &PlaylistSpec) -> Res<Playlist>;

    /// Appends `uris` to the playlist, keeping their order.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// `None` when nothing was resolved and no playlist was created.
    pub playlist: Option<Playlist>,
    pub uris: Vec<String>,
    pub exact: usize,
    pub fuzzy: usize,
    pub unresolved: usize,
}

/// Resolves every chart entry in order and prints one line per fuzzy match
/// or skipped entry.
///
/// Stops at the first authentication error.
pub async fn resolve_all<S, C>(
    resolver: &Resolver<'_, S, C>,
    entries: &[ChartEntry],
    year: &str,
    pb: &ProgressBar,
) -> Res<Vec<ResolutionOutcome>>
where
    S: TrackSearch,
    C: Scorer,
{
    let mut outcomes = Vec::with_capacity(entries.len());

    for entry in entries {
        pb.set_message(entry.title.clone());
        let outcome = resolver.resolve(&entry.title, year).await?;
        pb.suspend(|| report_outcome(entry, &outcome, resolver.settings().fuzzy));
        pb.inc(1);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn report_outcome(entry: &ChartEntry, outcome: &ResolutionOutcome, fuzzy: bool) {
    match outcome {
        ResolutionOutcome::Resolved(r) => match r.method {
            MatchMethod::Exact => log::debug!("#{} '{}' → {}", entry.rank, entry.title, r.uri),
            MatchMethod::Fuzzy { score } => {
                info!("Fuzzy matched: '{}' → '{}' ({:.0}%)", entry.title, r.name, score)
            }
        },
        ResolutionOutcome::Unresolved { reason, .. } => match reason {
            UnresolvedReason::SearchFailed(e) => warning!("Error with {}: {}", entry.title, e),
            UnresolvedReason::EmptyTitle => warning!("Skipping empty chart entry #{}", entry.rank),
            UnresolvedReason::NotFound if !fuzzy => warning!("{} not found.", entry.title),
            _ => {
                log::debug!("#{} '{}' unresolved: {}", entry.rank, entry.title, reason);
                warning!("{} not found, even with fuzzy search.", entry.title)
            }
        },
    }
}

/// Track URIs of the resolved outcomes, in chart order.
pub fn collect_uris(outcomes: &[ResolutionOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| o.uri().map(str::to_string))
        .collect()
}

/// Resolves the chart and builds the playlist for `date`.
///
/// An empty chart or a chart where nothing resolved produces a report without
/// a playlist. Failures of the write side and authentication failures during
/// the searches end the run.
pub async fn run<S, C, W>(
    resolver: &Resolver<'_, S, C>,
    writer: &W,
    entries: &[ChartEntry],
    date: &str,
    year: &str,
    pb: &ProgressBar,
) -> Res<RunReport>
where
    S: TrackSearch,
    C: Scorer,
    W: PlaylistWriter + ?Sized,
{
    if entries.is_empty() {
        pb.finish_and_clear();
        warning!("Chart for {} is empty, no playlist created.", date);
        return Ok(RunReport::default());
    }

    let owner_id = writer
        .current_user_id()
        .await
        .inspect_err(|_| pb.finish_and_clear())?;

    let outcomes = resolve_all(resolver, entries, year, pb).await;
    pb.finish_and_clear();
    let outcomes = outcomes?;

    let mut report = RunReport {
        uris: collect_uris(&outcomes),
        ..RunReport::default()
    };
    for outcome in &outcomes {
        match outcome {
            ResolutionOutcome::Resolved(r) if r.method == MatchMethod::Exact => report.exact += 1,
            ResolutionOutcome::Resolved(_) => report.fuzzy += 1,
            ResolutionOutcome::Unresolved { .. } => report.unresolved += 1,
        }
    }

    if report.uris.is_empty() {
        warning!("None of the {} chart entries could be matched, no playlist created.", entries.len());
        return Ok(report);
    }

    let spec = PlaylistSpec::for_date(date);
    let playlist = writer.create_playlist(&owner_id, &spec).await?;
    writer.add_tracks(&playlist.id, &report.uris).await?;

    success!("Playlist '{}' created successfully!", playlist.name);
    report.playlist = Some(playlist);
    Ok(report)
}
