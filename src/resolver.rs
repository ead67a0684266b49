//! Chart title to catalog track resolution.
//!
//! A chart title is resolved in two stages:
//!
//! 1. **Exact stage** - a scoped `track:<title> year:<year>` query. The first
//!    hit is trusted as-is, the catalog's ranking is not second-guessed.
//! 2. **Fuzzy stage** - only when the exact stage finds nothing. The bare
//!    title is searched and every candidate name is scored against the title
//!    on a 0-100 scale. The best candidate is accepted when its score reaches
//!    the threshold (inclusive, 80 by default).
//!
//! A wrong track in the playlist is worse than a missing one, so the threshold
//! is deliberately high. Search failures do not escape [`Resolver::resolve`]:
//! they become an [`UnresolvedReason::SearchFailed`] outcome for that title
//! only. Authentication failures are the exception, no later title could
//! succeed either, so they are returned as errors.

use std::fmt;

use async_trait::async_trait;

use crate::{Res, error::ChartifyError, types::Track};

/// Minimum fuzzy score accepted by default (inclusive).
pub const DEFAULT_THRESHOLD: f64 = 80.0;
/// Result limit of the exact query.
pub const DEFAULT_EXACT_LIMIT: u32 = 1;
/// Number of candidates scored by the fuzzy stage.
pub const DEFAULT_FUZZY_LIMIT: u32 = 5;

/// Free-text track search against a catalog.
///
/// Implementations return candidates in the catalog's ranking order.
#[async_trait]
pub trait TrackSearch {
    async fn search(&self, query: &str, limit: u32) -> Res<Vec<Track>>;
}

/// Similarity between a chart title and a candidate name, 0 to 100.
pub trait Scorer {
    fn score(&self, title: &str, candidate: &str) -> f64;
}

/// Case-insensitive normalized Levenshtein similarity scaled to 0-100.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl Scorer for LevenshteinRatio {
    fn score(&self, title: &str, candidate: &str) -> f64 {
        let title = title.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        strsim::normalized_levenshtein(&title, &candidate) * 100.0
    }
}

/// Tuning of a [`Resolver`].
///
/// The defaults reproduce the standard behavior: exact search with a single
/// result, then a fuzzy fallback over five candidates accepted at a score of
/// 80 or more. Turning `fuzzy` off leaves the exact stage alone in charge.
///
/// # Examples
///
/// ```
/// let strict = ResolverSettings {
///     fuzzy: false,
///     ..ResolverSettings::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    /// Whether the fuzzy stage runs after an exact miss.
    pub fuzzy: bool,
    /// Minimum fuzzy score (inclusive) for a candidate to be accepted.
    pub threshold: f64,
    /// Result limit of the exact query, kept within 1..=5.
    pub exact_limit: u32,
    /// Size of the fuzzy candidate window.
    pub fuzzy_limit: u32,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            fuzzy: true,
            threshold: DEFAULT_THRESHOLD,
            exact_limit: DEFAULT_EXACT_LIMIT,
            fuzzy_limit: DEFAULT_FUZZY_LIMIT,
        }
    }
}

/// Which stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchMethod {
    /// First hit of the scoped `track:`/`year:` query, not scored.
    Exact,
    /// Best fallback candidate, with the score that cleared the threshold.
    Fuzzy { score: f64 },
}

/// A chart title matched to a catalog track.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Track URI added to the playlist, e.g. `spotify:track:<id>`.
    pub uri: String,
    /// Catalog name of the matched track, shown for fuzzy matches.
    pub name: String,
    pub method: MatchMethod,
}

/// Why a chart title did not resolve to a track.
#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedReason {
    /// The chart entry had no text; nothing was queried.
    EmptyTitle,
    /// No candidate came back (or the fuzzy stage is disabled).
    NotFound,
    /// The best fuzzy candidate scored under the threshold.
    BelowThreshold { best_score: f64, candidate: String },
    /// The search itself failed.
    SearchFailed(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::EmptyTitle => write!(f, "empty title"),
            UnresolvedReason::NotFound => write!(f, "no matching track"),
            UnresolvedReason::BelowThreshold {
                best_score,
                candidate,
            } => write!(f, "best candidate '{candidate}' only scored {best_score:.0}%"),
            UnresolvedReason::SearchFailed(e) => write!(f, "search failed: {e}"),
        }
    }
}

/// Result of resolving one chart title: exactly one track or none.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Resolved(Resolution),
    Unresolved {
        title: String,
        reason: UnresolvedReason,
    },
}

impl ResolutionOutcome {
    /// URI of the matched track, `None` when unresolved.
    pub fn uri(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Resolved(r) => Some(&r.uri),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    fn unresolved(title: &str, reason: UnresolvedReason) -> Self {
        ResolutionOutcome::Unresolved {
            title: title.to_string(),
            reason,
        }
    }
}

/// Query used by the exact stage.
pub fn exact_query(title: &str, year: &str) -> String {
    format!("track:{title} year:{year}")
}

/// Two-stage title resolver over a [`TrackSearch`] backend.
///
/// The resolver borrows the search backend and owns its [`Scorer`]; titles
/// are resolved one at a time and independently of each other, so duplicate
/// chart entries are searched again.
///
/// # Examples
///
/// ```
/// let resolver = Resolver::new(&client, ResolverSettings::default());
/// let outcome = resolver.resolve("Genie In A Bottle", "1999").await?;
/// if let Some(uri) = outcome.uri() {
///     println!("matched {uri}");
/// }
/// ```
pub struct Resolver<'a, S, C = LevenshteinRatio> {
    search: &'a S,
    scorer: C,
    settings: ResolverSettings,
}

impl<'a, S: TrackSearch> Resolver<'a, S, LevenshteinRatio> {
    /// Creates a resolver scoring with [`LevenshteinRatio`].
    pub fn new(search: &'a S, settings: ResolverSettings) -> Self {
        Self::with_scorer(search, LevenshteinRatio, settings)
    }
}

impl<'a, S: TrackSearch, C: Scorer> Resolver<'a, S, C> {
    /// Creates a resolver with a custom fuzzy scorer.
    pub fn with_scorer(search: &'a S, scorer: C, settings: ResolverSettings) -> Self {
        Self {
            search,
            scorer,
            settings,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolves `title` for the chart `year`.
    ///
    /// # Errors
    ///
    /// Only [`ChartifyError::Auth`] is returned. Every other search failure is
    /// folded into [`UnresolvedReason::SearchFailed`].
    pub async fn resolve(&self, title: &str, year: &str) -> Res<ResolutionOutcome> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(ResolutionOutcome::unresolved(title, UnresolvedReason::EmptyTitle));
        }

        match self.try_resolve(title, year).await {
            Ok(outcome) => Ok(outcome),
            Err(e @ ChartifyError::Auth(_)) => Err(e),
            Err(e) => {
                log::debug!("Search for '{title}' failed: {e}");
                Ok(ResolutionOutcome::unresolved(
                    title,
                    UnresolvedReason::SearchFailed(e.to_string()),
                ))
            }
        }
    }

    async fn try_resolve(&self, title: &str, year: &str) -> Res<ResolutionOutcome> {
        let query = exact_query(title, year);
        let limit = self.settings.exact_limit.clamp(1, 5);
        log::debug!("Exact search: {query} (limit {limit})");

        let hits = self.search.search(&query, limit).await?;
        if let Some(track) = hits.into_iter().next() {
            return Ok(ResolutionOutcome::Resolved(Resolution {
                uri: track.uri,
                name: track.name,
                method: MatchMethod::Exact,
            }));
        }

        if !self.settings.fuzzy {
            return Ok(ResolutionOutcome::unresolved(title, UnresolvedReason::NotFound));
        }

        log::debug!("Fuzzy search: {title} (limit {})", self.settings.fuzzy_limit);
        let candidates = self.search.search(title, self.settings.fuzzy_limit).await?;
        Ok(self.pick_best(title, candidates))
    }

    /// Scores the fallback candidates and applies the threshold.
    ///
    /// Only a strictly higher score replaces the current best, so ties go to
    /// the candidate the catalog ranked first.
    pub fn pick_best(&self, title: &str, candidates: Vec<Track>) -> ResolutionOutcome {
        let mut best: Option<(Track, f64)> = None;
        for candidate in candidates {
            let score = self.scorer.score(title, &candidate.name);
            log::debug!("  '{}' scored {score:.1}", candidate.name);
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((candidate, score));
            }
        }

        match best {
            None => ResolutionOutcome::unresolved(title, UnresolvedReason::NotFound),
            Some((track, score)) if score >= self.settings.threshold => {
                ResolutionOutcome::Resolved(Resolution {
                    uri: track.uri,
                    name: track.name,
                    method: MatchMethod::Fuzzy { score },
                })
            }
            Some((track, score)) => ResolutionOutcome::unresolved(
                title,
                UnresolvedReason::BelowThreshold {
                    best_score: score,
                    candidate: track.name,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_ratio_ignores_case() {
        assert_eq!(LevenshteinRatio.score("Yesterday", "yesterday"), 100.0);
    }

    #[test]
    fn levenshtein_ratio_is_symmetric() {
        let a = LevenshteinRatio.score("Smooth", "Smooth (feat. Rob Thomas)");
        let b = LevenshteinRatio.score("Smooth (feat. Rob Thomas)", "Smooth");
        assert_eq!(a, b);
        assert!(a < DEFAULT_THRESHOLD);
    }

    #[test]
    fn exact_query_scopes_title_and_year() {
        assert_eq!(exact_query("Genie In A Bottle", "1999"), "track:Genie In A Bottle year:1999");
    }
}
