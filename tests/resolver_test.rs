mod common;

use chartify::{
    error::ChartifyError,
    resolver::{
        LevenshteinRatio, MatchMethod, ResolutionOutcome, Resolver, ResolverSettings, Scorer,
        UnresolvedReason, exact_query,
    },
};
use common::{FakeSearch, ScriptedScorer, track};

#[tokio::test]
async fn exact_hit_short_circuits_fuzzy_stage() {
    let search = FakeSearch::new()
        .with(&exact_query("Smooth", "1999"), vec![track("Smooth"), track("Smooth Operator")])
        .with("Smooth", vec![track("Something Else")]);
    // would win the fuzzy stage if it ran
    let scorer = ScriptedScorer::new(&[("Something Else", 100.0)]);
    let resolver = Resolver::with_scorer(&search, scorer, ResolverSettings::default());

    let outcome = resolver.resolve("Smooth", "1999").await.unwrap();

    assert_eq!(outcome.uri(), Some("spotify:track:smooth"));
    match outcome {
        ResolutionOutcome::Resolved(r) => assert_eq!(r.method, MatchMethod::Exact),
        other => panic!("expected exact match, got {other:?}"),
    }
    assert_eq!(search.calls(), vec![("track:Smooth year:1999".to_string(), 1)]);
}

#[tokio::test]
async fn fuzzy_stage_runs_only_after_exact_miss() {
    let search = FakeSearch::new().with("No Scrubs", vec![track("No Scrubs")]);
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let outcome = resolver.resolve("No Scrubs", "1999").await.unwrap();

    assert_eq!(outcome.uri(), Some("spotify:track:no-scrubs"));
    assert_eq!(
        search.calls(),
        vec![
            ("track:No Scrubs year:1999".to_string(), 1),
            ("No Scrubs".to_string(), 5),
        ]
    );
}

#[tokio::test]
async fn fuzzy_threshold_is_inclusive() {
    let search = FakeSearch::new().with(
        "Kiss Me",
        vec![track("Kiss Me Kate"), track("Kiss Me (Remastered)"), track("Kiss You")],
    );
    let scorer = ScriptedScorer::new(&[
        ("Kiss Me Kate", 72.0),
        ("Kiss Me (Remastered)", 80.0),
        ("Kiss You", 65.0),
    ]);
    let resolver = Resolver::with_scorer(&search, scorer, ResolverSettings::default());

    match resolver.resolve("Kiss Me", "1999").await.unwrap() {
        ResolutionOutcome::Resolved(r) => {
            assert_eq!(r.name, "Kiss Me (Remastered)");
            assert_eq!(r.method, MatchMethod::Fuzzy { score: 80.0 });
        }
        other => panic!("expected fuzzy match, got {other:?}"),
    }
}

#[tokio::test]
async fn all_candidates_below_threshold_is_unresolved() {
    let search =
        FakeSearch::new().with("Believe", vec![track("Believer"), track("Make Believe")]);
    let scorer = ScriptedScorer::new(&[("Believer", 65.0), ("Make Believe", 60.0)]);
    let resolver = Resolver::with_scorer(&search, scorer, ResolverSettings::default());

    let outcome = resolver.resolve("Believe", "1999").await.unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::Unresolved {
            title: "Believe".to_string(),
            reason: UnresolvedReason::BelowThreshold {
                best_score: 65.0,
                candidate: "Believer".to_string(),
            },
        }
    );
}

#[tokio::test]
async fn ties_resolve_to_first_candidate() {
    let search = FakeSearch::new().with("Angel", vec![track("Angel A"), track("Angel B")]);
    let scorer = ScriptedScorer::new(&[("Angel A", 90.0), ("Angel B", 90.0)]);
    let resolver = Resolver::with_scorer(&search, scorer, ResolverSettings::default());

    let outcome = resolver.resolve("Angel", "1999").await.unwrap();

    assert_eq!(outcome.uri(), Some("spotify:track:angel-a"));
}

#[tokio::test]
async fn custom_threshold_is_honoured() {
    let search = FakeSearch::new().with("Bailamos", vec![track("Bailamos - Radio Edit")]);
    let scorer = ScriptedScorer::new(&[("Bailamos - Radio Edit", 85.0)]);
    let settings = ResolverSettings {
        threshold: 90.0,
        ..ResolverSettings::default()
    };
    let resolver = Resolver::with_scorer(&search, scorer, settings);

    assert!(!resolver.resolve("Bailamos", "1999").await.unwrap().is_resolved());
}

#[tokio::test]
async fn empty_title_is_unresolved_without_querying() {
    let search = FakeSearch::new();
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let outcome = resolver.resolve("   ", "1999").await.unwrap();

    assert!(matches!(
        outcome,
        ResolutionOutcome::Unresolved {
            reason: UnresolvedReason::EmptyTitle,
            ..
        }
    ));
    assert!(search.calls().is_empty());
}

#[tokio::test]
async fn search_failure_becomes_unresolved() {
    let search = FakeSearch::new().failing(&exact_query("Scar Tissue", "1999"));
    let resolver = Resolver::new(&search, ResolverSettings::default());

    match resolver.resolve("Scar Tissue", "1999").await.unwrap() {
        ResolutionOutcome::Unresolved {
            title,
            reason: UnresolvedReason::SearchFailed(message),
        } => {
            assert_eq!(title, "Scar Tissue");
            assert!(message.contains("503"));
        }
        other => panic!("expected search failure, got {other:?}"),
    }
}

#[tokio::test]
async fn failure_in_fuzzy_stage_becomes_unresolved() {
    let search = FakeSearch::new().failing("Scar Tissue");
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let outcome = resolver.resolve("Scar Tissue", "1999").await.unwrap();

    assert!(matches!(
        outcome,
        ResolutionOutcome::Unresolved {
            reason: UnresolvedReason::SearchFailed(_),
            ..
        }
    ));
}

#[tokio::test]
async fn disabled_fuzzy_stage_stops_after_exact_miss() {
    let search = FakeSearch::new().with("Waterfalls", vec![track("Waterfalls")]);
    let settings = ResolverSettings {
        fuzzy: false,
        ..ResolverSettings::default()
    };
    let resolver = Resolver::new(&search, settings);

    let outcome = resolver.resolve("Waterfalls", "1995").await.unwrap();

    assert!(matches!(
        outcome,
        ResolutionOutcome::Unresolved {
            reason: UnresolvedReason::NotFound,
            ..
        }
    ));
    assert_eq!(search.calls().len(), 1);
}

#[tokio::test]
async fn empty_fallback_window_is_not_found() {
    let search = FakeSearch::new();
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let outcome = resolver.resolve("Unknown Song", "1999").await.unwrap();

    assert!(matches!(
        outcome,
        ResolutionOutcome::Unresolved {
            reason: UnresolvedReason::NotFound,
            ..
        }
    ));
}

#[tokio::test]
async fn exact_limit_is_kept_small() {
    let search = FakeSearch::new().with(&exact_query("Tubthumping", "1997"), vec![track("Tubthumping")]);
    let settings = ResolverSettings {
        exact_limit: 50,
        ..ResolverSettings::default()
    };
    let resolver = Resolver::new(&search, settings);

    resolver.resolve("Tubthumping", "1997").await.unwrap();

    assert_eq!(search.calls()[0].1, 5);
}

#[tokio::test]
async fn default_scorer_accepts_case_differences() {
    let search = FakeSearch::new().with("Mmmbop", vec![track("Stop"), track("MMMBop")]);
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let outcome = resolver.resolve("Mmmbop", "1997").await.unwrap();

    assert_eq!(outcome.uri(), Some("spotify:track:mmmbop"));
}

#[test]
fn fuzzy_score_is_case_insensitive() {
    assert_eq!(LevenshteinRatio.score("Yesterday", "yesterday"), 100.0);
}

#[test]
fn fuzzy_score_tolerates_small_differences() {
    let score = LevenshteinRatio.score("Genie In A Bottle", "Genie in a Bottle ");
    assert_eq!(score, 100.0);

    let score = LevenshteinRatio.score("Livin' La Vida Loca", "Livin' la Vida Loca!");
    assert!(score >= 80.0, "score was {score}");
}

#[test]
fn fuzzy_score_rejects_different_titles() {
    assert!(LevenshteinRatio.score("Smooth", "Believe") < 80.0);
}

#[tokio::test]
async fn auth_failure_is_returned_not_folded() {
    let search = FakeSearch::new().unauthorized();
    let resolver = Resolver::new(&search, ResolverSettings::default());

    let result = resolver.resolve("Genie In A Bottle", "1999").await;

    assert!(matches!(result, Err(ChartifyError::Auth(_))));
}
