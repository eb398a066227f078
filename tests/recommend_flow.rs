//! Recommendation flow integration tests: filtering, weighting, and the
//! session state machine over small hand-built catalogs.

use std::collections::BTreeSet;

use assert_approx_eq::assert_approx_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lunchpick::catalog::{Catalog, Category, MenuItem};
use lunchpick::select::{build_weighted_pool, filter_candidates, ExclusionFilter};
use lunchpick::session::{
    ImmediateTicker, RecommendOutcome, RecommendationSession, SessionOptions, SessionState,
};
use lunchpick::taste::PreferenceStore;

fn item(id: &str, category: Category, tags: &[&str]) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: id.to_uppercase(),
        name_en: id.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: String::new(),
        icon: String::new(),
    }
}

/// A(korean, spicy), B(korean, soup), C(chinese, soup).
fn abc() -> Catalog {
    Catalog::from_items(vec![
        item("A", Category::Korean, &["spicy"]),
        item("B", Category::Korean, &["soup"]),
        item("C", Category::Chinese, &["soup"]),
    ])
    .unwrap()
}

fn session(catalog: Catalog, seed: u64) -> RecommendationSession<ChaCha8Rng, ImmediateTicker> {
    RecommendationSession::new(
        catalog,
        PreferenceStore::in_memory(),
        ChaCha8Rng::seed_from_u64(seed),
        ImmediateTicker,
        SessionOptions::default(),
    )
}

fn ids(items: &[&MenuItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

// =============================================================================
// Candidate filtering scenarios
// =============================================================================

#[test]
fn korean_with_no_spicy_yields_only_b() {
    let catalog = abc();
    let categories: BTreeSet<Category> = [Category::Korean].into_iter().collect();
    let filters: BTreeSet<ExclusionFilter> = [ExclusionFilter::NoSpicy].into_iter().collect();
    let eligible = filter_candidates(catalog.items(), &categories, &filters, &BTreeSet::new());
    assert_eq!(ids(&eligible), vec!["B"]);
}

#[test]
fn disliked_a_leaves_b_and_c() {
    let catalog = abc();
    let categories: BTreeSet<Category> =
        [Category::Korean, Category::Chinese].into_iter().collect();
    let dislikes: BTreeSet<String> = ["A".to_string()].into_iter().collect();
    let eligible = filter_candidates(catalog.items(), &categories, &BTreeSet::new(), &dislikes);
    assert_eq!(ids(&eligible), vec!["B", "C"]);
}

#[test]
fn liked_b_pool_is_abbb() {
    let catalog = abc();
    let eligible: Vec<&MenuItem> = catalog.items()[..2].iter().collect();
    let likes: BTreeSet<String> = ["B".to_string()].into_iter().collect();
    let pool = build_weighted_pool(&eligible, &likes, 3);
    assert_eq!(ids(&pool), vec!["A", "B", "B", "B"]);
}

// =============================================================================
// Session behaviour
// =============================================================================

#[test]
fn full_cycle_records_one_history_entry() {
    let mut s = session(abc(), 1);
    assert_eq!(s.recommend(), RecommendOutcome::Started);
    let mut intermediates = 0;
    while let Some(frame) = s.tick() {
        if !frame.is_final() {
            intermediates += 1;
        }
    }
    assert_eq!(intermediates, 20);
    assert_eq!(s.state(), SessionState::Settled);
    assert_eq!(s.preferences().history().len(), 1);
    assert_eq!(s.preferences().history()[0], *s.result().unwrap());
}

#[test]
fn reentrant_recommend_is_ignored() {
    let mut s = session(abc(), 2);
    s.recommend();
    for _ in 0..5 {
        s.tick();
        assert_eq!(s.recommend(), RecommendOutcome::Busy);
    }
    assert!(s.result().is_none());
    assert!(s.preferences().history().is_empty());

    s.run_to_completion();
    assert_eq!(s.preferences().history().len(), 1);
    assert!(s.tick().is_none());
}

#[test]
fn no_candidates_does_not_draw() {
    let mut s = session(abc(), 3);
    s.toggle_category(Category::Japanese);
    s.toggle_category(Category::Western);
    s.toggle_category(Category::Snack);
    s.toggle_category(Category::Korean);
    s.toggle_filter(ExclusionFilter::NoSpicy);
    s.dislike("C");
    assert!(s.eligible().is_empty());
    assert_eq!(s.recommend(), RecommendOutcome::NoCandidates);
    assert_eq!(s.state(), SessionState::Idle);
    assert!(s.display_menu().is_none());
    assert!(s.preferences().history().is_empty());
}

#[test]
fn history_holds_five_distinct_most_recent() {
    let catalog = Catalog::embedded().unwrap();
    let mut s = session(catalog, 4);
    for _ in 0..40 {
        s.recommend();
        s.run_to_completion();
        let history = s.preferences().history();
        assert!(history.len() <= 5);
        let distinct: BTreeSet<&str> = history.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(distinct.len(), history.len());
        assert_eq!(history[0], *s.result().unwrap());
    }
    assert_eq!(s.preferences().history().len(), 5);
}

#[test]
fn liked_item_wins_three_times_as_often() {
    // Eligible: A and B only (korean, no filters). B liked → P(B) = 3/4.
    let catalog = abc();
    let mut s = RecommendationSession::new(
        catalog,
        PreferenceStore::in_memory(),
        ChaCha8Rng::seed_from_u64(99),
        ImmediateTicker,
        SessionOptions {
            spin_frames: 0,
            like_weight: 3,
        },
    );
    s.toggle_category(Category::Chinese);
    s.toggle_category(Category::Japanese);
    s.toggle_category(Category::Western);
    s.toggle_category(Category::Snack);
    s.like("B");

    let trials = 20_000;
    let mut wins = 0;
    for _ in 0..trials {
        s.recommend();
        if s.run_to_completion().unwrap().id == "B" {
            wins += 1;
        }
    }
    assert_approx_eq!(wins as f64 / trials as f64, 0.75, 0.02);
}

#[test]
fn disliking_history_entry_keeps_it_in_history() {
    let mut s = session(abc(), 5);
    s.recommend();
    let id = s.run_to_completion().unwrap().id.clone();
    s.dislike(&id);
    assert_eq!(s.preferences().history()[0].id, id);
    assert!(s.eligible().iter().all(|i| i.id != id));
}
