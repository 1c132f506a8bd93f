//! Search session behavior: result partitioning, substitute ranking
//! through the collaborator, and translation toggle lifecycle.

use std::sync::Arc;

use genmed_core::models::CatalogItem;
use genmed_search::{SearchSession, StaticCatalogSource};

fn med(id: &str, brand: &str, salt: &str, price: f64) -> CatalogItem {
    let mut item = CatalogItem::new(id, brand);
    item.salt_composition = salt.to_string();
    item.price = Some(price.into());
    item
}

fn ai_med(id: &str, brand: &str, explanation: &str) -> CatalogItem {
    let mut item = CatalogItem::new(id, brand);
    item.is_ai_generated = true;
    item.explanation = Some(explanation.to_string());
    item
}

fn fixture() -> Vec<CatalogItem> {
    vec![
        med("MED-DOLO", "Dolo 650", "Paracetamol (650mg)", 33.60),
        med("MED-CALPOL", "Calpol 650", "Paracetamol (650mg)", 30.75),
        med("MED-PCM", "PCM 650", "paracetamol 650mg", 14.00),
        med("MED-AZEE", "Azee 500", "Azithromycin (500mg)", 119.50),
        ai_med("AI-1", "Paracetamol Generic", "A generic antipyretic."),
    ]
}

fn session() -> (SearchSession, StaticCatalogSource) {
    let source = StaticCatalogSource::new(fixture());
    let session = SearchSession::new(Arc::new(source.clone()), "hi");
    (session, source)
}

#[tokio::test]
async fn run_partitions_exact_and_generated() {
    let (session, source) = session();

    let results = session.run("paracetamol").await.unwrap();

    assert_eq!(results.exact.len(), 3);
    assert_eq!(results.generated.len(), 1);
    assert_eq!(results.generated[0].id, "AI-1");
    assert_eq!(source.search_calls(), vec!["paracetamol".to_string()]);
}

#[tokio::test]
async fn blank_query_skips_the_source() {
    let (session, source) = session();

    let results = session.run("   ").await.unwrap();

    assert!(results.is_empty());
    assert!(source.search_calls().is_empty());
}

#[tokio::test]
async fn unmatched_query_stores_empty_results() {
    let (session, source) = session();
    session.run("paracetamol").await.unwrap();

    // Zero matches is a stored outcome, distinct from an error.
    let empty = session.run("no such medicine").await.unwrap();
    assert!(empty.is_empty());
    assert_eq!(session.results(), empty);
    assert_eq!(source.search_calls().len(), 2);
}

#[tokio::test]
async fn substitutes_ranked_cheapest_first() {
    let (session, _source) = session();

    let dolo = med("MED-DOLO", "Dolo 650", "Paracetamol (650mg)", 33.60);
    let subs = session.substitutes_for(&dolo).await.unwrap();

    let ids: Vec<&str> = subs.iter().map(|s| s.item.id.as_str()).collect();
    assert_eq!(ids, vec!["MED-PCM", "MED-CALPOL"]);
    assert!(subs[0].is_best);
    assert!(!subs[1].is_best);
    assert_eq!(subs[0].savings_percent, 58);
    assert!(subs.iter().all(|s| s.item.id != "MED-DOLO"));
    assert!(subs.iter().all(|s| s.item.id != "MED-AZEE"));
}

#[tokio::test]
async fn toggle_translation_round_trip() {
    let (session, source) = session();
    source.set_translation("A generic antipyretic.", "एक सामान्य ज्वरनाशक।");

    let results = session.run("paracetamol").await.unwrap();
    let generated = &results.generated[0];
    assert_eq!(
        session.display_explanation(generated).as_deref(),
        Some("A generic antipyretic.")
    );

    session.toggle_translation(generated).await;
    assert!(session.is_translated(&generated.id));
    assert_eq!(
        session.display_explanation(generated).as_deref(),
        Some("एक सामान्य ज्वरनाशक।")
    );

    // Second toggle restores the original without another upstream call.
    session.toggle_translation(generated).await;
    assert!(!session.is_translated(&generated.id));
    assert_eq!(
        session.display_explanation(generated).as_deref(),
        Some("A generic antipyretic.")
    );
    assert_eq!(source.translate_calls().len(), 1);
}

#[tokio::test]
async fn new_query_clears_translations() {
    let (session, _source) = session();

    let results = session.run("paracetamol").await.unwrap();
    let generated = results.generated[0].clone();
    session.toggle_translation(&generated).await;
    assert!(session.is_translated(&generated.id));

    session.run("azithromycin").await.unwrap();
    assert!(!session.is_translated(&generated.id));
}

#[tokio::test]
async fn failed_translation_stays_original() {
    let (session, source) = session();
    source.set_fail_translate(true);

    let results = session.run("paracetamol").await.unwrap();
    let generated = &results.generated[0];

    session.toggle_translation(generated).await;

    assert!(!session.is_translated(&generated.id));
    assert_eq!(
        session.display_explanation(generated).as_deref(),
        Some("A generic antipyretic.")
    );
}

#[tokio::test]
async fn toggle_without_explanation_is_a_noop() {
    let (session, source) = session();

    let plain = med("MED-DOLO", "Dolo 650", "Paracetamol (650mg)", 33.60);
    session.toggle_translation(&plain).await;

    assert!(!session.is_translated(&plain.id));
    assert!(source.translate_calls().is_empty());
}
