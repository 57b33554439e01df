use sitesearch::{Engine, EngineConfig, LoadOutcome, SearchError, SynonymTable};
use std::sync::Arc;
use tempfile::tempdir;

fn fruit_engine() -> Engine {
    let mut engine = Engine::default();
    engine.add_document("doc1", "Apple", "A red fruit.");
    engine.add_document("doc2", "Banana", "A red fruit, like an Apple.");
    engine
}

fn mixed_engine() -> Engine {
    let mut engine = Engine::default();
    engine.add_document("doc1", "Apple", "A red fruit that keeps the doctor away.");
    engine.add_document("doc2", "Banana", "A yellow fruit. Apple is also a fruit.");
    engine.add_document("doc3", "Finance Advice", "Save money and invest wisely.");
    engine.add_document("doc4", "Computer Repair", "How to fix your broken pc.");
    engine
}

#[test]
fn title_match_outranks_body_match() {
    let hits = fruit_engine().search("apple");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "doc1");
    assert_eq!(hits[1].id, "doc2");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn synonyms_pull_in_related_documents() {
    let mut engine = Engine::default();
    engine.add_document("doc1", "Fast Cars", "The quick brown fox jumps over the lazy dog.");
    engine.add_document("doc2", "Speedy Computers", "My laptop is very fast and rapid.");
    let hits = engine.search("fast");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "doc2");
    assert_eq!(hits[1].id, "doc1");
    assert!(hits[0].score >= hits[1].score);
}

#[test]
fn hits_carry_stored_fields() {
    let hits = fruit_engine().search("banana");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Banana");
    assert_eq!(hits[0].body, "A red fruit, like an Apple.");
    assert!(hits[0].score > 0.0);
}

#[test]
fn typo_within_two_edits_is_corrected() {
    let engine = mixed_engine();
    let hits = engine.search("fiannce");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "doc3");

    let hits = engine.search("cmoputer");
    assert_eq!(hits[0].id, "doc4");
}

#[test]
fn typo_three_edits_away_finds_nothing() {
    let mut engine = Engine::default();
    engine.add_document("doc3", "Finance", "Save money wisely.");
    assert!(engine.search("fxyznce").is_empty());
}

#[test]
fn unknown_terms_score_nothing() {
    assert!(mixed_engine().search("zzzzzzzzzz").is_empty());
}

#[test]
fn stop_words_only_query_is_not_an_error() {
    assert!(mixed_engine().search("how do i").is_empty());
}

#[test]
fn injected_synonym_table_is_used() {
    let config = EngineConfig {
        synonyms: Arc::new(SynonymTable::from_pairs([("auto", ["car"])])),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);
    engine.add_document("1", "Cars", "for sale");
    assert_eq!(engine.search("auto").len(), 1);
    assert!(Engine::default().search("auto").is_empty());
}

#[test]
fn equal_scores_keep_insertion_order() {
    let mut engine = Engine::default();
    engine.add_document("first", "Kiwi", "green");
    engine.add_document("second", "Kiwi", "green");
    let hits = engine.search("kiwi");
    assert_eq!(hits[0].id, "first");
    assert_eq!(hits[1].id, "second");
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn upsert_corrects_like_a_fresh_engine() {
    let mut upserted = Engine::default();
    upserted.add_document("a", "Card", "");
    upserted.add_document("b", "Cart", "");
    upserted.upsert_document("a", "Wallet", "");

    let mut fresh = Engine::default();
    fresh.add_document("a", "Wallet", "");
    fresh.add_document("b", "Cart", "");

    let ids = |engine: &Engine| engine.search("carx").into_iter().map(|h| h.id).collect::<Vec<_>>();
    assert_eq!(ids(&fresh), vec!["b"]);
    assert_eq!(ids(&upserted), ids(&fresh));
}

#[test]
fn save_then_load_reproduces_search() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("index.json");
    let engine = mixed_engine();
    engine.save(&path).unwrap();

    let mut restored = Engine::default();
    assert_eq!(restored.load(&path).unwrap(), LoadOutcome::Loaded);
    assert_eq!(restored.len(), engine.len());
    for query in ["apple", "fruit", "fiannce", "computer help", "red fruit", "nothing here"] {
        let a = engine.search(query);
        let b = restored.search(query);
        assert_eq!(a.len(), b.len(), "query {query:?}");
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert!((x.score - y.score).abs() < 1e-9);
        }
    }
}

#[test]
fn load_replaces_rather_than_merges() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    fruit_engine().save(&path).unwrap();

    let mut engine = mixed_engine();
    engine.load(&path).unwrap();
    assert_eq!(engine.len(), 2);
    assert!(engine.search("finance").is_empty());
}

#[test]
fn missing_snapshot_keeps_state() {
    let dir = tempdir().unwrap();
    let mut engine = fruit_engine();
    let outcome = engine.load(dir.path().join("nope.json")).unwrap();
    assert_eq!(outcome, LoadOutcome::Missing);
    assert_eq!(engine.len(), 2);
}

#[test]
fn malformed_snapshot_fails_without_mutation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");

    std::fs::write(&path, "{ not json").unwrap();
    let mut engine = fruit_engine();
    assert!(matches!(engine.load(&path), Err(SearchError::Parse(_))));

    std::fs::write(&path, r#"{"documents": [], "index": []}"#).unwrap();
    assert!(matches!(engine.load(&path), Err(SearchError::Parse(_))));

    assert_eq!(engine.len(), 2);
    assert_eq!(engine.search("apple")[0].id, "doc1");
}

#[test]
fn inconsistent_snapshot_fails_without_mutation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    fruit_engine().save(&path).unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["index"][0][1] = serde_json::json!([9]);
    std::fs::write(&path, value.to_string()).unwrap();

    let mut engine = mixed_engine();
    assert!(matches!(engine.load(&path), Err(SearchError::InvalidSnapshot(_))));
    assert_eq!(engine.len(), 4);
    assert_eq!(engine.search("finance")[0].id, "doc3");
}

#[test]
fn save_to_unwritable_location_is_an_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let err = fruit_engine().save(blocker.join("index.json")).unwrap_err();
    assert!(matches!(err, SearchError::Io(_)));
}
