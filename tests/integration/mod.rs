//! End-to-end tests against a file-backed database.
//!
//! Unit tests cover each module in isolation with in-memory databases;
//! these exercise the whole stack the way a real deployment runs it,
//! including durability across process-style reopen.

use mnemo::{
    ConfidenceTier, Database, HeuristicWeights, MemoryStore, RetrievalConfig, RetrievalEngine,
};

fn file_backed_store(dir: &tempfile::TempDir) -> MemoryStore {
    let db = Database::new_with_path(&dir.path().join("memories.db")).unwrap();
    MemoryStore::new(&db)
}

#[test]
fn remember_then_ask_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir);

    store
        .remember("My sister's phone number is 555-1234", &["family"], "cli")
        .unwrap();
    store.remember("The meeting room is B-204", &["work"], "cli").unwrap();
    store.remember("I parked on level 3", &[], "cli").unwrap();

    let results = store.ask("sister phone", 5).unwrap();
    assert!(!results.is_empty());
    assert!(results[0].memory.text.contains("555-1234"));
    assert!(results[0].score > 0.0);
}

#[test]
fn memories_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.db");

    let id = {
        let db = Database::new_with_path(&path).unwrap();
        let store = MemoryStore::new(&db);
        store.remember("the safe combination is 12-34-56", &[], "").unwrap()
    };

    let db = Database::new_with_path(&path).unwrap();
    let store = MemoryStore::new(&db);

    let memory = store.get(id).unwrap().unwrap();
    assert_eq!(memory.text, "the safe combination is 12-34-56");

    // The index came back with the rows: full-text search still works.
    let results = store.ask("combination", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].memory.id, id);
}

#[test]
fn deletion_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.db");

    {
        let db = Database::new_with_path(&path).unwrap();
        let store = MemoryStore::new(&db);
        let id = store.remember("temporary token xylophone", &[], "").unwrap();
        store.delete(id).unwrap();
    }

    let db = Database::new_with_path(&path).unwrap();
    let store = MemoryStore::new(&db);
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.ask("xylophone", 5).unwrap().is_empty());
}

#[test]
fn retrieval_degrades_through_every_tier() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir);
    let engine = RetrievalEngine::new(store);

    // Empty store: nothing to offer.
    let outcome = engine.answer("where are my keys", 5).unwrap();
    assert_eq!(outcome.tier, ConfidenceTier::NoMatch);

    engine
        .store()
        .remember("the keys are on the kitchen hook", &[], "")
        .unwrap();

    // Indexed term: lexical tier.
    let outcome = engine.answer("kitchen", 5).unwrap();
    assert_eq!(outcome.tier, ConfidenceTier::Lexical);

    // Broken index syntax with recognizable vocabulary: heuristic tier.
    let outcome = engine.answer("\"kitchen hook", 5).unwrap();
    assert_eq!(outcome.tier, ConfidenceTier::Heuristic);
    assert!(outcome.results[0].memory.text.contains("hook"));

    // Nothing matches anywhere: newest record at zero confidence.
    let outcome = engine.answer("quasar luminosity", 5).unwrap();
    assert_eq!(outcome.tier, ConfidenceTier::LastResort);
    assert_eq!(outcome.results[0].score, 0.0);
}

#[test]
fn heuristic_tier_respects_configured_window() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir);
    let engine = RetrievalEngine::with_config(
        store,
        RetrievalConfig {
            recent_window: 1,
            weights: HeuristicWeights::default(),
        },
    );

    engine.store().remember("birthday gift idea: telescope", &[], "").unwrap();
    engine.store().remember("unrelated filler entry", &[], "").unwrap();

    // The telescope record is outside the one-record window and the
    // malformed syntax keeps the index out of play.
    let outcome = engine.answer("\"birthday telescope", 5).unwrap();
    assert_eq!(outcome.tier, ConfidenceTier::LastResort);
}

#[test]
fn vietnamese_text_round_trips_with_language_tag() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir);

    let id = store
        .remember("Phòng họp ở tầng 3", &[], "cli")
        .unwrap();

    let memory = store.get(id).unwrap().unwrap();
    assert_eq!(memory.language, "vi");

    // Diacritic folding lets an unaccented query find the record.
    let results = store.ask("phong hop", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].memory.id, id);
}

#[test]
fn concurrent_writers_through_the_pool() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..10 {
                    store
                        .remember(&format!("worker {} note {}", worker, i), &[], "")
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 40);
    let results = store.ask("worker", 50).unwrap();
    assert_eq!(results.len(), 40);
}
