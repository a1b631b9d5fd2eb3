//! End-to-end session behavior: worker round trips, stale responses, and
//! favorites surviving a restart on disk.

use cinefile::app::Event;
use cinefile::domain::MovieSummary;
use cinefile::storage::FAVORITES_KEY;
use cinefile::{initialize, Config, Session};
use std::path::Path;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const TIMEOUT: Duration = Duration::from_secs(10);

/// Writes a catalog of 15 movies, every third one tagged "Action".
fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let entries: Vec<serde_json::Value> = (1..=15)
        .map(|i| {
            let genres = if i % 3 == 0 { vec!["Action", "Drama"] } else { vec!["Comedy"] };
            serde_json::json!({
                "id": format!("tt{i:04}"),
                "title": format!("Movie {i}"),
                "year": "2001",
                "kind": "movie",
                "poster_url": "N/A",
                "genres": genres,
                "director": if i == 7 { "Greta Example" } else { "Someone Else" },
            })
        })
        .collect();

    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_string(&entries).expect("serialize catalog")).expect("write catalog");
    path
}

fn config(dir: &TempDir, delay_ms: u64) -> Config {
    Config {
        data_dir: Some(dir.path().join("data")),
        catalog_file: Some(write_catalog(dir.path())),
        query_delay_ms: delay_ms,
        ..Default::default()
    }
}

fn open(config: &Config) -> Session {
    initialize(config).expect("session should start")
}

#[test]
fn genre_search_counts_every_match() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = open(&config(&dir, 0));

    session.send(Event::GenreSelected("Action".into())).unwrap();
    session.wait_idle(TIMEOUT).unwrap();

    let state = session.store().state();
    assert_eq!(state.results.len(), 5);
    assert_eq!(state.total_results, 5);
    assert_eq!(state.last_error, None);
}

#[test]
fn pages_concatenate_to_the_full_match_list() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = open(&config(&dir, 0));

    session.send(Event::SearchTextChanged("movie".into())).unwrap();
    session.wait_idle(TIMEOUT).unwrap();
    assert_eq!(session.store().state().total_results, 15);
    assert_eq!(session.store().state().total_pages(), 2);

    let mut ids: Vec<String> = session.store().state().results.iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids.len(), 10);

    session.send(Event::PageRequested(2)).unwrap();
    session.wait_idle(TIMEOUT).unwrap();
    let state = session.store().state();
    assert_eq!(state.total_results, 15);
    ids.extend(state.results.iter().map(|m| m.id.clone()));

    let expected: Vec<String> = (1..=15).map(|i| format!("tt{i:04}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn unmatched_search_reports_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = open(&config(&dir, 0));

    session.send(Event::SearchTextChanged("nonexistent-xyz".into())).unwrap();
    session.wait_idle(TIMEOUT).unwrap();

    let state = session.store().state();
    assert!(state.results.is_empty());
    assert_eq!(state.total_results, 0);
    assert_eq!(state.last_error.as_deref(), Some("Movie not found!"));
    assert!(!state.is_loading);
}

#[test]
fn slow_answers_to_old_queries_are_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = open(&config(&dir, 30));

    session.send(Event::SearchTextChanged("movie".into())).unwrap();
    session.send(Event::SearchTextChanged("greta".into())).unwrap();
    session.wait_idle(TIMEOUT).unwrap();

    let state = session.store().state();
    assert_eq!(state.total_results, 1);
    assert_eq!(state.results[0].id, "tt0007");
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config(&dir, 0);

    {
        let mut session = open(&config);
        session.send(Event::AddFavorite(MovieSummary::new("tt0001", "Movie 1", "2001"))).unwrap();
        session.send(Event::AddFavorite(MovieSummary::new("tt0002", "Movie 2", "2001"))).unwrap();
        session.send(Event::RemoveFavorite("tt0001".into())).unwrap();
        session.send(Event::SearchTextChanged("movie".into())).unwrap();
        session.wait_idle(TIMEOUT).unwrap();
    }

    let session = open(&config);
    let ids: Vec<&str> = session.store().favorites().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["tt0002"]);
    assert_eq!(session.store().state().search_text, "");
    assert!(session.store().state().results.is_empty());

    let snapshot = std::fs::read_to_string(dir.path().join("data").join(format!("{FAVORITES_KEY}.json")))
        .expect("snapshot should be on disk");
    let json: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["favorites"][0]["title"], "Movie 2");
}

#[test]
fn corrupt_snapshot_starts_with_no_favorites() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config(&dir, 0);
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join(format!("{FAVORITES_KEY}.json")), "{ not json").unwrap();

    let mut session = open(&config);
    assert!(session.store().favorites().is_empty());

    session.send(Event::AddFavorite(MovieSummary::new("tt0003", "Movie 3", "2001"))).unwrap();
    drop(session);

    let session = open(&config);
    assert!(session.store().is_favorite("tt0003"));
}
