use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};
use jsview_loader::{
    Completion, Fetch, FetchError, FileRecentlyViewed, LoaderOptions, LocationFetcher,
    RecentlyViewed, Session, WaitError,
};
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serves fixed documents, each held back until its gate is opened.
struct Gated {
    docs: HashMap<String, String>,
    gates: Mutex<HashMap<String, Receiver<()>>>,
}

impl Gated {
    fn new(docs: &[(&str, &str)]) -> (Arc<Self>, HashMap<String, Sender<()>>) {
        let mut gates = HashMap::new();
        let mut openers = HashMap::new();
        for (location, _) in docs {
            let (tx, rx) = bounded(1);
            gates.insert(location.to_string(), rx);
            openers.insert(location.to_string(), tx);
        }
        let fetcher = Gated {
            docs: docs
                .iter()
                .map(|(l, d)| (l.to_string(), d.to_string()))
                .collect(),
            gates: Mutex::new(gates),
        };
        (Arc::new(fetcher), openers)
    }
}

impl Fetch for Gated {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let gate = self.gates.lock().unwrap().get(location).cloned();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        self.docs
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))
    }
}

#[test]
fn later_request_wins_when_earlier_completes_last() {
    let (fetcher, openers) = Gated::new(&[
        ("mem://a", r#"{"title": "A"}"#),
        ("mem://b", r#"{"title": "B"}"#),
    ]);
    let mut session = Session::new(fetcher, 2).unwrap();

    session.navigate("mem://a").unwrap();
    session.navigate("mem://b").unwrap();

    openers["mem://b"].send(()).unwrap();
    let committed = session.wait_for_commit(TIMEOUT).unwrap();
    assert_eq!(committed.location, "mem://b");

    openers["mem://a"].send(()).unwrap();
    assert_eq!(session.poll_timeout(TIMEOUT), Some(Completion::Superseded));

    let current = session.current().unwrap();
    assert_eq!(current.location, "mem://b");
    assert_eq!(current.result.as_ref().unwrap().title(), Some("B"));
}

#[test]
fn earlier_completion_is_ignored_while_later_is_pending() {
    let (fetcher, openers) = Gated::new(&[
        ("mem://a", r#"{"title": "A"}"#),
        ("mem://b", r#"{"title": "B"}"#),
    ]);
    let mut session = Session::new(fetcher, 2).unwrap();

    session.navigate("mem://a").unwrap();
    session.navigate("mem://b").unwrap();

    openers["mem://a"].send(()).unwrap();
    assert_eq!(session.poll_timeout(TIMEOUT), Some(Completion::Superseded));
    assert!(session.current().is_none());
    assert!(session.is_loading());

    openers["mem://b"].send(()).unwrap();
    assert_eq!(session.wait_for_commit(TIMEOUT).unwrap().location, "mem://b");
}

#[test]
fn navigate_to_shown_location_is_a_no_op() {
    let (fetcher, openers) = Gated::new(&[("mem://a", r#"{"title": "A"}"#)]);
    let mut session = Session::new(fetcher, 1).unwrap();

    assert!(session.navigate("mem://a").is_some());
    assert!(session.navigate("mem://a").is_none());
    openers["mem://a"].send(()).unwrap();
    session.wait_for_commit(TIMEOUT).unwrap();
    assert!(session.navigate("mem://a").is_none());
}

#[test]
fn wait_without_request() {
    let (fetcher, _openers) = Gated::new(&[]);
    let mut session = Session::new(fetcher, 1).unwrap();
    assert_eq!(
        session.wait_for_commit(Duration::from_millis(10)).unwrap_err(),
        WaitError::NothingRequested
    );
}

#[test]
fn wait_times_out() {
    let (fetcher, _openers) = Gated::new(&[("mem://slow", "{}")]);
    let mut session = Session::new(fetcher, 1).unwrap();
    session.navigate("mem://slow").unwrap();
    assert_eq!(
        session.wait_for_commit(Duration::from_millis(20)).unwrap_err(),
        WaitError::Timeout
    );
}

#[test]
fn loads_yaml_file_and_records_recent() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("pet.yaml");
    fs::write(&schema, "title: Pet\ntype: object\n").unwrap();
    let untitled = dir.path().join("untitled.json");
    fs::write(&untitled, r#"{"type": "string"}"#).unwrap();

    let store = FileRecentlyViewed::in_dir(&dir.path().join("data"), 10);
    let fetcher = Arc::new(LocationFetcher::new(LoaderOptions::default()).unwrap());
    let mut session = Session::new(fetcher, 1)
        .unwrap()
        .with_recent(Box::new(store.clone()));

    let pet = schema.to_str().unwrap();
    session.navigate(pet).unwrap();
    let committed = session.wait_for_commit(TIMEOUT).unwrap();
    assert_eq!(committed.result.as_ref().unwrap().title(), Some("Pet"));

    let untitled = untitled.to_str().unwrap();
    session.navigate(untitled).unwrap();
    session.wait_for_commit(TIMEOUT).unwrap();

    let links = store.links();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].title, untitled);
    assert_eq!(links[0].url, untitled);
    assert_eq!(links[1].title, "Pet");
    assert_eq!(links[1].url, pet);
}

#[test]
fn failed_load_is_committed_but_not_recorded() {
    let dir = TempDir::new().unwrap();
    let store = FileRecentlyViewed::in_dir(dir.path(), 10);
    let fetcher = Arc::new(LocationFetcher::new(LoaderOptions::default()).unwrap());
    let mut session = Session::new(fetcher, 1)
        .unwrap()
        .with_recent(Box::new(store.clone()));

    let missing = dir.path().join("missing.json");
    let missing = missing.to_str().unwrap();
    session.navigate(missing).unwrap();
    let committed = session.wait_for_commit(TIMEOUT).unwrap();
    let err = committed.result.as_ref().unwrap_err();
    assert_eq!(err.location, missing);
    assert!(store.links().is_empty());
}
