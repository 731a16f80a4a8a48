//! Integration tests: one observer shared by independent components.

use failable::core::LoadState;
use failable::matcher::LoadableHandlers;
use failable::{to_failable, Failable, Handlers, Loadable, LoadableCell, Observer};
use std::sync::{Arc, Mutex};
use std::thread;

type Outcome = Failable<u32, String>;

/// A component that reports every parse through the shared observer.
struct Parser {
    observer: Arc<Observer<Outcome>>,
}

impl Parser {
    fn parse(&self, input: &str) -> String {
        let outcome = to_failable(|| input.parse::<u32>().map_err(|e| e.to_string()));
        self.observer
            .when(
                &outcome,
                Handlers::new(|n: &u32| format!("ok {n}"), |_: &String| "rejected".to_string())
                    .pending(|| "waiting".to_string()),
            )
            .unwrap_or_default()
    }
}

/// A component that only listens.
struct ErrorLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ErrorLog {
    fn attach(observer: &Observer<Outcome>) -> Self {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&entries);
        observer.on_failure(move |e: &String| sink.lock().unwrap().push(e.clone()));
        Self { entries }
    }
}

#[test]
fn injected_observer_links_components() {
    let observer: Arc<Observer<Outcome>> = Arc::new(Observer::new());
    let log = ErrorLog::attach(&observer);
    let parser = Parser {
        observer: Arc::clone(&observer),
    };

    assert_eq!(parser.parse("12"), "ok 12");
    assert_eq!(parser.parse("x"), "rejected");
    assert_eq!(parser.parse("-1"), "rejected");
    assert_eq!(log.entries.lock().unwrap().len(), 2);
}

#[test]
fn separate_observers_are_isolated() {
    let first: Arc<Observer<Outcome>> = Arc::new(Observer::new());
    let second: Arc<Observer<Outcome>> = Arc::new(Observer::new());
    let log = ErrorLog::attach(&first);

    let parser = Parser { observer: second };
    parser.parse("nope");
    assert!(log.entries.lock().unwrap().is_empty());
}

#[test]
fn broadcasts_from_many_threads() {
    let observer: Arc<Observer<Outcome>> = Arc::new(Observer::new());
    let log = ErrorLog::attach(&observer);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let parser = Parser {
                observer: Arc::clone(&observer),
            };
            thread::spawn(move || {
                let input = if i % 2 == 0 { "7".to_string() } else { format!("bad{i}") };
                parser.parse(&input)
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| *r == "ok 7").count(), 4);
    assert_eq!(log.entries.lock().unwrap().len(), 4);
}

#[test]
fn cell_changes_feed_a_loadable_observer() {
    let observer: Arc<Observer<Loadable<u32, String>>> = Arc::new(Observer::new());
    let cell: LoadableCell<u32, String> = LoadableCell::new();

    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        observer.on_value(move |v: &u32, busy| seen.lock().unwrap().push((*v, busy)));
    }
    {
        let observer = Arc::clone(&observer);
        let reader = cell.clone();
        cell.subscribe(move |_, _| observer.notify(&reader.get()));
    }

    cell.loading();
    cell.success(1);
    cell.loading();
    cell.success(2);

    assert_eq!(*seen.lock().unwrap(), [(1, false), (1, true), (2, false)]);

    let label = observer.when(
        &cell.get(),
        LoadableHandlers::new(|v: &u32, _: bool| v.to_string(), |e: &String, _: bool| e.clone()),
    );
    assert_eq!(label.as_deref(), Ok("2"));
    assert_eq!(cell.state(), LoadState::Success);
}
