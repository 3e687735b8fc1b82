use crate::api::{FetchError, ListingResult, ListingSource, Property};
use crate::app::AppState;
use crate::config::ViewConfig;
use crate::fetcher::FetchStatus;
use crate::filters::FilterState;
use astra::{Body, Request, Response};
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

type Responder = Box<dyn Fn(&FilterState) -> Result<ListingResult, FetchError> + Send + Sync>;

/// A listing source answering synchronously from a closure.
pub struct FnSource {
    respond: Responder,
    calls: AtomicUsize,
}

impl FnSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&FilterState) -> Result<ListingResult, FetchError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok<F>(respond: F) -> Self
    where
        F: Fn(&FilterState) -> ListingResult + Send + Sync + 'static,
    {
        Self::new(move |filter| Ok(respond(filter)))
    }

    /// Fails the first `n` calls with `err`, then returns one property.
    pub fn failing_first(n: usize, err: FetchError) -> Self {
        let seen = AtomicUsize::new(0);
        Self::new(move |_| {
            if seen.fetch_add(1, Ordering::SeqCst) < n {
                Err(err.clone())
            } else {
                Ok(listing(&[1]))
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ListingSource for FnSource {
    fn fetch_listings(&self, filter: &FilterState) -> Result<ListingResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(filter)
    }
}

/// A listing source whose answers are released by the test, per filter,
/// in whatever order the test chooses.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<FilterState, Receiver<Result<ListingResult, FetchError>>>>,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn gate(&self, filter: &FilterState) -> Sender<Result<ListingResult, FetchError>> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(filter.clone(), rx);
        tx
    }

    /// Spin until `n` fetches have started.
    pub fn wait_for_calls(&self, n: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.calls.load(Ordering::SeqCst) < n {
            if Instant::now() > deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        true
    }
}

impl ListingSource for GatedSource {
    fn fetch_listings(&self, filter: &FilterState) -> Result<ListingResult, FetchError> {
        let gate = self.gates.lock().unwrap().remove(filter);
        self.calls.fetch_add(1, Ordering::SeqCst);
        match gate {
            Some(rx) => rx
                .recv()
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".into()))),
            None => Err(FetchError::Network(format!("no gate for {filter:?}"))),
        }
    }
}

pub fn property(id: u64) -> Property {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Property {id}"),
        "price": 100_000 + id,
        "bedrooms": 2,
        "bathrooms": 1,
        "area": 80,
        "address": format!("{id} Main St"),
        "location": { "city": { "name": "Springfield", "state": { "name": "Oregon" } } },
    }))
    .unwrap()
}

pub fn listing(ids: &[u64]) -> ListingResult {
    ListingResult {
        properties: ids.iter().copied().map(property).collect(),
        pagination: None,
    }
}

/// Ids of a successful status; panics on anything else.
pub fn result_ids(status: &FetchStatus) -> Vec<u64> {
    match status {
        FetchStatus::Success(result) => result.properties.iter().map(|p| p.id).collect(),
        other => panic!("expected success, got {}", other.name()),
    }
}

/// App state over a fake source, with a render wait long enough for
/// synchronous fakes to resolve.
pub fn test_state(source: Arc<dyn ListingSource>) -> AppState {
    AppState::new(
        source,
        ViewConfig {
            capacity: 16,
            render_wait: Duration::from_secs(2),
            poll_interval_ms: 500,
        },
    )
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request {
    http::Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn body_string(mut resp: Response) -> String {
    let mut body = String::new();
    resp.body_mut().reader().read_to_string(&mut body).unwrap();
    body
}
