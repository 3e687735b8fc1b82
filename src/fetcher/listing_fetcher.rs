// src/fetcher/listing_fetcher.rs
use crate::api::{FetchError, ListingResult, ListingSource};
use crate::fetcher::{FetchStats, FetchStatus};
use crate::filters::FilterState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of handing a filter to the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A new fetch went out under this generation.
    Issued(u64),
    /// The filter equals the current key; nothing changed.
    Unchanged,
}

struct Completion {
    generation: u64,
    outcome: Outcome,
}

enum Outcome {
    Finished(Result<ListingResult, FetchError>),
    /// Superseded before the request started, so it never went out.
    Abandoned,
}

/// Turns filter values into listing fetches, last request wins.
///
/// Every dispatch bumps `generation` and runs on its own thread. Workers
/// report back over a channel tagged with their generation, and an outcome is
/// only applied when that tag is still the latest one issued. Anything older
/// is dropped on arrival, whatever order the responses come back in.
pub struct ListingFetcher {
    source: Arc<dyn ListingSource>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    generation: u64,
    current: Option<FilterState>,
    status: FetchStatus,
    cancel: Option<Arc<AtomicBool>>,
    in_flight: usize,
    stats: FetchStats,
    /// Workers wait on a read guard of this before starting.
    #[cfg(test)]
    launch_hold: Option<Arc<std::sync::RwLock<()>>>,
}

impl ListingFetcher {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            generation: 0,
            current: None,
            status: FetchStatus::Pending,
            cancel: None,
            in_flight: 0,
            stats: FetchStats::default(),
            #[cfg(test)]
            launch_hold: None,
        }
    }

    /// Make `filter` the current key. Issues a fetch unless it already is.
    pub fn request(&mut self, filter: &FilterState) -> Dispatch {
        self.drain();
        if self.current.as_ref() == Some(filter) {
            return Dispatch::Unchanged;
        }
        Dispatch::Issued(self.dispatch(filter.clone()))
    }

    /// Re-issue the current key after a failure. No-op in any other state.
    pub fn retry(&mut self) -> Option<u64> {
        self.drain();
        if !matches!(self.status, FetchStatus::Error(_)) {
            return None;
        }
        let filter = self.current.clone()?;
        Some(self.dispatch(filter))
    }

    fn dispatch(&mut self, filter: FilterState) -> u64 {
        if let Some(superseded) = self.cancel.take() {
            superseded.store(true, Ordering::Release);
        }

        self.generation += 1;
        let generation = self.generation;
        self.current = Some(filter.clone());
        self.status = FetchStatus::Pending;
        self.stats.dispatched += 1;

        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel = Some(Arc::clone(&cancel));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        #[cfg(test)]
        let hold = self.launch_hold.clone();

        debug!(generation, ?filter, "dispatching listing fetch");

        let spawned = thread::Builder::new()
            .name(format!("listing-fetch-{generation}"))
            .spawn(move || {
                #[cfg(test)]
                let _held = hold.as_ref().map(|h| h.read());
                let outcome = if cancel.load(Ordering::Acquire) {
                    Outcome::Abandoned
                } else {
                    Outcome::Finished(source.fetch_listings(&filter))
                };
                // the fetcher may be gone already; nothing left to tell
                let _ = tx.send(Completion {
                    generation,
                    outcome,
                });
            });

        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => {
                warn!(generation, "could not start listing fetch: {e}");
                self.status = FetchStatus::Error(format!("could not start fetch: {e}"));
            }
        }

        generation
    }

    /// Apply whatever has arrived and return the current status.
    pub fn poll(&mut self) -> &FetchStatus {
        self.drain();
        &self.status
    }

    /// Block until the current key resolves or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> &FetchStatus {
        let deadline = Instant::now() + timeout;
        self.drain();
        while self.status.is_pending() && self.in_flight > 0 {
            if !self.recv_until(deadline) {
                break;
            }
        }
        &self.status
    }

    /// Block until every dispatched worker has reported. True if they all did.
    #[cfg(test)]
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.drain();
        while self.in_flight > 0 {
            if !self.recv_until(deadline) {
                break;
            }
        }
        self.in_flight == 0
    }

    fn recv_until(&mut self, deadline: Instant) -> bool {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(remaining) {
            Ok(completion) => {
                self.settle(completion);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn drain(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.settle(completion);
        }
    }

    fn settle(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let generation = completion.generation;

        match completion.outcome {
            Outcome::Abandoned => {
                self.stats.abandoned += 1;
                debug!(generation, "superseded fetch never started");
            }
            Outcome::Finished(_) if generation != self.generation => {
                self.stats.discarded += 1;
                debug!(
                    generation,
                    current = self.generation,
                    "discarding stale listing response"
                );
            }
            Outcome::Finished(Ok(result)) => {
                self.stats.applied += 1;
                self.cancel = None;
                debug!(generation, count = result.properties.len(), "listing fetch resolved");
                self.status = FetchStatus::Success(Arc::new(result));
            }
            Outcome::Finished(Err(e)) => {
                self.stats.applied += 1;
                self.cancel = None;
                warn!(generation, "listing fetch failed: {e}");
                self.status = FetchStatus::Error(e.to_string());
            }
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    #[cfg(test)]
    pub fn current_filter(&self) -> Option<&FilterState> {
        self.current.as_ref()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    #[cfg(test)]
    fn hold_launches(&mut self, hold: Arc<std::sync::RwLock<()>>) {
        self.launch_hold = Some(hold);
    }
}
