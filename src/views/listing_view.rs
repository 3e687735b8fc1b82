use crate::api::ListingSource;
use crate::fetcher::{Dispatch, FetchStatus, ListingFetcher};
use crate::filters::{FilterManager, FilterPatch, FilterState};
use crate::views::ViewId;
use std::sync::Arc;
use std::time::Duration;

/// What a template needs to draw a listing view at one instant.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub id: ViewId,
    pub filter: FilterState,
    pub status: FetchStatus,
}

/// One browsing session over the listing: its filter and its fetcher.
///
/// Each published filter goes straight to the fetcher, so the two never
/// disagree about the current key.
pub struct ListingView {
    id: ViewId,
    filters: FilterManager,
    fetcher: ListingFetcher,
}

impl ListingView {
    pub fn open(id: ViewId, source: Arc<dyn ListingSource>, initial: FilterState) -> Self {
        let mut view = Self {
            id,
            filters: FilterManager::new(initial),
            fetcher: ListingFetcher::new(source),
        };
        view.publish();
        view
    }

    fn publish(&mut self) -> Dispatch {
        self.fetcher.request(self.filters.current())
    }

    pub fn set_filter(&mut self, patch: FilterPatch) -> Dispatch {
        self.filters.set_filter(patch);
        self.publish()
    }

    /// Swap in a whole new filter, as when the page is reloaded from its URL.
    pub fn replace_filter(&mut self, state: FilterState) -> Dispatch {
        self.filters.replace(state);
        self.publish()
    }

    pub fn retry(&mut self) -> Option<u64> {
        self.fetcher.retry()
    }

    pub fn refresh(&mut self) -> &FetchStatus {
        self.fetcher.poll()
    }

    pub fn wait(&mut self, timeout: Duration) -> &FetchStatus {
        self.fetcher.wait(timeout)
    }

    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub fn filter(&self) -> &FilterState {
        self.filters.current()
    }

    pub fn fetcher(&self) -> &ListingFetcher {
        &self.fetcher
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            id: self.id.clone(),
            filter: self.filters.current().clone(),
            status: self.fetcher.status().clone(),
        }
    }
}
