use crate::api::ListingSource;
use crate::errors::ServerError;
use crate::filters::FilterState;
use crate::views::{ListingView, ViewId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, error};

pub type SharedView = Arc<Mutex<ListingView>>;

struct Entry {
    touched: Instant,
    view: SharedView,
}

/// Live listing views, keyed by view id.
///
/// The map lock is only held to look a view up; work on a view happens under
/// that view's own lock so slow fetches in one tab never stall another.
/// Recency lives in the map, so eviction never waits on a busy view. An
/// evicted view stays usable by whoever still holds its handle.
pub struct ViewRegistry {
    source: Arc<dyn ListingSource>,
    views: Mutex<HashMap<ViewId, Entry>>,
    capacity: usize,
}

impl ViewRegistry {
    pub fn new(source: Arc<dyn ListingSource>, capacity: usize) -> Self {
        Self {
            source,
            views: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Start a new view on `initial` and return a handle to it.
    pub fn open(&self, initial: FilterState) -> Result<SharedView, ServerError> {
        let id = ViewId::generate();
        let view = Arc::new(Mutex::new(ListingView::open(
            id.clone(),
            Arc::clone(&self.source),
            initial,
        )));

        let mut views = self.lock_map()?;
        while views.len() >= self.capacity {
            let Some(stalest) = stalest_view(&views) else {
                break;
            };
            debug!(view = %stalest, "evicting least recently used listing view");
            views.remove(&stalest);
        }

        views.insert(
            id,
            Entry {
                touched: Instant::now(),
                view: Arc::clone(&view),
            },
        );
        Ok(view)
    }

    /// Look a view up and mark it as recently used.
    pub fn get(&self, id: &ViewId) -> Result<SharedView, ServerError> {
        let mut views = self.lock_map()?;
        let entry = views.get_mut(id).ok_or_else(|| {
            ServerError::BadRequest("this listing view has expired, please reload the page".into())
        })?;
        entry.touched = Instant::now();
        Ok(Arc::clone(&entry.view))
    }

    pub fn len(&self) -> usize {
        self.views.lock().map(|v| v.len()).unwrap_or(0)
    }

    fn lock_map(&self) -> Result<MutexGuard<'_, HashMap<ViewId, Entry>>, ServerError> {
        self.views.lock().map_err(|_| {
            error!("view registry lock poisoned");
            ServerError::InternalError
        })
    }
}

/// Lock one view, mapping poisoning to a 500.
pub fn lock_view(view: &SharedView) -> Result<MutexGuard<'_, ListingView>, ServerError> {
    view.lock().map_err(|_| {
        error!("listing view lock poisoned");
        ServerError::InternalError
    })
}

fn stalest_view(views: &HashMap<ViewId, Entry>) -> Option<ViewId> {
    views
        .iter()
        .min_by_key(|(_, entry)| entry.touched)
        .map(|(id, _)| id.clone())
}
