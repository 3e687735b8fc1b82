use crate::filters::{FilterPatch, FilterState};

/// Holds the one current `FilterState` of a listing view.
///
/// Every edit replaces the whole value; there is no history.
#[derive(Debug, Clone, Default)]
pub struct FilterManager {
    current: FilterState,
}

impl FilterManager {
    pub fn new(initial: FilterState) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &FilterState {
        &self.current
    }

    /// Merge `patch` and publish the result as the current value.
    pub fn set_filter(&mut self, patch: FilterPatch) -> &FilterState {
        self.current = self.current.apply(patch);
        &self.current
    }

    pub fn replace(&mut self, state: FilterState) -> &FilterState {
        self.current = state;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ListingStatus;

    #[test]
    fn set_filter_publishes_merged_value() {
        let mut manager = FilterManager::default();
        manager.set_filter(FilterPatch::new().status(ListingStatus::Sale));
        let current = manager.set_filter(FilterPatch::new().bedrooms(2)).clone();

        assert_eq!(current.status, Some(ListingStatus::Sale));
        assert_eq!(current.bedrooms, Some(2));
        assert_eq!(manager.current(), &current);
    }
}
