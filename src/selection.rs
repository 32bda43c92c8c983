//! Active-category selection state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::types::ListCategory;

/// Which list category the UI currently shows.
///
/// An owned, cheaply clonable store rather than process-wide state, so
/// tests (and multiple windows) can hold independent instances. Writes
/// are visible to every clone synchronously after [`set`](Self::set)
/// returns; changing the category has no side effect beyond the new
/// value itself, the query layer reacts by deriving a different key.
#[derive(Debug, Clone)]
pub struct Selection {
    shared: Arc<watch::Sender<ListCategory>>,
}

impl Selection {
    /// Create a selection starting at `Popular`, like the home screen.
    pub fn new() -> Self {
        Self::starting_at(ListCategory::Popular)
    }

    /// Create a selection with an explicit initial category.
    pub fn starting_at(category: ListCategory) -> Self {
        let (tx, _rx) = watch::channel(category);
        Self {
            shared: Arc::new(tx),
        }
    }

    /// The currently active category.
    pub fn get(&self) -> ListCategory {
        *self.shared.borrow()
    }

    /// Switch the active category.
    pub fn set(&self, category: ListCategory) {
        self.shared.send_replace(category);
    }

    /// Subscribe to category changes (for UI reaction).
    pub fn subscribe(&self) -> watch::Receiver<ListCategory> {
        self.shared.subscribe()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_popular() {
        assert_eq!(Selection::new().get(), ListCategory::Popular);
    }

    #[test]
    fn set_is_synchronously_visible() {
        let selection = Selection::new();
        selection.set(ListCategory::Upcoming);
        assert_eq!(selection.get(), ListCategory::Upcoming);
    }

    #[test]
    fn clones_share_state() {
        let selection = Selection::new();
        let other = selection.clone();
        other.set(ListCategory::TopRated);
        assert_eq!(selection.get(), ListCategory::TopRated);
    }

    #[test]
    fn instances_are_independent() {
        let a = Selection::new();
        let b = Selection::new();
        a.set(ListCategory::NowPlaying);
        assert_eq!(b.get(), ListCategory::Popular);
    }

    #[test]
    fn subscribers_observe_changes() {
        let selection = Selection::new();
        let mut rx = selection.subscribe();
        selection.set(ListCategory::Upcoming);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ListCategory::Upcoming);
    }
}
