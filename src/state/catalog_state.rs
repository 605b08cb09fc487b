//! CatalogState - Library Listing State
//!
//! The flat record a UI renders from. It is only changed through
//! [`CatalogState::reduce`], which applies one settled fetch at a time.

use chrono::{DateTime, Utc};

use crate::domain::{CountPayload, Product, ProductPage, SliceInfo};

/// Slices of [`CatalogState`] a merge can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSlice {
    Items,
    FilteredItems,
    Count,
}

impl CatalogSlice {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSlice::Items => "items",
            CatalogSlice::FilteredItems => "filtered_items",
            CatalogSlice::Count => "count",
        }
    }
}

/// A settled fetch, ready to be merged
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Primary listing: replaces `items`
    PrimaryLoaded(ProductPage),
    /// Subcategory listing: appends to `items`
    SecondaryLoaded(ProductPage),
    /// Filtered listing: replaces `filtered_items`
    FilteredLoaded(ProductPage),
    /// Count query: replaces `count` verbatim
    CountLoaded(CountPayload),
    /// Caller-requested reset of `items`
    ItemsCleared,
}

/// State for the library catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Primary listing, server order
    pub items: Vec<Product>,
    /// Filtered listing, server order
    pub filtered_items: Vec<Product>,
    /// Last count response
    pub count: CountPayload,
    /// Set by the first successful fetch and never cleared
    pub is_loaded: bool,
    /// Cleared by every successful fetch
    pub last_error: String,
    /// Slice info of the last page merged into `items`
    pub items_slice: Option<SliceInfo>,
    /// Slice info of the last filtered page
    pub filtered_slice: Option<SliceInfo>,
    /// Time of the last successful merge
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a settled fetch and report which slice changed
    pub fn reduce(&mut self, action: CatalogAction) -> CatalogSlice {
        let slice = match action {
            CatalogAction::PrimaryLoaded(page) => {
                self.items = page.content;
                self.items_slice = page.slice_info;
                CatalogSlice::Items
            }
            CatalogAction::SecondaryLoaded(page) => {
                self.items.extend(page.content);
                self.items_slice = page.slice_info;
                CatalogSlice::Items
            }
            CatalogAction::FilteredLoaded(page) => {
                self.filtered_items = page.content;
                self.filtered_slice = page.slice_info;
                CatalogSlice::FilteredItems
            }
            CatalogAction::CountLoaded(count) => {
                self.count = count;
                CatalogSlice::Count
            }
            CatalogAction::ItemsCleared => {
                self.items.clear();
                self.items_slice = None;
                return CatalogSlice::Items;
            }
        };

        self.is_loaded = true;
        self.last_error.clear();
        self.updated_at = Some(Utc::now());
        slice
    }

    /// Total reported by the count query
    pub fn total(&self) -> Option<u64> {
        self.count.total()
    }

    /// Whether the server reported another page after the last `items` page
    pub fn has_more_items(&self) -> bool {
        self.items_slice.is_some_and(|s| s.has_next)
    }

    /// Whether the server reported another filtered page
    pub fn has_more_filtered(&self) -> bool {
        self.filtered_slice.is_some_and(|s| s.has_next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(ids: &[i64]) -> ProductPage {
        ids.iter().copied().map(Product::with_id).collect::<Vec<_>>().into()
    }

    fn ids(items: &[Product]) -> Vec<i64> {
        items.iter().filter_map(Product::id).collect()
    }

    #[test]
    fn test_initial_state() {
        let state = CatalogState::new();
        assert!(state.items.is_empty());
        assert!(state.filtered_items.is_empty());
        assert!(state.count.is_empty());
        assert!(!state.is_loaded);
        assert_eq!(state.last_error, "");
        assert_eq!(state.updated_at, None);
    }

    #[test]
    fn test_primary_replaces() {
        let mut state = CatalogState::new();
        state.reduce(CatalogAction::PrimaryLoaded(page(&[1, 2])));
        state.reduce(CatalogAction::PrimaryLoaded(page(&[5])));

        assert_eq!(ids(&state.items), vec![5]);
        assert!(state.is_loaded);
    }

    #[test]
    fn test_secondary_appends_in_order() {
        let mut state = CatalogState::new();
        state.reduce(CatalogAction::PrimaryLoaded(page(&[1, 2])));
        let slice = state.reduce(CatalogAction::SecondaryLoaded(page(&[3, 4])));

        assert_eq!(slice, CatalogSlice::Items);
        assert_eq!(ids(&state.items), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filtered_leaves_other_slices() {
        let mut state = CatalogState::new();
        state.reduce(CatalogAction::PrimaryLoaded(page(&[1])));
        state.reduce(CatalogAction::CountLoaded(
            CountPayload::from_json(json!({ "total": 9 })).expect("count"),
        ));
        let before = state.clone();

        let slice = state.reduce(CatalogAction::FilteredLoaded(page(&[8, 9])));

        assert_eq!(slice, CatalogSlice::FilteredItems);
        assert_eq!(ids(&state.filtered_items), vec![8, 9]);
        assert_eq!(state.items, before.items);
        assert_eq!(state.count, before.count);
    }

    #[test]
    fn test_count_stored_verbatim() {
        let raw = json!({ "total": 42, "extra": { "nested": [1, 2] } });
        let mut state = CatalogState::new();
        state.reduce(CatalogAction::CountLoaded(
            CountPayload::from_json(raw.clone()).expect("count"),
        ));

        assert_eq!(serde_json::to_value(&state.count).expect("encode"), raw);
        assert_eq!(state.total(), Some(42));
    }

    #[test]
    fn test_success_clears_last_error() {
        let mut state = CatalogState::new();
        state.last_error = "stale".to_string();
        state.reduce(CatalogAction::FilteredLoaded(page(&[])));

        assert_eq!(state.last_error, "");
        assert!(state.is_loaded);
        assert!(state.updated_at.is_some());
    }

    #[test]
    fn test_items_cleared_keeps_flags() {
        let mut state = CatalogState::new();
        state.reduce(CatalogAction::PrimaryLoaded(page(&[1, 2])));
        let stamp = state.updated_at;

        state.reduce(CatalogAction::ItemsCleared);

        assert!(state.items.is_empty());
        assert!(state.is_loaded);
        assert_eq!(state.updated_at, stamp);
    }

    #[test]
    fn test_has_more() {
        let mut state = CatalogState::new();
        assert!(!state.has_more_items());

        state.reduce(CatalogAction::PrimaryLoaded(ProductPage {
            content: vec![Product::with_id(1)],
            slice_info: Some(SliceInfo {
                page: 0,
                size: 1,
                has_next: true,
            }),
        }));
        assert!(state.has_more_items());
        assert!(!state.has_more_filtered());
    }
}
