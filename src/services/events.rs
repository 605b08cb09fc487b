//! Catalog Events
//!
//! Notifications emitted by the store after a merge so a UI layer knows
//! which slice to re-render. Failed fetches emit nothing.

use crate::state::CatalogSlice;

/// The four fetch operations the store performs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOperation {
    /// Category listing, replaces `items`
    Primary,
    /// Category + subcategory listing, appends to `items`
    Secondary,
    /// Library-category listing, replaces `filtered_items`
    FilteredAscending,
    /// Library-category count, replaces `count`
    Count,
}

impl FetchOperation {
    /// Name used for logs and task names
    pub fn label(&self) -> &'static str {
        match self {
            FetchOperation::Primary => "fetch_primary",
            FetchOperation::Secondary => "fetch_secondary",
            FetchOperation::FilteredAscending => "fetch_filtered_ascending",
            FetchOperation::Count => "fetch_count",
        }
    }

    /// The slice a successful fetch writes
    pub fn slice(&self) -> CatalogSlice {
        match self {
            FetchOperation::Primary | FetchOperation::Secondary => CatalogSlice::Items,
            FetchOperation::FilteredAscending => CatalogSlice::FilteredItems,
            FetchOperation::Count => CatalogSlice::Count,
        }
    }
}

impl std::fmt::Display for FetchOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Events emitted by the catalog store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A slice was replaced or extended by a successful fetch
    Updated {
        operation: FetchOperation,
        slice: CatalogSlice,
    },
    /// `items` was reset by the caller
    ItemsCleared,
}
