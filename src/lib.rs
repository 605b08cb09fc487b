//! Library Catalog Client
//!
//! Client-side state container for the product catalog's "library" pages:
//! builds listing and count queries against the backend `products` API and
//! keeps the results in a flat state record for a UI to render.

pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;

pub use domain::{AppConfig, FilteredParams, ListingParams, Product, SubcategoryParams};
pub use error::{Error, Result};
pub use services::{CatalogEvent, CatalogStore, HttpProductApi, ProductApi};
pub use state::CatalogState;
