//! Service Layer
//!
//! Talks to the backend `products` API and merges results into the state
//! layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CatalogStore                            │
//! │  ┌─────────────┐  ┌──────────────┐  ┌──────────────────┐   │
//! │  │ ProductApi  │  │ ProductQuery │  │  runtime bridge  │   │
//! │  │   (HTTP)    │  │   (paths)    │  │ (detached tasks) │   │
//! │  └─────────────┘  └──────────────┘  └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ CatalogAction / CatalogEvent
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      State Layer                             │
//! │                     (CatalogState)                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod catalog_store;
mod events;
mod runtime;

pub use api::*;
pub use catalog_store::*;
pub use events::*;
pub use runtime::*;
