//! Domain - Pure Data Structures and Request Types
//!
//! These types don't depend on the runtime or HTTP client and describe the
//! catalog as the backend reports it.

pub mod config;
pub mod page;
pub mod product;
pub mod query;

pub use config::*;
pub use page::*;
pub use product::*;
pub use query::*;
