//! Catalog module — store management
//!
//! Contains the `StoreService` which orchestrates store CRUD and listing.

pub mod service;

pub use service::StoreService;
