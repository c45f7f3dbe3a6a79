//! HTTP REST API interfaces
//!
//! - `common`: Response envelopes and the validating JSON extractor
//! - `middleware`: JWT authentication and role checks
//! - `modules`: Request handlers grouped per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
