//! HTTP handler modules, one per resource

pub mod analytics;
pub mod auth;
pub mod health;
pub mod ratings;
pub mod stores;
pub mod users;
