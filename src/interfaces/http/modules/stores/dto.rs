//! Store DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Store;

/// Store API representation
///
/// `average_rating` and `total_ratings` are the derived summary kept in
/// sync on every rating write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: String,
    pub average_rating: f64,
    pub total_ratings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Store> for StoreDto {
    fn from(s: Store) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            address: s.address,
            owner_id: s.owner_id,
            average_rating: s.average_rating,
            total_ratings: s.total_ratings,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Create store request (admin-only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 400))]
    pub address: String,
    /// Must reference a user holding the store_owner role
    pub owner_id: String,
}

/// Update store request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 400))]
    pub address: Option<String>,
}

/// List stores query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStoresParams {
    /// Search by name or address
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Sort field (name, rating, created_at)
    pub sort_by: Option<String>,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}
