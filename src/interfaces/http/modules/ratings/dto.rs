//! Rating DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::StoreRatingRecord;
use crate::domain::Rating;

/// Rating API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingDto {
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rating> for RatingDto {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            store_id: r.store_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// A store's rating with the rater attached (owner/admin dashboards)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreRatingDto {
    pub id: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub rater_name: String,
    pub rater_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreRatingRecord> for StoreRatingDto {
    fn from(record: StoreRatingRecord) -> Self {
        Self {
            id: record.rating.id,
            rating: record.rating.rating,
            comment: record.rating.comment,
            rater_name: record.rater_name,
            rater_email: record.rater_email,
            created_at: record.rating.created_at,
            updated_at: record.rating.updated_at,
        }
    }
}

/// Submit (or overwrite) a rating for a store
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRatingRequest {
    /// Whole number from 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

/// List ratings query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRatingsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}
