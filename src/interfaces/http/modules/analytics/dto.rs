//! Analytics DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::modules::stores::StoreDto;

/// User counts broken down by role
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleBreakdownDto {
    pub admins: u64,
    pub store_owners: u64,
    pub users: u64,
}

/// Admin dashboard summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_users: u64,
    pub total_stores: u64,
    pub total_ratings: u64,
    /// Mean of all rating values, one decimal, 0 when there are none
    pub average_rating: f64,
    pub users_by_role: RoleBreakdownDto,
    /// Highest-rated stores with at least one rating
    pub top_rated_stores: Vec<StoreDto>,
}
