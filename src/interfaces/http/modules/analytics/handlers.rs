//! Analytics API handlers (admin dashboard)

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{DashboardSummaryDto, RoleBreakdownDto};
use crate::application::{RatingService, StoreService, UserService};
use crate::domain::{DomainResult, UserRole};
use crate::interfaces::http::common::{domain_error_status, ApiResponse};
use crate::interfaces::http::modules::stores::StoreDto;

const TOP_RATED_LIMIT: u64 = 5;

/// Analytics handler state
#[derive(Clone)]
pub struct AnalyticsHandlerState {
    pub user_service: Arc<UserService>,
    pub store_service: Arc<StoreService>,
    pub rating_service: Arc<RatingService>,
}

impl AnalyticsHandlerState {
    async fn build_summary(&self) -> DomainResult<DashboardSummaryDto> {
        let total_users = self.user_service.count_users().await?;
        let total_stores = self.store_service.count_stores().await?;
        let total_ratings = self.rating_service.count_ratings().await?;
        let average_rating = self.rating_service.overall_average().await?;

        let users_by_role = RoleBreakdownDto {
            admins: self.user_service.count_users_by_role(&UserRole::Admin).await?,
            store_owners: self
                .user_service
                .count_users_by_role(&UserRole::StoreOwner)
                .await?,
            users: self.user_service.count_users_by_role(&UserRole::User).await?,
        };

        let top_rated_stores = self
            .store_service
            .top_rated(TOP_RATED_LIMIT)
            .await?
            .into_iter()
            .map(StoreDto::from)
            .collect();

        Ok(DashboardSummaryDto {
            total_users,
            total_stores,
            total_ratings,
            average_rating,
            users_by_role,
            top_rated_stores,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/summary",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_dashboard_summary(
    State(state): State<AnalyticsHandlerState>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, (StatusCode, Json<ApiResponse<DashboardSummaryDto>>)>
{
    match state.build_summary().await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
