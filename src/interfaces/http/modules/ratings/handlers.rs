//! Rating API handlers
//!
//! A user submits at most one rating per store; resubmitting overwrites
//! the previous value. The store's `average_rating` and `total_ratings`
//! are refreshed by the service on every write.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ListRatingsParams, RatingDto, StoreRatingDto, SubmitRatingRequest};
use crate::application::{RatingService, StoreService};
use crate::domain::SubmitRatingDto;
use crate::interfaces::http::common::{
    domain_error_status, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Rating handler state
#[derive(Clone)]
pub struct RatingHandlerState {
    pub rating_service: Arc<RatingService>,
    pub store_service: Arc<StoreService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/stores/{store_id}/ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("store_id" = String, Path, description = "Store ID")),
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<RatingDto>),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Store not found")
    )
)]
pub async fn submit_rating(
    State(state): State<RatingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(store_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SubmitRatingRequest>,
) -> Result<Json<ApiResponse<RatingDto>>, (StatusCode, Json<ApiResponse<RatingDto>>)> {
    let dto = SubmitRatingDto {
        user_id: user.user_id,
        store_id,
        rating: request.rating,
        comment: request.comment,
    };

    match state.rating_service.submit_rating(dto).await {
        Ok(rating) => Ok(Json(ApiResponse::success(RatingDto::from(rating)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/ratings/me",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("store_id" = String, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Current user's rating for the store", body = ApiResponse<RatingDto>),
        (status = 404, description = "No rating submitted yet")
    )
)]
pub async fn get_my_rating(
    State(state): State<RatingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(store_id): Path<String>,
) -> Result<Json<ApiResponse<RatingDto>>, (StatusCode, Json<ApiResponse<RatingDto>>)> {
    match state
        .rating_service
        .get_user_rating(&user.user_id, &store_id)
        .await
    {
        Ok(Some(rating)) => Ok(Json(ApiResponse::success(RatingDto::from(rating)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No rating submitted for this store")),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(
        ("store_id" = String, Path, description = "Store ID"),
        ListRatingsParams
    ),
    responses(
        (status = 200, description = "Ratings for the store with rater info", body = PaginatedResponse<StoreRatingDto>),
        (status = 403, description = "Not the store's owner"),
        (status = 404, description = "Store not found")
    )
)]
pub async fn list_store_ratings(
    State(state): State<RatingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(store_id): Path<String>,
    Query(params): Query<ListRatingsParams>,
) -> Result<Json<PaginatedResponse<StoreRatingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    // Rater identities are for the owner's dashboard and admins only.
    let store = match state.store_service.get_store_by_id(&store_id).await {
        Ok(Some(store)) => store,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!(
                    "Store '{}' not found",
                    store_id
                ))),
            ))
        }
        Err(e) => {
            return Err((
                domain_error_status(&e),
                Json(ApiResponse::error(e.to_string())),
            ))
        }
    };

    if !user.is_admin() && store.owner_id != user.user_id {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Only the store's owner or an admin can list its ratings",
            )),
        ));
    }

    match state
        .rating_service
        .list_store_ratings(&store_id, params.page, params.page_size)
        .await
    {
        Ok(result) => {
            let items: Vec<StoreRatingDto> =
                result.items.into_iter().map(StoreRatingDto::from).collect();
            Ok(Json(PaginatedResponse::new(
                items,
                result.total,
                result.page,
                result.limit,
            )))
        }
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
