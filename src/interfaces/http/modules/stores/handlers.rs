//! Store management API handlers
//!
//! Listing and lookup are available to every authenticated user.
//! Create, update and delete are admin-only (enforced by the router).
//! `/owned` serves the store-owner dashboard.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateStoreRequest, ListStoresParams, StoreDto, UpdateStoreRequest};
use crate::application::StoreService;
use crate::domain::{CreateStoreDto, GetStoresDto, UpdateStoreDto};
use crate::interfaces::http::common::{
    domain_error_status, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Store handler state
#[derive(Clone)]
pub struct StoreHandlerState {
    pub store_service: Arc<StoreService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(ListStoresParams),
    responses(
        (status = 200, description = "Store list", body = PaginatedResponse<StoreDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_stores(
    State(state): State<StoreHandlerState>,
    Query(params): Query<ListStoresParams>,
) -> Result<Json<PaginatedResponse<StoreDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let dto = GetStoresDto {
        search: params.search,
        owner_id: None,
        page: Some(params.page),
        page_size: Some(params.page_size),
        sort_by: params.sort_by,
    };

    match state.store_service.list_stores(dto).await {
        Ok(result) => {
            let items: Vec<StoreDto> = result.items.into_iter().map(StoreDto::from).collect();
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

#[utoipa::path(
    get,
    path = "/api/v1/stores/owned",
    tag = "Stores",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stores owned by the current user", body = PaginatedResponse<StoreDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_owned_stores(
    State(state): State<StoreHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<PaginatedResponse<StoreDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.store_service.stores_owned_by(&user.user_id).await {
        Ok(result) => {
            let items: Vec<StoreDto> = result.items.into_iter().map(StoreDto::from).collect();
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

#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store details", body = ApiResponse<StoreDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_store(
    State(state): State<StoreHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StoreDto>>, (StatusCode, Json<ApiResponse<StoreDto>>)> {
    match state.store_service.get_store_by_id(&id).await {
        Ok(Some(store)) => Ok(Json(ApiResponse::success(StoreDto::from(store)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Store '{}' not found", id))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/stores",
    tag = "Stores",
    security(("bearer_auth" = [])),
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = ApiResponse<StoreDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create_store(
    State(state): State<StoreHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreDto>>), (StatusCode, Json<ApiResponse<StoreDto>>)> {
    let dto = CreateStoreDto {
        name: request.name,
        email: request.email,
        address: request.address,
        owner_id: request.owner_id,
    };

    match state.store_service.create_store(dto).await {
        Ok(store) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(StoreDto::from(store))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/stores/{id}",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Store ID")),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Store updated", body = ApiResponse<StoreDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_store(
    State(state): State<StoreHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStoreRequest>,
) -> Result<Json<ApiResponse<StoreDto>>, (StatusCode, Json<ApiResponse<StoreDto>>)> {
    let dto = UpdateStoreDto {
        name: request.name,
        email: request.email,
        address: request.address,
    };

    match state.store_service.update_store(&id, dto).await {
        Ok(Some(store)) => Ok(Json(ApiResponse::success(StoreDto::from(store)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Store '{}' not found", id))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/stores/{id}",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_store(
    State(state): State<StoreHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.store_service.delete_store(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
