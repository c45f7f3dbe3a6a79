//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{RatingService, StoreService, UserService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{analytics, auth, health, ratings, stores, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_current_user,
        auth::handlers::change_password,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::update_user,
        users::handlers::delete_user,
        // Stores
        stores::handlers::list_stores,
        stores::handlers::list_owned_stores,
        stores::handlers::get_store,
        stores::handlers::create_store,
        stores::handlers::update_store,
        stores::handlers::delete_store,
        // Ratings
        ratings::handlers::submit_rating,
        ratings::handlers::get_my_rating,
        ratings::handlers::list_store_ratings,
        // Analytics
        analytics::handlers::get_dashboard_summary,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<stores::StoreDto>,
            PaginatedResponse<ratings::StoreRatingDto>,
            PaginationParams,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            // Stores
            stores::StoreDto,
            stores::CreateStoreRequest,
            stores::UpdateStoreRequest,
            // Ratings
            ratings::RatingDto,
            ratings::StoreRatingDto,
            ratings::SubmitRatingRequest,
            // Analytics
            analytics::DashboardSummaryDto,
            analytics::RoleBreakdownDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check endpoints"),
        (name = "Authentication", description = "Login (JWT), registration, password change"),
        (name = "Users", description = "Admin-only user management"),
        (name = "Stores", description = "Store directory and management"),
        (name = "Ratings", description = "Store ratings: one per user per store, resubmission overwrites"),
        (name = "Analytics", description = "Admin dashboard counters and top-rated stores"),
    ),
    info(
        title = "Store Ratings Service API",
        version = "1.0.0",
        description = "REST API for a role-based store rating platform",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    user_service: Arc<UserService>,
    store_service: Arc<StoreService>,
    rating_service: Arc<RatingService>,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    let auth_state = auth::AuthHandlerState {
        user_service: user_service.clone(),
    };
    let user_state = users::UserHandlerState {
        user_service: user_service.clone(),
        store_service: store_service.clone(),
        rating_service: rating_service.clone(),
    };
    let store_state = stores::StoreHandlerState {
        store_service: store_service.clone(),
    };
    let rating_state = ratings::RatingHandlerState {
        rating_service: rating_service.clone(),
        store_service: store_service.clone(),
    };
    let analytics_state = analytics::AnalyticsHandlerState {
        user_service,
        store_service,
        rating_service,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .route("/register", post(auth::handlers::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::get_current_user))
        .route("/change-password", put(auth::handlers::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User management routes (admin only)
    let user_routes = Router::new()
        .route(
            "/",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Store routes readable by any authenticated user
    let store_routes = Router::new()
        .route("/", get(stores::handlers::list_stores))
        .route("/owned", get(stores::handlers::list_owned_stores))
        .route("/{id}", get(stores::handlers::get_store))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(store_state.clone());

    // Store mutations (admin only)
    let store_admin_routes = Router::new()
        .route("/", post(stores::handlers::create_store))
        .route(
            "/{id}",
            put(stores::handlers::update_store).delete(stores::handlers::delete_store),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(store_state);

    // Rating routes under a store (protected)
    let rating_routes = Router::new()
        .route(
            "/{store_id}/ratings",
            get(ratings::handlers::list_store_ratings).post(ratings::handlers::submit_rating),
        )
        .route(
            "/{store_id}/ratings/me",
            get(ratings::handlers::get_my_rating),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(rating_state);

    // Analytics routes (admin only)
    let analytics_routes = Router::new()
        .route("/summary", get(analytics::handlers::get_dashboard_summary))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(analytics_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Stores + nested ratings
        .nest("/api/v1/stores", store_routes)
        .nest("/api/v1/stores", store_admin_routes)
        .nest("/api/v1/stores", rating_routes)
        // Analytics
        .nest("/api/v1/analytics", analytics_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{
        RatingRepository, StoreRepository, UserRepository,
    };
    use crate::infrastructure::database::seed_default_admin;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let config = AppConfig::default();
        seed_default_admin(&db, &config.admin).await.unwrap();

        let users = Arc::new(UserRepository::new(db.clone()));
        let stores = Arc::new(StoreRepository::new(db.clone()));
        let ratings = Arc::new(RatingRepository::new(db));

        let jwt_config = JwtConfig::default();
        let user_service = Arc::new(UserService::new(users.clone(), jwt_config.clone()));
        let store_service = Arc::new(StoreService::new(stores.clone(), users.clone()));
        let rating_service = Arc::new(RatingService::new(ratings, stores, users));

        create_api_router(user_service, store_service, rating_service, jwt_config)
    }

    async fn call(app: &Router, req: Request<Body>) -> axum::http::Response<Body> {
        // oneshot pins the Service impl to Request<Body>; `ready()` alone
        // is ambiguous because Router also serves IncomingStream.
        app.clone().oneshot(req).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = test_app().await;
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = call(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stores_require_authentication() {
        let app = test_app().await;
        let req = Request::builder()
            .uri("/api/v1/stores")
            .body(Body::empty())
            .unwrap();
        let resp = call(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn seeded_admin_can_login_and_reach_admin_routes() {
        let app = test_app().await;

        let login = json_request(
            "POST",
            "/api/v1/auth/login",
            serde_json::json!({"email": "admin@system.com", "password": "Admin@1234"}),
        );
        let resp = call(&app, login).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let req = Request::builder()
            .uri("/api/v1/analytics/summary")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let resp = call(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn regular_user_cannot_manage_users() {
        let app = test_app().await;

        let register = json_request(
            "POST",
            "/api/v1/auth/register",
            serde_json::json!({
                "name": "Regular Customer Account Name",
                "email": "customer@example.com",
                "password": "Cust@Pass123",
                "address": "5 Market Street"
            }),
        );
        let resp = call(&app, register).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let login = json_request(
            "POST",
            "/api/v1/auth/login",
            serde_json::json!({"email": "customer@example.com", "password": "Cust@Pass123"}),
        );
        let body = body_json(call(&app, login).await).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let req = Request::builder()
            .uri("/api/v1/users")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let resp = call(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn rating_flow_updates_store_summary() {
        let app = test_app().await;

        // Admin login
        let login = json_request(
            "POST",
            "/api/v1/auth/login",
            serde_json::json!({"email": "admin@system.com", "password": "Admin@1234"}),
        );
        let body = body_json(call(&app, login).await).await;
        let admin_token = body["data"]["token"].as_str().unwrap().to_string();

        // Create a store owner and the store
        let create_owner = json_request(
            "POST",
            "/api/v1/users",
            serde_json::json!({
                "name": "Store Owner For Rating Flow",
                "email": "flow-owner@example.com",
                "password": "Owner@Pass12",
                "address": "7 Shop Row",
                "role": "store_owner"
            }),
        );
        let req = with_token(create_owner, &admin_token);
        let body = body_json(call(&app, req).await).await;
        let owner_id = body["data"]["id"].as_str().unwrap().to_string();

        let create_store = with_token(
            json_request(
                "POST",
                "/api/v1/stores",
                serde_json::json!({
                    "name": "Flow Grocery",
                    "email": "flow@example.com",
                    "address": "8 Shop Row",
                    "owner_id": owner_id
                }),
            ),
            &admin_token,
        );
        let body = body_json(call(&app, create_store).await).await;
        let store_id = body["data"]["id"].as_str().unwrap().to_string();

        // Register a customer and rate the store, then change the rating
        let register = json_request(
            "POST",
            "/api/v1/auth/register",
            serde_json::json!({
                "name": "Rating Flow Customer Person",
                "email": "flow-user@example.com",
                "password": "Cust@Pass123",
                "address": "9 Home Row"
            }),
        );
        call(&app, register).await;
        let login = json_request(
            "POST",
            "/api/v1/auth/login",
            serde_json::json!({"email": "flow-user@example.com", "password": "Cust@Pass123"}),
        );
        let body = body_json(call(&app, login).await).await;
        let user_token = body["data"]["token"].as_str().unwrap().to_string();

        let submit = with_token(
            json_request(
                "POST",
                &format!("/api/v1/stores/{}/ratings", store_id),
                serde_json::json!({"rating": 4}),
            ),
            &user_token,
        );
        assert_eq!(call(&app, submit).await.status(), StatusCode::OK);

        let resubmit = with_token(
            json_request(
                "POST",
                &format!("/api/v1/stores/{}/ratings", store_id),
                serde_json::json!({"rating": 2}),
            ),
            &user_token,
        );
        assert_eq!(call(&app, resubmit).await.status(), StatusCode::OK);

        // One rating, value 2: the overwrite must not duplicate
        let req = Request::builder()
            .uri(format!("/api/v1/stores/{}", store_id))
            .header("authorization", format!("Bearer {}", user_token))
            .body(Body::empty())
            .unwrap();
        let body = body_json(call(&app, req).await).await;
        assert_eq!(body["data"]["total_ratings"], 1);
        assert_eq!(body["data"]["average_rating"], 2.0);
    }

    async fn login_token(app: &Router, email: &str, password: &str) -> String {
        let login = json_request(
            "POST",
            "/api/v1/auth/login",
            serde_json::json!({"email": email, "password": password}),
        );
        let body = body_json(call(app, login).await).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(app: &Router) -> String {
        login_token(app, "admin@system.com", "Admin@1234").await
    }

    /// Create a store-owner account (password `Owner@Pass12`) and a store
    /// they own; returns `(owner_id, store_id)`.
    async fn seed_store(
        app: &Router,
        admin: &str,
        owner_email: &str,
        store_name: &str,
    ) -> (String, String) {
        let create_owner = with_token(
            json_request(
                "POST",
                "/api/v1/users",
                serde_json::json!({
                    "name": "Store Owner Seed Account",
                    "email": owner_email,
                    "password": "Owner@Pass12",
                    "address": "7 Shop Row",
                    "role": "store_owner"
                }),
            ),
            admin,
        );
        let body = body_json(call(app, create_owner).await).await;
        let owner_id = body["data"]["id"].as_str().unwrap().to_string();

        let create_store = with_token(
            json_request(
                "POST",
                "/api/v1/stores",
                serde_json::json!({
                    "name": store_name,
                    "email": format!("store-{}", owner_email),
                    "address": "8 Shop Row",
                    "owner_id": owner_id.clone()
                }),
            ),
            admin,
        );
        let body = body_json(call(app, create_store).await).await;
        let store_id = body["data"]["id"].as_str().unwrap().to_string();
        (owner_id, store_id)
    }

    #[tokio::test]
    async fn huge_page_number_returns_an_empty_page() {
        let app = test_app().await;
        let admin = admin_token(&app).await;

        let req = with_token(
            Request::builder()
                .uri("/api/v1/users?page=4294967295&page_size=100")
                .body(Body::empty())
                .unwrap(),
            &admin,
        );
        let resp = call(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(body["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_with_stores_cannot_be_deleted() {
        let app = test_app().await;
        let admin = admin_token(&app).await;
        let (owner_id, store_id) =
            seed_store(&app, &admin, "keep-owner@example.com", "Keep Grocery").await;

        // The owner leaves a rating of their own before the delete attempt
        let owner = login_token(&app, "keep-owner@example.com", "Owner@Pass12").await;
        let submit = with_token(
            json_request(
                "POST",
                &format!("/api/v1/stores/{}/ratings", store_id),
                serde_json::json!({"rating": 5}),
            ),
            &owner,
        );
        assert_eq!(call(&app, submit).await.status(), StatusCode::OK);

        let del = with_token(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{}", owner_id))
                .body(Body::empty())
                .unwrap(),
            &admin,
        );
        assert_eq!(call(&app, del).await.status(), StatusCode::CONFLICT);

        // The refused delete must leave both the account and its ratings intact
        let get_user = with_token(
            Request::builder()
                .uri(format!("/api/v1/users/{}", owner_id))
                .body(Body::empty())
                .unwrap(),
            &admin,
        );
        assert_eq!(call(&app, get_user).await.status(), StatusCode::OK);

        let get_store = with_token(
            Request::builder()
                .uri(format!("/api/v1/stores/{}", store_id))
                .body(Body::empty())
                .unwrap(),
            &admin,
        );
        let body = body_json(call(&app, get_store).await).await;
        assert_eq!(body["data"]["total_ratings"], 1);
        assert_eq!(body["data"]["average_rating"], 5.0);
    }

    #[tokio::test]
    async fn rating_list_is_restricted_to_owner_and_admin() {
        let app = test_app().await;
        let admin = admin_token(&app).await;
        let (_owner_id, store_id) =
            seed_store(&app, &admin, "list-owner@example.com", "List Grocery").await;

        let register = json_request(
            "POST",
            "/api/v1/auth/register",
            serde_json::json!({
                "name": "Curious Customer Account Name",
                "email": "curious@example.com",
                "password": "Cust@Pass123",
                "address": "9 Home Row"
            }),
        );
        assert_eq!(call(&app, register).await.status(), StatusCode::CREATED);
        let customer = login_token(&app, "curious@example.com", "Cust@Pass123").await;

        let submit = with_token(
            json_request(
                "POST",
                &format!("/api/v1/stores/{}/ratings", store_id),
                serde_json::json!({"rating": 3}),
            ),
            &customer,
        );
        assert_eq!(call(&app, submit).await.status(), StatusCode::OK);

        let list_uri = format!("/api/v1/stores/{}/ratings", store_id);

        let as_customer = with_token(
            Request::builder()
                .uri(&list_uri)
                .body(Body::empty())
                .unwrap(),
            &customer,
        );
        assert_eq!(call(&app, as_customer).await.status(), StatusCode::FORBIDDEN);

        let owner = login_token(&app, "list-owner@example.com", "Owner@Pass12").await;
        let as_owner = with_token(
            Request::builder()
                .uri(&list_uri)
                .body(Body::empty())
                .unwrap(),
            &owner,
        );
        let resp = call(&app, as_owner).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["items"][0]["rater_email"], "curious@example.com");

        let as_admin = with_token(
            Request::builder()
                .uri(&list_uri)
                .body(Body::empty())
                .unwrap(),
            &admin,
        );
        assert_eq!(call(&app, as_admin).await.status(), StatusCode::OK);
    }

    fn with_token(mut req: Request<Body>, token: &str) -> Request<Body> {
        req.headers_mut().insert(
            "authorization",
            format!("Bearer {}", token).parse().unwrap(),
        );
        req
    }
}
