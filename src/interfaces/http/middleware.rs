//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::infrastructure::crypto::jwt::{verify_token, AuthError, Claims, JwtConfig};

/// Authentication state for the middleware layer
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information extracted from a verified JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_store_owner(&self) -> bool {
        self.role == "store_owner"
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
///
/// Verifies the bearer token and inserts `AuthenticatedUser` into the
/// request extensions for downstream handlers.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Admin-only middleware. Must be layered after `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>() else {
        return auth_error_response(AuthError::MissingToken);
    };

    if !user.is_admin() {
        return auth_error_response(AuthError::InsufficientPermissions);
    }

    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        _ => StatusCode::UNAUTHORIZED,
    };

    let body = Json(json!({
        "success": false,
        "error": error.to_string()
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::create_token;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::Service;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        format!("{}:{}", user.user_id, user.role)
    }

    fn protected_app(jwt_config: JwtConfig) -> Router {
        Router::new().route("/whoami", get(whoami)).layer(
            middleware::from_fn_with_state(AuthState { jwt_config }, auth_middleware),
        )
    }

    fn admin_app(jwt_config: JwtConfig) -> Router {
        Router::new()
            .route("/admin", get(|| async { "ok" }))
            .layer(middleware::from_fn(admin_middleware))
            .layer(middleware::from_fn_with_state(
                AuthState { jwt_config },
                auth_middleware,
            ))
    }

    async fn send(app: Router, token: Option<&str>) -> StatusCode {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = builder.body(Body::empty()).unwrap();
        let mut svc = app.into_service();
        svc.call(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let status = send(protected_app(JwtConfig::default()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_401() {
        let status = send(protected_app(JwtConfig::default()), Some("nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_passes_through() {
        let config = JwtConfig::default();
        let token = create_token("u-1", "Some Person", "user", &config).unwrap();
        let status = send(protected_app(config), Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_admin_is_403_on_admin_routes() {
        let config = JwtConfig::default();
        let token = create_token("u-1", "Some Person", "user", &config).unwrap();

        let req = axum::http::Request::builder()
            .uri("/admin")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let mut svc = admin_app(config).into_service();
        let status = svc.call(req).await.unwrap().status();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
