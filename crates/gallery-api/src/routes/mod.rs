//! Route definitions
//!
//! Routes are mounted at the root, matching the paths the frontend calls.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use gallery_common::AppConfig;
use tower_http::services::ServeDir;

use crate::handlers::{admin, comments, departments, health, photos};
use crate::state::AppState;

/// Room for the multipart text fields around the file
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the main router with all routes
pub fn create_router(config: &AppConfig) -> Router<AppState> {
    let upload_limit = config
        .storage
        .max_file_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .merge(health_routes())
        .merge(department_routes())
        .merge(photo_routes(upload_limit))
        .merge(comment_routes())
        .merge(admin_routes())
        .nest_service(&config.storage.url_prefix, ServeDir::new(&config.storage.upload_dir))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn department_routes() -> Router<AppState> {
    Router::new().route("/departments", get(departments::list_departments))
}

fn photo_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/photos",
            get(photos::list_photos)
                .post(photos::upload_photo)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/photos/departments", get(photos::list_photo_departments))
        .route("/photos/top-picks", get(photos::list_top_picks))
        .route(
            "/photos/:id",
            get(photos::get_photo)
                .patch(photos::update_photo)
                .delete(photos::delete_photo),
        )
        .route("/photos/:id/like", post(photos::toggle_like))
        .route("/photos/:id/top-pick", post(photos::toggle_top_pick))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route("/comments/photo/:photo_id", get(comments::list_photo_comments))
        .route("/comments/photo/:photo_id/count", get(comments::count_photo_comments))
        .route(
            "/comments/:id",
            get(comments::get_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/verify", get(admin::verify))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use gallery_service::memory::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::server::create_app;

    fn test_config() -> AppConfig {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("API_PORT", "0"),
            ("DATABASE_URL", "postgres://unused"),
            ("ADMIN_PASSWORD", "unused"),
            ("ADMIN_SESSION_SECRET", "unused"),
            ("UPLOAD_DIR", "./target/test-uploads"),
        ]);
        AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap()
    }

    fn app(store: &MemoryStore) -> Router {
        let ctx = store.context_builder().build().unwrap();
        create_app(AppState::new(ctx, test_config()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_routes() {
        let store = MemoryStore::new();

        let (status, body) = send(app(&store), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        store.set_healthy(false);
        let (status, body) = send(app(&store), get("/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["checks"]["database"], "unhealthy");
    }

    #[tokio::test]
    async fn test_static_segments_win_over_ids() {
        let store = MemoryStore::new();
        store.seed_photo("개발팀", "Static");

        let (status, body) = send(app(&store), get("/photos/departments")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0], "개발팀");

        let (status, body) = send(app(&store), get("/photos/top-picks")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_bad_id_is_rejected() {
        let store = MemoryStore::new();
        let (status, body) = send(app(&store), get("/photos/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_PATH_PARAMETER");
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let store = MemoryStore::new();
        let photo = store.seed_photo("개발팀", "Guarded");

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/photos/{}", photo.id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(&store), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_SESSION");
        assert!(store.photo(photo.id).is_some());
    }

    #[tokio::test]
    async fn test_comment_body_validation() {
        let store = MemoryStore::new();
        let photo = store.seed_photo("개발팀", "Comments");

        let request = Request::builder()
            .method("POST")
            .uri("/comments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "photoId": photo.id,
                    "nickname": "guest",
                    "content": "x".repeat(201),
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(app(&store), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(store.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_padded_comment_within_limit_is_accepted() {
        let store = MemoryStore::new();
        let photo = store.seed_photo("개발팀", "Comments");

        let request = Request::builder()
            .method("POST")
            .uri("/comments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "photoId": photo.id,
                    "nickname": " guest ",
                    "content": format!("   {}   ", "x".repeat(199)),
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(app(&store), request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["nickname"], "guest");
        assert_eq!(body["data"]["content"].as_str().map(str::len), Some(199));
        assert_eq!(store.comment_count(), 1);
    }
}
