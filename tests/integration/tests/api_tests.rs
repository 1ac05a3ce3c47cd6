//! API integration tests
//!
//! Each test spawns its own server on an ephemeral port, backed by in-memory
//! repositories, so tests never share state.
//!
//! Run with: cargo test -p integration-tests

use integration_tests::*;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.unwrap();

    let body: Value = assert_json(server.get("/health").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gallery-test");

    let body: Value = assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["checks"]["database"], "healthy");

    server.store.set_healthy(false);
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Department Tests
// ============================================================================

#[tokio::test]
async fn test_departments_are_listed() {
    let server = TestServer::start().await.unwrap();
    let body: Value = assert_json(server.get("/departments").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let departments = body["data"].as_array().unwrap();
    assert_eq!(departments.len(), 6);
    assert!(departments.iter().any(|d| d["name"] == "개발팀" && d["color"] == "#10B981"));
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_then_unlike() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Hackathon");
    let client = unique_client_ip();
    let path = format!("/photos/{}/like", photo.id);

    let body: Value = assert_json(
        server.post_as(&path, &client, &LikeBody::like()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"], json!({"likeCount": 1, "isLiked": true}));

    // The detail view reflects this client's like
    let body: Value = assert_json(
        server.get_as(&format!("/photos/{}", photo.id), &client).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"]["isLiked"], true);

    let body: Value = assert_json(
        server.post_as(&path, &client, &LikeBody::unlike()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"], json!({"likeCount": 0, "isLiked": false}));
}

#[tokio::test]
async fn test_double_like_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Launch");
    let client = unique_client_ip();
    let path = format!("/photos/{}/like", photo.id);

    let response = server.post_as(&path, &client, &LikeBody::like()).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_as(&path, &client, &LikeBody::like()).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "ALREADY_LIKED").await.unwrap();

    // A different client may still like it
    let response = server
        .post_as(&path, &unique_client_ip(), &LikeBody::like())
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["likeCount"], 2);
    assert_eq!(server.store.like_count(), 2);
}

#[tokio::test]
async fn test_unlike_without_like_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("영업팀", "Quarter close");

    let response = server
        .post_as(&format!("/photos/{}/like", photo.id), &unique_client_ip(), &LikeBody::unlike())
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "NOT_LIKED").await.unwrap();
}

#[tokio::test]
async fn test_like_missing_photo() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_as(&format!("/photos/{}/like", Uuid::new_v4()), &unique_client_ip(), &LikeBody::like())
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "PHOTO_NOT_FOUND").await.unwrap();
}

#[tokio::test]
async fn test_like_requires_flag() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Standup");
    let response = server
        .post(&format!("/photos/{}/like", photo.id), &json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_BODY").await.unwrap();
}

// ============================================================================
// View Counter Tests
// ============================================================================

#[tokio::test]
async fn test_each_detail_view_counts() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("마케팅팀", "Booth");
    let path = format!("/photos/{}", photo.id);

    assert_status(server.get(&path).await.unwrap(), StatusCode::OK).await.unwrap();
    let body: Value = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["data"]["viewCount"], 2);
}

#[tokio::test]
async fn test_detail_of_missing_photo() {
    let server = TestServer::start().await.unwrap();
    let response = server.get(&format!("/photos/{}", Uuid::new_v4())).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "PHOTO_NOT_FOUND").await.unwrap();

    let response = server.get("/photos/not-a-uuid").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_fourth_comment_in_window_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Retro");
    let client = unique_client_ip();

    for i in 0..3 {
        let response = server
            .post_as("/comments", &client, &CreateComment::new(photo.id, format!("comment {i}")))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_as("/comments", &client, &CreateComment::new(photo.id, "one more"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("retry-after"));
    assert_error(response, StatusCode::BAD_REQUEST, "TOO_MANY_COMMENTS")
        .await
        .unwrap();
    assert_eq!(server.store.comment_count(), 3);

    // Other clients are unaffected
    let response = server
        .post_as("/comments", &unique_client_ip(), &CreateComment::new(photo.id, "hello"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_comment_length_limit() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Offsite");
    let client = unique_client_ip();

    let response = server
        .post_as("/comments", &client, &CreateComment::new(photo.id, "가".repeat(201)))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server
        .post_as("/comments", &client, &CreateComment::new(photo.id, "가".repeat(200)))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_comment_on_missing_photo() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_as("/comments", &unique_client_ip(), &CreateComment::new(Uuid::new_v4(), "hi"))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "PHOTO_NOT_FOUND").await.unwrap();
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("인사팀", "Welcome lunch");
    let client = unique_client_ip();

    let created: Value = assert_json(
        server
            .post_as("/comments", &client, &CreateComment::new(photo.id, "Looks great"))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let body: Value = assert_json(
        server
            .get(&format!("/comments/photo/{}/count", photo.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"]["count"], 1);

    let body: Value = assert_json(
        server
            .patch(&format!("/comments/{id}"), &json!({"content": "Looks amazing"}))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"]["content"], "Looks amazing");

    let response = server.delete(&format!("/comments/{id}")).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/comments/{id}")).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "COMMENT_NOT_FOUND")
        .await
        .unwrap();
}

// ============================================================================
// Photo Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_filters_by_department_with_meta() {
    let server = TestServer::start().await.unwrap();
    server.store.seed_photo("개발팀", "Deploy day");
    server.store.seed_photo("개발팀", "Code review");
    server.store.seed_photo("영업팀", "Client visit");

    let body: Value = assert_json(
        server
            .get("/photos?departmentName=%EA%B0%9C%EB%B0%9C%ED%8C%80&limit=1")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["totalPages"], 2);

    let body: Value = assert_json(server.get("/photos/departments").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["data"], json!(["개발팀", "영업팀"]));
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_stores_image() {
    let server = TestServer::start().await.unwrap();

    let form = upload_form("디자인팀", "Moodboard", png_bytes(64, 48), "image/png");
    let body: Value = assert_json(server.upload(form).await.unwrap(), StatusCode::CREATED)
        .await
        .unwrap();

    let photo = &body["data"];
    assert_eq!(photo["departmentName"], "디자인팀");
    assert_eq!(photo["likeCount"], 0);
    let image_url = photo["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/"));

    // Served back from the upload directory
    let response = server.get(image_url).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(std::fs::read_dir(server.upload_dir()).unwrap().count() >= 1);
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let server = TestServer::start().await.unwrap();
    let form = upload_form("디자인팀", "Notes", b"%PDF-1.4".to_vec(), "application/pdf");
    let response = server.upload(form).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_requires_title() {
    let server = TestServer::start().await.unwrap();
    let form = upload_form("디자인팀", "   ", png_bytes(8, 8), "image/png");
    let response = server.upload(form).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_wrong_password_is_soft_failure() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/admin/login", &json!({"password": "nope"}))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_none());
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_session_gates_mutations() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "All hands");
    let path = format!("/photos/{}", photo.id);

    let response = server.patch(&path, &json!({"title": "Renamed"})).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_SESSION")
        .await
        .unwrap();

    let cookie = server.admin_cookie().await.unwrap();

    let body: Value = assert_json(server.get_admin("/admin/verify", &cookie).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["isAdmin"], true);

    let body: Value = assert_json(
        server.patch_admin(&path, &cookie, &json!({"title": "Renamed"})).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"]["title"], "Renamed");

    let body: Value = assert_json(
        server
            .post_admin(&format!("{path}/top-pick"), &cookie)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["data"]["isTopPick"], true);

    let body: Value = assert_json(server.get("/photos/top-picks").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = server.delete_admin(&path, &cookie).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(server.store.photo(photo.id).is_none());
}

#[tokio::test]
async fn test_forged_session_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let photo = server.store.seed_photo("개발팀", "Forged");

    let response = server
        .delete_admin(&format!("/photos/{}", photo.id), "admin_session=forged.token.value")
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_SESSION")
        .await
        .unwrap();

    let body: Value = assert_json(
        server
            .get_admin("/admin/verify", "admin_session=forged.token.value")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["isAdmin"], false);
}
