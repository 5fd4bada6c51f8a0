//! End-to-end API integration tests
//!
//! These tests drive the full router over the in-memory store:
//! - Post listing, lookup, creation, update and deletion
//! - Author creation, user name uniqueness, update and cascade delete
//! - Comment threads and error mapping

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use blog_api::api::{create_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application over a fresh in-memory store
fn setup_app() -> Router {
    create_router(AppState::in_memory())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn create_author(app: &Router, first: &str, last: &str, user: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/authors",
        Some(json!({ "firstName": first, "lastName": last, "userName": user })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn create_post(app: &Router, author_id: &str, title: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/posts",
        Some(json!({ "title": title, "author": author_id, "content": "Lorem ipsum" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_list_posts_returns_all_seeded_posts() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    for i in 0..4 {
        create_post(&app, &author_id, &format!("Post {}", i)).await;
    }

    let (status, json) = send(&app, "GET", "/posts", None).await;

    assert_eq!(status, StatusCode::OK);
    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 4);
    for post in posts {
        let mut keys: Vec<&str> = post.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["author", "comments", "content", "created", "id", "title"]
        );
        assert_eq!(post["author"], "Ada Lovelace");
    }
    assert_eq!(posts[0]["title"], "Post 0");
}

#[tokio::test]
async fn test_list_posts_respects_page_limit() {
    let app = create_router(AppState::in_memory().with_posts_page_limit(Some(10)));
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    for i in 0..12 {
        create_post(&app, &author_id, &format!("Post {}", i)).await;
    }

    let (status, json) = send(&app, "GET", "/posts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["posts"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_get_post_by_id() {
    let app = setup_app();
    let author_id = create_author(&app, "Grace", "Hopper", "grace").await;
    let post_id = create_post(&app, &author_id, "Compilers").await;

    let (status, json) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], post_id);
    assert_eq!(json["title"], "Compilers");
    assert_eq!(json["author"], "Grace Hopper");
    assert_eq!(json["comments"], json!([]));
}

#[tokio::test]
async fn test_get_unknown_post_returns_404() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "GET",
        &format!("/posts/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Post not found");
}

#[tokio::test]
async fn test_get_post_with_malformed_id_returns_400() {
    let app = setup_app();

    let (status, _) = send(&app, "GET", "/posts/not-an-id", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_without_content_is_rejected() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, json) = send(
        &app,
        "POST",
        "/posts",
        Some(json!({ "title": "Untitled", "author": author_id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing `content` in request body");

    let (_, listing) = send(&app, "GET", "/posts", None).await;
    assert!(listing["posts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_post_reports_first_missing_field() {
    let app = setup_app();

    let (status, json) = send(&app, "POST", "/posts", Some(json!({ "content": "Body" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing `title` in request body");
}

#[tokio::test]
async fn test_create_post_with_empty_title_is_rejected() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, _) = send(
        &app,
        "POST",
        "/posts",
        Some(json!({ "title": "  ", "author": author_id, "content": "Body" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_for_unknown_author_returns_404() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/posts",
        Some(json!({
            "title": "Orphan",
            "author": uuid::Uuid::new_v4().to_string(),
            "content": "Body"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Author does not exist");
}

#[tokio::test]
async fn test_create_post_accepts_author_id_alias() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, json) = send(
        &app,
        "POST",
        "/posts",
        Some(json!({ "title": "Alias", "author_id": author_id, "content": "Body" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["author"], "Ada Lovelace");
}

#[tokio::test]
async fn test_create_post_with_malformed_json_returns_400() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/posts")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_post_applies_allow_listed_fields() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let post_id = create_post(&app, &author_id, "Draft").await;
    let (_, before) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/posts/{}", post_id),
        Some(json!({
            "id": post_id,
            "title": "Final",
            "created": "1970-01-01T00:00:00Z",
            "author": "Someone Else"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Final");
    assert_eq!(json["content"], "Lorem ipsum");
    assert_eq!(json["author"], "Ada Lovelace");
    assert_eq!(json["created"], before["created"]);
}

#[tokio::test]
async fn test_update_post_with_mismatched_id_makes_no_change() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let post_id = create_post(&app, &author_id, "Draft").await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/posts/{}", post_id),
        Some(json!({ "id": uuid::Uuid::new_v4().to_string(), "title": "Hijacked" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("must match"));

    let (_, post) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;
    assert_eq!(post["title"], "Draft");
}

#[tokio::test]
async fn test_update_unknown_post_returns_404() {
    let app = setup_app();
    let id = uuid::Uuid::new_v4().to_string();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/posts/{}", id),
        Some(json!({ "id": id, "title": "Nothing" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_post_with_malformed_id_returns_400() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/posts/not-a-uuid",
        Some(json!({ "id": "not-a-uuid", "title": "Nothing" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid id: not-a-uuid");
}

#[tokio::test]
async fn test_delete_post_with_malformed_id_returns_400() {
    let app = setup_app();

    let (status, json) = send(&app, "DELETE", "/posts/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid id: not-a-uuid");
}

#[tokio::test]
async fn test_delete_post() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let post_id = create_post(&app, &author_id, "Ephemeral").await;

    let (status, body) = send(&app, "DELETE", &format!("/posts/{}", post_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/posts/{}", post_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_comments_to_post() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let post_id = create_post(&app, &author_id, "Discuss").await;
    let uri = format!("/posts/{}/comments", post_id);

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "content": "First!" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = send(&app, "POST", &uri, Some(json!({ "content": "Second" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(
        json["comments"],
        json!([{ "content": "First!" }, { "content": "Second" }])
    );

    let (status, _) = send(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_on_unknown_post_returns_404() {
    let app = setup_app();
    let uri = format!("/posts/{}/comments", uuid::Uuid::new_v4());

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "content": "Hello?" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_author_returns_name_view() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "firstName": "Barbara", "lastName": "Liskov", "userName": "liskov" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["id"].is_string());
    assert_eq!(json["name"], "Barbara Liskov");
    assert_eq!(json["userName"], "liskov");
}

#[tokio::test]
async fn test_create_author_missing_field() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "firstName": "Barbara", "userName": "liskov" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing `lastName` in request body");
}

#[tokio::test]
async fn test_duplicate_user_name_is_rejected() {
    let app = setup_app();
    create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, json) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "firstName": "Augusta", "lastName": "King", "userName": "ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reason"], "username_taken");

    let (_, authors) = send(&app, "GET", "/authors", None).await;
    let with_name: Vec<&Value> = authors
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["userName"] == "ada")
        .collect();
    assert_eq!(with_name.len(), 1);
    assert_eq!(with_name[0]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_update_author_renames_posts() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let post_id = create_post(&app, &author_id, "Notes").await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/authors/{}", author_id),
        Some(json!({ "id": author_id, "lastName": "King", "password": "ignored" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Ada King");
    assert_eq!(json["userName"], "ada");

    let (_, post) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;
    assert_eq!(post["author"], "Ada King");
}

#[tokio::test]
async fn test_update_author_to_taken_user_name() {
    let app = setup_app();
    create_author(&app, "Ada", "Lovelace", "ada").await;
    let grace_id = create_author(&app, "Grace", "Hopper", "grace").await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/authors/{}", grace_id),
        Some(json!({ "id": grace_id, "userName": "ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reason"], "username_taken");

    let (_, grace) = send(&app, "GET", &format!("/authors/{}", grace_id), None).await;
    assert_eq!(grace["userName"], "grace");
}

#[tokio::test]
async fn test_update_author_keeping_own_user_name() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/authors/{}", author_id),
        Some(json!({ "id": author_id, "userName": "ada", "firstName": "Augusta" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Augusta Lovelace");
}

#[tokio::test]
async fn test_update_author_with_mismatched_id() {
    let app = setup_app();
    let author_id = create_author(&app, "Ada", "Lovelace", "ada").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/authors/{}", author_id),
        Some(json!({ "firstName": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_author_returns_404() {
    let app = setup_app();
    let id = uuid::Uuid::new_v4().to_string();

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/authors/{}", id),
        Some(json!({ "id": id, "firstName": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Author not found");
}

#[tokio::test]
async fn test_update_author_with_malformed_id_returns_400() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/authors/not-a-uuid",
        Some(json!({ "id": "not-a-uuid", "firstName": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid id: not-a-uuid");
}

#[tokio::test]
async fn test_delete_author_with_malformed_id_returns_400() {
    let app = setup_app();

    let (status, json) = send(&app, "DELETE", "/authors/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid id: not-a-uuid");
}

#[tokio::test]
async fn test_delete_author_cascades_to_posts() {
    let app = setup_app();
    let ada_id = create_author(&app, "Ada", "Lovelace", "ada").await;
    let grace_id = create_author(&app, "Grace", "Hopper", "grace").await;
    let ada_posts = vec![
        create_post(&app, &ada_id, "One").await,
        create_post(&app, &ada_id, "Two").await,
    ];
    let grace_post = create_post(&app, &grace_id, "Three").await;

    let (status, _) = send(&app, "DELETE", &format!("/authors/{}", ada_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for post_id in &ada_posts {
        let (status, _) = send(&app, "GET", &format!("/posts/{}", post_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _) = send(&app, "GET", &format!("/posts/{}", grace_post), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/authors/{}", ada_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_author_returns_404() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "DELETE",
        &format!("/authors/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Author not found");
}

#[tokio::test]
async fn test_unmatched_route_returns_404() {
    let app = setup_app();

    let (status, json) = send(&app, "GET", "/comments", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not found");
}

#[tokio::test]
async fn test_wrong_method_on_known_route_returns_404() {
    let app = setup_app();
    let post_uri = format!("/posts/{}", uuid::Uuid::new_v4());

    for (method, uri) in [
        ("DELETE", "/posts"),
        ("PATCH", post_uri.as_str()),
        ("PUT", "/authors"),
        ("GET", "/posts/x/comments"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(json, json!({ "error": "Not found" }), "{} {}", method, uri);
    }
}
