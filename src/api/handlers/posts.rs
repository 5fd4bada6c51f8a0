use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ensure_ids_match, parse_id, require};
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::post::{Comment, Post, PostUpdate, PostView};
use crate::domain::RepositoryError;

/// Request body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    /// Id of an existing author
    #[serde(alias = "author_id")]
    pub author: Option<String>,
    pub content: Option<String>,
}

/// Request body for updating a post
///
/// Only `title` and `content` are mutable; any other field is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for adding a comment
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

/// Response for the post listing
#[derive(Debug, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
}

fn post_not_found() -> ApiError {
    ApiError::not_found("Post not found")
}

/// List posts
///
/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostListResponse>, ApiError> {
    let posts = state.posts.find_all(state.posts_page_limit).await?;

    Ok(Json(PostListResponse {
        posts: posts.iter().map(Post::serialize).collect(),
    }))
}

/// Get a post by ID
///
/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostView>, ApiError> {
    let id = parse_id(&id)?;
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(post.serialize()))
}

/// Create a new post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let Json(req) = payload?;

    let title = require(req.title, "title")?;
    let author_id = require(req.author, "author")?;
    let content = require(req.content, "content")?;

    Post::check_fields(&title, &content)?;
    let author_id = uuid::Uuid::parse_str(&author_id)
        .map_err(|_| ApiError::bad_request(format!("Invalid author id: {}", author_id)))?;

    let author = state
        .authors
        .find_by_id(author_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%author_id, "Post rejected, author does not exist");
            ApiError::not_found("Author does not exist")
        })?;

    let post = Post::new(title, content, &author)?;
    state.posts.create(&post).await?;

    tracing::info!(post_id = %post.id(), %author_id, "Post created");
    Ok((StatusCode::CREATED, Json(post.serialize())))
}

/// Update a post's title and/or content
///
/// PUT /posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostView>, ApiError> {
    let Json(req) = payload?;
    let id = ensure_ids_match(&id, req.id.as_deref())?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    post.apply_update(PostUpdate {
        title: req.title,
        content: req.content,
    })?;

    state.posts.update(&post).await.map_err(|e| match e {
        RepositoryError::NotFound => post_not_found(),
        other => other.into(),
    })?;

    Ok(Json(post.serialize()))
}

/// Delete a post
///
/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.posts.delete(id).await.map_err(|e| match e {
        RepositoryError::NotFound => post_not_found(),
        other => other.into(),
    })?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Append a comment to a post
///
/// POST /posts/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let comment = Comment::new(require(req.content, "content")?)?;

    state
        .posts
        .append_comment(id, &comment)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => post_not_found(),
            other => other.into(),
        })?;

    // Re-read so the response carries the thread as stored
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok((StatusCode::CREATED, Json(post.serialize())))
}
