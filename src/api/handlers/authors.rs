use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{ensure_ids_match, parse_id, require};
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::author::{Author, AuthorUpdate, AuthorView, UserName};
use crate::domain::RepositoryError;

/// Request body for creating an author
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// Request body for updating an author
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

fn author_not_found() -> ApiError {
    ApiError::not_found("Author not found")
}

fn username_taken() -> ApiError {
    tracing::warn!("Rejected duplicate user name");
    ApiError::conflict("Username already taken", "username_taken")
}

/// Maps repository errors for author writes
fn map_write_error(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::NotFound => author_not_found(),
        RepositoryError::Conflict(_) => username_taken(),
        other => other.into(),
    }
}

/// List all authors
///
/// GET /authors
pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<AuthorView>>, ApiError> {
    let authors = state.authors.find_all().await?;
    Ok(Json(authors.iter().map(Author::serialize).collect()))
}

/// Get an author by ID
///
/// GET /authors/:id
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuthorView>, ApiError> {
    let id = parse_id(&id)?;
    let author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(author_not_found)?;

    Ok(Json(author.serialize()))
}

/// Create a new author
///
/// POST /authors
pub async fn create_author(
    State(state): State<AppState>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorView>), ApiError> {
    let Json(req) = payload?;

    let first_name = require(req.first_name, "firstName")?;
    let last_name = require(req.last_name, "lastName")?;
    let user_name = require(req.user_name, "userName")?;

    let author = Author::new(first_name, last_name, user_name)?;

    // Not atomic with the insert; the store's unique constraint catches races
    if state
        .authors
        .find_by_user_name(author.user_name())
        .await?
        .is_some()
    {
        return Err(username_taken());
    }

    state.authors.create(&author).await.map_err(map_write_error)?;

    tracing::info!(author_id = %author.id(), user_name = %author.user_name(), "Author created");
    Ok((StatusCode::CREATED, Json(author.serialize())))
}

/// Update an author's names and/or user name
///
/// PUT /authors/:id
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAuthorRequest>, JsonRejection>,
) -> Result<Json<AuthorView>, ApiError> {
    let Json(req) = payload?;
    let id = ensure_ids_match(&id, req.id.as_deref())?;

    // Validate the new user name before touching the store
    let requested_user_name = req.user_name.as_deref().map(UserName::new).transpose()?;

    let mut author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(author_not_found)?;

    if let Some(user_name) = &requested_user_name {
        if let Some(holder) = state.authors.find_by_user_name(user_name).await? {
            if holder.id() != id {
                return Err(username_taken());
            }
        }
    }

    author.apply_update(AuthorUpdate {
        first_name: req.first_name,
        last_name: req.last_name,
        user_name: req.user_name,
    })?;

    state.authors.update(&author).await.map_err(map_write_error)?;

    Ok(Json(author.serialize()))
}

/// Delete an author and every post they wrote
///
/// DELETE /authors/:id
///
/// Posts go first, then the author. The two deletes are not transactional.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if state.authors.find_by_id(id).await?.is_none() {
        return Err(author_not_found());
    }

    let removed_posts = state.posts.delete_by_author(id).await?;
    state.authors.delete(id).await.map_err(map_write_error)?;

    tracing::info!(author_id = %id, removed_posts, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}
