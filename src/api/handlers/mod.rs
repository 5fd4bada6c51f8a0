// HTTP handlers and the request checks they share

pub mod authors;
pub mod health;
pub mod posts;

use uuid::Uuid;

use crate::api::errors::ApiError;

/// Fallback for unmatched routes and for methods a route does not serve
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Parses an identifier taken from the path
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

/// Unwraps a required body field or rejects the request naming it
///
/// Callers check fields in a fixed order, so the first missing one wins.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        let message = format!("Missing `{}` in request body", field);
        tracing::warn!("{}", message);
        ApiError::bad_request(message)
    })
}

/// Rejects a PUT whose body id is absent or differs from the path id
pub(crate) fn ensure_ids_match(path_id: &str, body_id: Option<&str>) -> Result<Uuid, ApiError> {
    let id = parse_id(path_id)?;
    match body_id {
        Some(body_id) if Uuid::parse_str(body_id).ok() == Some(id) => Ok(id),
        _ => {
            let message = format!(
                "Request path id ({}) and request body id ({}) must match",
                path_id,
                body_id.unwrap_or("")
            );
            tracing::warn!("{}", message);
            Err(ApiError::bad_request(message))
        }
    }
}
