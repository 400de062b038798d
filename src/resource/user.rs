use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::AppState;
use crate::config::AppConfig;
use crate::error::{failure_body, AppError};
use crate::extractors::{ApiJson, ApiQuery};
use crate::models::{
    ApiResponse, CreateUserRequest, ListUsersQuery, ReplaceUserRequest, UpdateUserRequest,
    UserList,
};
use crate::schema::{
    is_valid_email, resolve_pagination, validate_create_user, validate_update_user,
};

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(err: AppError, app_config: &AppConfig) -> ErrorResponse {
    err.to_response(app_config.expose_error_details())
}

fn not_found() -> ErrorResponse {
    (StatusCode::NOT_FOUND, Json(failure_body("User not found")))
}

fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (status, Json(ApiResponse::success(message, data))).into_response()
}

pub async fn create_user(
    State((backend, app_config)): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<Response, ErrorResponse> {
    validate_create_user(&payload).map_err(|e| error_response(e, &app_config))?;

    let user = backend
        .create_user(&payload)
        .await
        .map_err(|e| error_response(e, &app_config))?;

    debug!(user_id = %user.id, "User created");
    Ok(success(StatusCode::CREATED, "User created successfully", user))
}

pub async fn list_users(
    State((backend, app_config)): State<AppState>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> Result<Response, ErrorResponse> {
    let (limit, skip) = resolve_pagination(&query, &app_config.pagination)
        .map_err(|e| error_response(e, &app_config))?;

    let users = backend
        .find_all_users(limit, skip)
        .await
        .map_err(|e| error_response(e, &app_config))?;
    let total = backend
        .count_users()
        .await
        .map_err(|e| error_response(e, &app_config))?;

    Ok(success(
        StatusCode::OK,
        "Users retrieved successfully",
        UserList {
            users,
            total,
            limit,
            skip,
        },
    ))
}

pub async fn get_user(
    State((backend, app_config)): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ErrorResponse> {
    match backend.find_user_by_id(&id).await {
        Ok(Some(user)) => Ok(success(StatusCode::OK, "User retrieved successfully", user)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(error_response(e, &app_config)),
    }
}

pub async fn get_user_by_email(
    State((backend, app_config)): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, ErrorResponse> {
    if !is_valid_email(&email) {
        return Err(error_response(
            AppError::Validation("email must be a valid email address".to_string()),
            &app_config,
        ));
    }

    match backend.find_user_by_email(&email).await {
        Ok(Some(user)) => Ok(success(StatusCode::OK, "User retrieved successfully", user)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(error_response(e, &app_config)),
    }
}

/// `PUT` requires name and email but still merges the remaining fields
pub async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ReplaceUserRequest>,
) -> Result<Response, ErrorResponse> {
    apply_update(state, id, UpdateUserRequest::from(payload)).await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Response, ErrorResponse> {
    apply_update(state, id, payload).await
}

async fn apply_update(
    (backend, app_config): AppState,
    id: String,
    patch: UpdateUserRequest,
) -> Result<Response, ErrorResponse> {
    validate_update_user(&patch).map_err(|e| error_response(e, &app_config))?;
    if patch.is_empty() {
        debug!(user_id = %id, "Empty patch, only updatedAt changes");
    }

    match backend.update_user(&id, &patch).await {
        Ok(Some(user)) => {
            debug!(user_id = %user.id, "User updated");
            Ok(success(StatusCode::OK, "User updated successfully", user))
        }
        Ok(None) => Err(not_found()),
        Err(e) => Err(error_response(e, &app_config)),
    }
}

pub async fn delete_user(
    State((backend, app_config)): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ErrorResponse> {
    match backend.delete_user(&id).await {
        Ok(true) => {
            debug!(user_id = %id, "User deleted");
            Ok((
                StatusCode::OK,
                Json(ApiResponse::empty("User deleted successfully")),
            )
                .into_response())
        }
        Ok(false) => Err(not_found()),
        Err(e) => Err(error_response(e, &app_config)),
    }
}
