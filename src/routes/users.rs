// SPDX-License-Identifier: MIT

//! Admin API routes for the user directory.

use crate::error::{AppError, Result};
use crate::models::user::{User, UserStatus, UserUpdate};
use crate::roles::{Role, RoleAssignment};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/roles", post(assign_role))
        .route("/api/users/{id}/roles/{role}", axum::routing::delete(remove_role))
        .route("/api/users/{id}/rename", post(rename_user))
}

/// Ids are uppercase alphanumerics by dashboard convention. Enforced here,
/// at the request boundary, not by the directory itself.
fn validate_user_id(id: &str) -> std::result::Result<(), ValidationError> {
    if id
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(ValidationError::new("uppercase_alphanumeric"))
    }
}

/// Stored records never leak passwords through the API.
fn sanitized(mut user: User) -> User {
    user.password = None;
    user
}

// ─── Listing ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Filter to users holding this role.
    role: Option<Role>,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<User>>> {
    let users = match params.role {
        Some(role) => state.directory.list_by_role(role),
        None => state.directory.list(),
    };
    Ok(Json(users.into_iter().map(sanitized).collect()))
}

// ─── Creation ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 3, max = 10),
        custom(function = validate_user_id)
    )]
    pub id: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub status: UserStatus,
    /// Initial role; defaults to `User`. Role-specific data is attached
    /// afterwards through the assign endpoint.
    #[serde(default)]
    pub role: Role,
    pub last_login: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub country: Option<String>,
    pub classification: Option<String>,
    pub organizations: Option<Vec<String>>,
    pub clubs: Option<Vec<String>>,
    pub profile_picture: Option<String>,
    pub password: Option<String>,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut user = User::new(payload.id);
    user.email = payload.email;
    user.first_name = payload.first_name;
    user.last_name = payload.last_name;
    user.status = payload.status;
    user.last_login = payload
        .last_login
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    user.gender = payload.gender;
    user.dob = payload.dob;
    user.phone1 = payload.phone1;
    user.phone2 = payload.phone2;
    user.country = payload.country;
    user.classification = payload.classification;
    user.organizations = payload.organizations;
    user.clubs = payload.clubs;
    user.profile_picture = payload.profile_picture;
    user.password = payload.password;

    let created = state
        .directory
        .create(user, RoleAssignment::bare(payload.role))?;
    Ok((StatusCode::CREATED, Json(sanitized(created))))
}

// ─── Single-user operations ──────────────────────────────────────

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(sanitized(state.directory.get(&id)?)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>> {
    Ok(Json(sanitized(state.directory.update(&id, &update)?)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.directory.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Role management ─────────────────────────────────────────────

async fn assign_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(assignment): Json<RoleAssignment>,
) -> Result<Json<User>> {
    Ok(Json(sanitized(state.directory.assign_role(&id, assignment)?)))
}

async fn remove_role(
    State(state): State<Arc<AppState>>,
    Path((id, role)): Path<(String, String)>,
) -> Result<Json<User>> {
    let role: Role = role
        .parse()
        .map_err(|e: crate::roles::UnknownRole| AppError::BadRequest(e.to_string()))?;
    Ok(Json(sanitized(state.directory.remove_role(&id, role)?)))
}

// ─── Rename ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RenameRequest {
    #[validate(
        length(min = 3, max = 10),
        custom(function = validate_user_id)
    )]
    pub new_id: String,
}

/// Rename a user id. References held by other entities are the caller's
/// problem; the response carries the updated record only.
async fn rename_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(sanitized(
        state.directory.rename_id(&id, &payload.new_id)?,
    )))
}
