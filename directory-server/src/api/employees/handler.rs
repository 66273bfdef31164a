//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::response::ApiResponse;
use shared::validation;

/// Query parameters for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

/// GET /api/employees - list employees, optionally filtered by `?search=`
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Employee>>>> {
    let employees = employee::find_all(&state.pool, params.search.as_deref()).await?;
    Ok(Json(ApiResponse::list(employees)))
}

/// GET /api/employees/{id} - get a single employee
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let found = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    Ok(Json(ApiResponse::ok(found)))
}

/// POST /api/employees - create an employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let normalized = validation::validate_create(&payload).map_err(AppError::validation)?;

    let created = employee::create(&state.pool, normalized).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            created,
            "Employee created successfully",
        )),
    ))
}

/// PUT /api/employees/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let normalized = validation::validate_update(&payload).map_err(AppError::validation)?;

    let updated = employee::update(&state.pool, id, normalized).await?;

    Ok(Json(ApiResponse::ok_with_message(
        updated,
        "Employee updated successfully",
    )))
}

/// DELETE /api/employees/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    employee::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::message_only(
        "Employee deleted successfully",
    )))
}
