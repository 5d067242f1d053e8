use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use entity::EmployeeFields;
use platform_api::{ApiError, ApiResult, MessageResponse};
use platform_db::{EmployeeRecord, EmployeeStore};
use tracing::{debug, info, instrument};

use crate::http::AppState;

const REQUIRED_FIELDS: &str = "name, role, salary and terminated are required";
const CREATED: &str = "employee created successfully";
const DELETED: &str = "employee deleted successfully";
const NOT_FOUND: &str = "employee not found";

/// Validates employee writes and delegates persistence to the injected store.
#[derive(Clone)]
pub struct EmployeeHandler {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeHandler {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "employees.create", skip_all)]
    pub async fn create(&self, input: EmployeeFields) -> ApiResult<MessageResponse> {
        validate_create(&input)?;
        let record = self.store.create(input).await.map_err(ApiError::store)?;
        info!(id = %record.id, "employee created");
        Ok(MessageResponse::new(CREATED))
    }

    #[instrument(name = "employees.list", skip_all)]
    pub async fn list(&self) -> ApiResult<Vec<EmployeeRecord>> {
        self.store.find_all().await.map_err(ApiError::store)
    }

    #[instrument(name = "employees.get", skip(self))]
    pub async fn get(&self, id: &str) -> ApiResult<EmployeeRecord> {
        self.store
            .find_by_id(id)
            .await
            .map_err(ApiError::store)?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))
    }

    /// Replaces all four business fields without validating them.
    #[instrument(name = "employees.update", skip(self, input))]
    pub async fn update(&self, id: &str, input: EmployeeFields) -> ApiResult<EmployeeRecord> {
        let record = self
            .store
            .replace_by_id(id, input)
            .await
            .map_err(ApiError::store)?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        info!("employee updated");
        Ok(record)
    }

    #[instrument(name = "employees.delete", skip(self))]
    pub async fn delete(&self, id: &str) -> ApiResult<MessageResponse> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(ApiError::store)?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        info!("employee deleted");
        Ok(MessageResponse::new(DELETED))
    }
}

/// Create requires non-empty `name` and `role`, a non-zero `salary` and a
/// present `terminated`; `terminated: false` is accepted.
pub fn validate_create(input: &EmployeeFields) -> ApiResult<()> {
    let blank = |value: &Option<String>| value.as_deref().is_none_or(str::is_empty);
    let salary_missing = match input.salary {
        Some(salary) => salary == 0.0 || salary.is_nan(),
        None => true,
    };

    if blank(&input.name) || blank(&input.role) || salary_missing || input.terminated.is_none() {
        debug!("rejecting incomplete employee payload");
        return Err(ApiError::validation(REQUIRED_FIELDS));
    }
    Ok(())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

async fn create_employee(
    State(handler): State<EmployeeHandler>,
    payload: Result<Json<EmployeeFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(input) = payload?;
    let message = handler.create(input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

async fn list_employees(
    State(handler): State<EmployeeHandler>,
) -> ApiResult<Json<Vec<EmployeeRecord>>> {
    Ok(Json(handler.list().await?))
}

async fn get_employee(
    State(handler): State<EmployeeHandler>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeRecord>> {
    Ok(Json(handler.get(&id).await?))
}

async fn update_employee(
    State(handler): State<EmployeeHandler>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeFields>, JsonRejection>,
) -> ApiResult<Json<EmployeeRecord>> {
    let Json(input) = payload?;
    Ok(Json(handler.update(&id, input).await?))
}

async fn delete_employee(
    State(handler): State<EmployeeHandler>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(handler.delete(&id).await?))
}
