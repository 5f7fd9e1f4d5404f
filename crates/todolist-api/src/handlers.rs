use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use todolist_core::models::{
    NewTaskData, Task, TaskFilter, TaskPriority, TaskStatistics, UpdateTaskData,
};
use todolist_core::repository::Repository;

use crate::error::ApiError;
use crate::schemas::{
    CategoryRef, CategoryResponse, ListQuery, TaskCreate, TaskResponse, TaskUpdate,
};
use crate::state::AppState;

pub async fn create_task<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Json(body): Json<TaskCreate>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let priority = body.priority.map(TaskPriority::try_from).transpose()?;

    let task = state
        .service
        .create_task(NewTaskData {
            title: body.title,
            description: body.description,
            priority,
            due_date: body.due_date,
            category_name: body.category_name,
            ..Default::default()
        })
        .await?;

    let response = with_category(&state, task).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_tasks<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let filter = TaskFilter {
        completed: query.completed,
        search: query.q,
    };
    let tasks = state
        .service
        .list_tasks(&filter, query.skip, query.limit)
        .await?;

    let now = Utc::now();
    let responses = tasks
        .into_iter()
        .map(|task| TaskResponse::from_listed(task, now))
        .collect();
    Ok(Json(responses))
}

pub async fn get_task<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state
        .service
        .get_task(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;
    Ok(Json(with_category(&state, task).await?))
}

pub async fn update_task<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
    Json(body): Json<TaskUpdate>,
) -> Result<Json<TaskResponse>, ApiError> {
    let priority = body.priority.map(TaskPriority::try_from).transpose()?;

    let data = UpdateTaskData {
        title: body.title,
        description: body.description,
        priority,
        due_date: body.due_date,
        category_name: body.category_name,
        ..Default::default()
    };

    let task = state
        .service
        .update_task(id, data)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;
    Ok(Json(with_category(&state, task).await?))
}

pub async fn complete_task<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state
        .service
        .complete_task(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;
    Ok(Json(with_category(&state, task).await?))
}

pub async fn delete_task<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete_task(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Task", id))
    }
}

pub async fn task_statistics<R: Repository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<TaskStatistics>, ApiError> {
    Ok(Json(state.service.statistics().await?))
}

pub async fn list_categories<R: Repository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

pub async fn delete_category<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete_category(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Category", id))
    }
}

async fn with_category<R: Repository>(
    state: &AppState<R>,
    task: Task,
) -> Result<TaskResponse, ApiError> {
    let category = match task.category_id {
        Some(category_id) => state
            .service
            .category(category_id)
            .await?
            .map(|c| CategoryRef {
                id: c.id,
                name: c.name,
            }),
        None => None,
    };
    Ok(TaskResponse::from_task(task, category, Utc::now()))
}
