use crate::{
    auth::Principal,
    error::AppError,
    models::{Task, TaskInput},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Lists the task endpoints.
#[get("")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "task list -> GET": "/tasks/list",
        "Add task -> POST": "/tasks/add",
        "Get task -> GET": "/tasks/{id}",
        "Update task -> PUT": "/tasks/{id}",
        "Delete task -> DELETE": "/tasks/{id}",
    }))
}

/// Retrieves the authenticated user's live tasks.
///
/// Deleted tasks are never listed. Tasks come back in storage order; an empty array is a
/// normal answer.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `500 Internal Server Error`: For database errors.
#[get("/list")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_active_tasks(principal.user_id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The id and timestamps are generated by the server; an echoed `taskId` in the body is
/// ignored. The response is the task as stored.
///
/// ## Responses:
/// - `201 Created`: Returns the new `Task` as JSON.
/// - `400 Bad Request`: If the body is not valid JSON.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `422 Unprocessable Entity`: If the description is empty or too long.
#[post("/add")]
pub async fn create_task(
    state: web::Data<AppState>,
    principal: Principal,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner().description, principal.user_id);
    let task = state.tasks.insert_task(task).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a live task by its ID.
///
/// The store looks tasks up by id alone; ownership is enforced here, and another user's
/// task is reported exactly like a missing one.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` as JSON.
/// - `400 Bad Request`: If the id is not a UUID.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no live task with this id belongs to the caller.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    principal: Principal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    match state.tasks.get_task(task_id.into_inner()).await? {
        Some(task) if task.owner_id == principal.user_id => Ok(HttpResponse::Ok().json(task)),
        _ => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Updates the description of a live task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no live task with this id belongs to the caller. The task is
///   left untouched.
/// - `422 Unprocessable Entity`: If validation fails or an echoed `taskId` disagrees
///   with the path.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    principal: Principal,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();

    if let Some(echoed) = task_data.task_id {
        if echoed != task_id {
            return Err(AppError::ValidationError(
                "taskId in the body does not match the path".into(),
            ));
        }
    }

    let updated = state
        .tasks
        .update_task(task_id, principal.user_id, &task_data.description, Utc::now())
        .await?;

    match updated {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("No matching task".into())),
    }
}

/// Soft-deletes a task owned by the caller.
///
/// The task stays in storage with `validTill` set and disappears from every read.
/// Deleting a task that is already deleted, missing, or someone else's succeeds and
/// changes nothing.
///
/// ## Responses:
/// - `204 No Content`: Always, once the statement ran.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    principal: Principal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    let deleted = state
        .tasks
        .soft_delete_task(task_id, principal.user_id, Utc::now())
        .await?;

    if deleted > 0 {
        log::info!("Task {} deleted by user {}", task_id, principal.user_id);
    }

    Ok(HttpResponse::NoContent().finish())
}
