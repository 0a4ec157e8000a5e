use rusqlite::{params, Connection, Row};

use super::data::{CreateTaskRequest, Task, TaskId};
use crate::api_error::{ApiError, ApiResult};

pub const MAX_CATEGORY_LEN: usize = 50;

pub fn validate_fields(title: &str, category: &str, estimated_hours: i64) -> ApiResult<()> {
    let mut failures = Vec::new();

    if title.trim().is_empty() {
        failures.push("Title is required.".to_string());
    }

    if category.trim().is_empty() {
        failures.push("Category is required.".to_string());
    } else if category.trim().chars().count() > MAX_CATEGORY_LEN {
        failures.push(format!(
            "Category must be {} characters or fewer.",
            MAX_CATEGORY_LEN
        ));
    }

    if estimated_hours < 0 {
        failures.push("Estimated hours must be a non-negative integer.".to_string());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(failures))
    }
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        is_done: row.get(2)?,
        due_date: row.get(3)?,
        category: row.get(4)?,
        // Rows older than the estimated_hours column read as 0.
        estimated_hours: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
    })
}

pub fn get_tasks(db_connection: &Connection) -> ApiResult<Vec<Task>> {
    let mut tasks_statement = db_connection.prepare(
        "SELECT id, title, is_done, due_date, category, estimated_hours
         FROM tasks
         ORDER BY is_done ASC, due_date IS NULL ASC, due_date ASC",
    )?;

    let tasks = tasks_statement
        .query_map([], row_to_task)?
        .collect::<Result<Vec<Task>, rusqlite::Error>>()?;

    Ok(tasks)
}

pub fn get_task(db_connection: &Connection, task_id: TaskId) -> ApiResult<Task> {
    db_connection
        .query_row(
            "SELECT id, title, is_done, due_date, category, estimated_hours
             FROM tasks WHERE id = ?1",
            params![task_id],
            row_to_task,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => ApiError::NotFound,
            _ => ApiError::from(e),
        })
}

pub fn add_task(db_connection: &Connection, request: CreateTaskRequest) -> ApiResult<Task> {
    validate_fields(&request.title, &request.category, request.estimated_hours)?;

    db_connection.execute(
        "INSERT INTO tasks (title, is_done, due_date, category, estimated_hours)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            request.title.trim(),
            request.is_done,
            request.due_date,
            request.category.trim(),
            request.estimated_hours,
        ],
    )?;

    get_task(db_connection, db_connection.last_insert_rowid())
}

pub fn update_task(db_connection: &Connection, task_id: TaskId, task: Task) -> ApiResult<()> {
    if task.id != task_id {
        return Err(ApiError::IdMismatch);
    }

    validate_fields(&task.title, &task.category, task.estimated_hours)?;

    // Full replace of every mutable field; last write wins.
    let updated = db_connection.execute(
        "UPDATE tasks
         SET title = ?1, is_done = ?2, due_date = ?3, category = ?4, estimated_hours = ?5
         WHERE id = ?6",
        params![
            task.title.trim(),
            task.is_done,
            task.due_date,
            task.category.trim(),
            task.estimated_hours,
            task_id,
        ],
    )?;

    if updated == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}

pub fn delete_task(db_connection: &Connection, task_id: TaskId) -> ApiResult<()> {
    let deleted = db_connection.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;

    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
