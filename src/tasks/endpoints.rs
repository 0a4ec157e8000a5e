use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

use super::data::{CreateTaskRequest, Task, TaskId};
use super::helpers;
use crate::api_error::ApiResult;
use crate::data::DBConnection;

#[get("/tasks")]
pub fn get_tasks(db_connection: &State<DBConnection>) -> ApiResult<Json<Vec<Task>>> {
    let db_connection = db_connection.lock()?;

    helpers::get_tasks(&db_connection).map(Json)
}

#[get("/tasks/<id>")]
pub fn get_task(id: TaskId, db_connection: &State<DBConnection>) -> ApiResult<Json<Task>> {
    let db_connection = db_connection.lock()?;

    helpers::get_task(&db_connection, id).map(Json)
}

#[post("/tasks", format = "json", data = "<task>")]
pub fn add_task(
    task: Json<CreateTaskRequest>,
    db_connection: &State<DBConnection>,
) -> ApiResult<status::Created<Json<Task>>> {
    let db_connection = db_connection.lock()?;

    let task = helpers::add_task(&db_connection, task.into_inner())?;
    let location = format!("/api/tasks/{}", task.id);

    Ok(status::Created::new(location).body(Json(task)))
}

#[put("/tasks/<id>", format = "json", data = "<task>")]
pub fn update_task(
    id: TaskId,
    task: Json<Task>,
    db_connection: &State<DBConnection>,
) -> ApiResult<status::NoContent> {
    let db_connection = db_connection.lock()?;

    helpers::update_task(&db_connection, id, task.into_inner())?;

    Ok(status::NoContent)
}

#[delete("/tasks/<id>")]
pub fn delete_task(id: TaskId, db_connection: &State<DBConnection>) -> ApiResult<status::NoContent> {
    let db_connection = db_connection.lock()?;

    helpers::delete_task(&db_connection, id)?;

    Ok(status::NoContent)
}
