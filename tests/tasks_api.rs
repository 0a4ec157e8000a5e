use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::{json, Value};

use std::sync::{Arc, Mutex};

use taskboard::db::open_db_in_memory;

fn client() -> Client {
    let connection = Arc::new(Mutex::new(open_db_in_memory().expect("open in-memory db")));
    Client::tracked(taskboard::rocket(connection)).expect("valid rocket instance")
}

fn post_task<'c>(client: &'c Client, body: &Value) -> LocalResponse<'c> {
    client
        .post("/api/tasks")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
}

fn create_task(client: &Client, body: Value) -> Value {
    let response = post_task(client, &body);
    assert_eq!(response.status(), Status::Created);
    response.into_json().expect("created task body")
}

fn put_task<'c>(client: &'c Client, id: i64, body: &Value) -> LocalResponse<'c> {
    client
        .put(format!("/api/tasks/{id}"))
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
}

fn list_tasks(client: &Client) -> Vec<Value> {
    let response = client.get("/api/tasks").dispatch();
    assert_eq!(response.status(), Status::Ok);
    response.into_json().expect("task list body")
}

#[test]
fn create_assigns_id_and_defaults_and_points_location_at_the_new_task() {
    let client = client();

    let created = {
        let response = post_task(
            &client,
            &json!({
                "title": "Write spec",
                "category": "Work",
                "estimatedHours": 3,
                "dueDate": null
            }),
        );
        assert_eq!(response.status(), Status::Created);
        let location = response
            .headers()
            .get_one("Location")
            .expect("Location header")
            .to_string();
        let created: Value = response.into_json().expect("created task body");
        assert_eq!(location, format!("/api/tasks/{}", created["id"]));
        created
    };

    assert_eq!(created["isDone"], json!(false));
    assert_eq!(created["estimatedHours"], json!(3));
    assert_eq!(created["dueDate"], Value::Null);

    // The Location target serves the same entity back.
    let response = client
        .get(format!("/api/tasks/{}", created["id"]))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let fetched: Value = response.into_json().expect("fetched task body");
    assert_eq!(fetched, created);
}

#[test]
fn create_with_blank_title_is_rejected() {
    let client = client();

    let response = post_task(&client, &json!({ "title": "   ", "category": "Work" }));
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_string().expect("error body");
    assert!(body.contains("Title is required."), "body: {body}");
}

#[test]
fn create_with_missing_category_is_rejected() {
    let client = client();

    let response = post_task(&client, &json!({ "title": "Write spec" }));
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_string().expect("error body");
    assert!(body.contains("Category is required."), "body: {body}");
}

#[test]
fn create_with_negative_estimated_hours_is_rejected() {
    let client = client();

    let response = post_task(
        &client,
        &json!({ "title": "Write spec", "category": "Work", "estimatedHours": -1 }),
    );
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_string().expect("error body");
    assert!(
        body.contains("Estimated hours must be a non-negative integer."),
        "body: {body}"
    );
}

#[test]
fn get_for_unknown_id_is_404() {
    let client = client();

    let response = client.get("/api/tasks/999").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn list_puts_pending_before_done_and_null_due_dates_last() {
    let client = client();

    let done = create_task(
        &client,
        json!({ "title": "done", "category": "Work", "isDone": true, "dueDate": "2025-01-01" }),
    );
    let pending_dated = create_task(
        &client,
        json!({ "title": "dated", "category": "Work", "dueDate": "2025-06-01" }),
    );
    let pending_undated = create_task(
        &client,
        json!({ "title": "undated", "category": "Work", "dueDate": null }),
    );

    let ids: Vec<Value> = list_tasks(&client).iter().map(|t| t["id"].clone()).collect();
    assert_eq!(
        ids,
        vec![
            pending_dated["id"].clone(),
            pending_undated["id"].clone(),
            done["id"].clone()
        ]
    );
}

#[test]
fn update_with_mismatched_body_id_is_rejected() {
    let client = client();

    let mut task = create_task(&client, json!({ "title": "a", "category": "Work" }));
    let id = task["id"].as_i64().unwrap();
    task["id"] = json!(id + 1);

    let response = put_task(&client, id, &task);
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_string().expect("error body");
    assert!(body.contains("ID mismatch."), "body: {body}");
}

#[test]
fn update_for_unknown_id_is_404() {
    let client = client();

    let body = json!({
        "id": 999,
        "title": "ghost",
        "isDone": false,
        "dueDate": null,
        "category": "Work",
        "estimatedHours": 0
    });
    let response = put_task(&client, 999, &body);
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn toggling_is_done_preserves_every_other_field() {
    let client = client();

    let mut task = create_task(
        &client,
        json!({
            "title": "Write spec",
            "category": "Work",
            "estimatedHours": 3,
            "dueDate": "2025-06-01"
        }),
    );
    let id = task["id"].as_i64().unwrap();
    task["isDone"] = json!(true);

    let response = put_task(&client, id, &task);
    assert_eq!(response.status(), Status::NoContent);
    assert!(response.into_string().is_none(), "204 must carry no body");

    let fetched: Value = client
        .get(format!("/api/tasks/{id}"))
        .dispatch()
        .into_json()
        .expect("fetched task body");
    assert_eq!(fetched, task);
}

#[test]
fn stale_second_update_fully_overwrites_the_first() {
    let client = client();

    let task = create_task(&client, json!({ "title": "a", "category": "Work" }));
    let id = task["id"].as_i64().unwrap();

    let first = json!({
        "id": id, "title": "first", "isDone": true,
        "dueDate": "2025-06-01", "category": "Work", "estimatedHours": 1
    });
    let stale = json!({
        "id": id, "title": "stale", "isDone": false,
        "dueDate": null, "category": "Health", "estimatedHours": 9
    });

    assert_eq!(put_task(&client, id, &first).status(), Status::NoContent);
    assert_eq!(put_task(&client, id, &stale).status(), Status::NoContent);

    let fetched: Value = client
        .get(format!("/api/tasks/{id}"))
        .dispatch()
        .into_json()
        .expect("fetched task body");
    assert_eq!(fetched, stale);
}

#[test]
fn delete_removes_the_task_and_repeats_as_404() {
    let client = client();

    let task = create_task(&client, json!({ "title": "a", "category": "Work" }));
    let id = task["id"].as_i64().unwrap();

    let response = client.delete(format!("/api/tasks/{id}")).dispatch();
    assert_eq!(response.status(), Status::NoContent);

    assert_eq!(
        client.get(format!("/api/tasks/{id}")).dispatch().status(),
        Status::NotFound
    );
    assert_eq!(
        client.delete(format!("/api/tasks/{id}")).dispatch().status(),
        Status::NotFound
    );
}
