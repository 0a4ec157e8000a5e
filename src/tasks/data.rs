use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_done: bool,
    pub due_date: Option<NaiveDate>,
    pub category: String,
    pub estimated_hours: i64,
}

// Create body carries no id; every field defaults so missing input reaches
// validation instead of failing deserialization.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub estimated_hours: i64,
}
