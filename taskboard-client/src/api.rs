use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

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

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub is_done: bool,
    pub due_date: Option<NaiveDate>,
    pub category: String,
    pub estimated_hours: i64,
}

#[async_trait]
pub trait TaskApi {
    async fn get_tasks(&self) -> Result<Vec<Task>, ClientError>;
    async fn get_task(&self, id: TaskId) -> Result<Task, ClientError>;
    async fn create_task(&self, task: NewTask) -> Result<Task, ClientError>;
    async fn update_task(&self, id: TaskId, task: Task) -> Result<(), ClientError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError>;
}

pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> HttpApi {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        HttpApi {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                if body.is_empty() {
                    Err(ClientError::Validation("Invalid request.".to_string()))
                } else {
                    Err(ClientError::Validation(body))
                }
            }
            status => Err(ClientError::Transport(format!(
                "unexpected status {status}"
            ))),
        }
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn get_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(self.url("/tasks")).send().await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, ClientError> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(&task)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_task(&self, id: TaskId, task: Task) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(&task)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
