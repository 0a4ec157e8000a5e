use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};

use std::error::Error;
use std::fmt;
use std::io::Cursor;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<String>),
    IdMismatch,
    NotFound,
    SchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> ApiError {
        ApiError::Validation(vec![message.into()])
    }

    fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) | ApiError::IdMismatch => Status::BadRequest,
            ApiError::NotFound => Status::NotFound,
            ApiError::SchemaVersion { .. } | ApiError::Internal(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl Error for ApiError {}
impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Validation(messages) => write!(f, "{}", messages.join("\n")),
            ApiError::IdMismatch => write!(f, "ID mismatch."),
            ApiError::NotFound => write!(f, "Not found."),
            ApiError::SchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "Database schema version {} is newer than supported version {}.",
                db_version, latest_supported
            ),
            ApiError::Internal(what) => write!(f, "Internal error: {}", what),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> ApiError {
        match &e {
            // Schema CHECK/NOT NULL constraints back-stop field validation,
            // so a constraint failure is the caller's bad input.
            rusqlite::Error::SqliteFailure(error, _)
                if error.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ApiError::validation(e.to_string())
            }
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl<T> From<PoisonError<T>> for ApiError {
    fn from(e: PoisonError<T>) -> ApiError {
        ApiError::Internal(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = self.to_string();

        Response::build()
            .status(status)
            .header(ContentType::Plain)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
