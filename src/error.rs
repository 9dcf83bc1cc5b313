use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Error as ANYHOW_ERROR;
use redis::RedisError as REDIS_ERROR;
use reqwest::Error as REQWEST_ERROR;
use serde::Serialize;
use sqlx::error::Error as SQL_ERROR;
use std::{env::VarError, io::Error as IO_ERROR};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::error::Elapsed;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    SQL(#[from] SQL_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    TokioElapsedError(#[from] Elapsed),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    RedisError(#[from] REDIS_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Provider responded with status: {0}")]
    ProviderStatus(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),
}

/// Endpoint error: the handler's own message plus the underlying cause.
#[derive(Debug, Error)]
#[error("{message}: {source}")]
pub struct ApiError {
    pub message: &'static str,
    #[source]
    pub source: Error,
}

impl ApiError {
    pub fn new(message: &'static str, source: Error) -> Self {
        ApiError { message, source }
    }
}

pub trait ApiContext<T> {
    fn api_context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T, E> ApiContext<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn api_context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(message, e.into()))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: &'static str,
    pub id: String,
}

pub const NOT_FOUND_MESSAGE: &str = "Cryptocurrency not found";

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.source {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.source {
            Error::NotFound(id) => {
                HttpResponse::NotFound().json(NotFoundBody {
                    error: NOT_FOUND_MESSAGE,
                    id: id.to_owned(),
                })
            },
            err => HttpResponse::InternalServerError().json(ErrorBody {
                error: self.message.to_owned(),
                details: err.to_string(),
            }),
        }
    }
}
