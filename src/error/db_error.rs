use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use thiserror::Error;

/// 任意一次上游读取失败，整个请求失败，不返回部分排行榜
#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to fetch {collection}: {message}")]
    FetchFailed {
        collection: &'static str,
        message: String,
    },
}

impl DbError {
    pub fn fetch_failed(collection: &'static str, err: sqlx::Error) -> Self {
        tracing::error!("fetch {} error :{}", collection, err.to_string());
        DbError::FetchFailed {
            collection,
            message: err.to_string(),
        }
    }

    fn get_code(&self) -> u32 {
        match self {
            DbError::FetchFailed { .. } => error_code::FETCH_FAILED,
        }
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        let status_code = match self {
            DbError::FetchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
