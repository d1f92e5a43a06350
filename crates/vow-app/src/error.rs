use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;
use vow_core::error::CoreError;
use vow_db::error::DbError;
use vow_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Invalid request body: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => service_status(err),
            Self::DatabaseError(err) => db_status(err),
            Self::CoreError(err) => core_status(err),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// ## Summary
    /// Writes the error as `{"error": ...}` with its status code. Server-side
    /// failures are logged and their details withheld from the client.
    pub fn render(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = ?self, %status, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse { error }));
    }
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::DatabaseError(err) => db_status(err),
        ServiceError::CoreError(err) => core_status(err),
        ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::DuplicateSlug(_) => StatusCode::CONFLICT,
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::CoreError(err) => core_status(err),
        DbError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// ## Summary
/// Renders `result` as JSON with `status`, or as an error response.
pub fn render_result<T>(res: &mut salvo::Response, status: StatusCode, result: AppResult<T>)
where
    T: Serialize + Send,
{
    match result {
        Ok(body) => {
            res.status_code(status);
            res.render(Json(body));
        }
        Err(err) => err.render(res),
    }
}
