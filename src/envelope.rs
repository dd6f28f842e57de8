//! The `{data, error, success}` wrapper every catalog operation returns.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_json::Value;
use tracing::{error, warn};

use crate::error::{CatalogError, Context, ErrorCode, ErrorInfo, ErrorKind};

/// Serializes as `{data, error, success}` with exactly one of `data`/`error` set.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceResult<T> {
    outcome: Result<T, ErrorInfo>,
}

impl<T> ServiceResult<T> {
    pub fn ok(data: T) -> Self {
        Self { outcome: Ok(data) }
    }

    pub fn failure(error: ErrorInfo) -> Self {
        Self { outcome: Err(error) }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.outcome.as_ref().err()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error().map(|e| e.code)
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        self.outcome
    }
}

impl<T: Serialize> Serialize for ServiceResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ServiceResult", 3)?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("error", &self.error())?;
        state.serialize_field("success", &self.success())?;
        state.end()
    }
}

/// Service operations, used to pick the failure code and message for store errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Operation {
    TopRatedMovies,
    MoviesByGenre,
    MoviesWithPagination,
    MovieById,
    UpdateMovie,
    CheckConnection,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::TopRatedMovies => "top_rated_movies",
            Operation::MoviesByGenre => "movies_by_genre",
            Operation::MoviesWithPagination => "movies_with_pagination",
            Operation::MovieById => "movie_by_id",
            Operation::UpdateMovie => "update_movie",
            Operation::CheckConnection => "check_connection",
        }
    }

    fn failure_code(self) -> ErrorCode {
        match self {
            Operation::TopRatedMovies => ErrorCode::FetchTopRatedMoviesError,
            Operation::MoviesByGenre => ErrorCode::FetchMoviesByGenreError,
            Operation::MoviesWithPagination => ErrorCode::FetchMoviesPaginationError,
            Operation::MovieById => ErrorCode::FetchMovieByIdError,
            Operation::UpdateMovie => ErrorCode::UpdateMovieError,
            Operation::CheckConnection => ErrorCode::DatabaseConnectionError,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::TopRatedMovies => "Failed to fetch top rated movies",
            Operation::MoviesByGenre => "Failed to fetch movies by genre",
            Operation::MoviesWithPagination => "Failed to fetch paginated movies",
            Operation::MovieById => "Failed to fetch movie",
            Operation::UpdateMovie => "Failed to update movie",
            Operation::CheckConnection => "Database connection failed",
        }
    }
}

/// Builds a context map from a JSON object literal; anything else yields an empty map.
pub(crate) fn inputs(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        _ => Context::new(),
    }
}

/// Converts an operation outcome into the envelope, logging the raw failure first.
pub(crate) fn respond<T>(
    op: Operation,
    mut context: Context,
    result: Result<T, CatalogError>,
) -> ServiceResult<T> {
    let err = match result {
        Ok(data) => return ServiceResult::ok(data),
        Err(err) => err,
    };

    let kind = match op {
        Operation::CheckConnection => ErrorKind::Connection,
        _ => err.kind(),
    };

    let info = match err {
        CatalogError::Validation { code, message, context: offending } => {
            warn!(operation = op.name(), code = %code, error = %message, "rejected input");
            context.extend(offending);
            ErrorInfo { message, code, kind, context }
        },
        CatalogError::MovieNotFound { id } => {
            warn!(operation = op.name(), movie_id = id, "movie not found");
            context.insert("movieId".to_string(), Value::from(id));
            ErrorInfo {
                message: format!("Movie with id {id} not found"),
                code: ErrorCode::MovieNotFound,
                kind,
                context,
            }
        },
        CatalogError::Store(err) => {
            error!(operation = op.name(), error = %err, "store operation failed");
            context.insert("originalError".to_string(), Value::from(err.to_string()));
            ErrorInfo {
                message: op.failure_message().to_string(),
                code: op.failure_code(),
                kind,
                context,
            }
        },
    };

    ServiceResult::failure(info)
}
