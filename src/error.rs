use std::fmt;

use sea_orm::DbErr;
use serde::Serialize;
use serde_json::{Map, Value};

/// Diagnostic key/value pairs attached to an error.
pub type Context = Map<String, Value>;

/// Machine-readable error identifiers returned to callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidLimit,
    InvalidGenreName,
    InvalidPaginationParams,
    InvalidMovieId,
    InvalidTitle,
    InvalidOverview,
    InvalidVoteAverage,
    InvalidVoteCount,
    InvalidPopularity,
    InvalidReleaseDate,
    InvalidRequestBody,
    MovieNotFound,
    FetchTopRatedMoviesError,
    FetchMoviesByGenreError,
    FetchMoviesPaginationError,
    FetchMovieByIdError,
    UpdateMovieError,
    DatabaseConnectionError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        ErrorCode::InvalidLimit,
        ErrorCode::InvalidGenreName,
        ErrorCode::InvalidPaginationParams,
        ErrorCode::InvalidMovieId,
        ErrorCode::InvalidTitle,
        ErrorCode::InvalidOverview,
        ErrorCode::InvalidVoteAverage,
        ErrorCode::InvalidVoteCount,
        ErrorCode::InvalidPopularity,
        ErrorCode::InvalidReleaseDate,
        ErrorCode::InvalidRequestBody,
        ErrorCode::MovieNotFound,
        ErrorCode::FetchTopRatedMoviesError,
        ErrorCode::FetchMoviesByGenreError,
        ErrorCode::FetchMoviesPaginationError,
        ErrorCode::FetchMovieByIdError,
        ErrorCode::UpdateMovieError,
        ErrorCode::DatabaseConnectionError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidLimit => "INVALID_LIMIT",
            ErrorCode::InvalidGenreName => "INVALID_GENRE_NAME",
            ErrorCode::InvalidPaginationParams => "INVALID_PAGINATION_PARAMS",
            ErrorCode::InvalidMovieId => "INVALID_MOVIE_ID",
            ErrorCode::InvalidTitle => "INVALID_TITLE",
            ErrorCode::InvalidOverview => "INVALID_OVERVIEW",
            ErrorCode::InvalidVoteAverage => "INVALID_VOTE_AVERAGE",
            ErrorCode::InvalidVoteCount => "INVALID_VOTE_COUNT",
            ErrorCode::InvalidPopularity => "INVALID_POPULARITY",
            ErrorCode::InvalidReleaseDate => "INVALID_RELEASE_DATE",
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::MovieNotFound => "MOVIE_NOT_FOUND",
            ErrorCode::FetchTopRatedMoviesError => "FETCH_TOP_RATED_MOVIES_ERROR",
            ErrorCode::FetchMoviesByGenreError => "FETCH_MOVIES_BY_GENRE_ERROR",
            ErrorCode::FetchMoviesPaginationError => "FETCH_MOVIES_PAGINATION_ERROR",
            ErrorCode::FetchMovieByIdError => "FETCH_MOVIE_BY_ID_ERROR",
            ErrorCode::UpdateMovieError => "UPDATE_MOVIE_ERROR",
            ErrorCode::DatabaseConnectionError => "DATABASE_CONNECTION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Database,
    Connection,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{message}")]
    Validation { code: ErrorCode, message: String, context: Context },

    #[error("movie {id} not found")]
    MovieNotFound { id: i32 },

    #[error(transparent)]
    Store(#[from] DbErr),
}

impl CatalogError {
    /// Rejects `value` supplied for `field`.
    pub fn invalid(
        code: ErrorCode,
        message: impl Into<String>,
        field: &str,
        value: impl Serialize,
    ) -> Self {
        let mut context = Context::new();
        context.insert(field.to_string(), serde_json::to_value(value).unwrap_or(Value::Null));
        CatalogError::Validation { code, message: message.into(), context }
    }

    /// Request input that could not be read at all; `rejection` describes why.
    pub fn rejected(
        code: ErrorCode,
        message: impl Into<String>,
        rejection: impl fmt::Display,
    ) -> Self {
        Self::invalid(code, message, "rejection", rejection.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation { .. } => ErrorKind::Validation,
            CatalogError::MovieNotFound { .. } => ErrorKind::NotFound,
            CatalogError::Store(err) if is_connection_error(err) => ErrorKind::Connection,
            CatalogError::Store(_) => ErrorKind::Database,
        }
    }
}

fn is_connection_error(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Error payload carried inside a failed [`crate::envelope::ServiceResult`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub context: Context,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorInfo {}
