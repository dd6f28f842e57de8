use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AppState,
    catalog::DEFAULT_TOP_RATED_LIMIT,
    envelope::{Operation, ServiceResult, inputs, respond},
    error::{CatalogError, Context, ErrorCode, ErrorKind},
    models::{MovieDetails, MoviePage},
    validation,
};

const DEFAULT_PAGE_SIZE: i64 = 10;

impl<T: Serialize> IntoResponse for ServiceResult<T> {
    fn into_response(self) -> Response {
        let status = match self.error().map(|e| e.kind) {
            None => StatusCode::OK,
            Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
            Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
            Some(ErrorKind::Connection) => StatusCode::SERVICE_UNAVAILABLE,
            Some(ErrorKind::Database) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> ServiceResult<bool> {
    state.catalog.check_connection().await
}

/// Envelope for a request whose inputs could not be extracted.
fn rejected<T>(op: Operation, context: Context, err: CatalogError) -> ServiceResult<T> {
    respond(op, context, Err(err))
}

#[derive(Debug, Deserialize)]
pub struct TopRatedQuery {
    limit: Option<i64>,
}

pub async fn top_rated(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TopRatedQuery>, QueryRejection>,
) -> ServiceResult<Vec<MovieDetails>> {
    match query {
        Ok(Query(q)) => {
            state.catalog.top_rated_movies(q.limit.unwrap_or(DEFAULT_TOP_RATED_LIMIT)).await
        },
        Err(rejection) => rejected(
            Operation::TopRatedMovies,
            Context::new(),
            CatalogError::rejected(
                ErrorCode::InvalidLimit,
                "Limit must be an integer",
                rejection.body_text(),
            ),
        ),
    }
}

pub async fn sci_fi(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.catalog.sci_fi_movies().await
}

pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> ServiceResult<Vec<MovieDetails>> {
    match name {
        Ok(Path(name)) => state.catalog.movies_by_genre(&name).await,
        Err(rejection) => rejected(
            Operation::MoviesByGenre,
            Context::new(),
            CatalogError::rejected(
                ErrorCode::InvalidGenreName,
                "Genre name must be valid UTF-8",
                rejection.body_text(),
            ),
        ),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<i64>,
    page_size: Option<i64>,
    genre: Option<String>,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ServiceResult<MoviePage> {
    let q = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return rejected(
                Operation::MoviesWithPagination,
                Context::new(),
                CatalogError::rejected(
                    ErrorCode::InvalidPaginationParams,
                    "Page and page size must be integers",
                    rejection.body_text(),
                ),
            );
        },
    };

    state
        .catalog
        .movies_with_pagination(
            q.page.unwrap_or(1),
            q.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            q.genre.as_deref(),
        )
        .await
}

fn movie_id_rejected(rejection: PathRejection) -> CatalogError {
    CatalogError::rejected(
        ErrorCode::InvalidMovieId,
        "Movie id must be a positive integer",
        rejection.body_text(),
    )
}

pub async fn movie(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Option<MovieDetails>> {
    match id {
        Ok(Path(id)) => state.catalog.movie_by_id(id).await,
        Err(rejection) => {
            rejected(Operation::MovieById, Context::new(), movie_id_rejected(rejection))
        },
    }
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Context>, JsonRejection>,
) -> ServiceResult<MovieDetails> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return rejected(Operation::UpdateMovie, Context::new(), movie_id_rejected(rejection));
        },
    };

    let patch = body
        .map_err(|rejection| {
            CatalogError::rejected(
                ErrorCode::InvalidRequestBody,
                "Request body must be a JSON object",
                rejection.body_text(),
            )
        })
        .and_then(|Json(fields)| validation::patch_body(fields));

    match patch {
        Ok(patch) => state.catalog.update_movie(id, patch).await,
        Err(err) => rejected(Operation::UpdateMovie, inputs(json!({ "movieId": id })), err),
    }
}
