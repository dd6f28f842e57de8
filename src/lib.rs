//! Movie catalog: a SQLite schema of movies, genres, actors and directors,
//! a query service answering in a uniform result envelope, and a JSON API
//! over that service.

pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use crate::{
    catalog::MovieCatalog,
    envelope::ServiceResult,
    error::{CatalogError, ErrorCode, ErrorInfo, ErrorKind},
    models::{MovieDetails, MoviePage, MoviePatch},
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: MovieCatalog,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/movies", get(routes::list_movies))
        .route("/api/movies/top-rated", get(routes::top_rated))
        .route("/api/movies/sci-fi", get(routes::sci_fi))
        .route("/api/movies/genre/{name}", get(routes::by_genre))
        .route("/api/movies/{id}", get(routes::movie).patch(routes::update_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
