use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::movie;

/// A movie with the names of its genres, actors and directors.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
}

impl MovieDetails {
    pub fn new(
        movie: movie::Model,
        genres: Vec<String>,
        actors: Vec<String>,
        directors: Vec<String>,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            genres,
            actors,
            directors,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub movies: Vec<MovieDetails>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Fields to change on a movie. Absent fields are left untouched; for the
/// nullable image paths an explicit `null` clears the stored value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<Date>,
    #[serde(default, deserialize_with = "present")]
    pub poster_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub backdrop_path: Option<Option<String>>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
}

// Only called when the key exists, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 { 0 } else { total.div_ceil(page_size) }
}
