use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
    sea_query::{Expr, Query, SimpleExpr},
};
use serde_json::json;
use tracing::debug;

use crate::{
    entities::{actor, director, genre, movie, movie_actor, movie_director, movie_genre},
    envelope::{Operation, ServiceResult, inputs, respond},
    error::CatalogError,
    models::{MovieDetails, MoviePage, MoviePatch, total_pages},
    validation,
};

pub const DEFAULT_TOP_RATED_LIMIT: i64 = 10;
pub const SCIENCE_FICTION: &str = "Science Fiction";

/// Read and update operations over the movie catalog.
///
/// Holds nothing but the connection pool, so clones are cheap and every call
/// is independent of the others.
#[derive(Clone)]
pub struct MovieCatalog {
    db: DatabaseConnection,
}

impl MovieCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Highest-rated movies first, at most `limit` of them (1..=100).
    pub async fn top_rated_movies(&self, limit: i64) -> ServiceResult<Vec<MovieDetails>> {
        let result: Result<Vec<MovieDetails>, CatalogError> = async {
            let limit = validation::limit(limit)?;
            debug!(limit, "fetching top rated movies");
            let movies = by_rating(movie::Entity::find()).limit(limit).all(&self.db).await?;
            self.with_relations(movies).await
        }
        .await;

        respond(Operation::TopRatedMovies, inputs(json!({ "limit": limit })), result)
    }

    /// Movies tagged with a genre whose name equals the trimmed `genre_name`.
    pub async fn movies_by_genre(&self, genre_name: &str) -> ServiceResult<Vec<MovieDetails>> {
        let result: Result<Vec<MovieDetails>, CatalogError> = async {
            let name = validation::genre_name(genre_name)?;
            debug!(genre = %name, "fetching movies by genre");
            let movies =
                by_rating(movie::Entity::find().filter(in_genre(name))).all(&self.db).await?;
            self.with_relations(movies).await
        }
        .await;

        respond(Operation::MoviesByGenre, inputs(json!({ "genreName": genre_name })), result)
    }

    pub async fn sci_fi_movies(&self) -> ServiceResult<Vec<MovieDetails>> {
        self.movies_by_genre(SCIENCE_FICTION).await
    }

    /// One page of the catalog, optionally restricted to a genre. A blank
    /// genre filter is ignored.
    pub async fn movies_with_pagination(
        &self,
        page: i64,
        page_size: i64,
        genre_filter: Option<&str>,
    ) -> ServiceResult<MoviePage> {
        let result: Result<MoviePage, CatalogError> = async {
            let (page, page_size) = validation::pagination(page, page_size)?;
            let genre = genre_filter.map(str::trim).filter(|g| !g.is_empty());

            let mut query = movie::Entity::find();
            if let Some(name) = genre {
                query = query.filter(in_genre(name));
            }

            let total = query.clone().count(&self.db).await?;
            debug!(page, page_size, total, genre = ?genre, "fetching movie page");

            // Pages past the end skip the select; sqlite binds offsets as i64.
            let movies = match page_offset(page, page_size) {
                Some(offset) if offset < total => {
                    by_rating(query).offset(offset).limit(page_size).all(&self.db).await?
                },
                _ => Vec::new(),
            };

            Ok(MoviePage {
                movies: self.with_relations(movies).await?,
                total,
                page,
                total_pages: total_pages(total, page_size),
            })
        }
        .await;

        respond(
            Operation::MoviesWithPagination,
            inputs(json!({ "page": page, "pageSize": page_size, "genreFilter": genre_filter })),
            result,
        )
    }

    /// `Ok(None)` inside the envelope when no movie has this id.
    pub async fn movie_by_id(&self, id: i64) -> ServiceResult<Option<MovieDetails>> {
        let result: Result<Option<MovieDetails>, CatalogError> = async {
            let id = validation::movie_id(id)?;
            let Some(found) = movie::Entity::find_by_id(id).one(&self.db).await? else {
                debug!(movie_id = id, "movie not in catalog");
                return Ok(None);
            };
            Ok(self.with_relations(vec![found]).await?.pop())
        }
        .await;

        respond(Operation::MovieById, inputs(json!({ "movieId": id })), result)
    }

    /// Applies `patch` to the movie's scalar fields. The existence check and
    /// the write share a transaction.
    pub async fn update_movie(&self, id: i64, patch: MoviePatch) -> ServiceResult<MovieDetails> {
        let result: Result<MovieDetails, CatalogError> = async {
            let id = validation::movie_id(id)?;
            let patch = validation::movie_patch(patch)?;

            let txn = self.db.begin().await?;
            let Some(existing) = movie::Entity::find_by_id(id).one(&txn).await? else {
                return Err(CatalogError::MovieNotFound { id });
            };

            let mut active: movie::ActiveModel = existing.into();
            if let Some(title) = patch.title {
                active.title = Set(title);
            }
            if let Some(overview) = patch.overview {
                active.overview = Set(overview);
            }
            if let Some(release_date) = patch.release_date {
                active.release_date = Set(release_date.to_string());
            }
            if let Some(poster_path) = patch.poster_path {
                active.poster_path = Set(poster_path);
            }
            if let Some(backdrop_path) = patch.backdrop_path {
                active.backdrop_path = Set(backdrop_path);
            }
            if let Some(popularity) = patch.popularity {
                active.popularity = Set(popularity);
            }
            if let Some(vote_average) = patch.vote_average {
                active.vote_average = Set(vote_average);
            }
            if let Some(vote_count) = patch.vote_count {
                active.vote_count = Set(vote_count);
            }
            active.updated_at = Set(now_sec());

            let updated = active.update(&txn).await?;
            txn.commit().await?;
            debug!(movie_id = id, "movie updated");

            self.with_relations(vec![updated])
                .await?
                .pop()
                .ok_or(CatalogError::MovieNotFound { id })
        }
        .await;

        respond(Operation::UpdateMovie, inputs(json!({ "movieId": id })), result)
    }

    pub async fn check_connection(&self) -> ServiceResult<bool> {
        let result: Result<bool, CatalogError> = async {
            self.db.ping().await?;
            Ok(true)
        }
        .await;

        respond(Operation::CheckConnection, inputs(json!({})), result)
    }

    /// Loads genre, actor and director names for the whole batch with one
    /// query per relation, keeping the input order.
    async fn with_relations(
        &self,
        movies: Vec<movie::Model>,
    ) -> Result<Vec<MovieDetails>, CatalogError> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        let genres = movies.load_many_to_many(genre::Entity, movie_genre::Entity, &self.db).await?;
        let actors = movies.load_many_to_many(actor::Entity, movie_actor::Entity, &self.db).await?;
        let directors =
            movies.load_many_to_many(director::Entity, movie_director::Entity, &self.db).await?;

        Ok(movies
            .into_iter()
            .zip(genres)
            .zip(actors)
            .zip(directors)
            .map(|(((movie, genres), actors), directors)| {
                MovieDetails::new(
                    movie,
                    sorted_names(genres.into_iter().map(|g| g.name)),
                    sorted_names(actors.into_iter().map(|a| a.name)),
                    sorted_names(directors.into_iter().map(|d| d.name)),
                )
            })
            .collect())
    }
}

fn by_rating(query: Select<movie::Entity>) -> Select<movie::Entity> {
    query.order_by_desc(movie::Column::VoteAverage).order_by_asc(movie::Column::Id)
}

/// `movie.id IN (SELECT movie_id FROM movie_genre JOIN genre ... WHERE genre.name = ?)`
fn in_genre(name: &str) -> SimpleExpr {
    movie::Column::Id.in_subquery(
        Query::select()
            .column((movie_genre::Entity, movie_genre::Column::MovieId))
            .from(movie_genre::Entity)
            .inner_join(
                genre::Entity,
                Expr::col((genre::Entity, genre::Column::Id))
                    .equals((movie_genre::Entity, movie_genre::Column::GenreId)),
            )
            .and_where(genre::Column::Name.eq(name))
            .to_owned(),
    )
}

/// `(page - 1) * page_size`, or `None` when it does not fit in an i64.
fn page_offset(page: u64, page_size: u64) -> Option<u64> {
    page.checked_sub(1)?.checked_mul(page_size).filter(|offset| i64::try_from(*offset).is_ok())
}

fn sorted_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort();
    names
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
