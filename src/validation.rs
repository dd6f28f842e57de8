//! Input checks run before any store access.

use serde_json::{Value, json};

use crate::{
    envelope::inputs,
    error::{CatalogError, Context, ErrorCode},
    models::MoviePatch,
};

pub const MAX_LIMIT: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_VOTE_AVERAGE: f64 = 10.0;

pub fn limit(limit: i64) -> Result<u64, CatalogError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(CatalogError::invalid(
            ErrorCode::InvalidLimit,
            format!("Limit must be between 1 and {MAX_LIMIT}"),
            "limit",
            limit,
        ));
    }
    Ok(limit as u64)
}

/// Returns the trimmed genre name.
pub fn genre_name(name: &str) -> Result<&str, CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::invalid(
            ErrorCode::InvalidGenreName,
            "Genre name must be a non-empty string",
            "genreName",
            name,
        ));
    }
    Ok(trimmed)
}

/// Returns `(page, page_size)`.
pub fn pagination(page: i64, page_size: i64) -> Result<(u64, u64), CatalogError> {
    if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(CatalogError::Validation {
            code: ErrorCode::InvalidPaginationParams,
            message: format!(
                "Page must be at least 1 and page size between 1 and {MAX_PAGE_SIZE}"
            ),
            context: inputs(json!({ "page": page, "pageSize": page_size })),
        });
    }
    Ok((page as u64, page_size as u64))
}

pub fn movie_id(id: i64) -> Result<i32, CatalogError> {
    match i32::try_from(id) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::invalid(
            ErrorCode::InvalidMovieId,
            "Movie id must be a positive integer",
            "movieId",
            id,
        )),
    }
}

/// Checks every present field and trims text fields.
pub fn movie_patch(mut patch: MoviePatch) -> Result<MoviePatch, CatalogError> {
    if let Some(title) = patch.title.take() {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::invalid(
                ErrorCode::InvalidTitle,
                "Title must be a non-empty string",
                "title",
                title,
            ));
        }
        patch.title = Some(trimmed.to_string());
    }

    if let Some(overview) = patch.overview.take() {
        let trimmed = overview.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::invalid(
                ErrorCode::InvalidOverview,
                "Overview must be a non-empty string",
                "overview",
                overview,
            ));
        }
        patch.overview = Some(trimmed.to_string());
    }

    if let Some(vote_average) = patch.vote_average {
        if !(0.0..=MAX_VOTE_AVERAGE).contains(&vote_average) {
            return Err(CatalogError::invalid(
                ErrorCode::InvalidVoteAverage,
                format!("Vote average must be between 0 and {MAX_VOTE_AVERAGE}"),
                "voteAverage",
                vote_average,
            ));
        }
    }

    if let Some(vote_count) = patch.vote_count {
        if vote_count < 0 {
            return Err(CatalogError::invalid(
                ErrorCode::InvalidVoteCount,
                "Vote count must be a non-negative integer",
                "voteCount",
                vote_count,
            ));
        }
    }

    if let Some(popularity) = patch.popularity {
        if !popularity.is_finite() || popularity < 0.0 {
            return Err(CatalogError::invalid(
                ErrorCode::InvalidPopularity,
                "Popularity must be a non-negative number",
                "popularity",
                popularity,
            ));
        }
    }

    Ok(patch)
}

/// Decodes a JSON patch body. A field of the wrong shape is reported with
/// that field's code; unknown fields with `INVALID_REQUEST_BODY`.
pub fn patch_body(fields: Context) -> Result<MoviePatch, CatalogError> {
    for (field, value) in &fields {
        let single = Context::from_iter([(field.clone(), value.clone())]);
        if let Err(err) = serde_json::from_value::<MoviePatch>(Value::Object(single)) {
            let mut context = Context::new();
            context.insert(field.clone(), value.clone());
            context.insert("rejection".to_string(), Value::from(err.to_string()));
            return Err(CatalogError::Validation {
                code: patch_field_code(field),
                message: format!("Invalid value for `{field}`"),
                context,
            });
        }
    }

    serde_json::from_value(Value::Object(fields)).map_err(|err| {
        CatalogError::rejected(ErrorCode::InvalidRequestBody, "Invalid movie patch", err)
    })
}

fn patch_field_code(field: &str) -> ErrorCode {
    match field {
        "title" => ErrorCode::InvalidTitle,
        "overview" => ErrorCode::InvalidOverview,
        "releaseDate" => ErrorCode::InvalidReleaseDate,
        "popularity" => ErrorCode::InvalidPopularity,
        "voteAverage" => ErrorCode::InvalidVoteAverage,
        "voteCount" => ErrorCode::InvalidVoteCount,
        _ => ErrorCode::InvalidRequestBody,
    }
}
