//! Input checks for records arriving over HTTP.
//!
//! Each check collects every violated constraint, sorts the messages and
//! reports them together as one [`AppError::Validation`].

use crate::{
    error::{AppError, AppResult},
    models::{MovieInfo, Review},
};

const CAST_MISSING: &str = "movieInfo.cast must be present";
const NAME_MISSING: &str = "movieInfo.name must be present";
const YEAR_MISSING: &str = "movieInfo.year must be present";
const YEAR_NOT_POSITIVE: &str = "movieInfo.year must be a positive value";
const MOVIE_ID_MISSING: &str = "rating.movieInfoId : must not be null";
const RATING_NEGATIVE: &str = "rating.negative : please pass a non-negative value";

pub fn validate_movie_info(info: &MovieInfo) -> AppResult<()> {
    let mut violations = Vec::new();

    if info.name.trim().is_empty() {
        violations.push(NAME_MISSING);
    }

    match info.year {
        None => violations.push(YEAR_MISSING),
        Some(year) if year <= 0 => violations.push(YEAR_NOT_POSITIVE),
        Some(_) => {},
    }

    if info.cast.is_empty() || info.cast.iter().any(|member| member.trim().is_empty()) {
        violations.push(CAST_MISSING);
    }

    finish(violations)
}

pub fn validate_review(review: &Review) -> AppResult<()> {
    let mut violations = Vec::new();

    if review.movie_info_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
        violations.push(MOVIE_ID_MISSING);
    }

    if review.rating.is_some_and(|rating| rating < 0.0) {
        violations.push(RATING_NEGATIVE);
    }

    finish(violations)
}

/// Updates never change the parent movie id, so only the rating is checked.
pub fn validate_review_update(review: &Review) -> AppResult<()> {
    let mut violations = Vec::new();
    if review.rating.is_some_and(|rating| rating < 0.0) {
        violations.push(RATING_NEGATIVE);
    }
    finish(violations)
}

fn finish(mut violations: Vec<&'static str>) -> AppResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    violations.sort_unstable();
    Err(AppError::Validation(violations.into_iter().map(str::to_string).collect()))
}
