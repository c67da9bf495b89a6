use tracing::debug;

use crate::{
    downstream::{Fetched, MoviesInfoClient, ReviewsClient},
    error::{AppError, AppResult},
    models::Movie,
};

/// Joins a movie's catalog entry with its reviews.
pub struct Aggregator {
    movies_info: MoviesInfoClient,
    reviews: ReviewsClient,
}

impl Aggregator {
    pub fn new(movies_info: MoviesInfoClient, reviews: ReviewsClient) -> Self {
        Self { movies_info, reviews }
    }

    pub async fn movie_by_id(&self, movie_id: &str) -> AppResult<Movie> {
        let (movie_info, reviews) = tokio::try_join!(
            async {
                match self.movies_info.retrieve_movie_info(movie_id).await? {
                    Fetched::Found(info) => Ok::<_, AppError>(info),
                    Fetched::NotFound => Err(AppError::NotFound(format!(
                        "There is no MovieInfo Available for the passed in Id : {movie_id}"
                    ))),
                }
            },
            async {
                match self.reviews.retrieve_reviews(movie_id).await? {
                    Fetched::Found(reviews) => Ok::<_, AppError>(reviews),
                    // A movie nobody has reviewed yet.
                    Fetched::NotFound => Ok(Vec::new()),
                }
            },
        )?;

        debug!(movie_id = %movie_id, reviews = reviews.len(), "aggregated movie");
        Ok(Movie { movie_info, review_list: reviews })
    }
}
