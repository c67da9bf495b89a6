use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::{entities::review, error::AppResult, models::Review};

#[derive(Clone)]
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, review: Review) -> AppResult<Review> {
        let model = review::ActiveModel {
            id: Set(super::new_id()),
            movie_info_id: Set(review.movie_info_id.unwrap_or_default()),
            comment: Set(review.comment),
            rating: Set(review.rating),
        };
        let stored = model.insert(&self.db).await?;
        tracing::debug!(id = %stored.id, movie_info_id = %stored.movie_info_id, "review created");
        Ok(to_review(stored))
    }

    pub async fn list(&self) -> AppResult<Vec<Review>> {
        let rows = review::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(to_review).collect())
    }

    pub async fn find_by_movie_info_id(&self, movie_info_id: &str) -> AppResult<Vec<Review>> {
        let rows = review::Entity::find()
            .filter(review::Column::MovieInfoId.eq(movie_info_id))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_review).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Review>> {
        let row = review::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(row.map(to_review))
    }

    /// Replaces comment and rating. The parent movie id never changes.
    pub async fn update(&self, id: &str, review: Review) -> AppResult<Option<Review>> {
        let Some(existing) = review::Entity::find_by_id(id.to_string()).one(&self.db).await?
        else {
            return Ok(None);
        };

        let mut model: review::ActiveModel = existing.into();
        model.comment = Set(review.comment);
        model.rating = Set(review.rating);

        let updated = model.update(&self.db).await?;
        tracing::debug!(id = %updated.id, "review updated");
        Ok(Some(to_review(updated)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let res = review::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn to_review(model: review::Model) -> Review {
    Review {
        id: Some(model.id),
        movie_info_id: Some(model.movie_info_id),
        comment: model.comment,
        rating: model.rating,
    }
}
