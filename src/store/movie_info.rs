use jiff::civil::Date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::{entities::movie_info, error::AppResult, models::MovieInfo};

/// Catalog of movie metadata.
#[derive(Clone)]
pub struct MovieInfoStore {
    db: DatabaseConnection,
}

impl MovieInfoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts `info` under a freshly generated id. Any id on the input is ignored.
    pub async fn create(&self, info: MovieInfo) -> AppResult<MovieInfo> {
        let model = movie_info::ActiveModel {
            id: Set(super::new_id()),
            name: Set(info.name),
            year: Set(info.year.unwrap_or_default()),
            cast: Set(serde_json::to_value(&info.cast)?),
            release_date: Set(info.release_date.map(|d| d.to_string())),
        };
        let stored = model.insert(&self.db).await?;
        tracing::debug!(id = %stored.id, "movie info created");
        to_movie_info(stored)
    }

    /// Lists records matching every filter that is set.
    pub async fn find(&self, year: Option<i32>, name: Option<&str>) -> AppResult<Vec<MovieInfo>> {
        let mut query = movie_info::Entity::find();
        if let Some(year) = year {
            query = query.filter(movie_info::Column::Year.eq(year));
        }
        if let Some(name) = name {
            query = query.filter(movie_info::Column::Name.eq(name));
        }
        let rows = query.all(&self.db).await?;
        rows.into_iter().map(to_movie_info).collect()
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<MovieInfo>> {
        let row = movie_info::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        row.map(to_movie_info).transpose()
    }

    /// Overwrites every mutable field of the record. Returns `None` when `id` is unknown.
    pub async fn update(&self, id: &str, info: MovieInfo) -> AppResult<Option<MovieInfo>> {
        let Some(existing) = movie_info::Entity::find_by_id(id.to_string()).one(&self.db).await?
        else {
            return Ok(None);
        };

        let mut model: movie_info::ActiveModel = existing.into();
        model.name = Set(info.name);
        model.year = Set(info.year.unwrap_or_default());
        model.cast = Set(serde_json::to_value(&info.cast)?);
        model.release_date = Set(info.release_date.map(|d| d.to_string()));

        let updated = model.update(&self.db).await?;
        tracing::debug!(id = %updated.id, "movie info updated");
        to_movie_info(updated).map(Some)
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let res = movie_info::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn to_movie_info(model: movie_info::Model) -> AppResult<MovieInfo> {
    let cast: Vec<String> = serde_json::from_value(model.cast)?;
    let release_date = model.release_date.as_deref().map(str::parse::<Date>).transpose()?;
    Ok(MovieInfo {
        id: Some(model.id),
        name: model.name,
        year: Some(model.year),
        cast,
        release_date,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::db::connect_and_migrate;

    async fn store() -> MovieInfoStore {
        MovieInfoStore::new(connect_and_migrate("sqlite::memory:").await.unwrap())
    }

    fn movie(name: &str, year: i32, cast: &[&str], date: Date) -> MovieInfo {
        MovieInfo {
            id: None,
            name: name.to_string(),
            year: Some(year),
            cast: cast.iter().map(|c| c.to_string()).collect(),
            release_date: Some(date),
        }
    }

    async fn seeded() -> MovieInfoStore {
        let store = store().await;
        for info in [
            movie("Batman Begins", 2005, &["Christian Bale", "Michael Cane"], jiff::civil::date(2005, 6, 15)),
            movie("The Dark Knight", 2008, &["Christian Bale", "HeathLedger"], jiff::civil::date(2008, 7, 18)),
            movie("Dark Knight Rises", 2012, &["Christian Bale", "Tom Hardy"], jiff::civil::date(2012, 7, 20)),
        ] {
            store.create(info).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn create_generates_distinct_ids() {
        let store = seeded().await;
        let all = store.find(None, None).await.unwrap();
        assert_eq!(all.len(), 3);
        let ids: HashSet<_> = all.iter().map(|m| m.id.clone().unwrap()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn create_ignores_supplied_id() {
        let store = store().await;
        let input = MovieInfo {
            id: Some("abc".to_string()),
            ..movie("Batman Eternal", 2005, &["Christian Bale"], jiff::civil::date(2012, 7, 20))
        };
        let created = store.create(input).await.unwrap();
        assert_ne!(created.id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn get_returns_created_record() {
        let store = store().await;
        let input = movie("Batman Eternal", 2005, &["Christian Bale", "John Castle"], jiff::civil::date(2012, 7, 20));
        let created = store.create(input.clone()).await.unwrap();
        let id = created.id.clone().unwrap();

        let fetched = store.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched, MovieInfo { id: Some(id), ..input });
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let store = seeded().await;
        let target = store.find(None, Some("Dark Knight Rises")).await.unwrap().remove(0);
        let id = target.id.clone().unwrap();

        let replacement = movie("Dark Knight Rises 1", 2013, &["Christian Bale1", "Tom Hardy1"], jiff::civil::date(2012, 7, 20));
        let updated = store.update(&id, replacement.clone()).await.unwrap().unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));

        let fetched = store.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched, MovieInfo { id: Some(id), ..replacement });
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = store().await;
        let replacement = movie("Nope", 2000, &["Nobody"], jiff::civil::date(2000, 1, 1));
        assert!(store.update("missing", replacement).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_then_get_is_none() {
        let store = seeded().await;
        let id = store.find(None, None).await.unwrap()[0].id.clone().unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(!store.delete(&id).await.unwrap());
        assert_eq!(store.find(None, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_applies_each_filter_that_is_set() {
        let store = seeded().await;

        let by_year = store.find(Some(2005), None).await.unwrap();
        assert_eq!(by_year.len(), 1);
        assert_eq!(by_year[0].name, "Batman Begins");

        let by_name = store.find(None, Some("The Dark Knight")).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].year, Some(2008));

        let both = store.find(Some(2008), Some("The Dark Knight")).await.unwrap();
        assert_eq!(both, by_name);
        assert!(store.find(Some(2005), Some("The Dark Knight")).await.unwrap().is_empty());
    }
}
