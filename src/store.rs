use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

/// Review text a freshly added entry carries until the user writes one.
pub const DEFAULT_REVIEW: &str = "None";

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every entry, worst-rated first. Rank is derived by the caller,
    /// so listing never writes.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Rating).all(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Exact-title lookup. Titles carry a unique index, so at most one
    /// row can match.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .one(&self.db)
            .await?)
    }

    /// New entries always start unrated and unreviewed.
    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(0.0),
            review: Set(DEFAULT_REVIEW.to_string()),
            image_url: Set(new.image_url),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update_rating_review(
        &self,
        id: i32,
        rating: f64,
        review: &str,
    ) -> AppResult<movie::Model> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Err(AppError::not_found(format!("movie {id}")));
        };

        let mut active: movie::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.review = Set(review.to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Removes the entry and returns it, so callers can name what went
    /// away.
    pub async fn delete(&self, id: i32) -> AppResult<movie::Model> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Err(AppError::not_found(format!("movie {id}")));
        };

        movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use migration::Migrator;
    use sea_orm_migration::MigratorTrait;

    use super::*;

    async fn test_store() -> MovieStore {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        MovieStore::new(db)
    }

    fn sample(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 2010,
            description: "A thief who steals corporate secrets.".to_string(),
            image_url: "https://image.tmdb.org/t/p/original/poster.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn inserted_entry_appears_exactly_once() {
        let store = test_store().await;
        store.insert(sample("Inception")).await.unwrap();

        let all = store.list_by_rating().await.unwrap();
        assert_eq!(all.iter().filter(|m| m.title == "Inception").count(), 1);
    }

    #[tokio::test]
    async fn new_entries_start_unrated_with_sentinel_review() {
        let store = test_store().await;
        store.insert(sample("X")).await.unwrap();

        let found = store.find_by_title("X").await.unwrap().unwrap();
        assert_eq!(found.rating, 0.0);
        assert_eq!(found.review, DEFAULT_REVIEW);
        assert_eq!(found.year, 2010);
    }

    #[tokio::test]
    async fn listing_orders_by_rating_ascending() {
        let store = test_store().await;
        for (title, rating) in [("Mid", 7.2), ("Low", 3.1), ("High", 9.0)] {
            let movie = store.insert(sample(title)).await.unwrap();
            store.update_rating_review(movie.id, rating, "seen it").await.unwrap();
        }

        let titles: Vec<_> =
            store.list_by_rating().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Low", "Mid", "High"]);
    }

    #[tokio::test]
    async fn update_changes_only_rating_and_review() {
        let store = test_store().await;
        let movie = store.insert(sample("Arrival")).await.unwrap();

        let updated = store.update_rating_review(movie.id, 8.5, "great").await.unwrap();
        assert_eq!(updated.rating, 8.5);
        assert_eq!(updated.review, "great");
        assert_eq!(updated.title, "Arrival");
        assert_eq!(updated.description, movie.description);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = test_store().await;
        let err = store.update_rating_review(999, 5.0, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_entry() {
        let store = test_store().await;
        let keep = store.insert(sample("Keep")).await.unwrap();
        let gone = store.insert(sample("Gone")).await.unwrap();

        let removed = store.delete(gone.id).await.unwrap();
        assert_eq!(removed.title, "Gone");

        let all = store.list_by_rating().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, keep.id);

        let err = store.delete(gone.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected() {
        let store = test_store().await;
        store.insert(sample("Dune")).await.unwrap();
        assert!(store.insert(sample("Dune")).await.is_err());
    }

    #[tokio::test]
    async fn find_by_title_misses_cleanly() {
        let store = test_store().await;
        assert!(store.find_by_title("Nothing").await.unwrap().is_none());
    }
}
