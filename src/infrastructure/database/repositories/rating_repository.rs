use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{DomainError, DomainResult, Rating, RatingRepositoryInterface};
use crate::infrastructure::database::entities::rating;
use crate::shared::{validate_pagination, PaginatedResult};

pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn rating_model_to_domain(model: rating::Model) -> Rating {
    Rating {
        id: model.id,
        user_id: model.user_id,
        store_id: model.store_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl RatingRepositoryInterface for RatingRepository {
    async fn insert_rating(&self, r: Rating) -> DomainResult<Rating> {
        let new_rating = rating::ActiveModel {
            id: Set(r.id),
            user_id: Set(r.user_id),
            store_id: Set(r.store_id),
            rating: Set(r.rating),
            comment: Set(r.comment),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        };

        let inserted = new_rating.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                // The unique (user_id, store_id) index caught a concurrent
                // insert; the caller treats this as an upsert conflict.
                DomainError::Conflict("Rating already exists for this user and store".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(rating_model_to_domain(inserted))
    }

    async fn update_rating(
        &self,
        id: &str,
        value: i32,
        comment: Option<String>,
    ) -> DomainResult<Rating> {
        let existing = rating::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Rating", "id", id));
        };

        let mut active: rating::ActiveModel = existing.into();
        active.rating = Set(value);
        active.comment = Set(comment);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(rating_model_to_domain(updated))
    }

    async fn find_by_user_and_store(
        &self,
        user_id: &str,
        store_id: &str,
    ) -> DomainResult<Option<Rating>> {
        let model = rating::Entity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(rating_model_to_domain))
    }

    async fn ratings_for_store(&self, store_id: &str) -> DomainResult<Vec<Rating>> {
        let models = rating::Entity::find()
            .filter(rating::Column::StoreId.eq(store_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(rating_model_to_domain).collect())
    }

    async fn list_for_store(
        &self,
        store_id: &str,
        page: u32,
        page_size: u32,
    ) -> DomainResult<PaginatedResult<Rating>> {
        let (page, page_size) = validate_pagination(Some(page), Some(page_size));

        let query = rating::Entity::find()
            .filter(rating::Column::StoreId.eq(store_id))
            .order_by_desc(rating::Column::UpdatedAt);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let offset = u64::from(page - 1) * u64::from(page_size);
        let models = query
            .offset(offset)
            .limit(page_size as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Rating> = models.into_iter().map(rating_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn store_ids_rated_by(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let models = rating::Entity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.store_id).collect())
    }

    async fn delete_ratings_by_user(&self, user_id: &str) -> DomainResult<u64> {
        let result = rating::Entity::delete_many()
            .filter(rating::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn count_ratings(&self) -> DomainResult<u64> {
        rating::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn average_rating(&self) -> DomainResult<Option<f64>> {
        let row: Option<(Option<i64>, i64)> = rating::Entity::find()
            .select_only()
            .column_as(rating::Column::Rating.sum(), "sum")
            .column_as(rating::Column::Rating.count(), "count")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.and_then(|(sum, count)| {
            if count == 0 {
                None
            } else {
                Some(sum.unwrap_or(0) as f64 / count as f64)
            }
        }))
    }
}
