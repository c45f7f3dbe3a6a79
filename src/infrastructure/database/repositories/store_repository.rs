use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::{
    CreateStoreDto, DomainError, DomainResult, GetStoresDto, Store, StoreRepositoryInterface,
    UpdateStoreDto,
};
use crate::infrastructure::database::entities::store;
use crate::shared::{validate_pagination, PaginatedResult};

pub struct StoreRepository {
    db: DatabaseConnection,
}

impl StoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_model_to_domain(model: store::Model) -> Store {
    Store {
        id: model.id,
        name: model.name,
        email: model.email,
        address: model.address,
        owner_id: model.owner_id,
        average_rating: model.average_rating,
        total_ratings: model.total_ratings,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl StoreRepositoryInterface for StoreRepository {
    async fn create_store(&self, dto: CreateStoreDto) -> DomainResult<Store> {
        let now = Utc::now();

        let new_store = store::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            address: Set(dto.address),
            owner_id: Set(dto.owner_id),
            average_rating: Set(0.0),
            total_ratings: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_store.insert(&self.db).await.map_err(db_err)?;
        Ok(store_model_to_domain(inserted))
    }

    async fn list_stores(&self, dto: GetStoresDto) -> DomainResult<PaginatedResult<Store>> {
        let (page, page_size) = validate_pagination(dto.page, dto.page_size);

        let mut query = store::Entity::find();

        // Apply search filter (name or address)
        if let Some(ref search) = dto.search {
            query = query.filter(
                store::Column::Name
                    .contains(search)
                    .or(store::Column::Address.contains(search)),
            );
        }

        // Apply owner filter
        if let Some(ref owner_id) = dto.owner_id {
            query = query.filter(store::Column::OwnerId.eq(owner_id));
        }

        // Apply sorting
        match dto.sort_by.as_deref() {
            Some("name") => {
                query = query.order_by_asc(store::Column::Name);
            }
            Some("rating") => {
                query = query.order_by_desc(store::Column::AverageRating);
            }
            _ => {
                query = query.order_by_desc(store::Column::CreatedAt);
            }
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let offset = u64::from(page - 1) * u64::from(page_size);
        let models = query
            .offset(offset)
            .limit(page_size as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Store> = models.into_iter().map(store_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn get_store_by_id(&self, id: &str) -> DomainResult<Option<Store>> {
        let model = store::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(store_model_to_domain))
    }

    async fn count_stores(&self) -> DomainResult<u64> {
        store::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn top_rated(&self, limit: u64) -> DomainResult<Vec<Store>> {
        let models = store::Entity::find()
            .filter(store::Column::TotalRatings.gt(0))
            .order_by_desc(store::Column::AverageRating)
            .order_by_desc(store::Column::TotalRatings)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(store_model_to_domain).collect())
    }

    async fn update_store(&self, id: &str, dto: UpdateStoreDto) -> DomainResult<Option<Store>> {
        let existing = store::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: store::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(address) = dto.address {
            active.address = Set(address);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(store_model_to_domain(updated)))
    }

    async fn update_store_aggregates(
        &self,
        id: &str,
        average_rating: f64,
        total_ratings: i32,
    ) -> DomainResult<()> {
        let existing = store::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Store", "id", id));
        };

        let mut active: store::ActiveModel = existing.into();
        active.average_rating = Set(average_rating);
        active.total_ratings = Set(total_ratings);
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn delete_store(&self, id: &str) -> DomainResult<()> {
        let result = store::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Store", "id", id));
        }

        Ok(())
    }
}
