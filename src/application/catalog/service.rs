//! Store management service — application-layer orchestration

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateStoreDto, DomainError, DomainResult, GetStoresDto, Store, StoreRepositoryInterface,
    UpdateStoreDto, UserRepositoryInterface, UserRole,
};
use crate::shared::validations::{validate_address, validate_email};
use crate::shared::PaginatedResult;

/// Store service — store CRUD plus the owner-role invariant.
pub struct StoreService {
    stores: Arc<dyn StoreRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
}

impl StoreService {
    pub fn new(
        stores: Arc<dyn StoreRepositoryInterface>,
        users: Arc<dyn UserRepositoryInterface>,
    ) -> Self {
        Self { stores, users }
    }

    /// Create a store. The owner must exist and hold the `store_owner` role.
    pub async fn create_store(&self, dto: CreateStoreDto) -> DomainResult<Store> {
        if dto.name.trim().is_empty() {
            return Err(DomainError::Validation("Store name is required".into()));
        }
        validate_email(&dto.email)?;
        validate_address(&dto.address)?;

        let owner = self
            .users
            .get_user_by_id(&dto.owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", dto.owner_id.clone()))?;

        if owner.role != UserRole::StoreOwner {
            return Err(DomainError::Validation(
                "Store owner must hold the store_owner role".into(),
            ));
        }

        let store = self
            .stores
            .create_store(CreateStoreDto {
                name: dto.name.trim().to_string(),
                email: dto.email.trim().to_lowercase(),
                address: dto.address.trim().to_string(),
                owner_id: dto.owner_id,
            })
            .await?;

        info!(store_id = %store.id, owner_id = %store.owner_id, "Store created");
        Ok(store)
    }

    /// List stores with search, sorting and pagination.
    pub async fn list_stores(&self, dto: GetStoresDto) -> DomainResult<PaginatedResult<Store>> {
        self.stores.list_stores(dto).await
    }

    /// Stores owned by a given user (store-owner dashboard).
    pub async fn stores_owned_by(&self, owner_id: &str) -> DomainResult<PaginatedResult<Store>> {
        self.stores
            .list_stores(GetStoresDto {
                owner_id: Some(owner_id.to_string()),
                ..Default::default()
            })
            .await
    }

    pub async fn get_store_by_id(&self, id: &str) -> DomainResult<Option<Store>> {
        self.stores.get_store_by_id(id).await
    }

    pub async fn count_stores(&self) -> DomainResult<u64> {
        self.stores.count_stores().await
    }

    /// Highest-rated stores that have at least one rating.
    pub async fn top_rated(&self, limit: u64) -> DomainResult<Vec<Store>> {
        self.stores.top_rated(limit).await
    }

    pub async fn update_store(&self, id: &str, dto: UpdateStoreDto) -> DomainResult<Option<Store>> {
        if let Some(ref name) = dto.name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation("Store name is required".into()));
            }
        }
        if let Some(ref email) = dto.email {
            validate_email(email)?;
        }
        if let Some(ref address) = dto.address {
            validate_address(address)?;
        }

        self.stores.update_store(id, dto).await
    }

    pub async fn delete_store(&self, id: &str) -> DomainResult<()> {
        self.stores.delete_store(id).await?;
        info!(store_id = id, "Store deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateUserDto;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{StoreRepository, UserRepository};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> (StoreService, Arc<UserRepository>) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let users = Arc::new(UserRepository::new(db.clone()));
        let stores = Arc::new(StoreRepository::new(db));
        (StoreService::new(stores, users.clone()), users)
    }

    async fn make_owner(users: &UserRepository) -> String {
        let owner = users
            .create_user(CreateUserDto {
                name: "Dedicated Store Owner Person".into(),
                email: "owner@example.com".into(),
                password: "Owner@Pass1".into(),
                address: "1 Shop Street".into(),
                role: Some(UserRole::StoreOwner),
            })
            .await
            .unwrap();
        owner.id
    }

    fn store_dto(owner_id: &str) -> CreateStoreDto {
        CreateStoreDto {
            name: "Corner Grocery".into(),
            email: "shop@example.com".into(),
            address: "2 Shop Street".into(),
            owner_id: owner_id.to_string(),
        }
    }

    #[tokio::test]
    async fn new_store_starts_unrated() {
        let (service, users) = setup().await;
        let owner_id = make_owner(&users).await;

        let store = service.create_store(store_dto(&owner_id)).await.unwrap();
        assert_eq!(store.average_rating, 0.0);
        assert_eq!(store.total_ratings, 0);
    }

    #[tokio::test]
    async fn owner_must_hold_store_owner_role() {
        let (service, users) = setup().await;
        let regular = users
            .create_user(CreateUserDto {
                name: "Regular Customer Account Name".into(),
                email: "user@example.com".into(),
                password: "User@Pass12".into(),
                address: "3 Home Street".into(),
                role: Some(UserRole::User),
            })
            .await
            .unwrap();

        let err = service.create_store(store_dto(&regular.id)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_owner_is_not_found() {
        let (service, _users) = setup().await;
        let err = service.create_store(store_dto("nope")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_matches_name_and_address() {
        let (service, users) = setup().await;
        let owner_id = make_owner(&users).await;
        service.create_store(store_dto(&owner_id)).await.unwrap();
        service
            .create_store(CreateStoreDto {
                name: "Downtown Bakery".into(),
                email: "bakery@example.com".into(),
                address: "9 Flour Road".into(),
                owner_id: owner_id.clone(),
            })
            .await
            .unwrap();

        let by_name = service
            .list_stores(GetStoresDto {
                search: Some("Bakery".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);

        let by_address = service
            .list_stores(GetStoresDto {
                search: Some("Shop Street".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_address.total, 1);
    }
}
