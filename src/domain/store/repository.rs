use async_trait::async_trait;

use super::{CreateStoreDto, GetStoresDto, Store, UpdateStoreDto};
use crate::shared::types::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait StoreRepositoryInterface: Send + Sync {
    async fn create_store(&self, dto: CreateStoreDto) -> DomainResult<Store>;

    async fn list_stores(&self, dto: GetStoresDto) -> DomainResult<PaginatedResult<Store>>;
    async fn get_store_by_id(&self, id: &str) -> DomainResult<Option<Store>>;
    async fn count_stores(&self) -> DomainResult<u64>;
    async fn top_rated(&self, limit: u64) -> DomainResult<Vec<Store>>;

    async fn update_store(&self, id: &str, dto: UpdateStoreDto) -> DomainResult<Option<Store>>;

    /// Replace the derived rating summary for a store in place.
    async fn update_store_aggregates(
        &self,
        id: &str,
        average_rating: f64,
        total_ratings: i32,
    ) -> DomainResult<()>;

    async fn delete_store(&self, id: &str) -> DomainResult<()>;
}
