use async_trait::async_trait;

use super::Rating;
use crate::shared::types::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait RatingRepositoryInterface: Send + Sync {
    async fn insert_rating(&self, rating: Rating) -> DomainResult<Rating>;

    /// Overwrite value/comment of an existing rating, bumping `updated_at`.
    /// `created_at` is preserved.
    async fn update_rating(
        &self,
        id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> DomainResult<Rating>;

    async fn find_by_user_and_store(
        &self,
        user_id: &str,
        store_id: &str,
    ) -> DomainResult<Option<Rating>>;

    /// Every rating for a store, used for aggregate recomputation.
    async fn ratings_for_store(&self, store_id: &str) -> DomainResult<Vec<Rating>>;

    /// Page of a store's ratings, most recently updated first.
    async fn list_for_store(
        &self,
        store_id: &str,
        page: u32,
        page_size: u32,
    ) -> DomainResult<PaginatedResult<Rating>>;

    /// Store ids the user has rated (for recomputation after user removal).
    async fn store_ids_rated_by(&self, user_id: &str) -> DomainResult<Vec<String>>;

    async fn delete_ratings_by_user(&self, user_id: &str) -> DomainResult<u64>;

    async fn count_ratings(&self) -> DomainResult<u64>;

    /// Mean of every rating value in the system, `None` when there are none.
    async fn average_rating(&self) -> DomainResult<Option<f64>>;
}
