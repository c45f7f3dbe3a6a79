//! Rating service — application-layer orchestration
//!
//! Submitting a rating is an upsert keyed by (user, store): a second
//! submission from the same user for the same store overwrites the first.
//! Every write is followed by a recomputation of the store's derived
//! summary (`average_rating`, `total_ratings`) from the full rating set
//! for that store, so the summary never drifts from the detail records.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Rating, RatingRepositoryInterface, StoreRepositoryInterface,
    SubmitRatingDto, UserRepositoryInterface,
};
use crate::shared::PaginatedResult;

/// A store's rating joined with who left it, for owner/admin dashboards.
#[derive(Debug, Clone)]
pub struct StoreRatingRecord {
    pub rating: Rating,
    pub rater_name: String,
    pub rater_email: String,
}

pub struct RatingService {
    ratings: Arc<dyn RatingRepositoryInterface>,
    stores: Arc<dyn StoreRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingRepositoryInterface>,
        stores: Arc<dyn StoreRepositoryInterface>,
        users: Arc<dyn UserRepositoryInterface>,
    ) -> Self {
        Self {
            ratings,
            stores,
            users,
        }
    }

    /// Submit a rating for a store, overwriting any previous rating from
    /// the same user. Recomputes the store's summary before returning.
    pub async fn submit_rating(&self, dto: SubmitRatingDto) -> DomainResult<Rating> {
        if !(1..=5).contains(&dto.rating) {
            return Err(DomainError::Validation(
                "Rating must be between 1 and 5".into(),
            ));
        }

        // Referential integrity: no orphaned ratings.
        if self.users.get_user_by_id(&dto.user_id).await?.is_none() {
            return Err(DomainError::not_found("User", "id", dto.user_id));
        }
        if self.stores.get_store_by_id(&dto.store_id).await?.is_none() {
            return Err(DomainError::not_found("Store", "id", dto.store_id));
        }

        let existing = self
            .ratings
            .find_by_user_and_store(&dto.user_id, &dto.store_id)
            .await?;

        let rating = match existing {
            Some(previous) => {
                let updated = self
                    .ratings
                    .update_rating(&previous.id, dto.rating, dto.comment)
                    .await?;
                info!(
                    rating_id = %updated.id,
                    store_id = %updated.store_id,
                    value = updated.rating,
                    "Rating updated"
                );
                updated
            }
            None => {
                let now = Utc::now();
                let inserted = self
                    .ratings
                    .insert_rating(Rating {
                        id: uuid::Uuid::new_v4().to_string(),
                        user_id: dto.user_id,
                        store_id: dto.store_id,
                        rating: dto.rating,
                        comment: dto.comment,
                        created_at: now,
                        updated_at: now,
                    })
                    .await?;
                info!(
                    rating_id = %inserted.id,
                    store_id = %inserted.store_id,
                    value = inserted.rating,
                    "Rating created"
                );
                inserted
            }
        };

        self.recompute_store_aggregates(&rating.store_id).await?;

        Ok(rating)
    }

    /// The calling user's rating for a store, if any.
    pub async fn get_user_rating(
        &self,
        user_id: &str,
        store_id: &str,
    ) -> DomainResult<Option<Rating>> {
        self.ratings.find_by_user_and_store(user_id, store_id).await
    }

    /// Page of a store's ratings with rater names, newest activity first.
    pub async fn list_store_ratings(
        &self,
        store_id: &str,
        page: u32,
        page_size: u32,
    ) -> DomainResult<PaginatedResult<StoreRatingRecord>> {
        if self.stores.get_store_by_id(store_id).await?.is_none() {
            return Err(DomainError::not_found("Store", "id", store_id));
        }

        let result = self
            .ratings
            .list_for_store(store_id, page, page_size)
            .await?;

        let mut records = Vec::with_capacity(result.items.len());
        for rating in result.items {
            let rater = self.users.get_user_by_id(&rating.user_id).await?;
            let (rater_name, rater_email) = match rater {
                Some(user) => (user.name, user.email),
                // Should not happen with FKs in place; keep the row visible.
                None => ("Unknown user".to_string(), String::new()),
            };
            records.push(StoreRatingRecord {
                rating,
                rater_name,
                rater_email,
            });
        }

        Ok(PaginatedResult::new(
            records,
            result.total,
            result.page,
            result.limit,
        ))
    }

    /// Remove every rating a user has left and recompute the summaries of
    /// the stores that were affected. Called before an admin deletes the
    /// user so aggregates never go stale.
    pub async fn purge_user_ratings(&self, user_id: &str) -> DomainResult<u64> {
        let affected = self.ratings.store_ids_rated_by(user_id).await?;
        let removed = self.ratings.delete_ratings_by_user(user_id).await?;

        for store_id in &affected {
            self.recompute_store_aggregates(store_id).await?;
        }

        if removed > 0 {
            info!(user_id, removed, "Purged user ratings");
        }
        Ok(removed)
    }

    /// Recompute a store's derived summary from its rating rows.
    ///
    /// `total_ratings` is the row count; `average_rating` is the mean of
    /// the values rounded to one decimal place (half away from zero), or
    /// 0 when the store has no ratings.
    pub async fn recompute_store_aggregates(&self, store_id: &str) -> DomainResult<(f64, i32)> {
        let ratings = self.ratings.ratings_for_store(store_id).await?;

        let total = ratings.len() as i32;
        let average = if total == 0 {
            0.0
        } else {
            let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
            round_to_tenths(sum as f64 / f64::from(total))
        };

        self.stores
            .update_store_aggregates(store_id, average, total)
            .await?;

        Ok((average, total))
    }

    /// Total number of rating records (analytics).
    pub async fn count_ratings(&self) -> DomainResult<u64> {
        self.ratings.count_ratings().await
    }

    /// Mean of every rating in the system rounded to one decimal, 0 when
    /// there are no ratings (analytics).
    pub async fn overall_average(&self) -> DomainResult<f64> {
        let avg = self.ratings.average_rating().await?;
        Ok(avg.map(round_to_tenths).unwrap_or(0.0))
    }
}

/// Round to one decimal place, half away from zero.
fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateStoreDto, CreateUserDto, UserRole};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{
        RatingRepository, StoreRepository, UserRepository,
    };
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    struct Fixture {
        service: RatingService,
        stores: Arc<StoreRepository>,
        users: Arc<UserRepository>,
    }

    async fn fixture() -> Fixture {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let users = Arc::new(UserRepository::new(db.clone()));
        let stores = Arc::new(StoreRepository::new(db.clone()));
        let ratings = Arc::new(RatingRepository::new(db));

        Fixture {
            service: RatingService::new(ratings, stores.clone(), users.clone()),
            stores,
            users,
        }
    }

    impl Fixture {
        async fn user(&self, email: &str) -> String {
            use crate::domain::UserRepositoryInterface;
            self.users
                .create_user(CreateUserDto {
                    name: format!("Customer Account For {}", email),
                    email: email.to_string(),
                    password: "User@Pass12".into(),
                    address: "10 Test Avenue".into(),
                    role: Some(UserRole::User),
                })
                .await
                .unwrap()
                .id
        }

        async fn store(&self, name: &str) -> String {
            use crate::domain::{StoreRepositoryInterface, UserRepositoryInterface};
            let owner = self
                .users
                .create_user(CreateUserDto {
                    name: format!("Owner Of The {} Store", name),
                    email: format!("owner-{}@example.com", name.to_lowercase()),
                    password: "Owner@Pass1".into(),
                    address: "11 Shop Avenue".into(),
                    role: Some(UserRole::StoreOwner),
                })
                .await
                .unwrap();

            self.stores
                .create_store(CreateStoreDto {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    address: "12 Shop Avenue".into(),
                    owner_id: owner.id,
                })
                .await
                .unwrap()
                .id
        }

        async fn store_summary(&self, store_id: &str) -> (f64, i32) {
            use crate::domain::StoreRepositoryInterface;
            let store = self
                .stores
                .get_store_by_id(store_id)
                .await
                .unwrap()
                .unwrap();
            (store.average_rating, store.total_ratings)
        }

        async fn submit(&self, user_id: &str, store_id: &str, value: i32) -> Rating {
            self.service
                .submit_rating(SubmitRatingDto {
                    user_id: user_id.to_string(),
                    store_id: store_id.to_string(),
                    rating: value,
                    comment: None,
                })
                .await
                .unwrap()
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero_at_tenths() {
        assert_eq!(round_to_tenths(4.0 + 2.0 / 3.0), 4.7);
        assert_eq!(round_to_tenths(4.65), 4.7);
        assert_eq!(round_to_tenths(3.44), 3.4);
        assert_eq!(round_to_tenths(0.0), 0.0);
    }

    #[tokio::test]
    async fn first_rating_sets_summary() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;

        fx.submit(&u1, &s, 4).await;

        assert_eq!(fx.store_summary(&s).await, (4.0, 1));
    }

    #[tokio::test]
    async fn resubmission_overwrites_instead_of_duplicating() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let u2 = fx.user("u2@example.com").await;
        let s = fx.store("Alpha").await;

        fx.submit(&u1, &s, 4).await;
        fx.submit(&u2, &s, 5).await;
        assert_eq!(fx.store_summary(&s).await, (4.5, 2));

        // U1 changes their mind: still 2 ratings, mean of [2, 5].
        fx.submit(&u1, &s, 2).await;
        assert_eq!(fx.store_summary(&s).await, (3.5, 2));
    }

    #[tokio::test]
    async fn upsert_preserves_created_at_and_bumps_updated_at() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;

        let first = fx.submit(&u1, &s, 3).await;
        let second = fx.submit(&u1, &s, 5).await;

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.rating, 5);
    }

    #[tokio::test]
    async fn mean_is_rounded_to_one_decimal() {
        let fx = fixture().await;
        let s = fx.store("Alpha").await;
        for (i, value) in [5, 5, 4].iter().enumerate() {
            let u = fx.user(&format!("u{}@example.com", i)).await;
            fx.submit(&u, &s, *value).await;
        }

        // 14 / 3 = 4.666... -> 4.7
        assert_eq!(fx.store_summary(&s).await, (4.7, 3));
    }

    #[tokio::test]
    async fn aggregates_are_isolated_across_stores() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let rated = fx.store("Alpha").await;
        let untouched = fx.store("Beta").await;

        fx.submit(&u1, &rated, 4).await;

        assert_eq!(fx.store_summary(&untouched).await, (0.0, 0));
    }

    #[tokio::test]
    async fn out_of_range_values_are_rejected() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;

        for bad in [0, 6, -1] {
            let err = fx
                .service
                .submit_rating(SubmitRatingDto {
                    user_id: u1.clone(),
                    store_id: s.clone(),
                    rating: bad,
                    comment: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn unknown_user_or_store_is_rejected() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;

        let err = fx
            .service
            .submit_rating(SubmitRatingDto {
                user_id: "ghost".into(),
                store_id: s.clone(),
                rating: 3,
                comment: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = fx
            .service
            .submit_rating(SubmitRatingDto {
                user_id: u1,
                store_id: "ghost".into(),
                rating: 3,
                comment: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn comment_is_overwritten_on_resubmit() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;

        fx.service
            .submit_rating(SubmitRatingDto {
                user_id: u1.clone(),
                store_id: s.clone(),
                rating: 4,
                comment: Some("great".into()),
            })
            .await
            .unwrap();

        let updated = fx
            .service
            .submit_rating(SubmitRatingDto {
                user_id: u1,
                store_id: s,
                rating: 4,
                comment: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.comment, None);
    }

    #[tokio::test]
    async fn listing_includes_rater_names() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let s = fx.store("Alpha").await;
        fx.submit(&u1, &s, 5).await;

        let page = fx.service.list_store_ratings(&s, 1, 20).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].rater_email, "u1@example.com");
        assert_eq!(page.items[0].rating.rating, 5);
    }

    #[tokio::test]
    async fn overall_average_spans_stores() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let u2 = fx.user("u2@example.com").await;
        let alpha = fx.store("Alpha").await;
        let beta = fx.store("Beta").await;

        assert_eq!(fx.service.overall_average().await.unwrap(), 0.0);

        fx.submit(&u1, &alpha, 5).await;
        fx.submit(&u2, &alpha, 5).await;
        fx.submit(&u1, &beta, 4).await;

        // 14 / 3 -> 4.7
        assert_eq!(fx.service.overall_average().await.unwrap(), 4.7);
    }

    #[tokio::test]
    async fn purge_recomputes_affected_stores() {
        let fx = fixture().await;
        let u1 = fx.user("u1@example.com").await;
        let u2 = fx.user("u2@example.com").await;
        let s = fx.store("Alpha").await;

        fx.submit(&u1, &s, 1).await;
        fx.submit(&u2, &s, 5).await;
        assert_eq!(fx.store_summary(&s).await, (3.0, 2));

        let removed = fx.service.purge_user_ratings(&u1).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(fx.store_summary(&s).await, (5.0, 1));
    }
}
