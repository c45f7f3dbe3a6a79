use chrono::{DateTime, Utc};

/// Store model
#[derive(Clone, Debug)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Owning user (must hold the `store_owner` role)
    pub owner_id: String,
    /// Derived: mean of all rating values, one decimal place, 0 when unrated
    pub average_rating: f64,
    /// Derived: count of rating records for this store
    pub total_ratings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
