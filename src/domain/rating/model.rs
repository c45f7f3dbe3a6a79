use chrono::{DateTime, Utc};

/// Rating model
#[derive(Clone, Debug)]
pub struct Rating {
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    /// Integer value in 1..=5
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
