#[derive(Debug, Clone)]
pub struct SubmitRatingDto {
    pub user_id: String,
    pub store_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}
