#[derive(Debug, Clone, Default)]
pub struct GetStoresDto {
    /// Matches against name or address
    pub search: Option<String>,
    /// Restrict to stores owned by this user
    pub owner_id: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// One of: name, rating (anything else sorts by newest first)
    pub sort_by: Option<String>,
}
