use super::UserRole;

#[derive(Debug, Clone, Default)]
pub struct GetUsersDto {
    /// Matches against name or email
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// One of: name, email, role (anything else sorts by newest first)
    pub sort_by: Option<String>,
}
