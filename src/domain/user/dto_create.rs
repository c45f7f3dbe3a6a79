use super::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub role: Option<UserRole>,
}
