#[derive(Debug, Clone)]
pub struct CreateStoreDto {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: String,
}
