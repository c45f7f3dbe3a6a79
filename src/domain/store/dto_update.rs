#[derive(Debug, Clone, Default)]
pub struct UpdateStoreDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
