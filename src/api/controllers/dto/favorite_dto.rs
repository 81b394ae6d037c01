use crate::services::favorite_service::FavoriteToggle;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub product_id: i32,
    pub favorited: bool,
    pub degraded: bool,
}

impl From<FavoriteToggle> for FavoriteToggleResponse {
    fn from(toggle: FavoriteToggle) -> Self {
        FavoriteToggleResponse {
            product_id: toggle.product_id,
            favorited: toggle.favorited,
            degraded: toggle.degraded,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub product_ids: Vec<i32>,
}
