use std::sync::Arc;

use crate::data::repos::traits::favorite_repository::FavoriteRepository;
use crate::security::session::Session;
use crate::services::errors::FavoriteServiceError;

/// Result of a wishlist toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteToggle {
    pub product_id: i32,
    pub favorited: bool,
    pub degraded: bool,
}

/// Wishlist with the same dual-backend discipline as the cart: remote
/// store for signed-in sessions with silent-but-logged local fallback,
/// local store for guests.
pub struct FavoriteService {
    remote: Arc<dyn FavoriteRepository>,
    local: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(remote: Arc<dyn FavoriteRepository>, local: Arc<dyn FavoriteRepository>) -> Self {
        FavoriteService { remote, local }
    }

    pub async fn toggle(
        &self,
        session: &Session,
        product_id: i32,
    ) -> Result<FavoriteToggle, FavoriteServiceError> {
        let owner = session.cart_owner();

        if session.is_authenticated() {
            match toggle_on(&*self.remote, owner, product_id).await {
                Ok(favorited) => {
                    return Ok(FavoriteToggle {
                        product_id,
                        favorited,
                        degraded: false,
                    })
                }
                Err(e) => {
                    tracing::warn!(owner, error = %e, "Remote favorite toggle failed, applying locally");
                }
            }
            let favorited = toggle_on(&*self.local, owner, product_id)
                .await
                .map_err(|_| FavoriteServiceError::StorageUnavailable)?;
            return Ok(FavoriteToggle {
                product_id,
                favorited,
                degraded: true,
            });
        }

        let favorited = toggle_on(&*self.local, owner, product_id)
            .await
            .map_err(|_| FavoriteServiceError::StorageUnavailable)?;
        Ok(FavoriteToggle {
            product_id,
            favorited,
            degraded: false,
        })
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<i32>, FavoriteServiceError> {
        let owner = session.cart_owner();

        if session.is_authenticated() {
            match self.remote.list(owner).await {
                Ok(ids) => return Ok(ids),
                Err(e) => {
                    tracing::warn!(owner, error = %e, "Remote favorite read failed, serving local list");
                }
            }
        }

        self.local
            .list(owner)
            .await
            .map_err(|_| FavoriteServiceError::StorageUnavailable)
    }
}

async fn toggle_on(
    repo: &dyn FavoriteRepository,
    owner: &str,
    product_id: i32,
) -> Result<bool, crate::data::repos::traits::StoreError> {
    if repo.contains(owner, product_id).await? {
        repo.remove(owner, product_id).await?;
        Ok(false)
    } else {
        repo.add(owner, product_id).await?;
        Ok(true)
    }
}
