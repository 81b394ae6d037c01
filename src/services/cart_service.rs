use std::sync::Arc;

use crate::data::models::cart_item::CartLine;
use crate::data::models::product::Product;
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::StoreError;
use crate::security::session::Session;
use crate::services::errors::CartServiceError;
use crate::services::pricing;
use bigdecimal::BigDecimal;
use tokio::sync::broadcast;

/// Snapshot of a cart handed back after every read or mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    /// Sum of line totals at the snapshotted prices.
    pub total: BigDecimal,
    /// Total quantity across lines (the badge count).
    pub item_count: i64,
    /// True when the remote store could not be reached and the local
    /// fallback served this cart instead.
    pub degraded: bool,
}

/// Broadcast to every observer after a mutation has been durably
/// applied, so badge counts and other listeners can re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEvent {
    pub owner: String,
    pub item_count: i64,
    pub total: BigDecimal,
}

/// The cart, backed by two stores: the remote per-user table when the
/// session is a signed-in user, the local store for guests.
///
/// For signed-in sessions every mutation goes to the remote store
/// first; if that fails the mutation lands in the local store instead
/// and the result is marked degraded, but the caller never sees a
/// fatal error for it. After a successful remote write the local
/// mirror is refreshed from the remote lines, so the remote store
/// always wins once it is reachable again.
pub struct CartService {
    remote: Arc<dyn CartRepository>,
    local: Arc<dyn CartRepository>,
    events: broadcast::Sender<CartEvent>,
}

impl CartService {
    pub fn new(remote: Arc<dyn CartRepository>, local: Arc<dyn CartRepository>) -> Self {
        let (events, _) = broadcast::channel(64);
        CartService {
            remote,
            local,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Adds `quantity` of the product. An existing line accumulates,
    /// and its price is re-snapshotted to the product's current
    /// effective price.
    pub async fn add_item(
        &self,
        session: &Session,
        product: &Product,
        quantity: i32,
    ) -> Result<CartView, CartServiceError> {
        if quantity < 1 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let owner = session.cart_owner().to_string();
        let price = pricing::pricing_for(product).current_price;

        let degraded = self
            .mutate(session, &owner, |repo| {
                add_on(repo, owner.clone(), product.clone(), quantity, price.clone())
            })
            .await?;

        self.finish(session, &owner, degraded).await
    }

    /// Replaces a line's quantity. Zero or less removes the line; the
    /// snapshotted price is left alone either way.
    pub async fn set_quantity(
        &self,
        session: &Session,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartView, CartServiceError> {
        if quantity <= 0 {
            return self.remove_item(session, product_id).await;
        }

        let owner = session.cart_owner().to_string();

        let degraded = self
            .mutate(session, &owner, |repo| {
                let owner = owner.clone();
                async move { repo.set_quantity(&owner, product_id, quantity).await }
            })
            .await?;

        self.finish(session, &owner, degraded).await
    }

    pub async fn remove_item(
        &self,
        session: &Session,
        product_id: i32,
    ) -> Result<CartView, CartServiceError> {
        let owner = session.cart_owner().to_string();

        let degraded = self
            .mutate(session, &owner, |repo| {
                let owner = owner.clone();
                async move { repo.remove_line(&owner, product_id).await }
            })
            .await?;

        self.finish(session, &owner, degraded).await
    }

    pub async fn clear(&self, session: &Session) -> Result<CartView, CartServiceError> {
        let owner = session.cart_owner().to_string();

        let degraded = self
            .mutate(session, &owner, |repo| {
                let owner = owner.clone();
                async move { repo.clear(&owner).await }
            })
            .await?;

        self.finish(session, &owner, degraded).await
    }

    /// The current cart. Signed-in sessions read the remote store and
    /// fall back to the local mirror when it is unreachable.
    pub async fn get_cart(&self, session: &Session) -> Result<CartView, CartServiceError> {
        let owner = session.cart_owner();

        if session.is_authenticated() {
            match self.remote.lines(owner).await {
                Ok(lines) => return Ok(Self::view(lines, false)),
                Err(e) => {
                    tracing::warn!(owner, error = %e, "Remote cart read failed, serving local mirror");
                }
            }
            let lines = self
                .local
                .lines(owner)
                .await
                .map_err(|_| CartServiceError::StorageUnavailable)?;
            return Ok(Self::view(lines, true));
        }

        let lines = self
            .local
            .lines(owner)
            .await
            .map_err(|_| CartServiceError::StorageUnavailable)?;
        Ok(Self::view(lines, false))
    }

    pub async fn get_total(&self, session: &Session) -> Result<BigDecimal, CartServiceError> {
        Ok(self.get_cart(session).await?.total)
    }

    pub async fn get_item_count(&self, session: &Session) -> Result<i64, CartServiceError> {
        Ok(self.get_cart(session).await?.item_count)
    }

    /// Runs the mutation against the backend the session selects.
    /// Returns whether the result is degraded (local fallback used for
    /// a signed-in session).
    async fn mutate<F, Fut>(
        &self,
        session: &Session,
        owner: &str,
        op: F,
    ) -> Result<bool, CartServiceError>
    where
        F: Fn(Arc<dyn CartRepository>) -> Fut,
        Fut: std::future::Future<Output = Result<(), StoreError>>,
    {
        if session.is_authenticated() {
            match op(Arc::clone(&self.remote)).await {
                Ok(()) => {
                    self.refresh_mirror(owner).await;
                    return Ok(false);
                }
                Err(e) => {
                    tracing::warn!(owner, error = %e, "Remote cart mutation failed, applying locally");
                }
            }
            op(Arc::clone(&self.local))
                .await
                .map_err(|_| CartServiceError::StorageUnavailable)?;
            return Ok(true);
        }

        op(Arc::clone(&self.local))
            .await
            .map_err(|_| CartServiceError::StorageUnavailable)?;
        Ok(false)
    }

    /// Overwrites the local mirror with the remote lines. Best effort;
    /// a failing mirror never fails the mutation that triggered it.
    async fn refresh_mirror(&self, owner: &str) {
        let refreshed = match self.remote.lines(owner).await {
            Ok(lines) => self.local.replace_all(owner, &lines).await,
            Err(e) => Err(e),
        };
        if let Err(e) = refreshed {
            tracing::warn!(owner, error = %e, "Local cart mirror refresh failed");
        }
    }

    /// Reads back the cart from the store that served the mutation and
    /// notifies observers before returning. The mutation is already
    /// durable at this point, so a failed remote readback degrades to
    /// the local mirror instead of failing the call.
    async fn finish(
        &self,
        session: &Session,
        owner: &str,
        degraded: bool,
    ) -> Result<CartView, CartServiceError> {
        let mut degraded = degraded;

        let lines = if session.is_authenticated() && !degraded {
            match self.remote.lines(owner).await {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!(owner, error = %e, "Cart readback failed after remote mutation, serving local mirror");
                    degraded = true;
                    self.local
                        .lines(owner)
                        .await
                        .map_err(|_| CartServiceError::StorageUnavailable)?
                }
            }
        } else {
            self.local
                .lines(owner)
                .await
                .map_err(|_| CartServiceError::StorageUnavailable)?
        };

        let view = Self::view(lines, degraded);

        let _ = self.events.send(CartEvent {
            owner: owner.to_string(),
            item_count: view.item_count,
            total: view.total.clone(),
        });

        Ok(view)
    }

    fn view(lines: Vec<CartLine>, degraded: bool) -> CartView {
        let total = lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.line_total());
        let item_count = lines.iter().map(|l| i64::from(l.quantity)).sum();

        CartView {
            lines,
            total,
            item_count,
            degraded,
        }
    }
}

/// Read-modify-write for the accumulate-and-resnapshot rule of
/// `add_item`, against whichever backend was selected.
async fn add_on(
    repo: Arc<dyn CartRepository>,
    owner: String,
    product: Product,
    quantity: i32,
    price: BigDecimal,
) -> Result<(), StoreError> {
    let existing = repo.get_line(&owner, product.product_id).await?;
    let quantity = existing.map(|l| l.quantity).unwrap_or(0) + quantity;

    repo.upsert_line(
        &owner,
        CartLine {
            product_id: product.product_id,
            name: product.name,
            unit: product.unit,
            image_uri: product.image_uri,
            price,
            quantity,
        },
    )
    .await
}
