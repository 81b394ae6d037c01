use std::path::{Path, PathBuf};

use crate::data::models::cart_item::CartLine;
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::favorite_repository::FavoriteRepository;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

const CART_KEY: &str = "muchshop_cart";
const WISHLIST_KEY: &str = "muchshop_wishlist";

/// Best-effort local key-value store: one JSON blob per (key, owner)
/// under a data directory. Used as the guest cart/wishlist and as the
/// fallback mirror while the remote store is unreachable.
struct JsonStore {
    dir: PathBuf,
    // File writes are whole-blob; reads take the same lock so they
    // never observe a half-written blob.
    lock: Mutex<()>,
}

impl JsonStore {
    fn new(dir: &Path) -> Self {
        JsonStore {
            dir: dir.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Percent-encodes everything outside `[A-Za-z0-9_-]`, so distinct
    /// owners always map to distinct blobs and the path stays inside
    /// the data directory.
    fn blob_path(&self, key: &str, owner: &str) -> PathBuf {
        let mut safe_owner = String::with_capacity(owner.len());
        for byte in owner.bytes() {
            match byte {
                b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_' => {
                    safe_owner.push(byte as char)
                }
                _ => safe_owner.push_str(&format!("%{byte:02X}")),
            }
        }
        self.dir.join(format!("{key}.{safe_owner}.json"))
    }

    async fn read<T: DeserializeOwned>(&self, key: &str, owner: &str) -> Result<Option<T>, StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::read(self.blob_path(key, owner)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, owner: &str, value: &T) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(self.blob_path(key, owner), bytes).await?;
        Ok(())
    }
}

/// Cart backend over the local store.
pub struct LocalCartRepo {
    store: JsonStore,
}

impl LocalCartRepo {
    pub fn new(dir: &Path) -> Self {
        LocalCartRepo {
            store: JsonStore::new(dir),
        }
    }

    async fn load(&self, owner: &str) -> Result<Vec<CartLine>, StoreError> {
        Ok(self.store.read(CART_KEY, owner).await?.unwrap_or_default())
    }

    async fn save(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError> {
        self.store.write(CART_KEY, owner, &lines).await
    }
}

#[async_trait]
impl CartRepository for LocalCartRepo {
    async fn lines(&self, owner: &str) -> Result<Vec<CartLine>, StoreError> {
        self.load(owner).await
    }

    async fn get_line(
        &self,
        owner: &str,
        product_id: i32,
    ) -> Result<Option<CartLine>, StoreError> {
        let lines = self.load(owner).await?;
        Ok(lines.into_iter().find(|l| l.product_id == product_id))
    }

    async fn upsert_line(&self, owner: &str, line: CartLine) -> Result<(), StoreError> {
        let mut lines = self.load(owner).await?;
        match lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => *existing = line,
            None => lines.push(line),
        }
        self.save(owner, &lines).await
    }

    async fn set_quantity(
        &self,
        owner: &str,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), StoreError> {
        let mut lines = self.load(owner).await?;
        if let Some(existing) = lines.iter_mut().find(|l| l.product_id == product_id) {
            existing.quantity = quantity;
            self.save(owner, &lines).await?;
        }
        Ok(())
    }

    async fn remove_line(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut lines = self.load(owner).await?;
        lines.retain(|l| l.product_id != product_id);
        self.save(owner, &lines).await
    }

    async fn clear(&self, owner: &str) -> Result<(), StoreError> {
        self.save(owner, &[]).await
    }

    async fn replace_all(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError> {
        self.save(owner, lines).await
    }
}

/// Wishlist backend over the local store.
pub struct LocalFavoriteRepo {
    store: JsonStore,
}

impl LocalFavoriteRepo {
    pub fn new(dir: &Path) -> Self {
        LocalFavoriteRepo {
            store: JsonStore::new(dir),
        }
    }

    async fn load(&self, owner: &str) -> Result<Vec<i32>, StoreError> {
        Ok(self
            .store
            .read(WISHLIST_KEY, owner)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl FavoriteRepository for LocalFavoriteRepo {
    async fn list(&self, owner: &str) -> Result<Vec<i32>, StoreError> {
        self.load(owner).await
    }

    async fn contains(&self, owner: &str, product_id: i32) -> Result<bool, StoreError> {
        Ok(self.load(owner).await?.contains(&product_id))
    }

    async fn add(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut ids = self.load(owner).await?;
        if !ids.contains(&product_id) {
            ids.push(product_id);
            self.store.write(WISHLIST_KEY, owner, &ids).await?;
        }
        Ok(())
    }

    async fn remove(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut ids = self.load(owner).await?;
        ids.retain(|id| *id != product_id);
        self.store.write(WISHLIST_KEY, owner, &ids).await
    }
}
