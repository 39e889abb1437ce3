use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::application_service::port::{IdentityStore, IdentityStoreError};
use crate::domain::identity::Identity;

/// プロセス内に Identity を保持するインメモリ実装。
///
/// - 永続化は行わず、プロセス終了とともに破棄される。
/// - ローカル開発やテスト用途を想定。
#[derive(Clone, Default)]
pub struct InMemoryIdentityStore {
    inner: Arc<Mutex<Option<Identity>>>,
}

impl IdentityStore for InMemoryIdentityStore {
    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;

        *guard = Some(identity.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Identity>, IdentityStoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;

        Ok(guard.clone())
    }

    fn delete(&self) -> Result<(), IdentityStoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;

        *guard = None;
        Ok(())
    }
}

/// sled を用いた Identity ストア実装。
///
/// - キー: 固定文字列 `"identity:premium_content"`
/// - 値: Identity の JSON (`privateKey` / `publicKey` / `address`)
pub struct SledIdentityStore {
    db: sled::Db,
}

impl SledIdentityStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IdentityStoreError> {
        let db = sled::open(path).map_err(|e| IdentityStoreError::Storage(e.to_string()))?;
        Ok(Self { db })
    }

    fn sled_key() -> &'static str {
        "identity:premium_content"
    }
}

impl IdentityStore for SledIdentityStore {
    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError> {
        let value = serde_json::to_vec(identity)
            .map_err(|e| IdentityStoreError::InvalidIdentityData(e.to_string()))?;

        self.db
            .insert(Self::sled_key(), value)
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;

        Ok(())
    }

    fn load(&self) -> Result<Option<Identity>, IdentityStoreError> {
        let opt = self
            .db
            .get(Self::sled_key())
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;

        let Some(ivec) = opt else {
            return Ok(None);
        };

        let identity = serde_json::from_slice(ivec.as_ref())
            .map_err(|e| IdentityStoreError::InvalidIdentityData(e.to_string()))?;
        Ok(Some(identity))
    }

    fn delete(&self) -> Result<(), IdentityStoreError> {
        self.db
            .remove(Self::sled_key())
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| IdentityStoreError::Storage(e.to_string()))?;
        Ok(())
    }
}
