use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application_service::port::{PublicKeyRegistry, PublicKeyRegistryError};
use crate::domain::public_key::SerializedPublicKey;

/// テストやローカル開発用のインメモリ公開鍵レジストリ。
///
/// コントラクト側と同じく、アドレスは大文字小文字を区別しない。
#[derive(Clone, Default)]
pub struct InMemoryPublicKeyRegistry {
    inner: Arc<Mutex<HashMap<String, SerializedPublicKey>>>,
}

impl InMemoryPublicKeyRegistry {
    fn normalize(address: &str) -> String {
        address.to_ascii_lowercase()
    }
}

impl PublicKeyRegistry for InMemoryPublicKeyRegistry {
    fn register(
        &self,
        address: &str,
        public_key: &SerializedPublicKey,
    ) -> Result<(), PublicKeyRegistryError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| PublicKeyRegistryError::Registry(e.to_string()))?;

        guard.insert(Self::normalize(address), public_key.clone());
        Ok(())
    }

    fn find(&self, address: &str) -> Result<Option<SerializedPublicKey>, PublicKeyRegistryError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| PublicKeyRegistryError::Registry(e.to_string()))?;

        Ok(guard.get(&Self::normalize(address)).cloned())
    }
}
