use crate::domain::identity::Identity;
use crate::domain::public_key::SerializedPublicKey;

/// Identity を保存・復元するための秘密鍵ストアのポート。
///
/// 1 プロセスにつき 1 つの Identity を保持する想定。
pub trait IdentityStore {
    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError>;

    fn load(&self) -> Result<Option<Identity>, IdentityStoreError>;

    fn delete(&self) -> Result<(), IdentityStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityStoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid identity data: {0}")]
    InvalidIdentityData(String),
}

/// コントラクト上の公開鍵レジストリのポート。
///
/// - key: アドレス
/// - value: `SerializedPublicKey`
///
/// 実際のコントラクト呼び出しはこのクレートの外で実装する。
pub trait PublicKeyRegistry {
    fn register(
        &self,
        address: &str,
        public_key: &SerializedPublicKey,
    ) -> Result<(), PublicKeyRegistryError>;

    fn find(&self, address: &str) -> Result<Option<SerializedPublicKey>, PublicKeyRegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PublicKeyRegistryError {
    #[error("registry error: {0}")]
    Registry(String),
}
