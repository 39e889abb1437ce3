use tracing::{debug, info};

use crate::application_service::encryption_service::EncryptionService;
use crate::application_service::port::{
    IdentityStore, IdentityStoreError, PublicKeyRegistry, PublicKeyRegistryError,
};
use crate::application_service::public_key_codec::PublicKeyCodec;
use crate::config::{ConfigError, IdentityConfig, IdentitySource};
use crate::domain::encryption::{CryptoProvider, CryptoProviderError, EncryptedPayload};
use crate::domain::identity::Identity;
use crate::domain::public_key::{PublicKeyCodecError, SerializedPublicKey};
use crate::infrastructure::identity_store::SledIdentityStore;
use crate::infrastructure::secp256k1_provider::Secp256k1Provider;

#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error(transparent)]
    Crypto(#[from] CryptoProviderError),
    #[error(transparent)]
    Codec(#[from] PublicKeyCodecError),
    #[error("identity store error: {0}")]
    Store(#[from] IdentityStoreError),
    #[error("public key registry error: {0}")]
    Registry(#[from] PublicKeyRegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// プレミアムコンテンツの暗号化/復号に使う Identity を保持するサービス。
///
/// 暗号処理は `EncryptionService`、公開鍵の変換は `PublicKeyCodec` に委譲する。
#[derive(Debug, Clone)]
pub struct IdentityService<P = Secp256k1Provider> {
    identity: Identity,
    encryption: EncryptionService<P>,
    codec: PublicKeyCodec<P>,
}

impl IdentityService<Secp256k1Provider> {
    /// 新しい鍵ペアを生成して Identity を作る。
    pub fn create() -> Result<Self, IdentityServiceError> {
        Self::with_provider(Secp256k1Provider, None)
    }

    /// 既存の Identity をそのまま使う。内容の検証は行わない。
    pub fn from_existing(identity: Identity) -> Self {
        debug!(address = %identity.address(), "using existing identity");
        Self::assemble(Secp256k1Provider, identity)
    }

    /// 秘密鍵から公開鍵とアドレスを導出して Identity を復元する。
    pub fn from_private_key(private_key: &str) -> Result<Self, IdentityServiceError> {
        Self::from_private_key_with(Secp256k1Provider, private_key)
    }

    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityServiceError> {
        Self::from_config_with(Secp256k1Provider, config)
    }

    pub fn load_or_create<S: IdentityStore>(store: &S) -> Result<Self, IdentityServiceError> {
        Self::load_or_create_with(Secp256k1Provider, store)
    }
}

impl<P: CryptoProvider + Clone> IdentityService<P> {
    /// `identity` が `None` の場合は `provider` で新しく生成する。
    pub fn with_provider(
        provider: P,
        identity: Option<Identity>,
    ) -> Result<Self, IdentityServiceError> {
        let identity = match identity {
            Some(identity) => {
                debug!(address = %identity.address(), "using existing identity");
                identity
            }
            None => {
                let identity = provider.generate_identity()?;
                info!(address = %identity.address(), "generated new identity");
                identity
            }
        };
        Ok(Self::assemble(provider, identity))
    }

    pub fn from_private_key_with(
        provider: P,
        private_key: &str,
    ) -> Result<Self, IdentityServiceError> {
        let identity = provider.identity_from_private_key(private_key)?;
        info!(address = %identity.address(), "restored identity from private key");
        Ok(Self::assemble(provider, identity))
    }

    pub fn from_config_with(
        provider: P,
        config: &IdentityConfig,
    ) -> Result<Self, IdentityServiceError> {
        match config.source {
            IdentitySource::Generate => Self::with_provider(provider, None),
            IdentitySource::PrivateKey => {
                let private_key = config.private_key_from_env()?;
                Self::from_private_key_with(provider, &private_key)
            }
            IdentitySource::Store => {
                let store = SledIdentityStore::open(&config.store_path)?;
                Self::load_or_create_with(provider, &store)
            }
        }
    }

    /// ストアに Identity があればそれを使い、なければ生成して保存する。
    pub fn load_or_create_with<S: IdentityStore>(
        provider: P,
        store: &S,
    ) -> Result<Self, IdentityServiceError> {
        if let Some(identity) = store.load()? {
            debug!(address = %identity.address(), "loaded identity from store");
            return Ok(Self::assemble(provider, identity));
        }

        let service = Self::with_provider(provider, None)?;
        store.save(&service.identity)?;
        info!(address = %service.address(), "saved new identity to store");
        Ok(service)
    }

    fn assemble(provider: P, identity: Identity) -> Self {
        Self {
            identity,
            encryption: EncryptionService::new(provider.clone()),
            codec: PublicKeyCodec::new(provider),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn address(&self) -> &str {
        self.identity.address()
    }

    pub fn codec(&self) -> &PublicKeyCodec<P> {
        &self.codec
    }

    pub fn encryption(&self) -> &EncryptionService<P> {
        &self.encryption
    }

    pub async fn encrypt_data(&self, data: &str) -> Result<EncryptedPayload, CryptoProviderError> {
        self.encryption
            .encrypt(self.identity.public_key(), data)
            .await
    }

    pub async fn decrypt_encrypted_data(
        &self,
        payload: &EncryptedPayload,
    ) -> Result<String, CryptoProviderError> {
        self.encryption
            .decrypt(self.identity.private_key(), payload)
            .await
    }

    pub fn compressed_public_key(&self) -> Result<String, CryptoProviderError> {
        self.codec.compress(self.identity.public_key())
    }

    pub fn decompressed_public_key(&self) -> &str {
        self.identity.public_key()
    }

    pub fn serialized_public_key(&self) -> Result<SerializedPublicKey, PublicKeyCodecError> {
        self.codec.serialize(self.identity.public_key())
    }

    /// 公開鍵をレジストリ用の形にしてアドレスと共に登録する。
    pub fn register_public_key<R: PublicKeyRegistry>(
        &self,
        registry: &R,
    ) -> Result<SerializedPublicKey, IdentityServiceError> {
        let serialized = self.serialized_public_key()?;
        registry.register(self.address(), &serialized)?;
        info!(
            address = %self.address(),
            prefix_bit = serialized.prefix_bit(),
            "registered public key"
        );
        Ok(serialized)
    }
}
