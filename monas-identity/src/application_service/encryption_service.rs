use crate::domain::encryption::{CryptoProvider, CryptoProviderError, EncryptedPayload};
use crate::infrastructure::secp256k1_provider::Secp256k1Provider;

/// 公開鍵での暗号化と秘密鍵での復号を `CryptoProvider` に委譲する。
///
/// `encrypt` / `decrypt` は async だが内部で待機は発生しない。
/// 同期的に呼びたい場合は `*_blocking` を使う。
#[derive(Debug, Clone, Default)]
pub struct EncryptionService<P = Secp256k1Provider> {
    provider: P,
}

impl<P: CryptoProvider> EncryptionService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn encrypt(
        &self,
        public_key: &str,
        plaintext: &str,
    ) -> Result<EncryptedPayload, CryptoProviderError> {
        self.encrypt_blocking(public_key, plaintext)
    }

    pub async fn decrypt(
        &self,
        private_key: &str,
        payload: &EncryptedPayload,
    ) -> Result<String, CryptoProviderError> {
        self.decrypt_blocking(private_key, payload)
    }

    pub fn encrypt_blocking(
        &self,
        public_key: &str,
        plaintext: &str,
    ) -> Result<EncryptedPayload, CryptoProviderError> {
        self.provider.encrypt(public_key, plaintext.as_bytes())
    }

    pub fn decrypt_blocking(
        &self,
        private_key: &str,
        payload: &EncryptedPayload,
    ) -> Result<String, CryptoProviderError> {
        let plaintext = self.provider.decrypt(private_key, payload)?;
        String::from_utf8(plaintext).map_err(|e| {
            CryptoProviderError::Decryption(format!("plaintext is not valid UTF-8: {e}"))
        })
    }
}
