use crate::domain::encryption::{CryptoProvider, CryptoProviderError};
use crate::domain::public_key::{self, decode_key_bytes, PublicKeyCodecError, SerializedPublicKey};
use crate::infrastructure::secp256k1_provider::Secp256k1Provider;

/// 公開鍵の 3 つの表現を相互に変換する。
///
/// - 非圧縮 hex (X || Y)
/// - 圧縮 hex (`02`/`03` + X)
/// - レジストリ保存用の `SerializedPublicKey`
///
/// 点の圧縮/展開は `CryptoProvider` に委譲し、プレフィックスの解釈と
/// hex/バイト列の変換だけをここで行う。
#[derive(Debug, Clone, Default)]
pub struct PublicKeyCodec<P = Secp256k1Provider> {
    provider: P,
}

impl<P: CryptoProvider> PublicKeyCodec<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn compress(&self, public_key: &str) -> Result<String, CryptoProviderError> {
        self.provider.compress_public_key(public_key)
    }

    pub fn decompress(&self, compressed: &str) -> Result<String, CryptoProviderError> {
        self.provider.decompress_public_key(compressed)
    }

    pub fn extract_prefix_bit(&self, compressed: &str) -> Result<bool, PublicKeyCodecError> {
        public_key::extract_prefix_bit(compressed)
    }

    pub fn prefix_bit_to_hex_prefix(prefix_bit: bool) -> &'static str {
        public_key::prefix_bit_to_hex_prefix(prefix_bit)
    }

    pub fn serialize(&self, public_key: &str) -> Result<SerializedPublicKey, PublicKeyCodecError> {
        let compressed = self.compress(public_key)?;
        SerializedPublicKey::from_compressed(&compressed)
    }

    /// prefix bit とキーバイト列から圧縮公開鍵を組み立て、展開した公開鍵を返す。
    pub fn deserialize(
        &self,
        prefix_bit: bool,
        key_bytes: &[u8],
    ) -> Result<String, PublicKeyCodecError> {
        let compressed = format!(
            "{}{}",
            Self::prefix_bit_to_hex_prefix(prefix_bit),
            hex::encode(key_bytes)
        );
        Ok(self.decompress(&compressed)?)
    }

    /// `deserialize` のキーバイト列を hex（`0x` 任意）で受け取る版。
    pub fn deserialize_hex(
        &self,
        prefix_bit: bool,
        key_bytes_hex: &str,
    ) -> Result<String, PublicKeyCodecError> {
        let key_bytes = decode_key_bytes(key_bytes_hex)?;
        self.deserialize(prefix_bit, &key_bytes)
    }

    pub fn deserialize_serialized(
        &self,
        serialized: &SerializedPublicKey,
    ) -> Result<String, PublicKeyCodecError> {
        self.deserialize(serialized.prefix_bit(), serialized.key_bytes())
    }
}
