use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::domain::identity::Identity;

/// 暗号ライブラリ由来のエラー。メッセージはライブラリのものをそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoProviderError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid curve point: {0}")]
    InvalidPoint(String),
    #[error("encryption failed: {0}")]
    Encryption(String),
    #[error("decryption failed: {0}")]
    Decryption(String),
    #[error("invalid encrypted payload: {0}")]
    InvalidPayload(String),
}

/// ECIES の暗号文。
///
/// 中身（エフェメラル公開鍵・nonce・タグ・暗号文）の並びは暗号ライブラリが決めるため、
/// ここではバイト列として扱い、解釈しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload(Vec<u8>);

impl EncryptedPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// 保存・転送用の 1 本の hex 文字列にする。
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// `to_hex` の逆変換。`0x` プレフィックスは任意。
    pub fn from_hex(s: &str) -> Result<Self, CryptoProviderError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.is_empty() {
            return Err(CryptoProviderError::InvalidPayload(
                "payload is empty".to_string(),
            ));
        }
        hex::decode(s)
            .map(Self)
            .map_err(|e| CryptoProviderError::InvalidPayload(e.to_string()))
    }
}

impl Serialize for EncryptedPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EncryptedPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// 外部の楕円曲線暗号ライブラリへのポート。
///
/// 鍵生成・ECIES・公開鍵の圧縮/展開だけを担当し、hex の扱いや
/// プレフィックスの解釈は呼び出し側（codec や service）で行う。
pub trait CryptoProvider: Send + Sync {
    /// CSPRNG から新しい鍵ペアとアドレスを生成する。
    fn generate_identity(&self) -> Result<Identity, CryptoProviderError>;

    /// 秘密鍵から公開鍵とアドレスを導出する。
    fn identity_from_private_key(&self, private_key: &str)
        -> Result<Identity, CryptoProviderError>;

    /// 非圧縮公開鍵に向けて平文を暗号化する。
    fn encrypt(
        &self,
        public_key: &str,
        plaintext: &[u8],
    ) -> Result<EncryptedPayload, CryptoProviderError>;

    /// 秘密鍵で暗号文を復号する。
    fn decrypt(
        &self,
        private_key: &str,
        payload: &EncryptedPayload,
    ) -> Result<Vec<u8>, CryptoProviderError>;

    /// 非圧縮公開鍵 -> 圧縮公開鍵 (`02`/`03` + X, 66 文字の hex)。
    fn compress_public_key(&self, public_key: &str) -> Result<String, CryptoProviderError>;

    /// 圧縮公開鍵 -> 非圧縮公開鍵 (X || Y, 128 文字の hex)。
    fn decompress_public_key(&self, compressed: &str) -> Result<String, CryptoProviderError>;
}
