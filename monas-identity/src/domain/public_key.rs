use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::encryption::CryptoProviderError;

/// 圧縮公開鍵のうちプレフィックスを除いた部分（X 座標）の長さ。
pub const KEY_BYTES_LEN: usize = 32;

const EVEN_Y_PREFIX: &str = "02";
const ODD_Y_PREFIX: &str = "03";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublicKeyCodecError {
    /// 圧縮公開鍵の先頭バイトが `02` / `03` 以外だった。
    #[error("invalid compressed public key prefix: {0:?}")]
    InvalidPrefixByte(String),
    #[error("invalid key bytes: {0}")]
    InvalidKeyBytes(String),
    #[error(transparent)]
    Crypto(#[from] CryptoProviderError),
}

/// コントラクト上のレジストリに保存する公開鍵の形。
///
/// - `prefix_bit`: 圧縮公開鍵の先頭が `03` なら true、`02` なら false
/// - `key_bytes`: プレフィックスに続く 32 バイト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedPublicKey {
    prefix_bit: bool,
    #[serde(with = "key_bytes_hex")]
    key_bytes: [u8; KEY_BYTES_LEN],
}

impl SerializedPublicKey {
    pub fn new(prefix_bit: bool, key_bytes: [u8; KEY_BYTES_LEN]) -> Self {
        Self {
            prefix_bit,
            key_bytes,
        }
    }

    /// 圧縮公開鍵の hex から組み立てる。
    pub fn from_compressed(compressed: &str) -> Result<Self, PublicKeyCodecError> {
        let compressed = compressed.strip_prefix("0x").unwrap_or(compressed);
        let prefix_bit = extract_prefix_bit(compressed)?;
        let key_bytes = decode_key_bytes(&compressed[2..])?;
        Ok(Self::new(prefix_bit, key_bytes))
    }

    pub fn prefix_bit(&self) -> bool {
        self.prefix_bit
    }

    pub fn key_bytes(&self) -> &[u8; KEY_BYTES_LEN] {
        &self.key_bytes
    }

    /// `0x` 付きの hex（コントラクト呼び出しに渡す形）。
    pub fn key_bytes_hex(&self) -> String {
        format!("0x{}", hex::encode(self.key_bytes))
    }

    /// 圧縮公開鍵の hex に戻す。
    pub fn to_compressed(&self) -> String {
        format!(
            "{}{}",
            prefix_bit_to_hex_prefix(self.prefix_bit),
            hex::encode(self.key_bytes)
        )
    }
}

/// 圧縮公開鍵の先頭 1 バイト（hex 2 文字）から prefix bit を取り出す。
///
/// `02` / `03` は数字のみなので、hex の大文字/小文字の違いは結果に影響しない。
pub fn extract_prefix_bit(compressed: &str) -> Result<bool, PublicKeyCodecError> {
    let compressed = compressed.strip_prefix("0x").unwrap_or(compressed);
    match compressed.get(..2) {
        Some(ODD_Y_PREFIX) => Ok(true),
        Some(EVEN_Y_PREFIX) => Ok(false),
        Some(other) => Err(PublicKeyCodecError::InvalidPrefixByte(other.to_string())),
        None => Err(PublicKeyCodecError::InvalidPrefixByte(compressed.to_string())),
    }
}

pub fn prefix_bit_to_hex_prefix(prefix_bit: bool) -> &'static str {
    if prefix_bit {
        ODD_Y_PREFIX
    } else {
        EVEN_Y_PREFIX
    }
}

/// `0x` の有無を問わず hex を 32 バイトに変換する。
pub fn decode_key_bytes(s: &str) -> Result<[u8; KEY_BYTES_LEN], PublicKeyCodecError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes =
        hex::decode(s).map_err(|e| PublicKeyCodecError::InvalidKeyBytes(e.to_string()))?;
    bytes.as_slice().try_into().map_err(|_| {
        PublicKeyCodecError::InvalidKeyBytes(format!(
            "expected {KEY_BYTES_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

mod key_bytes_hex {
    use super::{decode_key_bytes, KEY_BYTES_LEN};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &[u8; KEY_BYTES_LEN],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; KEY_BYTES_LEN], D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_key_bytes(&s).map_err(serde::de::Error::custom)
    }
}
