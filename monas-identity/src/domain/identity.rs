use std::fmt;

use serde::{Deserialize, Serialize};

/// プレミアムコンテンツの暗号化/復号に用いる鍵ペアとアドレスの組。
///
/// - `private_key`: `0x` 付き 32 バイトの hex
/// - `public_key`: 非圧縮公開鍵 (X || Y, 64 バイト) の hex。`04` プレフィックスは付けない
/// - `address`: `0x` 付き EIP-55 チェックサム形式のアドレス
///
/// 生成後は不変。外部から渡された値は検証せずにそのまま保持する。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    private_key: String,
    public_key: String,
    address: String,
}

impl Identity {
    pub fn new(
        private_key: impl Into<String>,
        public_key: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
            address: address.into(),
        }
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;

    fn sample() -> Identity {
        Identity::new(
            "0x2a3b00000000000000000000000000000000000000000000000000000000beef",
            "11".repeat(64),
            "0x0000000000000000000000000000000000000001",
        )
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("beef"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("privateKey").is_some());
        assert!(json.get("publicKey").is_some());
        assert!(json.get("address").is_some());
    }

    #[test]
    fn deserializes_json_shape_used_by_other_services() {
        let json = r#"{"privateKey":"0xab","publicKey":"cd","address":"0xef"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.private_key(), "0xab");
        assert_eq!(identity.public_key(), "cd");
        assert_eq!(identity.address(), "0xef");
    }
}
