use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use rand_core::OsRng;
use sha3::{Digest, Keccak256};

use crate::domain::encryption::{CryptoProvider, CryptoProviderError, EncryptedPayload};
use crate::domain::identity::Identity;

const PRIVATE_KEY_LEN: usize = 32;
const RAW_PUBLIC_KEY_LEN: usize = 64;
const ADDRESS_LEN: usize = 20;

/// secp256k1 (k256) と ECIES (ecies crate) による `CryptoProvider` 実装。
///
/// - 鍵生成: `k256::SecretKey::random` (OsRng)
/// - 暗号化: `ecies::encrypt` / `ecies::decrypt`（AES-256-GCM, pure Rust バックエンド）
/// - アドレス: keccak256(X || Y) の末尾 20 バイトを EIP-55 形式で表記
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Provider;

impl Secp256k1Provider {
    fn identity_from_secret(secret_key: &SecretKey) -> Identity {
        let public_key = secret_key.public_key();
        let raw_public_key = raw_public_key_bytes(&public_key);

        Identity::new(
            format!("0x{}", hex::encode(secret_key.to_bytes())),
            hex::encode(&raw_public_key),
            address_from_raw_public_key(&raw_public_key),
        )
    }
}

impl CryptoProvider for Secp256k1Provider {
    fn generate_identity(&self) -> Result<Identity, CryptoProviderError> {
        let secret_key = SecretKey::random(&mut OsRng);
        Ok(Self::identity_from_secret(&secret_key))
    }

    fn identity_from_private_key(
        &self,
        private_key: &str,
    ) -> Result<Identity, CryptoProviderError> {
        let secret_key = parse_private_key(private_key)?;
        Ok(Self::identity_from_secret(&secret_key))
    }

    fn encrypt(
        &self,
        public_key: &str,
        plaintext: &[u8],
    ) -> Result<EncryptedPayload, CryptoProviderError> {
        let public_key = parse_public_key(public_key)?;
        let encoded = public_key.to_encoded_point(false);

        ecies::encrypt(encoded.as_bytes(), plaintext)
            .map(EncryptedPayload::new)
            .map_err(|e| CryptoProviderError::Encryption(format!("ecies encrypt failed: {e:?}")))
    }

    fn decrypt(
        &self,
        private_key: &str,
        payload: &EncryptedPayload,
    ) -> Result<Vec<u8>, CryptoProviderError> {
        let secret_key = parse_private_key(private_key)?;

        ecies::decrypt(secret_key.to_bytes().as_slice(), payload.as_bytes())
            .map_err(|e| CryptoProviderError::Decryption(format!("ecies decrypt failed: {e:?}")))
    }

    fn compress_public_key(&self, public_key: &str) -> Result<String, CryptoProviderError> {
        let public_key = parse_public_key(public_key)?;
        Ok(hex::encode(public_key.to_encoded_point(true).as_bytes()))
    }

    fn decompress_public_key(&self, compressed: &str) -> Result<String, CryptoProviderError> {
        let bytes = decode_hex(compressed).map_err(CryptoProviderError::InvalidPoint)?;
        let public_key = PublicKey::from_sec1_bytes(&bytes)
            .map_err(|e| CryptoProviderError::InvalidPoint(format!("{e:?}")))?;
        Ok(hex::encode(raw_public_key_bytes(&public_key)))
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| e.to_string())
}

fn parse_private_key(private_key: &str) -> Result<SecretKey, CryptoProviderError> {
    let bytes = decode_hex(private_key).map_err(CryptoProviderError::InvalidPrivateKey)?;
    if bytes.len() != PRIVATE_KEY_LEN {
        return Err(CryptoProviderError::InvalidPrivateKey(format!(
            "expected {PRIVATE_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    SecretKey::from_slice(&bytes)
        .map_err(|e| CryptoProviderError::InvalidPrivateKey(format!("{e:?}")))
}

/// 公開鍵の hex を受け付ける。
///
/// X || Y の 64 バイト（`04` なし）に加え、SEC1 の圧縮/非圧縮形式も受け付ける。
fn parse_public_key(public_key: &str) -> Result<PublicKey, CryptoProviderError> {
    let mut bytes = decode_hex(public_key).map_err(CryptoProviderError::InvalidPublicKey)?;
    if bytes.len() == RAW_PUBLIC_KEY_LEN {
        bytes.insert(0, 0x04);
    }
    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|e| CryptoProviderError::InvalidPublicKey(format!("{e:?}")))
}

/// 非圧縮点から `04` を除いた X || Y。
fn raw_public_key_bytes(public_key: &PublicKey) -> Vec<u8> {
    public_key.to_encoded_point(false).as_bytes()[1..].to_vec()
}

fn address_from_raw_public_key(raw_public_key: &[u8]) -> String {
    let hash = Keccak256::digest(raw_public_key);
    to_checksum_address(&hash[hash.len() - ADDRESS_LEN..])
}

/// EIP-55
fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let checksummed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    format!("0x{checksummed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY_ONE: &str =
        "0x0000000000000000000000000000000000000000000000000000000000000001";
    const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GENERATOR_Y: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn generate_has_expected_shapes() {
        let identity = Secp256k1Provider.generate_identity().unwrap();

        assert!(identity.private_key().starts_with("0x"));
        assert_eq!(identity.private_key().len(), 2 + 64);
        assert_eq!(identity.public_key().len(), 128);
        assert!(identity.address().starts_with("0x"));
        assert_eq!(identity.address().len(), 2 + 40);
    }

    #[test]
    fn generate_gives_different_keys() {
        let a = Secp256k1Provider.generate_identity().unwrap();
        let b = Secp256k1Provider.generate_identity().unwrap();
        assert_ne!(a.private_key(), b.private_key());
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn known_private_key_derives_known_public_key_and_address() {
        let identity = Secp256k1Provider
            .identity_from_private_key(PRIVATE_KEY_ONE)
            .unwrap();

        assert_eq!(identity.public_key(), format!("{GENERATOR_X}{GENERATOR_Y}"));
        assert_eq!(
            identity.address(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn restored_identity_matches_generated_one() {
        let generated = Secp256k1Provider.generate_identity().unwrap();
        let restored = Secp256k1Provider
            .identity_from_private_key(generated.private_key())
            .unwrap();
        assert_eq!(restored, generated);
    }

    #[test]
    fn invalid_private_keys_are_rejected() {
        let zero = format!("0x{}", "00".repeat(32));
        for input in ["0x1234", "not hex", zero.as_str()] {
            let result = Secp256k1Provider.identity_from_private_key(input);
            assert!(
                matches!(result, Err(CryptoProviderError::InvalidPrivateKey(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn compress_known_point() {
        let compressed = Secp256k1Provider
            .compress_public_key(&format!("{GENERATOR_X}{GENERATOR_Y}"))
            .unwrap();
        assert_eq!(compressed, format!("02{GENERATOR_X}"));
    }

    #[test]
    fn compress_accepts_sec1_uncompressed_form() {
        let compressed = Secp256k1Provider
            .compress_public_key(&format!("0x04{GENERATOR_X}{GENERATOR_Y}"))
            .unwrap();
        assert_eq!(compressed, format!("02{GENERATOR_X}"));
    }

    #[test]
    fn decompress_known_point() {
        let decompressed = Secp256k1Provider
            .decompress_public_key(&format!("02{GENERATOR_X}"))
            .unwrap();
        assert_eq!(decompressed, format!("{GENERATOR_X}{GENERATOR_Y}"));
    }

    #[test]
    fn decompress_rejects_point_not_on_curve() {
        // x equal to the field modulus is not a valid coordinate.
        let x = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
        let result = Secp256k1Provider.decompress_public_key(&format!("02{x}"));
        assert!(matches!(result, Err(CryptoProviderError::InvalidPoint(_))));
    }

    #[test]
    fn encrypt_and_decrypt_round_trip() {
        let identity = Secp256k1Provider.generate_identity().unwrap();
        let payload = Secp256k1Provider
            .encrypt(identity.public_key(), b"premium")
            .unwrap();
        let plaintext = Secp256k1Provider
            .decrypt(identity.private_key(), &payload)
            .unwrap();
        assert_eq!(plaintext, b"premium");
    }

    #[test]
    fn encrypt_rejects_malformed_public_key() {
        let result = Secp256k1Provider.encrypt("abcd", b"data");
        assert!(matches!(result, Err(CryptoProviderError::InvalidPublicKey(_))));
    }

    #[test]
    fn decrypt_rejects_corrupted_payload() {
        let identity = Secp256k1Provider.generate_identity().unwrap();
        let payload = Secp256k1Provider
            .encrypt(identity.public_key(), b"premium")
            .unwrap();

        let mut bytes = payload.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;

        let result =
            Secp256k1Provider.decrypt(identity.private_key(), &EncryptedPayload::new(bytes));
        assert!(matches!(result, Err(CryptoProviderError::Decryption(_))));
    }

    #[test]
    fn checksum_address_matches_eip55_vector() {
        let bytes = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(
            to_checksum_address(&bytes),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
