pub mod encryption;
pub mod identity;
pub mod public_key;

pub use encryption::{CryptoProvider, CryptoProviderError, EncryptedPayload};
pub use identity::Identity;
pub use public_key::{
    extract_prefix_bit, prefix_bit_to_hex_prefix, PublicKeyCodecError, SerializedPublicKey,
    KEY_BYTES_LEN,
};
