//! Identity and encryption helpers for premium content.
//!
//! An [`IdentityService`] owns a secp256k1 key pair and its address, encrypts
//! premium content for that key with ECIES, and converts its public key into the
//! compact `(prefix_bit, key_bytes)` form stored by the on-chain key registry.

pub mod application_service;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application_service::{
    EncryptionService, IdentityService, IdentityServiceError, PublicKeyCodec,
};
pub use config::{ConfigError, IdentityConfig, IdentitySource};
pub use domain::{
    CryptoProvider, CryptoProviderError, EncryptedPayload, Identity, PublicKeyCodecError,
    SerializedPublicKey,
};
pub use infrastructure::Secp256k1Provider;
