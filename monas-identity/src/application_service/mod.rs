pub mod encryption_service;
pub mod identity_service;
pub mod port;
pub mod public_key_codec;

pub use encryption_service::EncryptionService;
pub use identity_service::{IdentityService, IdentityServiceError};
pub use port::{IdentityStore, IdentityStoreError, PublicKeyRegistry, PublicKeyRegistryError};
pub use public_key_codec::PublicKeyCodec;
