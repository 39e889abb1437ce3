pub mod identity_store;
pub mod public_key_registry;
pub mod secp256k1_provider;

pub use identity_store::{InMemoryIdentityStore, SledIdentityStore};
pub use public_key_registry::InMemoryPublicKeyRegistry;
pub use secp256k1_provider::Secp256k1Provider;
