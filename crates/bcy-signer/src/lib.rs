//! Local signing for BlockCypher transaction skeletons.
//!
//! The service hands back 32-byte digests ("tosign") that must be signed
//! client-side before a transaction can be broadcast. This crate decodes
//! hex or WIF private keys, signs those digests with ECDSA over secp256k1
//! and returns hex-encoded DER signatures and compressed public keys.

pub mod error;
pub mod keys;
pub mod signer;

pub use error::SignError;
pub use keys::{PrivateKey, PublicKey};
pub use signer::{sign_digests, sign_digests_verified, verify_digest, SignedDigest};
