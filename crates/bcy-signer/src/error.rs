use thiserror::Error;

/// Local signing errors. None of these involve the network.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("number of private keys ({keys}) does not match number of digests to sign ({digests})")]
    KeyCountMismatch { keys: usize, digests: usize },

    #[error("public key at index {index} does not match private key")]
    PublicKeyMismatch { index: usize },

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}
