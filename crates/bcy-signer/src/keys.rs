use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::SignError;

/// Length of a raw secp256k1 secret scalar.
const PRIVATE_KEY_LEN: usize = 32;

/// Length of a digest handed out by the service for signing.
pub const DIGEST_LEN: usize = 32;

/// WIF payload flag marking a key whose public key is used compressed.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A secp256k1 private key. The underlying scalar is zeroized on drop.
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Parse a 32-byte private key from its hex encoding.
    pub fn from_hex(hex_key: &str) -> Result<Self, SignError> {
        let bytes = Zeroizing::new(
            hex::decode(hex_key.trim())
                .map_err(|e| SignError::InvalidPrivateKey(format!("invalid hex: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Parse a private key from Wallet Import Format (Base58Check).
    ///
    /// Both compressed (34-byte payload) and uncompressed (33-byte payload)
    /// forms are accepted; the version byte is not checked because it
    /// differs between coins and chains.
    pub fn from_wif(wif: &str) -> Result<Self, SignError> {
        let payload = Zeroizing::new(
            bs58::decode(wif.trim())
                .with_check(None)
                .into_vec()
                .map_err(|e| SignError::InvalidPrivateKey(format!("invalid WIF: {e}")))?,
        );

        let scalar = match payload.len() {
            33 => &payload[1..33],
            34 if payload[33] == WIF_COMPRESSED_FLAG => &payload[1..33],
            34 => {
                return Err(SignError::InvalidPrivateKey(
                    "invalid WIF compression flag".into(),
                ))
            }
            n => {
                return Err(SignError::InvalidPrivateKey(format!(
                    "invalid WIF payload length: {n}"
                )))
            }
        };
        Self::from_bytes(scalar)
    }

    /// Parse either encoding: 64 hex characters are read as a raw key,
    /// anything else as WIF.
    pub fn parse(key: &str) -> Result<Self, SignError> {
        let key = key.trim();
        if key.len() == PRIVATE_KEY_LEN * 2 && key.chars().all(|c| c.is_ascii_hexdigit()) {
            Self::from_hex(key)
        } else {
            Self::from_wif(key)
        }
    }

    /// Build a key from raw scalar bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(SignError::InvalidPrivateKey(format!(
                "expected {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| SignError::InvalidPrivateKey(format!("invalid secp256k1 key: {e}")))?;
        Ok(Self { inner })
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: *self.inner.verifying_key(),
        }
    }

    /// Sign a 32-byte digest as-is (no further hashing).
    ///
    /// Returns the DER-encoded, low-S normalized signature.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>, SignError> {
        check_digest_len(digest)?;
        let sig: Signature = self
            .inner
            .sign_prehash(digest)
            .map_err(|e| SignError::SigningFailed(format!("ECDSA signing failed: {e}")))?;
        Ok(sig.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

/// A secp256k1 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded public key (compressed or uncompressed) from hex.
    pub fn from_hex(hex_key: &str) -> Result<Self, SignError> {
        let bytes = hex::decode(hex_key.trim())
            .map_err(|e| SignError::InvalidPublicKey(format!("invalid hex: {e}")))?;
        let inner = VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|_| SignError::InvalidPublicKey("point is not on the secp256k1 curve".into()))?;
        Ok(Self { inner })
    }

    /// Compressed 33-byte SEC1 encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_sec1_bytes().to_vec()
    }

    /// Lowercase hex of the compressed encoding, as the service expects it.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Verify a DER signature over a 32-byte digest.
    pub fn verify_digest(&self, digest: &[u8], der_signature: &[u8]) -> Result<(), SignError> {
        check_digest_len(digest)?;
        let sig = Signature::from_der(der_signature)
            .map_err(|e| SignError::InvalidSignature(format!("malformed DER: {e}")))?;
        self.inner
            .verify_prehash(digest, &sig)
            .map_err(|_| SignError::InvalidSignature("verification failed".into()))
    }
}

fn check_digest_len(digest: &[u8]) -> Result<(), SignError> {
    if digest.len() != DIGEST_LEN {
        return Err(SignError::InvalidDigest(format!(
            "expected {DIGEST_LEN} bytes, got {}",
            digest.len()
        )));
    }
    Ok(())
}
