use zeroize::Zeroizing;

use crate::error::SignError;
use crate::keys::{PrivateKey, PublicKey};

/// One signed digest: hex DER signature and hex compressed public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDigest {
    pub signature: String,
    pub public_key: String,
}

/// Sign each hex digest in `to_sign` with the private key at the same index.
///
/// Keys may be hex or WIF. The key count must equal the digest count;
/// signing the same input twice means repeating its key. Every key and
/// digest is decoded before the first signature is produced, so on error
/// nothing is returned.
pub fn sign_digests<K, D>(private_keys: &[K], to_sign: &[D]) -> Result<Vec<SignedDigest>, SignError>
where
    K: AsRef<str>,
    D: AsRef<str>,
{
    let pairs = decode_pairs(private_keys, to_sign)?;
    pairs
        .iter()
        .map(|(key, digest)| sign_one(key, digest))
        .collect()
}

/// Like [`sign_digests`], but each derived public key must equal the
/// caller-supplied one at the same index.
pub fn sign_digests_verified<K, P, D>(
    private_keys: &[K],
    public_keys: &[P],
    to_sign: &[D],
) -> Result<Vec<SignedDigest>, SignError>
where
    K: AsRef<str>,
    P: AsRef<str>,
    D: AsRef<str>,
{
    if public_keys.len() != private_keys.len() {
        return Err(SignError::InvalidPublicKey(format!(
            "expected {} public keys, got {}",
            private_keys.len(),
            public_keys.len()
        )));
    }
    let pairs = decode_pairs(private_keys, to_sign)?;

    for (index, ((key, _), expected)) in pairs.iter().zip(public_keys).enumerate() {
        let expected = PublicKey::from_hex(expected.as_ref())?;
        if key.public_key() != expected {
            return Err(SignError::PublicKeyMismatch { index });
        }
    }

    pairs
        .iter()
        .map(|(key, digest)| sign_one(key, digest))
        .collect()
}

/// Check a hex DER signature over a hex digest against a hex public key.
pub fn verify_digest(public_key: &str, digest: &str, signature: &str) -> Result<(), SignError> {
    let public_key = PublicKey::from_hex(public_key)?;
    let digest = decode_digest(digest)?;
    let signature = hex::decode(signature.trim())
        .map_err(|e| SignError::InvalidSignature(format!("invalid hex: {e}")))?;
    public_key.verify_digest(&digest, &signature)
}

fn decode_pairs<K, D>(
    private_keys: &[K],
    to_sign: &[D],
) -> Result<Vec<(PrivateKey, Zeroizing<Vec<u8>>)>, SignError>
where
    K: AsRef<str>,
    D: AsRef<str>,
{
    if private_keys.len() != to_sign.len() {
        return Err(SignError::KeyCountMismatch {
            keys: private_keys.len(),
            digests: to_sign.len(),
        });
    }

    private_keys
        .iter()
        .zip(to_sign)
        .map(|(key, digest)| {
            let key = PrivateKey::parse(key.as_ref())?;
            let digest = decode_digest(digest.as_ref())?;
            Ok((key, Zeroizing::new(digest)))
        })
        .collect()
}

fn decode_digest(digest: &str) -> Result<Vec<u8>, SignError> {
    hex::decode(digest.trim()).map_err(|e| SignError::InvalidDigest(format!("invalid hex: {e}")))
}

fn sign_one(key: &PrivateKey, digest: &[u8]) -> Result<SignedDigest, SignError> {
    let signature = key.sign_digest(digest)?;
    Ok(SignedDigest {
        signature: hex::encode(signature),
        public_key: key.public_key().to_hex(),
    })
}
