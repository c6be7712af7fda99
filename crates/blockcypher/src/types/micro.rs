use std::fmt;

use bcy_signer::{sign_digests, PrivateKey, PublicKey, SignError};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which key the funds come from, and so who signs.
///
/// With a public key the service returns digests for the caller to sign;
/// with a private key or WIF the service signs on the caller's behalf.
#[derive(Clone, PartialEq, Eq)]
pub enum MicroSource {
    PublicKey(String),
    PrivateKey(String),
    Wif(String),
}

impl fmt::Debug for MicroSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicroSource::PublicKey(key) => f.debug_tuple("PublicKey").field(key).finish(),
            MicroSource::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            MicroSource::Wif(_) => f.write_str("Wif(<redacted>)"),
        }
    }
}

/// A small-value transaction from a single key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MicroTXWire", into = "MicroTXWire")]
pub struct MicroTX {
    pub source: MicroSource,
    pub to_address: String,
    pub change_address: String,
    /// Amount in the smallest unit.
    pub value: u64,
    pub wait_guarantee: Option<bool>,
    pub to_sign: Vec<String>,
    pub signatures: Vec<String>,
    pub inputs: Vec<MicroInput>,
    pub outputs: Vec<MicroOutput>,
    pub fees: Option<u64>,
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroInput {
    #[serde(default)]
    pub prev_hash: String,
    #[serde(default)]
    pub output_index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroOutput {
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub address: String,
}

impl MicroTX {
    pub fn new(source: MicroSource, to_address: impl Into<String>, value: u64) -> Self {
        Self {
            source,
            to_address: to_address.into(),
            change_address: String::new(),
            value,
            wait_guarantee: None,
            to_sign: Vec::new(),
            signatures: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            fees: None,
            hash: String::new(),
        }
    }

    /// Sign the returned digests with the key behind the public-key source.
    ///
    /// The key's public key must equal the source, otherwise nothing is
    /// signed. Only public-key micro transactions are signed locally.
    pub fn sign(&mut self, private_key: &str) -> Result<()> {
        let MicroSource::PublicKey(expected) = &self.source else {
            return Err(Error::InvalidRequest(
                "only a public-key micro transaction is signed locally".into(),
            ));
        };
        if self.to_sign.is_empty() {
            return Err(Error::InvalidRequest("micro transaction has nothing to sign".into()));
        }

        let derived = PrivateKey::parse(private_key)?.public_key();
        if derived != PublicKey::from_hex(expected)? {
            return Err(SignError::PublicKeyMismatch { index: 0 }.into());
        }

        let keys = vec![private_key; self.to_sign.len()];
        let signed = sign_digests(&keys, &self.to_sign)?;
        self.signatures
            .extend(signed.into_iter().map(|s| s.signature));
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct MicroTXWire {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    from_pubkey: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    from_private: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    from_wif: String,
    #[serde(default)]
    to_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    change_address: String,
    #[serde(default)]
    value_satoshis: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wait_guarantee: Option<bool>,
    #[serde(default, rename = "tosign", skip_serializing_if = "Vec::is_empty")]
    to_sign: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    signatures: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inputs: Vec<MicroInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outputs: Vec<MicroOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fees: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    hash: String,
}

impl TryFrom<MicroTXWire> for MicroTX {
    type Error = String;

    fn try_from(w: MicroTXWire) -> std::result::Result<Self, String> {
        // A reply may echo several; the public key wins.
        let source = if !w.from_pubkey.is_empty() {
            MicroSource::PublicKey(w.from_pubkey)
        } else if !w.from_private.is_empty() {
            MicroSource::PrivateKey(w.from_private)
        } else if !w.from_wif.is_empty() {
            MicroSource::Wif(w.from_wif)
        } else {
            return Err("micro transaction has none of from_pubkey, from_private, from_wif".into());
        };
        Ok(Self {
            source,
            to_address: w.to_address,
            change_address: w.change_address,
            value: w.value_satoshis,
            wait_guarantee: w.wait_guarantee,
            to_sign: w.to_sign,
            signatures: w.signatures,
            inputs: w.inputs,
            outputs: w.outputs,
            fees: w.fees,
            hash: w.hash,
        })
    }
}

impl From<MicroTX> for MicroTXWire {
    fn from(m: MicroTX) -> Self {
        let (from_pubkey, from_private, from_wif) = match m.source {
            MicroSource::PublicKey(k) => (k, String::new(), String::new()),
            MicroSource::PrivateKey(k) => (String::new(), k, String::new()),
            MicroSource::Wif(k) => (String::new(), String::new(), k),
        };
        Self {
            from_pubkey,
            from_private,
            from_wif,
            to_address: m.to_address,
            change_address: m.change_address,
            value_satoshis: m.value,
            wait_guarantee: m.wait_guarantee,
            to_sign: m.to_sign,
            signatures: m.signatures,
            inputs: m.inputs,
            outputs: m.outputs,
            fees: m.fees,
            hash: m.hash,
        }
    }
}
