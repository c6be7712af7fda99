use bcy_signer::{sign_digests, sign_digests_verified, verify_digest, SignError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A transaction, either as reported by the service or as a partial
/// request for `txs/new`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TX {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    /// `-1` while unconfirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, rename = "preference", skip_serializing_if = "String::is_empty")]
    pub pref: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub relayed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_spend: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub double_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_count: Option<u64>,
    #[serde(default, rename = "vin_sz", skip_serializing_if = "Option::is_none")]
    pub vin_size: Option<u64>,
    #[serde(default, rename = "vout_sz", skip_serializing_if = "Option::is_none")]
    pub vout_size: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub change_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_inputs: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_outputs: String,
    #[serde(default)]
    pub inputs: Vec<TXInput>,
    #[serde(default)]
    pub outputs: Vec<TXOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TXInput {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prev_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_value: Option<u64>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wallet_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wallet_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TXOutput {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spent_by: String,
    /// Smallest unit. `-1` in a request sweeps every input into this output.
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_hex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_string: String,
}

impl TX {
    /// One input from `in_addr`, one output of `amount` to `out_addr`.
    pub fn skeleton(in_addr: &str, out_addr: &str, amount: i64) -> Self {
        Self {
            inputs: vec![TXInput {
                addresses: vec![in_addr.to_string()],
                ..Default::default()
            }],
            outputs: vec![TXOutput {
                addresses: vec![out_addr.to_string()],
                value: amount,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Skeleton that funds (`in_addr` set) or spends from (`out_addr` set)
    /// an `n`-of-`pubkeys.len()` multisig script.
    ///
    /// Exactly one of `in_addr`/`out_addr` must be non-empty; the other side
    /// carries the public keys and the `multisig-n-of-m` script type.
    pub fn multisig_skeleton(
        in_addr: &str,
        out_addr: &str,
        amount: i64,
        n: usize,
        pubkeys: &[String],
    ) -> Result<Self> {
        let m = pubkeys.len();
        if !in_addr.is_empty() && !out_addr.is_empty() {
            return Err(Error::InvalidRequest(
                "multisig skeleton takes an input address or an output address, not both".into(),
            ));
        }
        if in_addr.is_empty() && out_addr.is_empty() {
            return Err(Error::InvalidRequest(
                "multisig skeleton needs an input address or an output address".into(),
            ));
        }
        if m == 0 {
            return Err(Error::InvalidRequest(
                "multisig skeleton needs at least one public key".into(),
            ));
        }
        if n == 0 || n > m {
            return Err(Error::InvalidRequest(format!(
                "required signatures ({n}) must be between 1 and the number of public keys ({m})"
            )));
        }

        let script_type = format!("multisig-{n}-of-{m}");
        let (input, output) = if !in_addr.is_empty() {
            (
                TXInput {
                    addresses: vec![in_addr.to_string()],
                    ..Default::default()
                },
                TXOutput {
                    addresses: pubkeys.to_vec(),
                    script_type,
                    value: amount,
                    ..Default::default()
                },
            )
        } else {
            (
                TXInput {
                    addresses: pubkeys.to_vec(),
                    script_type,
                    ..Default::default()
                },
                TXOutput {
                    addresses: vec![out_addr.to_string()],
                    value: amount,
                    ..Default::default()
                },
            )
        };

        Ok(Self {
            inputs: vec![input],
            outputs: vec![output],
            ..Default::default()
        })
    }

    /// Restrict `txs/new` to inputs with at least one confirmation.
    pub fn confirmed_only(mut self) -> Self {
        self.confirmations = Some(1);
        self
    }
}

/// Confidence that an unconfirmed transaction will make it into a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxConfidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_count: Option<u64>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub txhash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkelError {
    #[serde(default)]
    pub error: String,
}

/// A transaction under construction: the service's proposed `tx` plus the
/// digests that must be signed before it can be sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TXSkel {
    #[serde(default)]
    pub tx: TX,
    #[serde(default, rename = "tosign")]
    pub to_sign: Vec<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    /// Left empty when the signing keys already live in a multisig script.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pubkeys: Vec<String>,
    /// Raw data behind each digest, present when verification was requested.
    #[serde(default, rename = "tosign_tx", skip_serializing_if = "Vec::is_empty")]
    pub to_sign_tx: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SkelError>,
}

impl TXSkel {
    /// Sign every digest, appending signatures and compressed public keys.
    ///
    /// `private_keys` must line up with `to_sign`, so a key spending two
    /// inputs is passed twice. Nothing is appended on error.
    pub fn sign<K: AsRef<str>>(&mut self, private_keys: &[K]) -> Result<()> {
        let signed = sign_digests(private_keys, &self.to_sign)?;
        for s in signed {
            self.signatures.push(s.signature);
            self.pubkeys.push(s.public_key);
        }
        Ok(())
    }

    /// Like [`TXSkel::sign`], but each key's public key must match the one
    /// supplied at the same index.
    pub fn sign_checked<K, P>(&mut self, private_keys: &[K], public_keys: &[P]) -> Result<()>
    where
        K: AsRef<str>,
        P: AsRef<str>,
    {
        let signed = sign_digests_verified(private_keys, public_keys, &self.to_sign)?;
        for s in signed {
            self.signatures.push(s.signature);
            self.pubkeys.push(s.public_key);
        }
        Ok(())
    }

    /// Sign for a multisig input: signatures only, the public keys are
    /// already in the script.
    pub fn sign_multisig<K: AsRef<str>>(&mut self, private_keys: &[K]) -> Result<()> {
        let signed = sign_digests(private_keys, &self.to_sign)?;
        self.signatures
            .extend(signed.into_iter().map(|s| s.signature));
        Ok(())
    }

    /// Check every collected signature against its digest and public key.
    ///
    /// A skeleton signed with [`TXSkel::sign_multisig`] carries no public
    /// keys of its own; each signature is then checked against the keys in
    /// the `multisig-*` inputs of `tx`.
    pub fn verify_signatures(&self) -> Result<()> {
        if self.pubkeys.is_empty() && !self.signatures.is_empty() {
            let script_keys = self.multisig_script_keys();
            if script_keys.is_empty() {
                return Err(Error::InvalidRequest(
                    "no public keys and no multisig input to verify against".into(),
                ));
            }
            return self.verify_multisig(&script_keys);
        }
        self.check_signature_count()?;
        if self.pubkeys.len() != self.signatures.len() {
            return Err(Error::InvalidRequest(format!(
                "{} public keys for {} signatures",
                self.pubkeys.len(),
                self.signatures.len()
            )));
        }
        for ((digest, signature), pubkey) in
            self.to_sign.iter().zip(&self.signatures).zip(&self.pubkeys)
        {
            verify_digest(pubkey, digest, signature)?;
        }
        Ok(())
    }

    /// Check every signature against its digest, accepting any of
    /// `script_keys` as the signer.
    pub fn verify_multisig<P: AsRef<str>>(&self, script_keys: &[P]) -> Result<()> {
        self.check_signature_count()?;
        for (index, (digest, signature)) in self.to_sign.iter().zip(&self.signatures).enumerate() {
            let signed_by_script_key = script_keys
                .iter()
                .any(|key| verify_digest(key.as_ref(), digest, signature).is_ok());
            if !signed_by_script_key {
                return Err(SignError::InvalidSignature(format!(
                    "signature {index} matches none of the multisig keys"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Public keys listed on `multisig-*` inputs.
    fn multisig_script_keys(&self) -> Vec<&str> {
        self.tx
            .inputs
            .iter()
            .filter(|input| input.script_type.starts_with("multisig"))
            .flat_map(|input| input.addresses.iter().map(String::as_str))
            .collect()
    }

    fn check_signature_count(&self) -> Result<()> {
        if self.signatures.len() != self.to_sign.len() {
            return Err(Error::InvalidRequest(format!(
                "{} signatures for {} digests",
                self.signatures.len(),
                self.to_sign.len()
            )));
        }
        Ok(())
    }

    /// Messages the service attached to the skeleton, if any.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .map(|e| e.error.as_str())
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// Arbitrary data to embed in an `OP_RETURN` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullData {
    #[serde(default)]
    pub data: String,
    /// `"string"` or `"hex"`; the service defaults to hex.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encoding: String,
    /// Hash of the resulting transaction, filled in by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const KEY_TWO_PUB: &str = "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";
    const DIGEST: &str = "c9a2c0b6a8a6e7d6b6f7e7d5a3b5f8c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7";

    fn pubkeys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("02{i:064x}")).collect()
    }

    #[test]
    fn skeleton_shape() {
        let tx = TX::skeleton("CEztKBAYNoUEEaPYbkyFeXC5v8Jz9RoZH9", "C1rGdt7QEPGiwPMFhNKNhHmyoWpa5X92pn", 45000);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["inputs"][0]["addresses"][0], "CEztKBAYNoUEEaPYbkyFeXC5v8Jz9RoZH9");
        assert_eq!(json["outputs"][0]["addresses"][0], "C1rGdt7QEPGiwPMFhNKNhHmyoWpa5X92pn");
        assert_eq!(json["outputs"][0]["value"], 45000);
        assert!(json.get("hash").is_none());
        assert!(json.get("confirmations").is_none());
    }

    #[test]
    fn confirmed_only_requests_one_confirmation() {
        let tx = TX::skeleton("a", "b", 10).confirmed_only();
        assert_eq!(serde_json::to_value(&tx).unwrap()["confirmations"], 1);

        let multi = TX::multisig_skeleton("in", "", 10, 1, &pubkeys(1))
            .unwrap()
            .confirmed_only();
        assert_eq!(multi.confirmations, Some(1));
        assert_eq!(multi.outputs[0].script_type, "multisig-1-of-1");
    }

    #[test]
    fn sweep_value_is_serialized() {
        let tx = TX::skeleton("a", "b", -1);
        assert_eq!(serde_json::to_value(&tx).unwrap()["outputs"][0]["value"], -1);
    }

    #[test]
    fn multisig_funding_puts_keys_on_output() {
        let keys = pubkeys(3);
        let tx = TX::multisig_skeleton("in", "", 1000, 2, &keys).unwrap();
        assert_eq!(tx.inputs[0].addresses, vec!["in".to_string()]);
        assert_eq!(tx.outputs[0].addresses, keys);
        assert_eq!(tx.outputs[0].script_type, "multisig-2-of-3");
        assert!(tx.inputs[0].script_type.is_empty());
    }

    #[test]
    fn multisig_spend_puts_keys_on_input() {
        let keys = pubkeys(3);
        let tx = TX::multisig_skeleton("", "out", 1000, 3, &keys).unwrap();
        assert_eq!(tx.inputs[0].addresses, keys);
        assert_eq!(tx.inputs[0].script_type, "multisig-3-of-3");
        assert_eq!(tx.outputs[0].addresses, vec!["out".to_string()]);
        assert_eq!(tx.outputs[0].value, 1000);
    }

    #[test]
    fn multisig_rejects_bad_shapes() {
        let keys = pubkeys(2);
        for (in_addr, out_addr, n, keys) in [
            ("in", "out", 1, &keys[..]),
            ("", "", 1, &keys[..]),
            ("in", "", 3, &keys[..]),
            ("in", "", 0, &keys[..]),
            ("in", "", 1, &[][..]),
        ] {
            let err = TX::multisig_skeleton(in_addr, out_addr, 1, n, keys).unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "{in_addr}/{out_addr}/{n}");
        }
    }

    #[test]
    fn sign_then_verify() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into(), DIGEST.into()],
            ..Default::default()
        };
        skel.sign(&[KEY_ONE, KEY_ONE]).unwrap();
        assert_eq!(skel.signatures.len(), 2);
        assert_eq!(skel.pubkeys, vec![G_COMPRESSED.to_string(); 2]);
        skel.verify_signatures().unwrap();
    }

    #[test]
    fn sign_count_mismatch_appends_nothing() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into(), DIGEST.into()],
            ..Default::default()
        };
        let err = skel.sign(&[KEY_ONE]).unwrap_err();
        assert!(matches!(
            err,
            Error::Signing(SignError::KeyCountMismatch { keys: 1, digests: 2 })
        ));
        assert!(skel.signatures.is_empty());
        assert!(skel.pubkeys.is_empty());
    }

    #[test]
    fn sign_checked_rejects_wrong_pubkey() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into()],
            ..Default::default()
        };
        let err = skel.sign_checked(&[KEY_ONE], &[KEY_TWO_PUB]).unwrap_err();
        assert!(matches!(
            err,
            Error::Signing(SignError::PublicKeyMismatch { index: 0 })
        ));
        assert!(skel.signatures.is_empty());

        skel.sign_checked(&[KEY_ONE], &[G_COMPRESSED]).unwrap();
        assert_eq!(skel.signatures.len(), 1);
    }

    #[test]
    fn sign_multisig_leaves_pubkeys_alone() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into()],
            ..Default::default()
        };
        skel.sign_multisig(&[KEY_ONE]).unwrap();
        assert_eq!(skel.signatures.len(), 1);
        assert!(skel.pubkeys.is_empty());
        assert!(serde_json::to_value(&skel).unwrap().get("pubkeys").is_none());
    }

    fn multisig_spend_skeleton() -> TXSkel {
        let keys = vec![G_COMPRESSED.to_string(), KEY_TWO_PUB.to_string()];
        TXSkel {
            tx: TX::multisig_skeleton("", "out", 1000, 1, &keys).unwrap(),
            to_sign: vec![DIGEST.into()],
            ..Default::default()
        }
    }

    #[test]
    fn multisig_signatures_verify_against_script_keys() {
        let mut skel = multisig_spend_skeleton();
        skel.sign_multisig(&[KEY_ONE]).unwrap();
        skel.verify_signatures().unwrap();
        skel.verify_multisig(&[G_COMPRESSED]).unwrap();
    }

    #[test]
    fn multisig_signature_from_outside_key_is_rejected() {
        let mut skel = multisig_spend_skeleton();
        skel.tx.inputs[0].addresses = vec![KEY_TWO_PUB.to_string()];
        skel.sign_multisig(&[KEY_ONE]).unwrap();
        assert!(matches!(
            skel.verify_signatures(),
            Err(Error::Signing(SignError::InvalidSignature(_)))
        ));
    }

    #[test]
    fn keyless_skeleton_without_multisig_input_cannot_verify() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into()],
            ..Default::default()
        };
        skel.sign_multisig(&[KEY_ONE]).unwrap();
        assert!(matches!(skel.verify_signatures(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn verify_catches_tampered_signature() {
        let mut skel = TXSkel {
            to_sign: vec![DIGEST.into()],
            ..Default::default()
        };
        skel.sign(&[KEY_ONE]).unwrap();
        skel.to_sign[0] = "00".repeat(32);
        assert!(matches!(skel.verify_signatures(), Err(Error::Signing(_))));
    }

    #[test]
    fn decode_skeleton_with_errors() {
        let json = r#"{
            "tx": {"inputs": [], "outputs": [{"value": 1, "addresses": ["x"]}], "fees": 5600},
            "tosign": ["aa"],
            "errors": [{"error": "Not enough funds"}, {"error": ""}]
        }"#;
        let skel: TXSkel = serde_json::from_str(json).unwrap();
        assert_eq!(skel.tx.fees, Some(5600));
        assert_eq!(skel.to_sign, vec!["aa".to_string()]);
        assert!(skel.signatures.is_empty());
        assert_eq!(skel.error_messages(), vec!["Not enough funds"]);
    }

    #[test]
    fn decode_confidence() {
        let json = r#"{"age_millis": 12725, "receive_count": 711, "confidence": 0.9901, "txhash": "43fa95"}"#;
        let conf: TxConfidence = serde_json::from_str(json).unwrap();
        assert_eq!(conf.age_millis, Some(12725));
        assert!((conf.confidence - 0.9901).abs() < f64::EPSILON);
    }
}
