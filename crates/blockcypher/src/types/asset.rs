use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::redacted;

/// Request to issue new units of an asset, or to transfer existing ones.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAPIssue {
    /// Private key of the issuing (or sending) asset address.
    pub from_private: String,
    pub to_address: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,
}

impl fmt::Debug for OAPIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAPIssue")
            .field("from_private", &redacted(&self.from_private))
            .field("to_address", &self.to_address)
            .field("amount", &self.amount)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// An Open Assets transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAPTX {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<u32>,
    #[serde(default, rename = "assetid", skip_serializing_if = "String::is_empty")]
    pub asset_id: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub oap_meta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_spend: Option<bool>,
    #[serde(default)]
    pub inputs: Vec<OAPInput>,
    #[serde(default)]
    pub outputs: Vec<OAPOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAPInput {
    #[serde(default)]
    pub prev_hash: String,
    #[serde(default)]
    pub output_index: i64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub output_value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAPOutput {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub original_output_index: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_asset_tx() {
        let json = r#"{
            "ver": 1,
            "assetid": "bhZTuuFaW4hDPmfSbcuR4pdbnRJ3FhSkN",
            "hash": "8d8d8c5de0e4fbe6c4b1a2f3e4d5c6b7a8f9e0d1c2b3a4f5e6d7c8b9a0f1e2d3",
            "received": "2016-02-24T01:18:50.858Z",
            "double_spend": false,
            "oap_meta": "I sold my soul for you",
            "inputs": [{"prev_hash": "aa", "output_index": 0, "address": "akXDPMMHHBrUrd1fM756M1GSB8viVAwMyBk", "output_value": 5000}],
            "outputs": [{"address": "akV6ibbyZvFrSVeCcyUxuhmGN76GEMgY9bK", "value": 100, "original_output_index": 0}]
        }"#;
        let tx: OAPTX = serde_json::from_str(json).unwrap();
        assert_eq!(tx.asset_id, "bhZTuuFaW4hDPmfSbcuR4pdbnRJ3FhSkN");
        assert_eq!(tx.outputs[0].value, 100);
        assert!(tx.confirmed.is_none());
    }

    #[test]
    fn issue_debug_hides_key() {
        let issue = OAPIssue {
            from_private: "5a4b3c".into(),
            to_address: "akV6".into(),
            amount: 100,
            metadata: String::new(),
        };
        assert!(!format!("{issue:?}").contains("5a4b3c"));
        assert!(serde_json::to_value(&issue).unwrap().get("metadata").is_none());
    }
}
