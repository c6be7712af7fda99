use serde::{Deserialize, Serialize};

/// A payment forwarding rule: funds sent to `input_address` are relayed to
/// `destination`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayFwd {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub input_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub process_fees_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_fees_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_fees_satoshis: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_confirmations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mining_fees_satoshis: Option<u64>,
    #[serde(default, rename = "transactions", skip_serializing_if = "Vec::is_empty")]
    pub tx_history: Vec<String>,
}

impl PayFwd {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Default::default()
        }
    }
}

/// Body posted to a forwarding rule's `callback_url` after each relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payback {
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub destination: String,
    #[serde(default, rename = "transaction_hash")]
    pub dest_hash: String,
    #[serde(default)]
    pub input_address: String,
    #[serde(default, rename = "input_transaction_hash")]
    pub input_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_is_minimal() {
        let json = serde_json::to_value(PayFwd::new("15qx9ug952GWGTNn7Uiv6vode4RcGrRemh")).unwrap();
        assert_eq!(json, serde_json::json!({"destination": "15qx9ug952GWGTNn7Uiv6vode4RcGrRemh"}));
    }

    #[test]
    fn decode_payback() {
        let json = r#"{
            "value": 100000000,
            "input_address": "16uKw7GsQSzfMaVTcT7tpFQkd7Rh9qcXWX",
            "destination": "15qx9ug952GWGTNn7Uiv6vode4RcGrRemh",
            "input_transaction_hash": "39bed5d7ce7e5b1b2e5d0f7e6a1c0d8e9f1a2b3c4d5e6f708192a3b4c5d6e7f8",
            "transaction_hash": "1aa6103ec4a4fd2d9cfb1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f60718293a4b5c6"
        }"#;
        let payback: Payback = serde_json::from_str(json).unwrap();
        assert_eq!(payback.value, 100000000);
        assert!(payback.dest_hash.starts_with("1aa6"));
        assert!(payback.input_hash.starts_with("39be"));
    }
}
