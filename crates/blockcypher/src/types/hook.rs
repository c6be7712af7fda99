use serde::{Deserialize, Serialize};

/// Events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    UnconfirmedTx,
    NewBlock,
    ConfirmedTx,
    TxConfirmation,
    DoubleSpendTx,
    TxConfidence,
}

/// A webhook. `id` is assigned by the service on creation; `hash`,
/// `address`, `wallet_name` and `script` narrow which events fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub event: HookEvent,
    /// Callback URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wallet_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// For `tx-confirmation`: stop after this many confirmations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    /// For `tx-confidence`: fire once this confidence is reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_errors: Option<u32>,
}

impl Hook {
    pub fn new(event: HookEvent, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            event,
            url: url.into(),
            hash: String::new(),
            wallet_name: String::new(),
            address: String::new(),
            confirmations: None,
            confidence: None,
            script: String::new(),
            callback_errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        for (event, name) in [
            (HookEvent::UnconfirmedTx, "unconfirmed-tx"),
            (HookEvent::NewBlock, "new-block"),
            (HookEvent::ConfirmedTx, "confirmed-tx"),
            (HookEvent::TxConfirmation, "tx-confirmation"),
            (HookEvent::DoubleSpendTx, "double-spend-tx"),
            (HookEvent::TxConfidence, "tx-confidence"),
        ] {
            assert_eq!(serde_json::to_value(event).unwrap(), name);
        }
    }

    #[test]
    fn new_hook_body() {
        let mut hook = Hook::new(HookEvent::ConfirmedTx, "https://my.domain.com/callbacks/new-tx");
        hook.address = "15qx9ug952GWGTNn7Uiv6vode4RcGrRemh".into();
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "confirmed-tx",
                "url": "https://my.domain.com/callbacks/new-tx",
                "address": "15qx9ug952GWGTNn7Uiv6vode4RcGrRemh"
            })
        );
    }

    #[test]
    fn unknown_event_is_rejected() {
        let err = serde_json::from_str::<Hook>(r#"{"event":"new-wallet","url":"x"}"#);
        assert!(err.is_err());
    }
}
