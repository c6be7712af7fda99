use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tx::TX;
use super::wallet::{HDWallet, Wallet};

/// An address (or a wallet queried as one) with its balances and one page
/// of history.
///
/// Plain lookups fill `txrefs`/`unconfirmed_txrefs`; the `/full` endpoint
/// fills `txs` instead. `has_more` tells whether an older page exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Addr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_wallet: Option<HDWallet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_received: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unconfirmed_balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_balance: Option<i64>,
    #[serde(default, rename = "n_tx", skip_serializing_if = "Option::is_none")]
    pub num_tx: Option<u64>,
    #[serde(default, rename = "unconfirmed_n_tx", skip_serializing_if = "Option::is_none")]
    pub unconfirmed_num_tx: Option<u64>,
    #[serde(default, rename = "final_n_tx", skip_serializing_if = "Option::is_none")]
    pub final_num_tx: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tx_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub txs: Vec<TX>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub txrefs: Vec<TXRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unconfirmed_txrefs: Vec<TXRef>,
    #[serde(default, rename = "hasMore", skip_serializing_if = "std::ops::Not::not")]
    pub has_more: bool,
}

impl Addr {
    /// `before` height for the next page of `txrefs`.
    pub fn next_txrefs_before(&self) -> Option<i64> {
        self.txrefs.last().and_then(|r| r.block_height)
    }

    /// `before` height for the next page of full `txs`.
    pub fn next_txs_before(&self) -> Option<i64> {
        self.txs.last().and_then(|t| t.block_height)
    }
}

/// One input or output of a transaction, as seen from an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TXRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// `-1` while unconfirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<i64>,
    #[serde(default)]
    pub tx_hash: String,
    /// `-1` when this reference is an output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_input_n: Option<i64>,
    /// `-1` when this reference is an input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_output_n: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, rename = "preference", skip_serializing_if = "String::is_empty")]
    pub pref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spent_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_spend: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub double_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_count: Option<u64>,
}

/// A generated address and its keys, or the request for a multisig
/// address (`pubkeys` + `script_type`).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddrKeychain {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wif: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pubkeys: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub oap_address: String,
}

impl AddrKeychain {
    /// Request body for an `n`-of-`pubkeys.len()` multisig address.
    pub fn multisig(n: usize, pubkeys: Vec<String>) -> Self {
        Self {
            script_type: format!("multisig-{}-of-{}", n, pubkeys.len()),
            pubkeys,
            ..Default::default()
        }
    }
}

impl fmt::Debug for AddrKeychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddrKeychain")
            .field("address", &self.address)
            .field("private", &redacted(&self.private))
            .field("public", &self.public)
            .field("wif", &redacted(&self.wif))
            .field("pubkeys", &self.pubkeys)
            .field("script_type", &self.script_type)
            .field("original_address", &self.original_address)
            .field("oap_address", &self.oap_address)
            .finish()
    }
}

pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
