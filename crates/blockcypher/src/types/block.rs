use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a coin/chain as seen by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockchain {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub latest_url: String,
    #[serde(default, rename = "previous_hash", skip_serializing_if = "String::is_empty")]
    pub prev_hash: String,
    #[serde(default, rename = "previous_url", skip_serializing_if = "String::is_empty")]
    pub prev_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_count: Option<u64>,
    #[serde(default, rename = "high_fee_per_kb", skip_serializing_if = "Option::is_none")]
    pub high_fee: Option<u64>,
    #[serde(default, rename = "medium_fee_per_kb", skip_serializing_if = "Option::is_none")]
    pub medium_fee: Option<u64>,
    #[serde(default, rename = "low_fee_per_kb", skip_serializing_if = "Option::is_none")]
    pub low_fee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unconfirmed_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fork_height: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_fork_hash: String,
}

/// A block, with one page of its transaction ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub relayed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, rename = "n_tx", skip_serializing_if = "Option::is_none")]
    pub num_tx: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prev_block: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prev_block_url: String,
    #[serde(default, rename = "mrkl_root", skip_serializing_if = "String::is_empty")]
    pub merkle_root: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub txids: Vec<String>,
    /// URL of the next page of `txids`; empty on the last page.
    #[serde(default, rename = "next_txids", skip_serializing_if = "String::is_empty")]
    pub next_txids: String,
}

impl Block {
    /// Whether another page of transaction ids can be requested.
    pub fn has_more_txs(&self) -> bool {
        !self.next_txids.is_empty() && !self.txids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_chain() {
        let json = r#"{
            "name": "BTC.main",
            "height": 360060,
            "hash": "000000000000000000bf56ff4a81e399374a68344a64d6681039412de78366b8",
            "time": "2015-06-08T22:57:08.260165627Z",
            "latest_url": "https://api.blockcypher.com/v1/btc/main/blocks/000000000000000000bf56ff4a81e399374a68344a64d6681039412de78366b8",
            "previous_hash": "000000000000000011c9511ae1265d34d3c16fff6e8f94380425833b3d0ae5d8",
            "peer_count": 239,
            "unconfirmed_count": 617,
            "high_fee_per_kb": 46086,
            "medium_fee_per_kb": 29422,
            "low_fee_per_kb": 12045,
            "last_fork_height": 359865,
            "last_fork_hash": "00000000000000000aa6462fd9faf94712ce1b5a944dc666f491101c996beab9"
        }"#;
        let chain: Blockchain = serde_json::from_str(json).unwrap();
        assert_eq!(chain.name, "BTC.main");
        assert_eq!(chain.height, 360060);
        assert_eq!(chain.high_fee, Some(46086));
        assert!(chain.time.is_some());
        assert!(chain.prev_url.is_empty());
    }

    #[test]
    fn decode_block_page() {
        let json = r#"{
            "hash": "0000000000000000189bba3564a63772107b5673c940c16f12662b3e8546b412",
            "height": 294322,
            "chain": "BTC.main",
            "total": 1146652915,
            "fees": 130999,
            "n_tx": 10,
            "txids": ["32b3b86e40d996b1f4a9d8a3c1ff61c8a7ba7bfcf3e1b3c3f5e1c7b7e1b9a1c3"],
            "next_txids": "https://api.blockcypher.com/v1/btc/main/blocks/0000000000000000189bba3564a63772107b5673c940c16f12662b3e8546b412?txstart=1&limit=1",
            "mrkl_root": "359d624d37aee1efa5662b7f5dbc390e996d561afc8148e8d716cf6ad765a952"
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.num_tx, Some(10));
        assert_eq!(block.txids.len(), 1);
        assert!(block.has_more_txs());
        assert_eq!(block.depth, None);
    }

    #[test]
    fn last_page_has_no_more() {
        let block = Block {
            txids: vec!["a".into()],
            ..Default::default()
        };
        assert!(!block.has_more_txs());
    }
}
