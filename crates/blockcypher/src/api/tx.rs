use serde::Serialize;

use crate::client::{require, BlockCypher};
use crate::error::Result;
use crate::query::{Query, TxParams};
use crate::types::{NullData, TXSkel, TxConfidence, TX};

#[derive(Serialize)]
struct RawTx<'a> {
    tx: &'a str,
}

impl BlockCypher {
    /// Transactions waiting in the service's mempool.
    pub fn get_unconfirmed_txs(&self) -> Result<Vec<TX>> {
        self.get(&["txs"], &Query::new())
    }

    pub fn get_tx(&self, hash: &str, params: &TxParams) -> Result<TX> {
        let hash = require("transaction hash", hash)?;
        self.get(&["txs", hash], &params.to_query())
    }

    pub fn get_tx_conf(&self, hash: &str) -> Result<TxConfidence> {
        let hash = require("transaction hash", hash)?;
        self.get(&["txs", hash, "confidence"], &Query::new())
    }

    /// Ask the service to complete `tx` into a skeleton with digests to sign.
    ///
    /// With `verify`, the raw data behind each digest comes back in
    /// `to_sign_tx` so it can be checked before signing.
    pub fn new_tx(&self, tx: &TX, verify: bool) -> Result<TXSkel> {
        let mut query = Query::new();
        if verify {
            query.set("includeToSignTx", true);
        }
        self.post(&["txs", "new"], &query, Some(tx))
    }

    /// Submit a signed skeleton for broadcast.
    pub fn send_tx(&self, skel: &TXSkel) -> Result<TXSkel> {
        self.post(&["txs", "send"], &Query::new(), Some(skel))
    }

    /// Broadcast a raw, fully signed transaction.
    pub fn push_tx(&self, hex: &str) -> Result<TXSkel> {
        let tx = require("transaction hex", hex)?;
        self.post(&["txs", "push"], &Query::new(), Some(&RawTx { tx }))
    }

    /// Decode a raw transaction without broadcasting it.
    pub fn decode_tx(&self, hex: &str) -> Result<TX> {
        let tx = require("transaction hex", hex)?;
        self.post(&["txs", "decode"], &Query::new(), Some(&RawTx { tx }))
    }

    /// Embed data in an `OP_RETURN` output paid for by the token's account.
    pub fn send_null_data(&self, data: &NullData) -> Result<NullData> {
        require("null data", &data.data)?;
        self.post(&["txs", "data"], &Query::new(), Some(data))
    }
}
