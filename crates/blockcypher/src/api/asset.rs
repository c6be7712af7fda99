use crate::client::{require, BlockCypher};
use crate::error::Result;
use crate::query::Query;
use crate::types::{Addr, AddrKeychain, OAPIssue, OAPTX};

impl BlockCypher {
    /// New key pair with both an underlying and an asset (`oap_address`)
    /// address.
    pub fn gen_asset_keychain(&self) -> Result<AddrKeychain> {
        self.post::<(), _>(&["oap", "addrs"], &Query::new(), None)
    }

    pub fn issue_asset(&self, issue: &OAPIssue) -> Result<OAPTX> {
        self.post(&["oap", "issue"], &Query::new(), Some(issue))
    }

    pub fn transfer_asset(&self, issue: &OAPIssue, asset_id: &str) -> Result<OAPTX> {
        let asset_id = require("asset id", asset_id)?;
        self.post(&["oap", asset_id, "transfer"], &Query::new(), Some(issue))
    }

    /// Hashes of every transaction involving the asset.
    pub fn list_asset_txs(&self, asset_id: &str) -> Result<Vec<String>> {
        let asset_id = require("asset id", asset_id)?;
        self.get(&["oap", asset_id, "txs"], &Query::new())
    }

    pub fn get_asset_tx(&self, asset_id: &str, hash: &str) -> Result<OAPTX> {
        let asset_id = require("asset id", asset_id)?;
        let hash = require("transaction hash", hash)?;
        self.get(&["oap", asset_id, "txs", hash], &Query::new())
    }

    pub fn get_asset_addr(&self, asset_id: &str, oap_addr: &str) -> Result<Addr> {
        let asset_id = require("asset id", asset_id)?;
        let oap_addr = require("asset address", oap_addr)?;
        self.get(&["oap", asset_id, "addrs", oap_addr], &Query::new())
    }
}
