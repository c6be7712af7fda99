use crate::client::{require, BlockCypher};
use crate::error::{Error, Result};
use crate::query::{BlockParams, Query};
use crate::types::{Block, Blockchain};

impl BlockCypher {
    /// Current state of the configured coin/chain.
    pub fn get_chain(&self) -> Result<Blockchain> {
        self.get(&[], &Query::new())
    }

    /// Fetch a block by height or by hash, never both.
    pub fn get_block(
        &self,
        height: Option<u64>,
        hash: Option<&str>,
        params: &BlockParams,
    ) -> Result<Block> {
        let hash = hash.map(|h| require("block hash", h)).transpose()?;
        let id = match (height, hash) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidRequest(
                    "block lookup takes a height or a hash, not both".into(),
                ))
            }
            (None, None) => {
                return Err(Error::InvalidRequest(
                    "block lookup needs a height or a hash".into(),
                ))
            }
            (Some(height), None) => height.to_string(),
            (None, Some(hash)) => hash.to_string(),
        };
        self.get(&["blocks", id.as_str()], &params.to_query())
    }

    /// The page of transaction ids after `this`.
    pub fn get_block_next_txs(&self, this: &Block) -> Result<Block> {
        if !this.has_more_txs() {
            return Err(Error::NoMorePages(format!(
                "block {} has no more transactions",
                this.hash
            )));
        }
        let params = BlockParams::from_next_url(&this.next_txids)?;
        let hash = require("block hash", &this.hash)?;
        self.get_block(None, Some(hash), &params)
    }
}
