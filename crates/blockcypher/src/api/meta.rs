use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::client::{require, BlockCypher};
use crate::error::{Error, Result};
use crate::query::Query;

/// What a piece of metadata is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKind {
    Addr,
    Tx,
    Block,
}

impl MetaKind {
    fn collection(self) -> &'static str {
        match self {
            MetaKind::Addr => "addrs",
            MetaKind::Tx => "txs",
            MetaKind::Block => "blocks",
        }
    }
}

impl fmt::Display for MetaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetaKind::Addr => "addr",
            MetaKind::Tx => "tx",
            MetaKind::Block => "block",
        })
    }
}

impl FromStr for MetaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "addr" | "address" => Ok(MetaKind::Addr),
            "tx" | "transaction" => Ok(MetaKind::Tx),
            "block" => Ok(MetaKind::Block),
            other => Err(Error::InvalidMetaKind(other.to_string())),
        }
    }
}

impl BlockCypher {
    /// Metadata on an address, transaction or block. `private` selects the
    /// token's own metadata instead of the public set.
    pub fn get_meta(&self, hash: &str, kind: &str, private: bool) -> Result<BTreeMap<String, String>> {
        let kind: MetaKind = kind.parse()?;
        let hash = require("hash", hash)?;
        let query = Query::new().with("private", private);
        // 204 when nothing has been stored yet.
        let meta: Option<BTreeMap<String, String>> =
            self.get(&[kind.collection(), hash, "meta"], &query)?;
        Ok(meta.unwrap_or_default())
    }

    /// Store key/value metadata. Keys already present are overwritten.
    pub fn put_meta(
        &self,
        hash: &str,
        kind: &str,
        private: bool,
        meta: &BTreeMap<String, String>,
    ) -> Result<()> {
        let kind: MetaKind = kind.parse()?;
        let hash = require("hash", hash)?;
        let query = Query::new().with("private", private);
        self.put(&[kind.collection(), hash, "meta"], &query, meta)
    }

    /// Remove the token's private metadata.
    pub fn delete_meta(&self, hash: &str, kind: &str) -> Result<()> {
        let kind: MetaKind = kind.parse()?;
        let hash = require("hash", hash)?;
        self.delete(&[kind.collection(), hash, "meta"], &Query::new())
    }
}
