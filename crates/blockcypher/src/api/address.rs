use serde::{Deserialize, Serialize};

use crate::client::{require, BlockCypher};
use crate::error::{Error, Result};
use crate::query::{AddrParams, Query};
use crate::types::{Addr, AddrKeychain};

/// Most the faucet will send in one call, in the smallest unit.
pub const FAUCET_MAX_AMOUNT: u64 = 10_000_000;

#[derive(Serialize)]
struct FaucetRequest<'a> {
    address: &'a str,
    amount: u64,
}

#[derive(Deserialize)]
struct FaucetReply {
    #[serde(default)]
    tx_ref: String,
}

impl BlockCypher {
    /// Balances only, no history.
    pub fn get_addr_bal(&self, addr: &str, params: &AddrParams) -> Result<Addr> {
        let addr = require("address", addr)?;
        self.get(&["addrs", addr, "balance"], &params.to_query())
    }

    /// Balances plus one page of transaction references.
    pub fn get_addr(&self, addr: &str, params: &AddrParams) -> Result<Addr> {
        let addr = require("address", addr)?;
        self.get(&["addrs", addr], &params.to_query())
    }

    /// The page of transaction references older than `this`.
    ///
    /// `before` is taken from the last reference in `this`; any `before`
    /// in `params` is replaced.
    pub fn get_addr_next(&self, this: &Addr, params: &AddrParams) -> Result<Addr> {
        let before = next_before(this, this.next_txrefs_before())?;
        let params = AddrParams {
            before: Some(before),
            ..params.clone()
        };
        self.get_addr(&this.address, &params)
    }

    /// Balances plus one page of full transactions.
    pub fn get_addr_full(&self, addr: &str, params: &AddrParams) -> Result<Addr> {
        let addr = require("address", addr)?;
        self.get(&["addrs", addr, "full"], &params.to_query())
    }

    /// The page of full transactions older than `this`.
    pub fn get_addr_full_next(&self, this: &Addr, params: &AddrParams) -> Result<Addr> {
        let before = next_before(this, this.next_txs_before())?;
        let params = AddrParams {
            before: Some(before),
            ..params.clone()
        };
        self.get_addr_full(&this.address, &params)
    }

    /// New key pair and address on the configured chain.
    pub fn gen_addr_keychain(&self) -> Result<AddrKeychain> {
        self.post::<(), _>(&["addrs"], &Query::new(), None)
    }

    /// New multisig address from `keychain.pubkeys` and
    /// `keychain.script_type`.
    pub fn gen_addr_multisig(&self, keychain: &AddrKeychain) -> Result<AddrKeychain> {
        if keychain.pubkeys.is_empty() {
            return Err(Error::InvalidRequest(
                "multisig address needs public keys".into(),
            ));
        }
        if keychain.script_type.is_empty() {
            return Err(Error::InvalidRequest(
                "multisig address needs a script type".into(),
            ));
        }
        self.post(&["addrs"], &Query::new(), Some(keychain))
    }

    /// Fund `address` from the test faucet. Returns the funding transaction
    /// hash.
    ///
    /// Only available on `bcy/test` and `btc/test3`, for at most
    /// [`FAUCET_MAX_AMOUNT`].
    pub fn faucet(&self, address: &str, amount: u64) -> Result<String> {
        if !self.context().is_faucet_network() {
            return Err(Error::InvalidRequest(format!(
                "faucet is only available on bcy/test and btc/test3, not {}/{}",
                self.context().coin(),
                self.context().chain()
            )));
        }
        if amount > FAUCET_MAX_AMOUNT {
            return Err(Error::InvalidRequest(format!(
                "faucet sends at most {FAUCET_MAX_AMOUNT} per call, asked for {amount}"
            )));
        }
        let address = require("address", address)?;
        let reply: FaucetReply = self.post(
            &["faucet"],
            &Query::new(),
            Some(&FaucetRequest { address, amount }),
        )?;
        Ok(reply.tx_ref)
    }
}

fn next_before(this: &Addr, last_height: Option<i64>) -> Result<i64> {
    if !this.has_more {
        return Err(Error::NoMorePages(format!(
            "address {} has no more transactions",
            this.address
        )));
    }
    last_height.ok_or_else(|| {
        Error::NoMorePages(format!(
            "address {} page carried no transactions to page from",
            this.address
        ))
    })
}
