use crate::client::{require, BlockCypher};
use crate::error::Result;
use crate::query::{DeriveParams, Query, WalletAddrParams};
use crate::types::{HDWallet, WalletNames};

impl BlockCypher {
    pub fn create_hd_wallet(&self, wallet: &HDWallet) -> Result<HDWallet> {
        require("wallet name", &wallet.name)?;
        require("extended public key", &wallet.extended_public_key)?;
        self.post(&["wallets", "hd"], &Query::new(), Some(wallet))
    }

    pub fn list_hd_wallets(&self) -> Result<Vec<String>> {
        let names: WalletNames = self.get(&["wallets", "hd"], &Query::new())?;
        Ok(names.wallet_names)
    }

    pub fn get_hd_wallet(&self, name: &str) -> Result<HDWallet> {
        let name = require("wallet name", name)?;
        self.get(&["wallets", "hd", name], &Query::new())
    }

    /// Derived addresses, grouped by subchain.
    pub fn get_addr_hd_wallet(&self, name: &str, params: &WalletAddrParams) -> Result<HDWallet> {
        let name = require("wallet name", name)?;
        self.get(&["wallets", "hd", name, "addresses"], &params.to_query())
    }

    /// Derive new addresses; the reply lists only the new ones.
    pub fn derive_addr_hd_wallet(&self, name: &str, params: &DeriveParams) -> Result<HDWallet> {
        let name = require("wallet name", name)?;
        self.post::<(), _>(
            &["wallets", "hd", name, "addresses", "derive"],
            &params.to_query(),
            None,
        )
    }

    pub fn delete_hd_wallet(&self, name: &str) -> Result<()> {
        let name = require("wallet name", name)?;
        self.delete(&["wallets", "hd", name], &Query::new())
    }
}
