use crate::client::{require, BlockCypher};
use crate::error::{Error, Result};
use crate::query::{Query, WalletAddrParams};
use crate::types::{GeneratedWalletAddr, Wallet, WalletNames};

impl BlockCypher {
    pub fn create_wallet(&self, wallet: &Wallet) -> Result<Wallet> {
        require("wallet name", &wallet.name)?;
        self.post(&["wallets"], &Query::new(), Some(wallet))
    }

    /// Names of every wallet under the token.
    pub fn list_wallets(&self) -> Result<Vec<String>> {
        let names: WalletNames = self.get(&["wallets"], &Query::new())?;
        Ok(names.wallet_names)
    }

    pub fn get_wallet(&self, name: &str) -> Result<Wallet> {
        let name = require("wallet name", name)?;
        self.get(&["wallets", name], &Query::new())
    }

    /// Add addresses to a wallet. With `omit_wallet_addresses` the reply
    /// leaves out the wallet's full address list.
    pub fn add_addr_wallet<A: AsRef<str>>(
        &self,
        name: &str,
        addrs: &[A],
        omit_wallet_addresses: bool,
    ) -> Result<Wallet> {
        let name = require("wallet name", name)?;
        let body = Wallet::new(name, non_empty(addrs)?);
        let mut query = Query::new();
        if omit_wallet_addresses {
            query.set("omitWalletAddresses", true);
        }
        self.post(&["wallets", name, "addresses"], &query, Some(&body))
    }

    pub fn get_addr_wallet(&self, name: &str, params: &WalletAddrParams) -> Result<Vec<String>> {
        let name = require("wallet name", name)?;
        let wallet: Wallet = self.get(&["wallets", name, "addresses"], &params.to_query())?;
        Ok(wallet.addresses)
    }

    pub fn delete_addr_wallet<A: AsRef<str>>(&self, name: &str, addrs: &[A]) -> Result<()> {
        let name = require("wallet name", name)?;
        let query = Query::new().with("address", non_empty(addrs)?.join(";"));
        self.delete(&["wallets", name, "addresses"], &query)
    }

    /// Generate a new address inside the wallet, returning the updated
    /// wallet together with the new address's keys.
    pub fn gen_addr_wallet(&self, name: &str) -> Result<GeneratedWalletAddr> {
        let name = require("wallet name", name)?;
        self.post::<(), _>(&["wallets", name, "addresses", "generate"], &Query::new(), None)
    }

    pub fn delete_wallet(&self, name: &str) -> Result<()> {
        let name = require("wallet name", name)?;
        self.delete(&["wallets", name], &Query::new())
    }
}

fn non_empty<A: AsRef<str>>(addrs: &[A]) -> Result<Vec<String>> {
    if addrs.is_empty() {
        return Err(Error::InvalidRequest("address list must not be empty".into()));
    }
    addrs
        .iter()
        .map(|a| require("address", a.as_ref()).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_empty_and_blank() {
        let none: [&str; 0] = [];
        assert!(non_empty(&none).is_err());
        assert!(non_empty(&["a", " "]).is_err());
        assert_eq!(non_empty(&["a", "b"]).unwrap(), vec!["a", "b"]);
    }
}
