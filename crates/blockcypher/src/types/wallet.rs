use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::{redacted, AddrKeychain};

/// A named list of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

impl Wallet {
    pub fn new(name: impl Into<String>, addresses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }
}

/// A wallet derived from an extended public key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HDWallet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extended_public_key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subchain_indexes: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<HDChain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<bool>,
}

impl HDWallet {
    pub fn new(name: impl Into<String>, extended_public_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extended_public_key: extended_public_key.into(),
            ..Default::default()
        }
    }

    /// Every derived address across all subchains.
    pub fn addresses(&self) -> impl Iterator<Item = &HDAddress> {
        self.chains.iter().flat_map(|c| c.chain_addresses.iter())
    }
}

/// Addresses derived on one subchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HDChain {
    #[serde(default)]
    pub chain_addresses: Vec<HDAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HDAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public: String,
}

/// Reply to generating an address inside a wallet: the updated wallet and
/// the new address's keys arrive as one object.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratedWalletAddr {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub private: String,
    #[serde(default)]
    pub public: String,
    #[serde(default)]
    pub wif: String,
}

impl GeneratedWalletAddr {
    pub fn wallet(&self) -> Wallet {
        Wallet::new(self.name.clone(), self.addresses.clone())
    }

    pub fn keychain(&self) -> AddrKeychain {
        AddrKeychain {
            address: self.address.clone(),
            private: self.private.clone(),
            public: self.public.clone(),
            wif: self.wif.clone(),
            ..Default::default()
        }
    }
}

impl fmt::Debug for GeneratedWalletAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedWalletAddr")
            .field("name", &self.name)
            .field("addresses", &self.addresses)
            .field("address", &self.address)
            .field("private", &redacted(&self.private))
            .field("public", &self.public)
            .field("wif", &redacted(&self.wif))
            .finish()
    }
}

/// `{"wallet_names": [...]}`
#[derive(Deserialize)]
pub(crate) struct WalletNames {
    #[serde(default)]
    pub wallet_names: Vec<String>,
}
