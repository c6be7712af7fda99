use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Default API root. Coin and chain are appended per request.
pub const DEFAULT_BASE_URL: &str = "https://api.blockcypher.com/v1/";

/// Ledgers served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Btc,
    Bcy,
    Ltc,
    Doge,
    Dash,
    Eth,
    Beth,
}

impl Coin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coin::Btc => "btc",
            Coin::Bcy => "bcy",
            Coin::Ltc => "ltc",
            Coin::Doge => "doge",
            Coin::Dash => "dash",
            Coin::Eth => "eth",
            Coin::Beth => "beth",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Coin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "btc" => Ok(Coin::Btc),
            "bcy" => Ok(Coin::Bcy),
            "ltc" => Ok(Coin::Ltc),
            "doge" => Ok(Coin::Doge),
            "dash" => Ok(Coin::Dash),
            "eth" => Ok(Coin::Eth),
            "beth" => Ok(Coin::Beth),
            other => Err(Error::InvalidRequest(format!("unknown coin '{other}'"))),
        }
    }
}

/// Network variant of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Main,
    Test3,
    Test,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Main => "main",
            Chain::Test3 => "test3",
            Chain::Test => "test",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(Chain::Main),
            "test3" => Ok(Chain::Test3),
            "test" => Ok(Chain::Test),
            other => Err(Error::InvalidRequest(format!("unknown chain '{other}'"))),
        }
    }
}

/// Coin/chain pairs on which the faucet may be used.
const FAUCET_NETWORKS: [(Coin, Chain); 2] = [(Coin::Bcy, Chain::Test), (Coin::Btc, Chain::Test3)];

/// Credentials and network selection for one client.
///
/// Immutable once built; clone it to hand a copy to another thread or
/// build a separate one per tenant.
#[derive(Clone)]
pub struct Context {
    token: Option<String>,
    coin: Coin,
    chain: Chain,
    base_url: String,
}

impl Context {
    /// A context on the public API with no token.
    pub fn new(coin: Coin, chain: Chain) -> Self {
        Self {
            token: None,
            coin,
            chain,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Attach an API token. An empty token is treated as none.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Point at a different API root (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidRequest(format!(
                "base url '{base_url}' cannot carry a path"
            )));
        }
        // Joining relies on a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url.into();
        Ok(self)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the faucet is available on this coin/chain.
    pub fn is_faucet_network(&self) -> bool {
        FAUCET_NETWORKS.contains(&(self.coin, self.chain))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("coin", &self.coin)
            .field("chain", &self.chain)
            .field("base_url", &self.base_url)
            .finish()
    }
}
