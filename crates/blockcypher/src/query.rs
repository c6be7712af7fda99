//! URL assembly and the typed query options accepted by the endpoints.

use std::collections::BTreeMap;
use std::fmt::Display;

use url::Url;

use crate::context::Context;
use crate::error::{Error, Result};

/// Query-string parameters, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a parameter only when a value is present.
    pub fn set_opt<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Builder-style [`Query::set`].
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Context {
    /// Build `<base>/<coin>/<chain>/<segments...>?<query>&token=<token>`.
    ///
    /// Each segment is percent-encoded on its own, so hashes, addresses and
    /// wallet names cannot inject path or query syntax. The token is
    /// appended last and overrides any `token` key in `query`.
    pub fn build_url(&self, segments: &[&str], query: &Query) -> Result<Url> {
        let mut path = Vec::with_capacity(segments.len() + 2);
        path.push(self.coin().as_str());
        path.push(self.chain().as_str());
        path.extend_from_slice(segments);
        self.url_at(&path, query)
    }

    /// URL of the token usage endpoint, which sits outside any coin/chain.
    pub fn token_url(&self) -> Result<Url> {
        let token = self.token().ok_or_else(|| {
            Error::InvalidRequest("token usage requires an API token".into())
        })?;
        let mut url = self.base()?;
        push_segments(&mut url, &["tokens", token])?;
        Ok(url)
    }

    fn url_at(&self, segments: &[&str], query: &Query) -> Result<Url> {
        let mut url = self.base()?;
        push_segments(&mut url, segments)?;

        let token = self.token();
        let mut pairs = query
            .iter()
            .filter(|(k, _)| token.is_none() || *k != "token")
            .peekable();
        if pairs.peek().is_some() || token.is_some() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in pairs {
                qp.append_pair(k, v);
            }
            if let Some(token) = token {
                qp.append_pair("token", token);
            }
        }
        Ok(url)
    }

    fn base(&self) -> Result<Url> {
        Ok(Url::parse(self.base_url())?)
    }
}

fn push_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    let mut path = url
        .path_segments_mut()
        .map_err(|_| Error::InvalidRequest("base url cannot carry a path".into()))?;
    path.pop_if_empty().extend(segments.iter().filter(|s| !s.is_empty()));
    Ok(())
}

/// Options for the address endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddrParams {
    /// Only return transactions with unspent outputs.
    pub unspent_only: Option<bool>,
    pub include_script: Option<bool>,
    pub include_confidence: Option<bool>,
    /// Only transactions below this block height.
    pub before: Option<i64>,
    /// Only transactions at or above this block height.
    pub after: Option<i64>,
    pub limit: Option<u32>,
    /// Only transactions with at least this many confirmations.
    pub confirmations: Option<u32>,
    /// Only unconfirmed transactions at or above this confidence (0-99).
    pub confidence: Option<u32>,
    pub omit_wallet_addresses: Option<bool>,
}

impl AddrParams {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        q.set_opt("unspentOnly", self.unspent_only)
            .set_opt("includeScript", self.include_script)
            .set_opt("includeConfidence", self.include_confidence)
            .set_opt("before", self.before)
            .set_opt("after", self.after)
            .set_opt("limit", self.limit)
            .set_opt("confirmations", self.confirmations)
            .set_opt("confidence", self.confidence)
            .set_opt("omitWalletAddresses", self.omit_wallet_addresses);
        q
    }
}

/// Paging through a block's transaction ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockParams {
    pub txstart: Option<u64>,
    pub limit: Option<u64>,
}

impl BlockParams {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        q.set_opt("txstart", self.txstart).set_opt("limit", self.limit);
        q
    }

    /// Recover paging options from a block's `next_txids` URL.
    pub fn from_next_url(next: &str) -> Result<Self> {
        let url = Url::parse(next)?;
        let mut params = Self::default();
        for (k, v) in url.query_pairs() {
            let parsed = || {
                v.parse::<u64>()
                    .map_err(|_| Error::InvalidRequest(format!("bad '{k}' in next_txids: {v}")))
            };
            match k.as_ref() {
                "txstart" => params.txstart = Some(parsed()?),
                "limit" => params.limit = Some(parsed()?),
                _ => {}
            }
        }
        Ok(params)
    }
}

/// Options for single-transaction lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxParams {
    /// Maximum number of inputs/outputs returned.
    pub limit: Option<u32>,
    /// Index of the first input returned.
    pub instart: Option<u32>,
    /// Index of the first output returned.
    pub outstart: Option<u32>,
    pub include_hex: Option<bool>,
    pub include_confidence: Option<bool>,
}

impl TxParams {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        q.set_opt("limit", self.limit)
            .set_opt("instart", self.instart)
            .set_opt("outstart", self.outstart)
            .set_opt("includeHex", self.include_hex)
            .set_opt("includeConfidence", self.include_confidence);
        q
    }
}

/// Filters for listing the addresses of a wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletAddrParams {
    /// Only addresses that have (or have not) been used.
    pub used: Option<bool>,
    /// Only addresses with (or without) a zero balance.
    pub zero_balance: Option<bool>,
}

impl WalletAddrParams {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        q.set_opt("used", self.used)
            .set_opt("zerobalance", self.zero_balance);
        q
    }
}

/// Options for deriving addresses in an HD wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeriveParams {
    /// Number of addresses to derive.
    pub count: Option<u32>,
    /// Subchain to derive on; the service defaults to the first one.
    pub subchain_index: Option<u32>,
}

impl DeriveParams {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        q.set_opt("count", self.count)
            .set_opt("subchain_index", self.subchain_index);
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Chain, Coin};

    fn ctx() -> Context {
        Context::new(Coin::Btc, Chain::Main).with_token("abc123")
    }

    #[test]
    fn balance_url_matches_service_layout() {
        let url = ctx()
            .build_url(&["addrs", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "balance"], &Query::new())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.blockcypher.com/v1/btc/main/addrs/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa/balance?token=abc123"
        );
    }

    #[test]
    fn no_token_no_params_has_no_query() {
        let url = Context::new(Coin::Bcy, Chain::Test)
            .build_url(&[], &Query::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://api.blockcypher.com/v1/bcy/test");
        assert!(url.query().is_none());
    }

    #[test]
    fn params_come_before_token() {
        let q = Query::new().with("limit", 5).with("before", 300000);
        let url = ctx().build_url(&["addrs", "x"], &q).unwrap();
        assert_eq!(url.query(), Some("before=300000&limit=5&token=abc123"));
    }

    #[test]
    fn configured_token_overrides_query_token() {
        let q = Query::new().with("token", "other");
        let url = ctx().build_url(&["hooks"], &q).unwrap();
        assert_eq!(url.query(), Some("token=abc123"));
    }

    #[test]
    fn values_are_percent_encoded() {
        let q = Query::new().with("address", "a b;c&d");
        let url = Context::new(Coin::Btc, Chain::Main)
            .build_url(&["wallets", "w", "addresses"], &q)
            .unwrap();
        assert_eq!(url.query(), Some("address=a+b%3Bc%26d"));
    }

    #[test]
    fn segments_are_percent_encoded() {
        let url = Context::new(Coin::Btc, Chain::Main)
            .build_url(&["wallets", "my wallet?x=1"], &Query::new())
            .unwrap();
        assert_eq!(url.path(), "/v1/btc/main/wallets/my%20wallet%3Fx=1");
        assert!(url.query().is_none());
    }

    #[test]
    fn custom_base_url_is_respected() {
        let url = Context::new(Coin::Bcy, Chain::Test)
            .with_base_url("http://127.0.0.1:9000/api/v1/")
            .unwrap()
            .build_url(&["txs"], &Query::new())
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/v1/bcy/test/txs");
    }

    #[test]
    fn token_url_requires_token() {
        let err = Context::new(Coin::Btc, Chain::Main).token_url().unwrap_err();
        assert!(err.is_local());
        let url = ctx().token_url().unwrap();
        assert_eq!(url.as_str(), "https://api.blockcypher.com/v1/tokens/abc123");
    }

    #[test]
    fn addr_params_use_service_names() {
        let q = AddrParams {
            unspent_only: Some(true),
            before: Some(123),
            omit_wallet_addresses: Some(false),
            ..Default::default()
        }
        .to_query();
        assert_eq!(q.get("unspentOnly"), Some("true"));
        assert_eq!(q.get("before"), Some("123"));
        assert_eq!(q.get("omitWalletAddresses"), Some("false"));
        assert_eq!(q.get("limit"), None);
    }

    #[test]
    fn default_params_are_empty() {
        assert!(AddrParams::default().to_query().is_empty());
        assert!(TxParams::default().to_query().is_empty());
        assert!(BlockParams::default().to_query().is_empty());
    }

    #[test]
    fn block_params_from_next_url() {
        let p = BlockParams::from_next_url(
            "https://api.blockcypher.com/v1/btc/main/blocks/0000abc?txstart=20&limit=20",
        )
        .unwrap();
        assert_eq!(p, BlockParams { txstart: Some(20), limit: Some(20) });
    }

    #[test]
    fn block_params_from_next_url_rejects_garbage() {
        let err = BlockParams::from_next_url("https://x/blocks/h?txstart=abc").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn tx_and_derive_params() {
        let q = TxParams { include_hex: Some(true), outstart: Some(3), ..Default::default() }.to_query();
        assert_eq!(q.get("includeHex"), Some("true"));
        assert_eq!(q.get("outstart"), Some("3"));
        let q = DeriveParams { count: Some(2), subchain_index: Some(1) }.to_query();
        assert_eq!(q.get("subchain_index"), Some("1"));
        let q = WalletAddrParams { zero_balance: Some(true), ..Default::default() }.to_query();
        assert_eq!(q.get("zerobalance"), Some("true"));
    }
}
