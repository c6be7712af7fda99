//! Blocking client for the BlockCypher REST API.
//!
//! A [`Context`] picks the coin/chain and carries the API token; a
//! [`BlockCypher`] handle built from it exposes one method per endpoint.
//! Transaction skeletons returned by the service are signed locally with
//! [`TXSkel::sign`] before being sent back.
//!
//! ```no_run
//! use blockcypher::{AddrParams, BlockCypher, Chain, Coin, Context};
//!
//! # fn main() -> blockcypher::Result<()> {
//! let ctx = Context::new(Coin::Btc, Chain::Main).with_token("your-token");
//! let api = BlockCypher::new(ctx)?;
//! let addr = api.get_addr_bal("1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD", &AddrParams::default())?;
//! println!("{:?}", addr.final_balance);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

pub use api::{MetaKind, FAUCET_MAX_AMOUNT};
pub use client::BlockCypher;
pub use context::{Chain, Coin, Context, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use query::{AddrParams, BlockParams, DeriveParams, Query, TxParams, WalletAddrParams};
pub use types::*;

pub use bcy_signer;
