//! Endpoint wrappers, one module per resource family. Each adds methods to
//! [`BlockCypher`](crate::BlockCypher).

mod address;
mod asset;
mod blockchain;
mod hdwallet;
mod hook;
mod meta;
mod microtx;
mod payfwd;
mod tx;
mod usage;
mod wallet;

pub use address::FAUCET_MAX_AMOUNT;
pub use meta::MetaKind;
