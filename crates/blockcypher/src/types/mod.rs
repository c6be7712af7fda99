//! JSON shapes exchanged with the service.
//!
//! Numeric fields the service may omit are `Option`s so that "absent" and
//! "zero" stay distinct. Strings and lists default to empty and are left
//! out of request bodies when empty.

mod address;
mod asset;
mod block;
mod hook;
mod micro;
mod payfwd;
mod tx;
mod usage;
mod wallet;

pub use address::{Addr, AddrKeychain, TXRef};
pub use asset::{OAPInput, OAPIssue, OAPOutput, OAPTX};
pub use block::{Block, Blockchain};
pub use hook::{Hook, HookEvent};
pub use micro::{MicroInput, MicroOutput, MicroSource, MicroTX};
pub use payfwd::{PayFwd, Payback};
pub use tx::{NullData, SkelError, TXInput, TXOutput, TXSkel, TxConfidence, TX};
pub use usage::{TokenUsage, Usage};
pub use wallet::{GeneratedWalletAddr, HDAddress, HDChain, HDWallet, Wallet};
pub(crate) use wallet::WalletNames;
