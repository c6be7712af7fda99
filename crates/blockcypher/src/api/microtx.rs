use crate::client::BlockCypher;
use crate::error::Result;
use crate::query::Query;
use crate::types::MicroTX;

impl BlockCypher {
    /// Send a micro transaction.
    ///
    /// With a public-key source the reply carries `to_sign`; sign it with
    /// [`MicroTX::sign`] and send it again to broadcast.
    pub fn send_micro(&self, micro: &MicroTX) -> Result<MicroTX> {
        self.post(&["txs", "micro"], &Query::new(), Some(micro))
    }
}
