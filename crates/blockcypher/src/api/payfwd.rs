use crate::client::{require, BlockCypher};
use crate::error::Result;
use crate::query::Query;
use crate::types::PayFwd;

impl BlockCypher {
    /// Set up forwarding to `payment.destination`. The reply carries the
    /// `id` and the `input_address` to pay into.
    pub fn create_pay_fwd(&self, payment: &PayFwd) -> Result<PayFwd> {
        require("destination", &payment.destination)?;
        self.post(&["payments"], &Query::new(), Some(payment))
    }

    pub fn list_pay_fwds(&self) -> Result<Vec<PayFwd>> {
        self.get(&["payments"], &Query::new())
    }

    pub fn get_pay_fwd(&self, id: &str) -> Result<PayFwd> {
        let id = require("payment id", id)?;
        self.get(&["payments", id], &Query::new())
    }

    pub fn delete_pay_fwd(&self, id: &str) -> Result<()> {
        let id = require("payment id", id)?;
        self.delete(&["payments", id], &Query::new())
    }
}
