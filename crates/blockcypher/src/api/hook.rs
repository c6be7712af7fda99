use crate::client::{require, BlockCypher};
use crate::error::Result;
use crate::query::Query;
use crate::types::Hook;

impl BlockCypher {
    /// Register a webhook. The reply carries the assigned `id`.
    pub fn create_hook(&self, hook: &Hook) -> Result<Hook> {
        require("hook url", &hook.url)?;
        self.post(&["hooks"], &Query::new(), Some(hook))
    }

    pub fn list_hooks(&self) -> Result<Vec<Hook>> {
        self.get(&["hooks"], &Query::new())
    }

    pub fn get_hook(&self, id: &str) -> Result<Hook> {
        let id = require("hook id", id)?;
        self.get(&["hooks", id], &Query::new())
    }

    pub fn delete_hook(&self, id: &str) -> Result<()> {
        let id = require("hook id", id)?;
        self.delete(&["hooks", id], &Query::new())
    }
}
