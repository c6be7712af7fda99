use crate::client::BlockCypher;
use crate::error::Result;
use crate::types::TokenUsage;

impl BlockCypher {
    /// Limits and hits for the configured token.
    pub fn check_usage(&self) -> Result<TokenUsage> {
        let url = self.context().token_url()?;
        self.transport().get(url)
    }
}
