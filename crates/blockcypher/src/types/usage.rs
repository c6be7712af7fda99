use serde::{Deserialize, Serialize};

/// Counters for one token, keyed the way the service reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, rename = "api/hour", skip_serializing_if = "Option::is_none")]
    pub api_hour: Option<u64>,
    #[serde(default, rename = "api/second", skip_serializing_if = "Option::is_none")]
    pub api_second: Option<u64>,
    #[serde(default, rename = "api/day", skip_serializing_if = "Option::is_none")]
    pub api_day: Option<u64>,
    #[serde(default, rename = "hooks/hour", skip_serializing_if = "Option::is_none")]
    pub hooks_hour: Option<u64>,
    #[serde(default, rename = "confidence/hour", skip_serializing_if = "Option::is_none")]
    pub confidence_hour: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<u64>,
}

/// Limits and current hits for the configured token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub limits: Usage,
    #[serde(default)]
    pub hits: Usage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_usage() {
        let json = r#"{
            "token": "abc123",
            "limits": {"api/hour": 3000, "api/second": 3, "hooks/hour": 600, "confidence/hour": 15, "hooks": 200, "payments": 200},
            "hits": {"api/hour": 12}
        }"#;
        let usage: TokenUsage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.limits.api_hour, Some(3000));
        assert_eq!(usage.limits.api_day, None);
        assert_eq!(usage.hits.api_hour, Some(12));
        assert_eq!(usage.hits.hooks, None);
    }
}
