use bcy_signer::SignError;
use thiserror::Error;

/// Everything a BlockCypher call can fail with.
///
/// `InvalidRequest`, `InvalidMetaKind`, `NoMorePages` and `Signing` are
/// raised locally before any request leaves the process. `Api`, `Status`
/// and `RateLimited` come from a non-success HTTP status; `Decode` means the
/// status was fine but the body was not the expected JSON.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid metadata kind '{0}': expected 'addr', 'tx' or 'block'")]
    InvalidMetaKind(String),

    #[error("no more pages: {0}")]
    NoMorePages(String),

    #[error("signing failed: {0}")]
    Signing(#[from] SignError),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}, Message(s): {message}")]
    Api { status: String, message: String },

    #[error("{status}")]
    Status { status: String },

    #[error("{status}: rate limited")]
    RateLimited { status: String },

    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Whether the request never left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest(_)
                | Error::InvalidMetaKind(_)
                | Error::NoMorePages(_)
                | Error::Signing(_)
                | Error::Url(_)
        )
    }

    /// Whether the service answered 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api_error() {
        let err = Error::Api {
            status: "HTTP 404 Not Found".into(),
            message: "Object not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found, Message(s): Object not found"
        );
    }

    #[test]
    fn display_status_only() {
        let err = Error::Status {
            status: "HTTP 500 Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
    }

    #[test]
    fn display_rate_limited() {
        let err = Error::RateLimited {
            status: "HTTP 429 Too Many Requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.is_rate_limited());
        assert!(!err.is_local());
    }

    #[test]
    fn display_invalid_meta_kind() {
        let err = Error::InvalidMetaKind("wallet".into());
        assert_eq!(
            err.to_string(),
            "invalid metadata kind 'wallet': expected 'addr', 'tx' or 'block'"
        );
        assert!(err.is_local());
    }

    #[test]
    fn signing_error_converts() {
        let err: Error = SignError::KeyCountMismatch { keys: 2, digests: 1 }.into();
        assert!(matches!(err, Error::Signing(_)));
        assert!(err.is_local());
    }

    #[test]
    fn decode_error_converts() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().starts_with("response decode failed"));
    }
}
