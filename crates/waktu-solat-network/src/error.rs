use thiserror::Error;
use waktu_solat_types::{ApiErrorPayload, DecodeError};

/// Boxed error raised by a [`Transport`](crate::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from waktu-solat operations.
#[derive(Debug, Error)]
pub enum WaktuSolatError {
    /// No response was obtained (DNS, refused connection, timeout, cancellation).
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The service reported a failure, through the HTTP status or an
    /// embedded `{"status": "error"}` body.
    #[error("API error: {message} (status code {status_code})")]
    Api {
        status_code: u16,
        message: String,
        payload: Option<ApiErrorPayload>,
    },

    /// The body was not JSON, or not the shape the endpoint promises.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The client could not be set up.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// Coarse classification of a [`WaktuSolatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Api,
    Decode,
    InvalidConfiguration,
}

impl WaktuSolatError {
    /// Creates a `Network` error from a transport failure.
    pub fn network(source: TransportError) -> Self {
        Self::Network {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
        }
    }

    /// HTTP status for `Api` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Structured error body, when the service sent a parseable one.
    pub fn payload(&self) -> Option<&ApiErrorPayload> {
        match self {
            Self::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Only transport failures are worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

pub type Result<T> = std::result::Result<T, WaktuSolatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_message() {
        let err = WaktuSolatError::network("not connected to the internet".into());
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Network error: not connected to the internet");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_api_accessors() {
        let payload = ApiErrorPayload::new("error", "Zone not found");
        let err = WaktuSolatError::Api {
            status_code: 404,
            message: payload.message().to_string(),
            payload: Some(payload.clone()),
        };
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.payload(), Some(&payload));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "API error: Zone not found (status code 404)");
    }

    #[test]
    fn test_decode_from() {
        let err: WaktuSolatError = DecodeError::InvalidJson("eof".into()).into();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status_code(), None);
        assert!(err.payload().is_none());
    }
}
