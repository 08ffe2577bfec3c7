//! Network layer for waktu-solat.
//!
//! Provides the transport seam, client configuration, the request executor
//! and the uniform [`WaktuSolatError`] type.

pub mod config;
pub mod error;
pub mod executor;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, Result, TransportError, WaktuSolatError};
pub use executor::{classify, MonthQuery, RequestExecutor};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// Re-exported so custom transports need not depend on reqwest/async-trait directly.
pub use async_trait::async_trait;
pub use reqwest::Url;
