//! HTTP clients for the external services: Nominatim (geocoding and the
//! facility directory), OpenFDA (drug labels), and the translate
//! side-channel. Each client takes an injectable base URL so tests can
//! point it at a local mock server. No retries, no backoff; transport
//! defaults are the only timeout.

pub mod nominatim;
pub mod openfda;
pub mod translate;

pub use nominatim::NominatimClient;
pub use openfda::OpenFdaClient;
pub use translate::TranslateClient;

/// Errors from any external-service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no results found for '{0}'")]
    NotFound(String),
    #[error("service request failed: {0}")]
    Http(String),
    #[error("unexpected response status {status}")]
    Status { status: u16 },
    #[error("could not parse service response: {0}")]
    ResponseParsing(String),
}

impl ServiceError {
    /// Map a reqwest transport error, distinguishing unreachable hosts.
    pub(crate) fn from_transport(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_connect() {
            ServiceError::Http(format!("could not reach {base_url}"))
        } else if err.is_timeout() {
            ServiceError::Http("request timed out".to_string())
        } else {
            ServiceError::Http(err.to_string())
        }
    }
}
