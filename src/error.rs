use thiserror::Error;

/// Failure modes of a public IP lookup.
///
/// Each variant names the call boundary it was raised at; the underlying
/// cause stays reachable through `source()`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("build lookup request failed")]
    RequestBuild(#[source] reqwest::Error),

    #[error("lookup request failed")]
    Transport(#[source] reqwest::Error),

    #[error("lookup service returned an empty response")]
    EmptyResponse,

    #[error("decode lookup response failed")]
    Decode(#[source] serde_json::Error),
}
