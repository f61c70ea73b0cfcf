/// Error type returned by this crate.
///
/// Only client construction can fail with a Rust error. Every failure
/// during a request (transport, rate limiting, upstream error bodies) is
/// reported through the [`ApiResponse`](crate::ApiResponse) envelope
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum NodestyError {
    /// Invalid client configuration, such as an empty access token.
    #[error("configuration error: {0}")]
    Configuration(String),
}
