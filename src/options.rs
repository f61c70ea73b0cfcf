/// Base endpoint of the nodesty.com REST API.
pub const API_BASE_URL: &str = "https://nodesty.com/api";

/// Configures base endpoint, timeout, retry and rate-limit pacing.
///
/// Omitted fields take the documented defaults via struct-update syntax:
///
/// ```
/// use nodesty::RestClientOptions;
///
/// let options = RestClientOptions {
///     retry: 2,
///     ..Default::default()
/// };
/// assert_eq!(options.timeout_ms, 30_000);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestClientOptions {
    /// Base URL requests are issued against.
    pub base_url: String,
    /// Maximum number of retries after the initial attempt. `0` disables
    /// retrying entirely.
    pub retry: u32,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Offset in milliseconds added to the server-computed rate-limit
    /// backoff.
    pub rate_limit_offset_ms: u64,
}

impl Default for RestClientOptions {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            retry: 3,
            timeout_ms: 30_000,
            rate_limit_offset_ms: 50,
        }
    }
}
