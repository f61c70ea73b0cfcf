use crate::dedicated::DedicatedServerApi;
use crate::firewall::FirewallApi;
use crate::mail::MailHostingApi;
use crate::rest::RestClient;
use crate::user::UserApi;
use crate::vps::VpsApi;
use crate::{NodestyError, RestClientOptions};

/// Client for the nodesty.com REST API.
///
/// Owns the one shared request layer; the per-resource accessors hand out
/// lightweight facades bound to it, so every call goes through the same
/// retry, rate-limit and normalization behavior.
#[derive(Clone, Debug)]
pub struct NodestyClient {
    rest: RestClient,
}

impl NodestyClient {
    /// Creates a client with default options.
    ///
    /// Fails if the access token is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nodesty::NodestyClient;
    ///
    /// let client = NodestyClient::new("ndsty_1234567890abcdef").expect("valid token");
    /// ```
    pub fn new(access_token: impl Into<String>) -> Result<Self, NodestyError> {
        Self::with_options(access_token, RestClientOptions::default())
    }

    /// Creates a client with explicit options.
    ///
    /// ```no_run
    /// use nodesty::{NodestyClient, RestClientOptions};
    ///
    /// let client = NodestyClient::with_options(
    ///     "ndsty_1234567890abcdef",
    ///     RestClientOptions {
    ///         retry: 1,
    ///         ..Default::default()
    ///     },
    /// )
    /// .expect("valid token");
    /// ```
    pub fn with_options(
        access_token: impl Into<String>,
        options: RestClientOptions,
    ) -> Result<Self, NodestyError> {
        Ok(Self {
            rest: RestClient::new(access_token.into(), options)?,
        })
    }

    /// Creates a client from the `NODESTY_ACCESS_TOKEN` environment
    /// variable.
    pub fn from_env() -> Result<Self, NodestyError> {
        let token = std::env::var("NODESTY_ACCESS_TOKEN").map_err(|_| {
            NodestyError::Configuration(
                "missing NODESTY_ACCESS_TOKEN environment variable".to_owned(),
            )
        })?;
        Self::new(token)
    }

    /// User account endpoints: services, tickets, invoices, sessions.
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(&self.rest)
    }

    /// VPS endpoints: power actions, backups, reinstall, usage graphs.
    pub fn vps(&self) -> VpsApi<'_> {
        VpsApi::new(&self.rest)
    }

    /// Dedicated server endpoints: actions, hardware, reinstall, tasks.
    pub fn dedicated_server(&self) -> DedicatedServerApi<'_> {
        DedicatedServerApi::new(&self.rest)
    }

    /// Firewall endpoints, scoped per service and IP address.
    pub fn firewall(&self) -> FirewallApi<'_> {
        FirewallApi::new(&self.rest)
    }

    /// Mail hosting endpoints.
    pub fn mail_hosting(&self) -> MailHostingApi<'_> {
        MailHostingApi::new(&self.rest)
    }
}
