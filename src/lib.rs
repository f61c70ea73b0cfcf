//! `nodesty` is an async HTTP client for the nodesty.com hosting REST API.
//!
//! The crate wraps the per-resource endpoints with typed service facades:
//! - [`NodestyClient::user`]: services, tickets, invoices, sessions
//! - [`NodestyClient::vps`]: power actions, backups, reinstall, graphs
//! - [`NodestyClient::dedicated_server`]: actions, hardware, reinstall
//! - [`NodestyClient::firewall`]: attack logs, rules, rDNS per IP
//! - [`NodestyClient::mail_hosting`]: mail hosting details
//!
//! Every call resolves to the uniform [`ApiResponse`] envelope. Transport
//! failures, rate limiting and upstream error bodies are handled by one
//! shared request layer: requests are authenticated, retried with a backoff
//! paced by the server's `x-ratelimit-reset` header, and normalized, so
//! callers branch on the envelope instead of catching errors.
//!
//! ```no_run
//! use nodesty::{ApiResponse, NodestyClient};
//!
//! # async fn run() -> Result<(), nodesty::NodestyError> {
//! let client = NodestyClient::new("ndsty_1234567890abcdef")?;
//!
//! match client.user().get_current_user().await {
//!     ApiResponse::Success(user) => println!("{user:?}"),
//!     ApiResponse::Failure(error) => eprintln!("{error:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;
mod request;
mod response;
mod rest;

pub mod dedicated;
pub mod firewall;
pub mod mail;
pub mod user;
pub mod vps;

pub use client::NodestyClient;
pub use dedicated::DedicatedServerApi;
pub use error::NodestyError;
pub use firewall::FirewallApi;
pub use mail::MailHostingApi;
pub use options::{RestClientOptions, API_BASE_URL};
pub use response::ApiResponse;
pub use user::UserApi;
pub use vps::VpsApi;
