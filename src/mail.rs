//! Mail hosting endpoints.

use serde::Deserialize;

use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::rest::RestClient;

/// Mail hosting endpoints, scoped per service ID.
#[derive(Clone, Copy, Debug)]
pub struct MailHostingApi<'a> {
    rest: &'a RestClient,
}

impl<'a> MailHostingApi<'a> {
    pub(crate) fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Fetches the details of a mail hosting service.
    pub async fn get_details(&self, id: &str) -> ApiResponse<MailHostingDetails> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/mail/info")))
            .await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailHostingStatus {
    Active,
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailArchiveStatus {
    Enabled,
    Disabled,
}

/// Domain alias usage against its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MailDomainAliasUsage {
    pub count: u32,
    pub limit: u32,
}

/// Disk usage against its limit, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MailDiskUsage {
    pub usage: u64,
    pub limit: u64,
}

/// Mailbox and alias usage against their limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailUserUsage {
    pub count: u32,
    pub limit: u32,
    pub alias_count: u32,
    pub alias_limit: u32,
}

/// Mail archive retention settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MailArchiveYears {
    pub number: u32,
    pub status: MailArchiveStatus,
}

/// Domain ownership verification record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MailVerification {
    pub status: bool,
    /// Record type, e.g. `TXT`.
    #[serde(rename = "type")]
    pub kind: String,
    pub record: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum MailDnsRecordType {
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "CNAME")]
    Cname,
    #[serde(rename = "TXT")]
    Txt,
}

/// DNS record the mail hosting expects on the domain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MailDnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MailDnsRecordType,
    pub value: String,
    pub priority: u16,
    /// Whether the record was found with the expected value.
    pub status: bool,
}

/// DKIM signing record of the domain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MailDkimRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub status: bool,
}

/// Details of a mail hosting service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailHostingDetails {
    pub status: MailHostingStatus,
    pub spam_experts: bool,
    pub file_storage: bool,
    pub office: bool,
    pub domain_alias: MailDomainAliasUsage,
    pub disk: MailDiskUsage,
    pub users: MailUserUsage,
    pub archive_years: MailArchiveYears,
    pub verified: MailVerification,
    pub dns: Vec<MailDnsRecord>,
    pub dkim: Option<MailDkimRecord>,
}
