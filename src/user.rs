//! User account endpoints: services, support tickets, invoices, sessions
//! and referral information.

use serde::Deserialize;

use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::rest::RestClient;

/// User account endpoints.
#[derive(Clone, Copy, Debug)]
pub struct UserApi<'a> {
    rest: &'a RestClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Lists the services owned by or shared with the current user.
    pub async fn get_services(&self) -> ApiResponse<Vec<Service>> {
        self.rest.request(ApiRequest::get("/services")).await
    }

    /// Fetches one support ticket with its full message history.
    pub async fn get_ticket_by_id(&self, ticket_id: &str) -> ApiResponse<Ticket> {
        self.rest
            .request(ApiRequest::get(format!("/tickets/{ticket_id}")))
            .await
    }

    /// Lists the current user's support tickets, without messages.
    pub async fn get_tickets(&self) -> ApiResponse<Vec<TicketSummary>> {
        self.rest.request(ApiRequest::get("/tickets")).await
    }

    /// Fetches the current user's profile.
    pub async fn get_current_user(&self) -> ApiResponse<User> {
        self.rest.request(ApiRequest::get("/users/@me")).await
    }

    /// Fetches one invoice with its line items.
    pub async fn get_invoice_by_id(&self, invoice_id: &str) -> ApiResponse<Invoice> {
        self.rest
            .request(ApiRequest::get(format!("/users/@me/invoices/{invoice_id}")))
            .await
    }

    /// Lists the current user's invoices, without line items.
    pub async fn get_invoices(&self) -> ApiResponse<Vec<InvoiceSummary>> {
        self.rest
            .request(ApiRequest::get("/users/@me/invoices"))
            .await
    }

    /// Lists the current user's active sessions.
    pub async fn get_sessions(&self) -> ApiResponse<Vec<Session>> {
        self.rest
            .request(ApiRequest::get("/users/@me/sessions"))
            .await
    }

    /// Fetches the current user's referral code and its usage.
    pub async fn get_referral_code(&self) -> ApiResponse<UserReferralCode> {
        self.rest
            .request(ApiRequest::get("/users/@me/referral"))
            .await
    }
}

/// Billing cycle of a service or addon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    #[serde(rename = "Semi-Annually")]
    SemiAnnually,
    Annually,
    Biennially,
    Triennially,
}

/// Lifecycle status of a service or addon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ServiceStatus {
    Pending,
    Active,
    Suspended,
    Terminated,
    Completed,
    Cancelled,
    Fraud,
}

/// Location of a dedicated server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum DedicatedServerLocation {
    #[serde(rename = "FRA-01")]
    Fra01,
    #[serde(rename = "FRA-02")]
    Fra02,
    #[serde(rename = "FRA-03")]
    Fra03,
}

/// Addon attached to a service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddon {
    pub name: String,
    pub recurring_amount: f64,
    pub billing_cycle: BillingCycle,
    pub status: ServiceStatus,
    /// Unix timestamp in milliseconds.
    pub register_date: i64,
    /// Unix timestamp in milliseconds.
    pub next_due_date: i64,
}

/// A service provided to a client: VPS, dedicated server, web or mail
/// hosting.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub product_id: i64,
    pub group_id: Option<i64>,
    pub name: String,
    /// Name as stored upstream, without localization.
    pub raw_name: String,
    pub name_without_group_name: String,
    pub domain: String,
    pub first_payment_amount: f64,
    pub recurring_amount: f64,
    pub billing_cycle: BillingCycle,
    /// Unix timestamp in milliseconds.
    pub next_due_date: i64,
    pub status: ServiceStatus,
    pub username: Option<String>,
    pub password: Option<String>,
    pub vps_id: Option<i64>,
    pub dedicated_id: Option<String>,
    #[serde(rename = "isVPS")]
    pub is_vps: bool,
    pub is_web_hosting: bool,
    pub is_dedicated: bool,
    pub is_mail_hosting: bool,
    pub dedicated_server_location: Option<DedicatedServerLocation>,
    pub addons: Vec<ServiceAddon>,
    pub features: Vec<String>,
    pub ips: Vec<String>,
    pub team_id: Option<i64>,
    /// Whether the current user owns the service (as opposed to having it
    /// shared through a team).
    pub owner: bool,
}

/// Aggregate account counters shown on the user profile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub active_services: u32,
    pub unpaid_invoices: u32,
    pub balance: f64,
    pub active_tickets: u32,
}

/// Profile of the authenticated user.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub post_code: String,
    pub currency: String,
    pub currency_symbol: String,
    pub phone_number: String,
    /// Turkish identification number.
    pub tckn: String,
    pub birth_year: String,
    pub banned: bool,
    pub current_session_id: String,
    pub totp_enabled: bool,
    pub stats: UserStats,
    pub company_name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketMessageAuthorRole {
    User,
    Admin,
}

/// Author of a ticket message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessageAuthor {
    pub id: String,
    pub avatar: Option<String>,
    pub name: String,
    pub role: TicketMessageAuthorRole,
}

/// Single message within a support ticket.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    pub id: String,
    pub message_id: String,
    pub content: String,
    /// Attachment URLs.
    pub attachments: Vec<String>,
    pub author_id: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub author: TicketMessageAuthor,
}

/// Support ticket with its full message history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// RFC 3339 timestamp of the last reply.
    pub last_reply: String,
    pub marked: bool,
    pub messages: Vec<TicketMessage>,
}

/// Support ticket as returned by the list endpoint, without messages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub last_reply: String,
    pub marked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Paid,
    Unpaid,
    Overdue,
    Cancelled,
    Refunded,
    #[serde(rename = "Payment Pending")]
    PaymentPending,
}

/// Line item of an invoice.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub amount: f64,
}

/// Invoice with its line items.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    /// Unix timestamp in milliseconds.
    pub due_date: i64,
    /// Unix timestamp in milliseconds; `None` while unpaid.
    pub date_paid: Option<i64>,
    pub sub_total: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub applied_balance: f64,
    pub items: Vec<InvoiceItem>,
}

/// Invoice as returned by the list endpoint, without line items.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: i64,
    pub due_date: i64,
    pub date_paid: Option<i64>,
    pub sub_total: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub applied_balance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SessionOs {
    Desktop,
    Mobile,
}

/// Active login session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub ip: String,
    pub location: String,
    pub os: SessionOs,
    /// Browser or client platform.
    pub platform: String,
    /// RFC 3339 timestamp.
    pub last_seen: String,
}

/// Referral code of the current user and its usage.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserReferralCode {
    pub code: String,
    pub uses: ReferralUses,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReferralUses {
    pub count: u32,
    pub data: Vec<ReferralUse>,
}

/// One use of a referral code.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReferralUse {
    /// Unix timestamp in milliseconds.
    pub date: i64,
    /// Amount credited for the referral.
    pub amount: f64,
}
