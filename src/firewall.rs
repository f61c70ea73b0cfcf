//! Firewall endpoints, scoped per service and IP address: attack logs and
//! notifications, reverse DNS, rules and traffic statistics.

use serde::{Deserialize, Serialize};

use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::rest::RestClient;

/// Firewall endpoints for the IPs of a VPS or dedicated server.
#[derive(Clone, Copy, Debug)]
pub struct FirewallApi<'a> {
    rest: &'a RestClient,
}

impl<'a> FirewallApi<'a> {
    pub(crate) fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Lists the attacks detected against an IP address.
    pub async fn get_attack_logs(&self, id: &str, ip: &str) -> ApiResponse<Vec<FirewallAttackLog>> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/firewall/{ip}/attack-logs"
            )))
            .await
    }

    /// Fetches the attack notification settings of an IP address.
    pub async fn get_attack_notification_settings(
        &self,
        id: &str,
        ip: &str,
    ) -> ApiResponse<AttackNotificationSettings> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/firewall/{ip}/attack-notification"
            )))
            .await
    }

    /// Updates the attack notification settings of an IP address.
    pub async fn update_attack_notification_settings(
        &self,
        id: &str,
        ip: &str,
        data: AttackNotificationSettings,
    ) -> ApiResponse<AttackNotificationSettings> {
        self.rest
            .request(
                ApiRequest::put(format!("/services/{id}/firewall/{ip}/attack-notification"))
                    .json(&data),
            )
            .await
    }

    /// Removes the reverse DNS entry of an IP address.
    pub async fn reset_reverse_dns(&self, id: &str, ip: &str) -> ApiResponse<()> {
        self.rest
            .request_unit(ApiRequest::delete(format!(
                "/services/{id}/firewall/{ip}/rdns"
            )))
            .await
    }

    /// Fetches the reverse DNS entry of an IP address.
    pub async fn get_reverse_dns(&self, id: &str, ip: &str) -> ApiResponse<FirewallReverseDns> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/firewall/{ip}/rdns")))
            .await
    }

    /// Sets or updates the reverse DNS entry of an IP address.
    pub async fn upsert_reverse_dns(
        &self,
        id: &str,
        ip: &str,
        data: FirewallReverseDns,
    ) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::put(format!("/services/{id}/firewall/{ip}/rdns")).json(&data),
            )
            .await
    }

    /// Deletes a firewall rule.
    pub async fn delete_rule(&self, id: &str, ip: &str, rule_id: &str) -> ApiResponse<()> {
        self.rest
            .request_unit(ApiRequest::delete(format!(
                "/services/{id}/firewall/{ip}/rules/{rule_id}"
            )))
            .await
    }

    /// Lists the firewall rules of an IP address.
    pub async fn get_rules(&self, id: &str, ip: &str) -> ApiResponse<Vec<FirewallRule>> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/firewall/{ip}/rules"
            )))
            .await
    }

    /// Fetches the traffic statistics of an IP address.
    pub async fn get_statistics(&self, id: &str, ip: &str) -> ApiResponse<Vec<FirewallStatistics>> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/firewall/{ip}/stats"
            )))
            .await
    }
}

/// Attack detected against an IP address.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallAttackLog {
    /// Unix timestamp in milliseconds.
    pub started_at: i64,
    /// Unix timestamp in milliseconds; `None` while the attack is ongoing.
    pub ended_at: Option<i64>,
    /// Attack vectors observed, e.g. `TCP_SYN`, `ICMP`.
    pub vectors: Vec<String>,
    /// Peak traffic in packets per second.
    pub peak: u64,
}

/// Attack notification settings of an IP address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackNotificationSettings {
    pub email_notification: bool,
    #[serde(rename = "discordWebhookURL")]
    pub discord_webhook_url: Option<String>,
}

/// Reverse DNS entry of an IP address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallReverseDns {
    pub rdns: Option<String>,
}

/// Firewall rule opening a service port.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FirewallRule {
    pub id: i64,
    pub protocol: String,
    /// Service the rule is associated with, e.g. `Minecraft`.
    pub service: String,
    pub port: u16,
}

/// Traffic statistics sample of an IP address.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallStatistics {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// Traffic passed, in bytes, as a decimal string.
    pub total_pass_traffic: String,
    /// Traffic dropped, in bytes, as a decimal string.
    pub total_drop_traffic: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AttackNotificationSettings;

    #[test]
    fn notification_settings_round_trip_irregular_wire_name() {
        let settings: AttackNotificationSettings = serde_json::from_value(json!({
            "emailNotification": true,
            "discordWebhookURL": "https://discord.com/api/webhooks/1/abc"
        }))
        .expect("must deserialize settings");
        assert!(settings.email_notification);

        let body = serde_json::to_value(&settings).expect("must serialize");
        assert_eq!(
            body.get("discordWebhookURL"),
            Some(&json!("https://discord.com/api/webhooks/1/abc"))
        );
    }
}
