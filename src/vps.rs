//! VPS endpoints: power actions, backups, password changes, reinstall,
//! usage graphs and task history.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::rest::RestClient;

/// VPS endpoints, scoped per service ID.
#[derive(Clone, Copy, Debug)]
pub struct VpsApi<'a> {
    rest: &'a RestClient,
}

impl<'a> VpsApi<'a> {
    pub(crate) fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Performs a power action on a VPS.
    pub async fn perform_action(&self, id: &str, action: VpsAction) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::post(format!("/services/{id}/vps/action"))
                    .json(&json!({ "action": action })),
            )
            .await
    }

    /// Restores a VPS backup.
    pub async fn restore_backup(&self, id: &str, file: &str) -> ApiResponse<()> {
        self.rest
            .request_unit(ApiRequest::post(format!(
                "/services/{id}/vps/backups/{file}/restore"
            )))
            .await
    }

    /// Updates the lock flag or notes of a VPS backup.
    pub async fn update_backup(
        &self,
        id: &str,
        file: &str,
        data: VpsUpdateBackupData,
    ) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::patch(format!("/services/{id}/vps/backups/{file}")).json(&data),
            )
            .await
    }

    /// Lists the backups of a VPS.
    pub async fn get_backups(&self, id: &str) -> ApiResponse<Vec<VpsBackup>> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/vps/backups")))
            .await
    }

    /// Creates a new VPS backup.
    pub async fn create_backup(&self, id: &str) -> ApiResponse<()> {
        self.rest
            .request_unit(ApiRequest::post(format!("/services/{id}/vps/backups")))
            .await
    }

    /// Enables or disables daily backups for a VPS.
    pub async fn change_daily_backup_status(
        &self,
        id: &str,
        data: VpsDailyBackupStatusData,
    ) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::put(format!("/services/{id}/vps/backups/daily-backups")).json(&data),
            )
            .await
    }

    /// Changes the password of a VPS user.
    pub async fn change_password(&self, id: &str, data: VpsChangePasswordData) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::post(format!("/services/{id}/vps/change-password")).json(&data),
            )
            .await
    }

    /// Fetches the VPS usage time series (network, CPU, RAM, disk).
    pub async fn get_usage_statistics(&self, id: &str) -> ApiResponse<Vec<VpsUsageGraphEntry>> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/vps/graphs")))
            .await
    }

    /// Fetches the details of a VPS.
    pub async fn get_details(&self, id: &str) -> ApiResponse<VpsDetails> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/vps/info")))
            .await
    }

    /// Lists the OS templates available for a VPS.
    pub async fn get_os_templates(&self, id: &str) -> ApiResponse<Vec<VpsOsTemplate>> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/vps/os-templates")))
            .await
    }

    /// Reinstalls a VPS with a new operating system.
    pub async fn reinstall(&self, id: &str, data: VpsReinstallData) -> ApiResponse<()> {
        self.rest
            .request_unit(ApiRequest::post(format!("/services/{id}/vps/reinstall")).json(&data))
            .await
    }

    /// Lists the recent tasks of a VPS.
    pub async fn get_tasks(&self, id: &str) -> ApiResponse<Vec<VpsTask>> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/vps/tasks")))
            .await
    }
}

/// Power action to perform on a VPS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VpsAction {
    Start,
    Shutdown,
    Reset,
    Stop,
}

/// Backup of a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsBackup {
    /// Backup file identifier, e.g.
    /// `backup-pool:backup/vm/2702/2025-08-09T18:11:41Z`.
    pub file: String,
    pub notes: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

/// Password change request for a VPS user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsChangePasswordData {
    pub username: String,
    pub password: String,
}

/// One sample of the VPS usage graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsUsageGraphEntry {
    /// Network outbound traffic in bytes.
    pub net_out: u64,
    /// Network inbound traffic in bytes.
    pub net_in: u64,
    /// RAM usage in bytes.
    pub ram_usage: u64,
    /// CPU usage in percent.
    pub cpu_usage: f64,
    /// Disk read in bytes.
    pub disk_read: u64,
    /// Disk write in bytes.
    pub disk_write: u64,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// VNC access details of a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VpsVncDetails {
    pub port: String,
    pub ticket: String,
}

/// Operating system installed on a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VpsOsDetails {
    pub id: String,
    pub name: String,
}

/// CPU allocation and usage of a VPS.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VpsCpuDetails {
    pub percent: f64,
    pub cores: u32,
}

/// RAM usage of a VPS, in bytes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VpsRamUsage {
    pub limit: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// Detailed state of a VPS.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsDetails {
    pub vps_id: i64,
    pub proxmox_id: i64,
    pub hostname: String,
    /// `true` while the VPS is running.
    pub status: bool,
    pub vnc: VpsVncDetails,
    pub os: VpsOsDetails,
    /// Total disk space in bytes.
    pub disk: u64,
    pub ips: Vec<String>,
    pub cpu: VpsCpuDetails,
    pub ram: VpsRamUsage,
}

/// Operating system template available for a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VpsOsTemplate {
    pub id: i64,
    pub name: String,
}

/// Reinstall request for a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsReinstallData {
    /// New root password.
    pub password: String,
    /// ID of the OS template to install.
    pub os_id: i64,
}

/// Task executed on a VPS, such as a shutdown or a backup restore.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsTask {
    /// Hypervisor action, e.g. `qmshutdown`.
    pub action: String,
    pub status: String,
    /// Unix timestamp in milliseconds.
    pub started_at: i64,
    /// Unix timestamp in milliseconds; `None` while still running.
    pub ended_at: Option<i64>,
}

/// Fields of a VPS backup that can be updated. Omitted fields are left
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsUpdateBackupData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Daily backup toggle for a VPS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VpsDailyBackupStatusData {
    pub enabled: bool,
}
