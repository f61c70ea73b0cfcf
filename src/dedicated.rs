//! Dedicated server endpoints: power actions, hardware inventory,
//! reinstall and task history.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::rest::RestClient;

/// Dedicated server endpoints, scoped per service ID.
#[derive(Clone, Copy, Debug)]
pub struct DedicatedServerApi<'a> {
    rest: &'a RestClient,
}

impl<'a> DedicatedServerApi<'a> {
    pub(crate) fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Performs a power action on a dedicated server.
    pub async fn perform_action(
        &self,
        id: &str,
        action: DedicatedServerAction,
    ) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::post(format!("/services/{id}/dedicated/action"))
                    .json(&json!({ "action": action })),
            )
            .await
    }

    /// Fetches the hardware inventory of a dedicated server.
    pub async fn get_hardware_components(
        &self,
        id: &str,
    ) -> ApiResponse<DedicatedServerHardwareComponent> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/dedicated/hardware")))
            .await
    }

    /// Fetches the details of a dedicated server.
    pub async fn get_details(&self, id: &str) -> ApiResponse<DedicatedServerDetails> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/dedicated/info")))
            .await
    }

    /// Lists the OS templates available for a dedicated server.
    pub async fn get_os_templates(&self, id: &str) -> ApiResponse<Vec<DedicatedServerOsTemplate>> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/dedicated/os-templates"
            )))
            .await
    }

    /// Fetches the progress of a running reinstall.
    pub async fn get_reinstall_status(
        &self,
        id: &str,
    ) -> ApiResponse<DedicatedServerReinstallStatus> {
        self.rest
            .request(ApiRequest::get(format!(
                "/services/{id}/dedicated/reinstall-status"
            )))
            .await
    }

    /// Reinstalls a dedicated server with a new operating system.
    pub async fn reinstall(
        &self,
        id: &str,
        data: DedicatedServerReinstallData,
    ) -> ApiResponse<()> {
        self.rest
            .request_unit(
                ApiRequest::post(format!("/services/{id}/dedicated/reinstall")).json(&data),
            )
            .await
    }

    /// Lists the recent tasks of a dedicated server.
    pub async fn get_tasks(&self, id: &str) -> ApiResponse<Vec<DedicatedServerTask>> {
        self.rest
            .request(ApiRequest::get(format!("/services/{id}/dedicated/tasks")))
            .await
    }
}

/// Power action to perform on a dedicated server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedicatedServerAction {
    #[serde(rename = "setPowerOn")]
    Start,
    #[serde(rename = "setPowerOff")]
    Stop,
    #[serde(rename = "setPowerReset")]
    Restart,
}

/// CPU fitted in a dedicated server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedServerCpuDetails {
    pub model: String,
    /// Base clock in MHz.
    pub speed: u32,
    /// Turbo clock in MHz.
    pub turbo_speed: u32,
    pub cores: u32,
    pub threads: u32,
}

/// Detailed state of a dedicated server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedServerDetails {
    pub dedicated_id: String,
    /// `true` while the server is powered on.
    pub status: bool,
    pub available_actions: Vec<DedicatedServerAction>,
    pub mainboard: String,
    /// RAM in GB.
    pub ram: u32,
    /// Total disk space in GB.
    pub disk: u32,
    pub cpu: DedicatedServerCpuDetails,
}

/// Operating system template available for a dedicated server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DedicatedServerOsTemplate {
    pub id: i64,
    pub name: String,
}

/// Reinstall request for a dedicated server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedServerReinstallData {
    /// New root password.
    pub password: String,
    /// ID of the OS template to install.
    pub os_id: i64,
}

/// Task executed on a dedicated server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedServerTask {
    pub action: String,
    /// Unix timestamp in milliseconds.
    pub started_at: i64,
    /// Unix timestamp in milliseconds.
    pub updated_at: i64,
}

/// Hardware component of a dedicated server.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedServerHardwareComponent {
    /// Component name, e.g. `CPU Model`.
    pub component: String,
    pub model: String,
    pub value: f64,
    /// Unit of `value`, e.g. ` MHz`.
    pub value_suffix: String,
}

/// Step of the dedicated server reinstall process, as reported by the
/// reinstall-status endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum DedicatedServerReinstallStep {
    RebootingServer,
    PreparingBootEnvironment,
    InstallingOperatingSystem,
    InstallationCompleted,
}

impl TryFrom<u8> for DedicatedServerReinstallStep {
    type Error = String;

    fn try_from(step: u8) -> Result<Self, Self::Error> {
        match step {
            0 => Ok(Self::RebootingServer),
            1 => Ok(Self::PreparingBootEnvironment),
            2 => Ok(Self::InstallingOperatingSystem),
            3 => Ok(Self::InstallationCompleted),
            other => Err(format!("unknown reinstall step {other}")),
        }
    }
}

/// Progress of a dedicated server reinstall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct DedicatedServerReinstallStatus {
    pub completed: bool,
    pub step: DedicatedServerReinstallStep,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        DedicatedServerAction, DedicatedServerReinstallStatus, DedicatedServerReinstallStep,
    };

    #[test]
    fn action_serializes_to_power_verbs() {
        assert_eq!(
            serde_json::to_value(DedicatedServerAction::Start).expect("must serialize"),
            json!("setPowerOn")
        );
        assert_eq!(
            serde_json::to_value(DedicatedServerAction::Restart).expect("must serialize"),
            json!("setPowerReset")
        );
    }

    #[test]
    fn reinstall_step_deserializes_from_number() {
        let status: DedicatedServerReinstallStatus =
            serde_json::from_value(json!({"completed": false, "step": 1}))
                .expect("must deserialize status");
        assert_eq!(
            status.step,
            DedicatedServerReinstallStep::PreparingBootEnvironment
        );
    }

    #[test]
    fn unknown_reinstall_step_is_rejected() {
        let result: Result<DedicatedServerReinstallStep, _> = serde_json::from_value(json!(9));
        assert!(result.is_err());
    }
}
