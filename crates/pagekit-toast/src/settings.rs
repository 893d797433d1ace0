use serde::{
    Deserialize,
    Serialize,
};

use crate::models::ToastKind;

pub const DEFAULT_CONTAINER_ID: &str = "toast-container";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastSettings {
    #[serde(default = "default_container_id")]
    pub container_id: String,

    #[serde(default = "default_entrance_delay_ms")]
    pub entrance_delay_ms: u64,

    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,

    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: i64,

    #[serde(default = "default_duration_ms")]
    pub success_ms: i64,

    #[serde(default = "default_error_ms")]
    pub error_ms: i64,

    #[serde(default = "default_warning_ms")]
    pub warning_ms: i64,

    #[serde(default = "default_duration_ms")]
    pub info_ms: i64,

    #[serde(default = "default_alert_selector")]
    pub alert_selector: String,

    #[serde(default = "default_sweep_on_load")]
    pub sweep_on_load: bool,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            entrance_delay_ms: default_entrance_delay_ms(),
            fade_out_ms: default_fade_out_ms(),
            default_duration_ms: default_duration_ms(),
            success_ms: default_duration_ms(),
            error_ms: default_error_ms(),
            warning_ms: default_warning_ms(),
            info_ms: default_duration_ms(),
            alert_selector: default_alert_selector(),
            sweep_on_load: default_sweep_on_load(),
        }
    }
}

impl ToastSettings {
    pub fn duration_for(&self, kind: ToastKind) -> i64 {
        match kind {
            ToastKind::Success => self.success_ms,
            ToastKind::Error => self.error_ms,
            ToastKind::Warning => self.warning_ms,
            ToastKind::Info => self.info_ms,
        }
    }
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

fn default_entrance_delay_ms() -> u64 {
    10
}

fn default_fade_out_ms() -> u64 {
    300
}

fn default_duration_ms() -> i64 {
    3000
}

fn default_error_ms() -> i64 {
    5000
}

fn default_warning_ms() -> i64 {
    4000
}

fn default_alert_selector() -> String {
    ".alert".to_string()
}

fn default_sweep_on_load() -> bool {
    true
}
