// ── Device identity and capabilities (`GET /api/v1.0/device`) ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::interface::InterfaceType;
use super::{lenient_strings, lenient_u32};

/// Media string the switch reports for SFP cages.
pub const MEDIA_SFP: &str = "SFP";

/// Who the switch says it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceIdentification {
    pub mac: String,
    pub model: String,
    pub family: String,
    #[serde(rename = "subsystemID")]
    pub subsystem_id: String,
    pub firmware_version: String,
    pub firmware: String,
    pub product: String,
    pub server_version: String,
    pub bridge_version: String,
}

/// Capability schema for one interface.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InterfaceType,
    pub support_block: bool,
    pub support_delete: bool,
    pub support_reset: bool,
    pub configurable: bool,
    #[serde(rename = "supportDHCPSnooping")]
    pub support_dhcp_snooping: bool,
    pub support_isolate: bool,
    pub support_auto_edge: bool,
    #[serde(rename = "maxMTU", deserialize_with = "lenient_u32")]
    pub max_mtu: u32,
    #[serde(rename = "supportPOE")]
    pub support_poe: bool,
    pub support_cable_test: bool,
    pub poe_values: Vec<String>,
    pub media: String,
    pub speed_values: Vec<String>,
    // LAG only
    pub support_link_trap: bool,
    pub load_balance_values: Vec<String>,
}

impl InterfaceInfo {
    pub fn is_port(&self) -> bool {
        self.kind == InterfaceType::Port
    }

    pub fn is_lag(&self) -> bool {
        self.kind == InterfaceType::Lag
    }

    pub fn is_sfp(&self) -> bool {
        self.media == MEDIA_SFP
    }
}

/// What the switch can do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceCapabilities {
    pub interfaces: Vec<InterfaceInfo>,
    pub services: Vec<String>,
    /// Free-form device feature flags.
    #[serde(rename = "device")]
    pub device_features: Map<String, Value>,
    pub tools: Vec<String>,
    pub vlan_switching: Map<String, Value>,
    pub uas: bool,
    pub wifi: Map<String, Value>,
}

/// The full device-info document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeSwitchDevice {
    #[serde(deserialize_with = "lenient_strings")]
    pub error_codes: Vec<String>,
    pub identification: DeviceIdentification,
    pub capabilities: DeviceCapabilities,
}

impl EdgeSwitchDevice {
    pub fn has_errors(&self) -> bool {
        !self.error_codes.is_empty()
    }

    pub fn port_count(&self) -> usize {
        self.interfaces().filter(|i| i.is_port()).count()
    }

    pub fn poe_port_count(&self) -> usize {
        self.interfaces()
            .filter(|i| i.is_port() && i.support_poe)
            .count()
    }

    pub fn sfp_port_count(&self) -> usize {
        self.interfaces().filter(|i| i.is_port() && i.is_sfp()).count()
    }

    pub fn lag_count(&self) -> usize {
        self.interfaces().filter(|i| i.is_lag()).count()
    }

    /// Linear scan; ids are unique in practice but not enforced.
    pub fn interface_by_id(&self, id: &str) -> Option<&InterfaceInfo> {
        self.interfaces().find(|i| i.id == id)
    }

    fn interfaces(&self) -> impl Iterator<Item = &InterfaceInfo> {
        self.capabilities.interfaces.iter()
    }
}
